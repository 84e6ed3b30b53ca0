use std::future::Future;

use super::{make_contract, next_version, TestResult};
use crate::{ContractStore, StorageError};

pub(super) async fn run_concurrent_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![TestResult::from_result(
        "concurrent",
        "racing_revisions_exactly_one_wins",
        racing_revisions_exactly_one_wins(factory).await,
    )]
}

/// Two sessions load the same version and both try to save a revision.
async fn racing_revisions_exactly_one_wins<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    let original = make_contract("r-1", 1);
    store
        .insert_contract(original.clone())
        .await
        .map_err(|e| format!("insert failed: {e}"))?;

    let mut first = next_version(&original);
    first.title = "first session".to_string();
    let mut second = next_version(&original);
    second.title = "second session".to_string();

    let (a, b) = tokio::join!(
        store.update_contract(first, original.version),
        store.update_contract(second, original.version)
    );

    let outcomes = [&a, &b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    let conflicts = outcomes
        .iter()
        .filter(|r| matches!(r, Err(StorageError::ConcurrentConflict { .. })))
        .count();
    if wins != 1 || conflicts != 1 {
        return Err(format!(
            "expected one win and one conflict, got {wins} win(s) and {conflicts} conflict(s)"
        ));
    }
    Ok(())
}
