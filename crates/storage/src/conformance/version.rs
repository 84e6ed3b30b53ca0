use std::future::Future;

use super::{make_contract, next_version, TestResult};
use crate::{ContractStore, StorageError};

pub(super) async fn run_version_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "version",
            "update_with_current_version_applies",
            update_with_current_version_applies(factory).await,
        ),
        TestResult::from_result(
            "version",
            "update_with_stale_version_conflicts",
            update_with_stale_version_conflicts(factory).await,
        ),
        TestResult::from_result(
            "version",
            "conflict_leaves_stored_contract_untouched",
            conflict_leaves_stored_contract_untouched(factory).await,
        ),
        TestResult::from_result(
            "version",
            "sequential_updates_chain_versions",
            sequential_updates_chain_versions(factory).await,
        ),
    ]
}

async fn update_with_current_version_applies<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    let original = make_contract("v-1", 3);
    store
        .insert_contract(original.clone())
        .await
        .map_err(|e| format!("insert failed: {e}"))?;
    let revised = next_version(&original);
    store
        .update_contract(revised.clone(), 3)
        .await
        .map_err(|e| format!("update failed: {e}"))?;
    let loaded = store
        .get_contract("v-1")
        .await
        .map_err(|e| format!("get failed: {e}"))?
        .ok_or("contract vanished")?;
    if loaded != revised {
        return Err(format!("expected revised contract, got version {}", loaded.version));
    }
    Ok(())
}

async fn update_with_stale_version_conflicts<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    let original = make_contract("v-2", 2);
    store
        .insert_contract(original.clone())
        .await
        .map_err(|e| format!("insert failed: {e}"))?;
    match store.update_contract(next_version(&original), 1).await {
        Err(StorageError::ConcurrentConflict {
            id,
            expected_version,
            found_version,
        }) => {
            if id != "v-2" || expected_version != 1 || found_version != 2 {
                return Err(format!(
                    "conflict fields wrong: id={id} expected={expected_version} found={found_version}"
                ));
            }
            Ok(())
        }
        Err(e) => Err(format!("expected ConcurrentConflict, got: {e}")),
        Ok(_) => Err("stale update was accepted".to_string()),
    }
}

async fn conflict_leaves_stored_contract_untouched<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    let original = make_contract("v-3", 2);
    store
        .insert_contract(original.clone())
        .await
        .map_err(|e| format!("insert failed: {e}"))?;
    let _ = store.update_contract(next_version(&original), 5).await;
    let loaded = store
        .get_contract("v-3")
        .await
        .map_err(|e| format!("get failed: {e}"))?
        .ok_or("contract vanished")?;
    if loaded != original {
        return Err("rejected update modified the stored contract".to_string());
    }
    Ok(())
}

async fn sequential_updates_chain_versions<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    let mut current = make_contract("v-4", 1);
    store
        .insert_contract(current.clone())
        .await
        .map_err(|e| format!("insert failed: {e}"))?;
    for _ in 0..3 {
        let next = next_version(&current);
        current = store
            .update_contract(next, current.version)
            .await
            .map_err(|e| format!("update failed: {e}"))?;
    }
    if current.version != 4 {
        return Err(format!("expected version 4, got {}", current.version));
    }
    Ok(())
}
