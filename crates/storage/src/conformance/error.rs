use std::future::Future;

use super::{make_contract, TestResult};
use crate::{ContractStore, StorageError};

pub(super) async fn run_error_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "error",
            "duplicate_insert_returns_already_exists",
            duplicate_insert_returns_already_exists(factory).await,
        ),
        TestResult::from_result(
            "error",
            "update_missing_returns_not_found",
            update_missing_returns_not_found(factory).await,
        ),
    ]
}

async fn duplicate_insert_returns_already_exists<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    store
        .insert_contract(make_contract("e-1", 1))
        .await
        .map_err(|e| format!("first insert failed: {e}"))?;
    match store.insert_contract(make_contract("e-1", 1)).await {
        Err(StorageError::AlreadyExists { id }) if id == "e-1" => Ok(()),
        Err(e) => Err(format!("expected AlreadyExists, got: {e}")),
        Ok(_) => Err("duplicate insert was accepted".to_string()),
    }
}

async fn update_missing_returns_not_found<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    match store.update_contract(make_contract("e-2", 2), 1).await {
        Err(StorageError::NotFound { id }) if id == "e-2" => Ok(()),
        Err(e) => Err(format!("expected NotFound, got: {e}")),
        Ok(_) => Err("update of a missing contract was accepted".to_string()),
    }
}
