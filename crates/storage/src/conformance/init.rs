use std::future::Future;

use super::{make_contract, TestResult};
use crate::ContractStore;

pub(super) async fn run_init_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "init",
            "get_missing_returns_none",
            get_missing_returns_none(factory).await,
        ),
        TestResult::from_result(
            "init",
            "insert_then_get_round_trips",
            insert_then_get_round_trips(factory).await,
        ),
        TestResult::from_result(
            "init",
            "insert_returns_stored_contract",
            insert_returns_stored_contract(factory).await,
        ),
        TestResult::from_result(
            "init",
            "list_reports_every_contract_in_id_order",
            list_reports_every_contract_in_id_order(factory).await,
        ),
        TestResult::from_result(
            "init",
            "empty_store_lists_nothing",
            empty_store_lists_nothing(factory).await,
        ),
    ]
}

async fn get_missing_returns_none<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    match store.get_contract("nope").await {
        Ok(None) => Ok(()),
        Ok(Some(c)) => Err(format!("expected None, got contract {}", c.id)),
        Err(e) => Err(format!("expected Ok(None), got error: {e}")),
    }
}

async fn insert_then_get_round_trips<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    let contract = make_contract("c-1", 1);
    store
        .insert_contract(contract.clone())
        .await
        .map_err(|e| format!("insert failed: {e}"))?;
    let loaded = store
        .get_contract("c-1")
        .await
        .map_err(|e| format!("get failed: {e}"))?
        .ok_or("inserted contract not found")?;
    if loaded != contract {
        return Err(format!("round trip mismatch: {loaded:?}"));
    }
    Ok(())
}

async fn insert_returns_stored_contract<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    let contract = make_contract("c-2", 1);
    let returned = store
        .insert_contract(contract.clone())
        .await
        .map_err(|e| format!("insert failed: {e}"))?;
    if returned != contract {
        return Err("insert returned a different contract".to_string());
    }
    Ok(())
}

async fn list_reports_every_contract_in_id_order<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    for id in ["c-b", "c-a", "c-c"] {
        store
            .insert_contract(make_contract(id, 1))
            .await
            .map_err(|e| format!("insert {id} failed: {e}"))?;
    }
    let ids: Vec<String> = store
        .list_contracts()
        .await
        .map_err(|e| format!("list failed: {e}"))?
        .into_iter()
        .map(|s| s.id)
        .collect();
    if ids != ["c-a", "c-b", "c-c"] {
        return Err(format!("unexpected listing: {ids:?}"));
    }
    Ok(())
}

async fn empty_store_lists_nothing<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    let list = store
        .list_contracts()
        .await
        .map_err(|e| format!("list failed: {e}"))?;
    if !list.is_empty() {
        return Err(format!("expected empty listing, got {} entries", list.len()));
    }
    Ok(())
}
