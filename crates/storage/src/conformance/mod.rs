//! Conformance test suite for `ContractStore` implementations.
//!
//! This module provides a backend-agnostic test suite that any `ContractStore`
//! implementation can run to verify correctness. The suite covers:
//!
//! - **Initialization**: insert, read back, listing
//! - **Version validation / OCC**: stale updates rejected, fresh updates applied
//! - **Error handling**: correct error variants for invalid operations
//! - **Concurrency**: racing updates against one version, exactly one wins
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory function that
//! creates a fresh, empty store for each test:
//!
//! ```ignore
//! use quire_storage::conformance::run_conformance_suite;
//!
//! #[tokio::test]
//! async fn sqlite_conformance() {
//!     let report = run_conformance_suite(|| async {
//!         create_test_sqlite_store().await
//!     }).await;
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod concurrent;
mod error;
mod init;
mod version;

use std::fmt;
use std::future::Future;

use quire_core::{Bindings, Contract, ContractStatus, ContractType};

use crate::ContractStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category (e.g. "init", "version").
    pub category: String,
    /// Test name (e.g. "insert_then_get_round_trips").
    pub name: String,
    /// Whether the test passed.
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn pass(category: &str, name: &str) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed: true,
            message: None,
        }
    }

    fn fail(category: &str, name: &str, msg: String) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed: false,
            message: Some(msg),
        }
    }

    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::pass(category, name),
            Err(msg) => Self::fail(category, name, msg),
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in &self.results {
            if !r.passed {
                writeln!(
                    f,
                    "  FAIL [{}/{}]: {}",
                    r.category,
                    r.name,
                    r.message.as_deref().unwrap_or("(no message)")
                )?;
            }
        }
        Ok(())
    }
}

/// Run the full conformance suite against a store backend.
///
/// The `factory` function is called once per test to create a fresh, empty
/// store, ensuring test isolation.
pub async fn run_conformance_suite<S, F, Fut>(factory: F) -> ConformanceReport
where
    S: ContractStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.extend(init::run_init_tests(&factory).await);
    results.extend(error::run_error_tests(&factory).await);
    results.extend(version::run_version_tests(&factory).await);
    results.extend(concurrent::run_concurrent_tests(&factory).await);

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers: record constructors with sensible defaults ──────────────────────

fn make_contract(id: &str, version: u32) -> Contract {
    let mut variables = Bindings::new();
    variables.insert("client_name".to_string(), serde_json::json!("Test Client"));
    variables.insert("coverage_hours".to_string(), serde_json::json!(6));
    Contract {
        id: id.to_string(),
        contract_type: ContractType::Photography,
        title: "Photography Services Agreement - Test Client".to_string(),
        client_name: "Test Client".to_string(),
        client_email: "client@example.com".to_string(),
        status: ContractStatus::Draft,
        version,
        variables,
        field_values: Default::default(),
        signature_fields: Vec::new(),
        history: Vec::new(),
        audit_trail: Vec::new(),
        created_at: "2025-01-01T00:00:00Z".to_string(),
        updated_at: "2025-01-01T00:00:00Z".to_string(),
    }
}

/// `contract` with its version bumped and a variable changed.
fn next_version(contract: &Contract) -> Contract {
    let mut next = contract.clone();
    next.version += 1;
    next.variables.insert(
        "coverage_hours".to_string(),
        serde_json::json!(contract.version + 7),
    );
    next.updated_at = "2025-01-02T00:00:00Z".to_string();
    next
}
