//! CLI integration tests for every subcommand.
//!
//! Uses `assert_cmd` to spawn the `quire` binary and verify exit codes,
//! stdout content, and stderr content. Each test runs in its own temporary
//! directory holding a `quire.toml` that points the contract store there.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Answers for the photography flow, one line per visible question, then
/// an empty line to finish the review.
const PHOTOGRAPHY_ANSWERS: &str = "Ada Park\nada@example.com\n2026-05-01\n\n2026-09-12\nHarbor Hall\n7\n\n\n\n2400\n\n\n\n\n\n";

/// Keep the first six answers, change coverage hours, keep the rest.
const REVISION_ANSWERS: &str = "\n\n\n\n\n\n9\n";

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("quire.toml"),
        "[store]\ndir = \"contracts\"\n\n[session]\nactor = \"tester\"\n",
    )
    .unwrap();
    dir
}

/// Helper: create a Command for the `quire` binary, rooted at `dir`.
fn quire(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("quire");
    cmd.current_dir(dir);
    cmd.env_remove("QUIRE_LOG");
    cmd
}

fn write_contract(dir: &Path, variables: serde_json::Value) -> std::path::PathBuf {
    let path = dir.join("contract.json");
    let contract = serde_json::json!({
        "id": "c-1",
        "contract_type": "photography",
        "title": "Photography Services Agreement - Ada Park",
        "version": 1,
        "variables": variables,
    });
    fs::write(&path, serde_json::to_string_pretty(&contract).unwrap()).unwrap();
    path
}

fn create_contract(dir: &Path, id: &str) {
    quire(dir)
        .args(["new", "photography", "--id", id])
        .write_stdin(PHOTOGRAPHY_ANSWERS)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("created {}", id)));
}

// ──────────────────────────────────────────────
// 1. Help and registry commands
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    let dir = workspace();
    quire(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Contract templates, question flows and versioned revisions",
        ));
}

#[test]
fn templates_lists_builtin_types() {
    let dir = workspace();
    quire(dir.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("photography (photography-v1)"))
        .stdout(predicate::str::contains("content_creation"))
        .stdout(predicate::str::contains("web_development"))
        .stdout(predicate::str::contains("coverage_hours"));
}

#[test]
fn templates_json_is_an_array() {
    let dir = workspace();
    let out = quire(dir.path())
        .args(["--output", "json", "templates"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
}

#[test]
fn validate_builtin_registry_passes() {
    let dir = workspace();
    quire(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("photography-v1: ok"));
}

#[test]
fn validate_reports_broken_registry() {
    let dir = workspace();
    let registry = serde_json::json!([{
        "template": {
            "id": "broken",
            "contract_type": "photography",
            "name": "Broken",
            "body_markup": "Hello {{else}} {{#if a}}",
            "variables": [{ "name": "a", "label": "A", "type": "text" }]
        },
        "questions": []
    }]);
    let path = dir.path().join("registry.json");
    fs::write(&path, registry.to_string()).unwrap();
    quire(dir.path())
        .args(["validate", "--registry"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("broken: 2 issue(s)"))
        .stdout(predicate::str::contains("never closed"));
}

#[test]
fn questions_prints_flow_with_conditions() {
    let dir = workspace();
    quire(dir.path())
        .args(["questions", "photography"])
        .assert()
        .success()
        .stdout(predicate::str::contains("coverage_hours"))
        .stdout(predicate::str::contains("[required]"))
        .stdout(predicate::str::contains("when {\"op\":\"truthy\""));
}

#[test]
fn unknown_contract_type_fails() {
    let dir = workspace();
    quire(dir.path())
        .args(["questions", "wedding_cake"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown contract type 'wedding_cake'"));
}

// ──────────────────────────────────────────────
// 2. Rendering
// ──────────────────────────────────────────────

#[test]
fn render_spells_counts_and_escapes_values() {
    let dir = workspace();
    let path = write_contract(
        dir.path(),
        serde_json::json!({
            "client_name": "<b>Ada</b>",
            "coverage_hours": 7,
            "base_fee": 500
        }),
    );
    quire(dir.path())
        .args(["render", "--mode", "pdf"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("7 (seven) hours"))
        .stdout(predicate::str::contains("$500."))
        .stdout(predicate::str::contains("&lt;b&gt;Ada&lt;/b&gt;"))
        .stdout(predicate::str::contains("signature-blank"));
}

#[test]
fn render_uses_configured_mode_and_json_output() {
    let dir = workspace();
    fs::write(
        dir.path().join("quire.toml"),
        "[render]\ndefault_mode = \"interactive\"\n",
    )
    .unwrap();
    let path = write_contract(dir.path(), serde_json::json!({}));
    let out = quire(dir.path())
        .args(["--output", "json", "render"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(out.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(parsed["mode"], "interactive");
    assert!(parsed["html"].as_str().unwrap().contains("signature-anchor"));
}

#[test]
fn render_page_wraps_in_html_document() {
    let dir = workspace();
    let path = write_contract(dir.path(), serde_json::json!({}));
    quire(dir.path())
        .args(["render", "--page"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("<h1>Photography Services Agreement</h1>"));
}

#[test]
fn render_missing_file_fails() {
    let dir = workspace();
    quire(dir.path())
        .args(["render", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading 'nope.json'"));
}

// ──────────────────────────────────────────────
// 3. Authoring and revision
// ──────────────────────────────────────────────

#[test]
fn new_then_show_stores_a_draft() {
    let dir = workspace();
    create_contract(dir.path(), "c-100");
    assert!(dir.path().join("contracts").join("c-100.json").exists());

    let out = quire(dir.path())
        .args(["--output", "json", "show", "c-100"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let contract: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(contract["version"], 1);
    assert_eq!(contract["status"], "draft");
    assert_eq!(contract["client_name"], "Ada Park");
    assert_eq!(contract["variables"]["coverage_hours"], 7);
    assert_eq!(contract["audit_trail"][0]["actor"], "tester");
}

#[test]
fn new_rejects_taken_ids() {
    let dir = workspace();
    create_contract(dir.path(), "c-100");
    quire(dir.path())
        .args(["new", "photography", "--id", "c-100"])
        .write_stdin(PHOTOGRAPHY_ANSWERS)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn revise_saves_the_next_version() {
    let dir = workspace();
    create_contract(dir.path(), "c-100");
    quire(dir.path())
        .args(["revise", "c-100"])
        .write_stdin(REVISION_ANSWERS)
        .assert()
        .success()
        .stdout(predicate::str::contains("Coverage hours: 7 -> 9"))
        .stdout(predicate::str::contains("saved c-100 version 2 (1 change(s))"));

    quire(dir.path())
        .args(["show", "c-100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("version:  2"))
        .stdout(predicate::str::contains("v1 "))
        .stdout(predicate::str::contains("coverage_hours = 9"));
}

#[test]
fn revise_without_edits_saves_nothing() {
    let dir = workspace();
    create_contract(dir.path(), "c-100");
    quire(dir.path())
        .args(["revise", "c-100"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("no changes; c-100 left at version 1"));
}

#[test]
fn revise_missing_contract_fails() {
    let dir = workspace();
    quire(dir.path())
        .args(["revise", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("contract not found: ghost"));
}

#[test]
fn list_shows_stored_contracts() {
    let dir = workspace();
    quire(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("no contracts"));
    create_contract(dir.path(), "c-100");
    quire(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("c-100"))
        .stdout(predicate::str::contains("draft"));
}

// ──────────────────────────────────────────────
// 4. Diff
// ──────────────────────────────────────────────

#[test]
fn diff_labels_changed_fields() {
    let dir = workspace();
    let before = dir.path().join("before.json");
    let after = dir.path().join("after.json");
    fs::write(&before, r#"{"coverage_hours": 8, "base_fee": 500}"#).unwrap();
    fs::write(&after, r#"{"coverage_hours": "8", "base_fee": 650}"#).unwrap();
    quire(dir.path())
        .args(["diff", "--type", "photography"])
        .arg(&before)
        .arg(&after)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 change(s)"))
        .stdout(predicate::str::contains("(base_fee): 500 -> 650"));
}

#[test]
fn diff_identical_files_reports_no_changes() {
    let dir = workspace();
    let path = dir.path().join("same.json");
    fs::write(&path, r#"{"a": 1}"#).unwrap();
    quire(dir.path())
        .args(["diff", "--type", "photography"])
        .arg(&path)
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("no changes"));
}
