// crates/content-gate-cli/tests/check_command.rs
// ============================================================================
// Module: CLI Check Command Tests
// Description: Integration tests for the check and validate subcommands.
// Purpose: Ensure process exit codes reflect aggregate audit outcomes.
// Dependencies: content-gate binary
// ============================================================================
//! ## Overview
//! Validates the process-level contract: zero exit on all-pass audits,
//! non-zero on any failure, and fail-closed handling of invalid manifests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn content_gate_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_content-gate"))
}

fn temp_root(label: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock drift").as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("content-gate-{label}-{nanos}"));
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

fn cleanup(path: &PathBuf) {
    let _ = fs::remove_dir_all(path);
}

fn write_manifest(root: &PathBuf, body: &str) -> PathBuf {
    let manifest_path = root.join("contentgate.toml");
    fs::write(&manifest_path, body.trim()).expect("write manifest");
    manifest_path
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies a passing audit exits zero and reports the page.
#[test]
fn cli_check_exits_zero_on_passing_audit() {
    let root = temp_root("check-pass");
    fs::create_dir_all(root.join("pages")).expect("create pages dir");
    fs::write(root.join("pages/index.html"), "<main>welcome banner</main>")
        .expect("write page");
    let manifest_path = write_manifest(
        &root,
        r#"
[[pages]]
path = "pages/index.html"
required = ["welcome banner"]
"#,
    );

    let output = Command::new(content_gate_bin())
        .args(["check", "--manifest", manifest_path.to_string_lossy().as_ref()])
        .output()
        .expect("run content-gate check");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pass pages/index.html"), "unexpected stdout: {stdout}");
    assert!(stdout.contains("audit passed"), "unexpected stdout: {stdout}");

    cleanup(&root);
}

/// Verifies a failing audit exits non-zero and names the missing marker.
#[test]
fn cli_check_exits_nonzero_on_missing_marker() {
    let root = temp_root("check-missing");
    fs::create_dir_all(root.join("pages")).expect("create pages dir");
    fs::write(root.join("pages/index.html"), "<main></main>").expect("write page");
    let manifest_path = write_manifest(
        &root,
        r#"
[[pages]]
path = "pages/index.html"
required = ["welcome banner"]
"#,
    );

    let output = Command::new(content_gate_bin())
        .args(["check", "--manifest", manifest_path.to_string_lossy().as_ref()])
        .output()
        .expect("run content-gate check");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("missing: welcome banner"), "unexpected stdout: {stdout}");

    cleanup(&root);
}

/// Verifies a missing page fails the audit without aborting sibling checks.
#[test]
fn cli_check_reports_sibling_pages_after_a_missing_page() {
    let root = temp_root("check-sibling");
    fs::create_dir_all(root.join("pages")).expect("create pages dir");
    fs::write(root.join("pages/present.html"), "anchor text").expect("write page");
    let manifest_path = write_manifest(
        &root,
        r#"
[[pages]]
path = "pages/absent.html"
required = ["anything"]

[[pages]]
path = "pages/present.html"
required = ["anchor text"]
"#,
    );

    let output = Command::new(content_gate_bin())
        .args(["check", "--manifest", manifest_path.to_string_lossy().as_ref()])
        .output()
        .expect("run content-gate check");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fail pages/absent.html"), "unexpected stdout: {stdout}");
    assert!(stdout.contains("pass pages/present.html"), "unexpected stdout: {stdout}");

    cleanup(&root);
}

/// Verifies JSON output carries the aggregate pass flag.
#[test]
fn cli_check_emits_json_report() {
    let root = temp_root("check-json");
    fs::create_dir_all(root.join("pages")).expect("create pages dir");
    fs::write(root.join("pages/index.html"), "payload marker").expect("write page");
    let manifest_path = write_manifest(
        &root,
        r#"
[[pages]]
path = "pages/index.html"
required = ["payload marker"]
"#,
    );

    let output = Command::new(content_gate_bin())
        .args([
            "check",
            "--manifest",
            manifest_path.to_string_lossy().as_ref(),
            "--format",
            "json",
        ])
        .output()
        .expect("run content-gate check");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"passed\": true"), "unexpected stdout: {stdout}");

    cleanup(&root);
}

/// Verifies manifests with traversal paths are rejected before any read.
#[test]
fn cli_validate_rejects_traversal_paths() {
    let root = temp_root("validate-traversal");
    let manifest_path = write_manifest(
        &root,
        r#"
[[pages]]
path = "../outside.html"
required = ["anything"]
"#,
    );

    let output = Command::new(content_gate_bin())
        .args(["validate", "--manifest", manifest_path.to_string_lossy().as_ref()])
        .output()
        .expect("run content-gate validate");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("traversal"), "unexpected stderr: {stderr}");

    cleanup(&root);
}

/// Verifies a well-formed manifest validates without touching pages.
#[test]
fn cli_validate_accepts_manifest_without_pages_on_disk() {
    let root = temp_root("validate-ok");
    let manifest_path = write_manifest(
        &root,
        r#"
[[pages]]
path = "pages/never-created.html"
required = ["anything"]
"#,
    );

    let output = Command::new(content_gate_bin())
        .args(["validate", "--manifest", manifest_path.to_string_lossy().as_ref()])
        .output()
        .expect("run content-gate validate");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("manifest ok: 1 page(s)"), "unexpected stdout: {stdout}");

    cleanup(&root);
}
