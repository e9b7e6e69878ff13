//! Tests for `sepolcheck generate` and `sepolcheck rules`.

use crate::common::*;

const TWO_RULES: &str = "\
# compliance catalog
neverallow domain file:file execute_no_trans;
neverallow { appdomain -shell } kmem_device:chr_file { read write };
";

#[test]
fn test_generate_emits_one_check_per_rule() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), TWO_RULES);

    let output = run_sepolcheck(&["generate", "--rules", rules.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr_str(&output));

    let document = stdout_str(&output);
    assert_eq!(document.matches("#[test]").count(), 2);
    assert!(document.contains("neverallow domain file:file execute_no_trans;"));
    assert!(document.contains("neverallow { appdomain -shell } kmem_device:chr_file { read write };"));
    assert!(document.contains("fn neverallow_rule_001()"));
    assert!(document.contains("fn neverallow_rule_002()"));
}

#[test]
fn test_generate_is_byte_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), TWO_RULES);

    let first = run_sepolcheck(&["generate", "--rules", rules.to_str().unwrap()]);
    let second = run_sepolcheck(&["generate", "--rules", rules.to_str().unwrap()]);
    assert!(first.status.success() && second.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_generate_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), TWO_RULES);
    let out = dir.path().join("neverallow_tests.rs");

    let output = run_sepolcheck(&[
        "generate",
        "--rules",
        rules.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_str(&output));
    assert!(output.stdout.is_empty());

    let document = std::fs::read_to_string(&out).unwrap();
    assert_eq!(document.matches("#[test]").count(), 2);
}

#[test]
fn test_generate_rejects_placeholder_collision() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(
        dir.path(),
        "neverallow @NEVERALLOW_RULE@ file:file execute_no_trans;\n",
    );

    let output = run_sepolcheck(&["generate", "--rules", rules.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = stderr_str(&output);
    assert!(stderr.contains("placeholder"), "stderr: {stderr}");
    assert!(stderr.contains("@NEVERALLOW_RULE@"), "stderr: {stderr}");
}

#[test]
fn test_generate_reports_missing_catalog() {
    let output = run_sepolcheck(&["generate", "--rules", "/nonexistent/rules.conf"]);
    assert!(!output.status.success());
    assert!(stderr_str(&output).contains("/nonexistent/rules.conf"));
}

#[test]
fn test_rules_lists_catalog_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), TWO_RULES);

    let output = run_sepolcheck(&["rules", "--rules", rules.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = stdout_str(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("neverallow_rule_001"));
    assert!(lines[0].contains("neverallow domain file:file execute_no_trans;"));
    assert!(lines[1].starts_with("neverallow_rule_002"));
}
