//! Tests for `sepolcheck check` against stub adb and analyzer scripts.

#![cfg(unix)]

use crate::common::*;

/// Analyzer stub that reports a violation only for rules mentioning rule_A.
const SELECTIVE_ANALYZER: &str =
    r#"case "$4" in *rule_A*) echo "violation: rule_A matched";; esac"#;

fn check_args<'a>(rules: &'a str, analyzer: &'a str, adb: &'a str) -> Vec<&'a str> {
    vec![
        "check", "--rules", rules, "--analyzer", analyzer, "--adb", adb,
    ]
}

#[test]
fn test_all_rules_pass_with_silent_analyzer() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "neverallow domain file:file execute_no_trans;\n");
    let analyzer = write_script(&dir.path().join("sepolicy-analyze"), "exit 0");
    let adb = stub_adb(dir.path());

    let mut args = check_args(
        rules.to_str().unwrap(),
        analyzer.to_str().unwrap(),
        adb.to_str().unwrap(),
    );
    args.push("--json");
    let output = run_sepolcheck(&args);

    assert!(output.status.success(), "stderr: {}", stderr_str(&output));
    let report: serde_json::Value = serde_json::from_str(&stdout_str(&output)).unwrap();
    assert_eq!(report["passed"], 1);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["results"][0]["status"], "pass");
}

#[test]
fn test_failing_rule_is_isolated_and_reported_with_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rule_A;\nrule_B;\n");
    let analyzer = write_script(&dir.path().join("sepolicy-analyze"), SELECTIVE_ANALYZER);
    let adb = stub_adb(dir.path());

    let output = run_sepolcheck(&check_args(
        rules.to_str().unwrap(),
        analyzer.to_str().unwrap(),
        adb.to_str().unwrap(),
    ));

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_str(&output);
    assert!(stdout.contains("rule_A"), "stdout: {stdout}");
    assert!(stdout.contains("violation: rule_A matched"), "stdout: {stdout}");
    assert!(stdout.contains("1 passed"), "stdout: {stdout}");
    assert!(stdout.contains("1 failed"), "stdout: {stdout}");
}

#[test]
fn test_silent_nonzero_analyzer_exit_still_passes() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "neverallow domain file:file execute_no_trans;\n");
    let analyzer = write_script(&dir.path().join("sepolicy-analyze"), "exit 1");
    let adb = stub_adb(dir.path());

    let output = run_sepolcheck(&check_args(
        rules.to_str().unwrap(),
        analyzer.to_str().unwrap(),
        adb.to_str().unwrap(),
    ));
    assert!(output.status.success(), "stderr: {}", stderr_str(&output));
}

#[test]
fn test_offline_device_fails_setup_once_with_no_rule_results() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rule_A;\nrule_B;\n");
    let analyzer = write_script(&dir.path().join("sepolicy-analyze"), "exit 0");
    let adb = stub_adb_offline(dir.path());

    let output = run_sepolcheck(&check_args(
        rules.to_str().unwrap(),
        analyzer.to_str().unwrap(),
        adb.to_str().unwrap(),
    ));

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty(), "no per-rule results expected");
    let stderr = stderr_str(&output);
    assert_eq!(stderr.matches("suite setup failed").count(), 1);
    assert!(stderr.contains("no devices/emulators found"), "stderr: {stderr}");
}

#[test]
fn test_missing_analyzer_resource_fails_setup() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rule_A;\n");
    let adb = stub_adb(dir.path());

    let output = run_sepolcheck(&check_args(
        rules.to_str().unwrap(),
        "/nonexistent/sepolicy-analyze",
        adb.to_str().unwrap(),
    ));

    assert_eq!(output.status.code(), Some(2));
    let stderr = stderr_str(&output);
    assert_eq!(stderr.matches("suite setup failed").count(), 1);
    assert!(stderr.contains("/nonexistent/sepolicy-analyze"), "stderr: {stderr}");
}

#[test]
fn test_timeout_fails_hung_rule_but_not_the_others() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rule_hang;\nrule_B;\n");
    let analyzer = write_script(
        &dir.path().join("sepolicy-analyze"),
        r#"case "$4" in *rule_hang*) sleep 30;; esac"#,
    );
    let adb = stub_adb(dir.path());

    let mut args = check_args(
        rules.to_str().unwrap(),
        analyzer.to_str().unwrap(),
        adb.to_str().unwrap(),
    );
    args.extend(["--timeout", "1", "--json"]);
    let output = run_sepolcheck(&args);

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_str(&stdout_str(&output)).unwrap();
    assert_eq!(report["failed"], 1);
    assert_eq!(report["passed"], 1);
    assert_eq!(report["results"][0]["status"], "fail");
    assert!(report["results"][0]["diagnostics"]
        .as_str()
        .unwrap()
        .contains("timed out"));
    assert_eq!(report["results"][1]["status"], "pass");
}
