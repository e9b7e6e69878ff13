//! Test-document rendering.
//!
//! The generated artifact is a single Rust test file: a fixed header with
//! the shared setup routine, one `#[test]` block per catalog rule in
//! catalog order, and a fixed footer. Substitution is purely literal; a
//! rule that collides with a placeholder token is rejected rather than
//! silently corrupted.

use crate::case::{cases, TestCase};
use crate::catalog::RuleCatalog;
use crate::error::GenerationError;

/// Placeholder for the test name in the per-rule method template.
pub const NAME_PLACEHOLDER: &str = "@TEST_NAME@";

/// Placeholder for the rule expression in the per-rule method template.
pub const RULE_PLACEHOLDER: &str = "@NEVERALLOW_RULE@";

/// Terminator of the raw-string literal each rule is embedded in.
const RAW_TERMINATOR: &str = "\"#";

const SRC_HEADER: &str = r####"//! SELinux neverallow compliance tests.
//!
//! Generated by `sepolcheck generate`; do not edit. One test per catalog
//! rule, all sharing a single staged analyzer + device policy context.

use std::path::Path;
use std::sync::OnceLock;

use sepolcheck_harness::{
    verify_neverallow, AdbTransfer, StagedContext, Verdict, VerifyOptions, REMOTE_POLICY_PATH,
};

/// Stage the analyzer and pull the device policy exactly once.
fn context() -> &'static StagedContext {
    static CONTEXT: OnceLock<StagedContext> = OnceLock::new();
    CONTEXT.get_or_init(|| {
        let analyzer = std::env::var("SEPOLCHECK_ANALYZER")
            .expect("SEPOLCHECK_ANALYZER must name the sepolicy-analyze binary");
        let serial = std::env::var("SEPOLCHECK_SERIAL").ok();
        let transfer = AdbTransfer::from_path_lookup(serial).expect("adb not found in PATH");
        StagedContext::stage_from_file(Path::new(&analyzer), &transfer, REMOTE_POLICY_PATH)
            .expect("failed to stage analyzer and device policy")
    })
}

fn check(rule: &str) {
    match verify_neverallow(context(), rule, &VerifyOptions::default()) {
        Verdict::Pass => {}
        Verdict::Fail { diagnostics, .. } => panic!(
            "errors were encountered validating the SELinux neverallow rule:\n{rule}\n{diagnostics}"
        ),
    }
}
"####;

const SRC_METHOD: &str = r####"
#[test]
fn @TEST_NAME@() {
    check(r#"@NEVERALLOW_RULE@"#);
}
"####;

const SRC_FOOTER: &str = "\n// end of generated neverallow tests\n";

/// Render the full test document for a catalog.
///
/// Deterministic: the same catalog (same rules, same order) yields
/// byte-identical output. Rule syntax is not validated here; a malformed
/// rule is passed through unchanged and surfaces as an analyzer failure at
/// test time.
pub fn generate(catalog: &RuleCatalog) -> Result<String, GenerationError> {
    let mut document = String::from(SRC_HEADER);
    for case in cases(catalog) {
        document.push_str(&render_method(&case)?);
    }
    document.push_str(SRC_FOOTER);
    Ok(document)
}

fn render_method(case: &TestCase) -> Result<String, GenerationError> {
    for token in [NAME_PLACEHOLDER, RULE_PLACEHOLDER] {
        if case.rule.contains(token) {
            return Err(GenerationError::PlaceholderCollision {
                token,
                rule: case.rule.clone(),
            });
        }
    }
    if case.rule.contains(RAW_TERMINATOR) {
        return Err(GenerationError::UnembeddableRule {
            rule: case.rule.clone(),
        });
    }
    Ok(SRC_METHOD
        .replace(NAME_PLACEHOLDER, &case.name)
        .replace(RULE_PLACEHOLDER, &case.rule))
}
