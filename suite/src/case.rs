//! Test-case descriptors.

use serde::Serialize;

use crate::catalog::RuleCatalog;

/// One compliance check: a single neverallow rule with a stable test name.
///
/// Descriptors carry no behavior of their own; the harness crate runs the
/// actual analyzer invocation for each one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    /// Deterministic identifier, unique within one suite.
    pub name: String,
    /// The rule expression, exactly as it appears in the catalog.
    pub rule: String,
}

/// Expand a catalog into ordered test-case descriptors, one per rule.
///
/// Names are derived from the catalog position (`neverallow_rule_001`,
/// `neverallow_rule_002`, ...), so the same catalog always yields the same
/// suite. Duplicate rules get distinct names.
pub fn cases(catalog: &RuleCatalog) -> Vec<TestCase> {
    catalog
        .rules()
        .iter()
        .enumerate()
        .map(|(index, rule)| TestCase {
            name: case_name(index),
            rule: rule.clone(),
        })
        .collect()
}

pub(crate) fn case_name(index: usize) -> String {
    format!("neverallow_rule_{:03}", index + 1)
}
