//! Per-rule verification.

use std::time::Duration;

use log::{debug, warn};
use serde::Serialize;

use crate::analyzer::run_analyzer;
use crate::staging::StagedContext;

/// Knobs for a verification call. By default the check blocks until the
/// analyzer terminates, however long that takes.
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Kill the analyzer and fail the rule if it runs longer than this.
    pub timeout: Option<Duration>,
}

/// Outcome of checking one rule.
///
/// Pass iff the analyzer produced no output at all. The check is literal:
/// whitespace-only output is still a failure, and the exit status is never
/// consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail { rule: String, diagnostics: String },
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Check one neverallow rule against the staged policy.
///
/// Launch failures and timeouts fail the rule too, with the anomaly
/// recorded as the diagnostics: anything short of a clean, silent analyzer
/// run means the rule cannot be considered verified.
pub fn verify_neverallow(ctx: &StagedContext, rule: &str, options: &VerifyOptions) -> Verdict {
    match run_analyzer(ctx.analyzer_path(), ctx.policy_path(), rule, options.timeout) {
        Ok(output) => {
            if !output.status.success() {
                debug!("analyzer exited with {} for rule {rule}", output.status);
            }
            if output.diagnostics.is_empty() {
                Verdict::Pass
            } else {
                Verdict::Fail {
                    rule: rule.to_string(),
                    diagnostics: output.diagnostics,
                }
            }
        }
        Err(err) => {
            warn!("analyzer invocation failed for rule {rule}: {err}");
            Verdict::Fail {
                rule: rule.to_string(),
                diagnostics: err.to_string(),
            }
        }
    }
}
