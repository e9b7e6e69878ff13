//! Sequential suite runner.

use std::time::Instant;

use log::{debug, info};
use serde::Serialize;

use sepolcheck_suite::TestCase;

use crate::staging::StagedContext;
use crate::verify::{verify_neverallow, Verdict, VerifyOptions};

/// One case's outcome, with its verdict inlined for the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub name: String,
    pub duration_ms: u64,
    #[serde(flatten)]
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<CaseResult>,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Run every case against the same staged context, in catalog order.
///
/// Cases are isolated: one rule's failure never prevents evaluation of the
/// remaining rules, and no case re-stages or mutates the shared context.
pub fn run_suite(ctx: &StagedContext, cases: &[TestCase], options: &VerifyOptions) -> SuiteReport {
    let mut results = Vec::with_capacity(cases.len());
    let mut passed = 0;
    let mut failed = 0;

    for case in cases {
        let start = Instant::now();
        let verdict = verify_neverallow(ctx, &case.rule, options);
        let duration_ms = start.elapsed().as_millis() as u64;
        match &verdict {
            Verdict::Pass => {
                passed += 1;
                debug!("{}: pass ({duration_ms} ms)", case.name);
            }
            Verdict::Fail { .. } => {
                failed += 1;
                debug!("{}: FAIL ({duration_ms} ms)", case.name);
            }
        }
        results.push(CaseResult {
            name: case.name.clone(),
            duration_ms,
            verdict,
        });
    }

    info!("suite finished: {passed} passed, {failed} failed");
    SuiteReport {
        passed,
        failed,
        results,
    }
}
