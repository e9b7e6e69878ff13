//! Compliance-test harness for SELinux neverallow rules.
//!
//! The harness runs the device-side half of the suite: stage the
//! `sepolicy-analyze` executable and a snapshot of the device's live binary
//! policy into scoped temp files, then check each neverallow rule with one
//! analyzer subprocess per rule. A rule passes iff the analyzer terminates
//! without producing any output; anything it does print is surfaced
//! verbatim as that rule's diagnostics.
//!
//! Staging happens exactly once per suite ([`StagedContext::stage`]) and
//! every verification call borrows the resulting context read-only, so the
//! single-writer/many-readers discipline is enforced by the borrow checker
//! rather than by convention.

mod analyzer;
mod device;
mod error;
mod runner;
mod staging;
mod verify;


pub use device::{AdbTransfer, DeviceTransfer, REMOTE_POLICY_PATH};
pub use error::{AcquisitionError, InvokeError, SetupError, StagingError, TransferError};
pub use runner::{run_suite, CaseResult, SuiteReport};
pub use staging::StagedContext;
pub use verify::{verify_neverallow, Verdict, VerifyOptions};
