//! One-time staging of the analyzer and the device policy snapshot.

use std::io::Write;
use std::path::Path;

use log::{debug, info};
use tempfile::TempPath;

use crate::device::DeviceTransfer;
use crate::error::{AcquisitionError, SetupError, StagingError};

/// The two locally materialized inputs every rule check reads: the staged
/// analyzer executable and the pulled policy snapshot.
///
/// A context is only obtainable through [`StagedContext::stage`], so
/// staging runs exactly once per suite and every verification call borrows
/// the same immutable paths. Both files are deleted when the context is
/// dropped, on every exit path.
pub struct StagedContext {
    analyzer: TempPath,
    policy: TempPath,
}

impl StagedContext {
    /// Stage the analyzer from raw resource bytes, then pull the device
    /// policy from `remote_path`. Either step failing aborts the suite
    /// before any rule is evaluated.
    pub fn stage(
        analyzer_bytes: &[u8],
        transfer: &dyn DeviceTransfer,
        remote_path: &str,
    ) -> Result<Self, SetupError> {
        let analyzer = stage_analyzer(analyzer_bytes)?;
        let policy = acquire_policy(transfer, remote_path)?;
        info!(
            "staged analyzer at {}, policy snapshot at {}",
            analyzer.display(),
            policy.display()
        );
        Ok(StagedContext { analyzer, policy })
    }

    /// Stage from an analyzer binary on disk (how the packaged suite ships
    /// its bundled resource).
    pub fn stage_from_file(
        analyzer: &Path,
        transfer: &dyn DeviceTransfer,
        remote_path: &str,
    ) -> Result<Self, SetupError> {
        let bytes = std::fs::read(analyzer).map_err(|source| StagingError::Resource {
            path: analyzer.to_path_buf(),
            source,
        })?;
        Self::stage(&bytes, transfer, remote_path)
    }

    pub fn analyzer_path(&self) -> &Path {
        &self.analyzer
    }

    pub fn policy_path(&self) -> &Path {
        &self.policy
    }
}

/// Copy the analyzer resource byte-for-byte into a fresh temp file and mark
/// it executable.
fn stage_analyzer(bytes: &[u8]) -> Result<TempPath, StagingError> {
    let mut file = tempfile::Builder::new()
        .prefix("sepolcheck-analyze-")
        .tempfile()
        .map_err(StagingError::TempFile)?;
    file.write_all(bytes).map_err(StagingError::Write)?;
    file.flush().map_err(StagingError::Write)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o755))
            .map_err(StagingError::Permissions)?;
    }

    Ok(file.into_temp_path())
}

fn acquire_policy(
    transfer: &dyn DeviceTransfer,
    remote_path: &str,
) -> Result<TempPath, AcquisitionError> {
    let file = tempfile::Builder::new()
        .prefix("sepolcheck-policy-")
        .tempfile()
        .map_err(AcquisitionError::TempFile)?;
    let path = file.into_temp_path();
    transfer.pull(remote_path, &path)?;
    debug!("device policy pulled from {remote_path}");
    Ok(path)
}
