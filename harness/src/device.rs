//! Device policy transfer.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::TransferError;

/// Well-known exposure point of the live binary policy on the device.
pub const REMOTE_POLICY_PATH: &str = "/sys/fs/selinux/policy";

/// Pulls a single remote file from the target device.
///
/// This is the harness's entire view of the transport: one operation with a
/// pass/fail outcome. Tests substitute local-fixture implementations.
pub trait DeviceTransfer {
    fn pull(&self, remote: &str, local: &Path) -> Result<(), TransferError>;
}

/// `adb pull`-backed transfer.
pub struct AdbTransfer {
    adb: PathBuf,
    serial: Option<String>,
}

impl AdbTransfer {
    /// Use an explicit adb binary, optionally targeting one device serial.
    pub fn new(adb: impl Into<PathBuf>, serial: Option<String>) -> Self {
        AdbTransfer {
            adb: adb.into(),
            serial,
        }
    }

    /// Locate `adb` in PATH.
    pub fn from_path_lookup(serial: Option<String>) -> Result<Self, TransferError> {
        let adb = which::which("adb").map_err(|source| TransferError::ToolNotFound {
            tool: "adb".to_string(),
            source,
        })?;
        Ok(AdbTransfer::new(adb, serial))
    }
}

impl DeviceTransfer for AdbTransfer {
    fn pull(&self, remote: &str, local: &Path) -> Result<(), TransferError> {
        let mut command = Command::new(&self.adb);
        if let Some(serial) = &self.serial {
            command.args(["-s", serial]);
        }
        command.arg("pull").arg(remote).arg(local);

        debug!("pulling device policy: {:?}", command);
        let output = command.output().map_err(|source| TransferError::Launch {
            tool: self.adb.display().to_string(),
            source,
        })?;

        if !output.status.success() {
            let mut detail = String::from_utf8_lossy(&output.stdout).into_owned();
            detail.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(TransferError::PullFailed {
                remote: remote.to_string(),
                detail: detail.trim().to_string(),
            });
        }
        Ok(())
    }
}
