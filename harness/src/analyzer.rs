//! Analyzer subprocess protocol.
//!
//! One invocation per rule check: `analyzer <policy> neverallow -n <rule>`,
//! stderr merged into stdout, the merged text captured whole. The exit
//! status is recorded for logging only; pass/fail is decided on output
//! content alone.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::error::InvokeError;

/// Captured result of one analyzer run.
#[derive(Debug)]
pub(crate) struct AnalyzerOutput {
    /// Merged stdout+stderr, verbatim (not trimmed).
    pub diagnostics: String,
    /// Exit status; informational only.
    pub status: ExitStatus,
}

pub(crate) fn run_analyzer(
    analyzer: &Path,
    policy: &Path,
    rule: &str,
    timeout: Option<Duration>,
) -> Result<AnalyzerOutput, InvokeError> {
    let mut command = Command::new(analyzer);
    command
        .arg(policy)
        .args(["neverallow", "-n"])
        .arg(rule)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!("running {:?}", command);
    let mut child = command.spawn().map_err(|source| InvokeError::Spawn {
        path: analyzer.to_path_buf(),
        source,
    })?;

    // Drain both pipes in background threads so a chatty analyzer cannot
    // deadlock against a full pipe buffer while we wait on it.
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();
    let stdout_thread = thread::spawn(move || drain(stdout_pipe));
    let stderr_thread = thread::spawn(move || drain(stderr_pipe));

    let status = wait_child(&mut child, timeout)?;

    let mut merged = stdout_thread.join().unwrap_or_default();
    merged.extend(stderr_thread.join().unwrap_or_default());
    Ok(AnalyzerOutput {
        diagnostics: String::from_utf8_lossy(&merged).into_owned(),
        status,
    })
}

fn drain<R: Read>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).ok();
    }
    buf
}

/// Wait for the child, optionally bounded. On expiry the child is killed
/// and reaped before the error is returned.
fn wait_child(child: &mut Child, timeout: Option<Duration>) -> Result<ExitStatus, InvokeError> {
    let Some(timeout) = timeout else {
        return child.wait().map_err(InvokeError::Wait);
    };

    let start = Instant::now();
    loop {
        match child.try_wait().map_err(InvokeError::Wait)? {
            Some(status) => return Ok(status),
            None if start.elapsed() > timeout => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(InvokeError::TimedOut { timeout });
            }
            None => thread::sleep(Duration::from_millis(10)),
        }
    }
}
