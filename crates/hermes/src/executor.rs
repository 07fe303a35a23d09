//! Probe executor
//!
//! Runs one probe command to completion and hands back its captured output,
//! or the reason it produced none. Probes are spawned directly, without a
//! shell, with stdin closed and stdout/stderr piped. A probe that exits
//! non-zero after printing an error report fails with that report's reason.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use geobench_common::ProbeReport;
use tokio::process::Command;
use tokio::time::timeout;

use crate::constants::STDERR_EXCERPT_CHARS;
use crate::outcome::ProbeFailure;
use crate::targets::ProbeCommand;

/// Captured output of a probe that exited successfully
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Capability to run a probe command
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProbeExecutor: Send + Sync {
    /// Run `command` and wait for it to exit
    async fn execute(&self, command: &ProbeCommand) -> Result<ProbeOutput, ProbeFailure>;
}

/// Executor backed by real OS processes
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    timeout: Option<Duration>,
}

impl ProcessExecutor {
    /// Create an executor; `None` waits for probes indefinitely
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ProbeExecutor for ProcessExecutor {
    async fn execute(&self, command: &ProbeCommand) -> Result<ProbeOutput, ProbeFailure> {
        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProbeFailure::Spawn(format!("{}: {}", command.program, e)))?;

        let waited = match self.timeout {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                // Dropping the wait future drops the child, which kills it
                Err(_) => return Err(ProbeFailure::TimedOut(limit.as_millis() as u64)),
            },
            None => child.wait_with_output().await,
        };

        let output = waited
            .map_err(|e| ProbeFailure::Spawn(format!("failed to wait for {}: {}", command.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            return Ok(ProbeOutput { stdout, stderr });
        }

        // A probe that explains its failure on stdout is reported by reason
        if let Ok(ProbeReport::Error { reason }) = ProbeReport::parse(&stdout) {
            return Err(ProbeFailure::Reported(reason));
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = output.status.signal() {
                return Err(ProbeFailure::Signaled(signal));
            }
        }

        Err(ProbeFailure::NonZeroExit {
            code: output.status.code().unwrap_or(-1),
            stderr: stderr.trim().chars().take(STDERR_EXCERPT_CHARS).collect(),
        })
    }
}
