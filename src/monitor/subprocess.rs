//! Bounded subprocess execution.
//!
//! Counter backends that shell out (`netstat -ib` on macOS) must not stall
//! the sampling loop, so every command runs on a worker thread and is
//! abandoned once its timeout expires.

use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Outcome of a command run under a timeout.
#[derive(Debug)]
pub enum SubprocessResult {
    /// Command exited with status 0.
    Success(Output),
    /// Command exited with a non-zero status.
    Failed(Output),
    /// Command did not finish in time.
    Timeout,
    /// Command could not be started.
    SpawnError,
}

impl SubprocessResult {
    /// Stdout of a successful run.
    #[must_use]
    pub fn success_stdout(&self) -> Option<String> {
        match self {
            Self::Success(output) => Some(String::from_utf8_lossy(&output.stdout).into_owned()),
            _ => None,
        }
    }

    /// Returns true if the command exited with status 0.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if the command was abandoned.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Short reason for an unsuccessful run, for error messages.
    #[must_use]
    pub fn describe_failure(&self) -> String {
        match self {
            Self::Success(_) => "succeeded".to_string(),
            Self::Failed(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                format!("exited with {}: {}", output.status, stderr.trim())
            }
            Self::Timeout => "timed out".to_string(),
            Self::SpawnError => "could not be started".to_string(),
        }
    }
}

/// Runs `cmd args...`, waiting at most `timeout` for it to finish.
///
/// A timed-out worker thread is left to finish on its own.
pub fn run_with_timeout(cmd: &str, args: &[&str], timeout: Duration) -> SubprocessResult {
    let cmd = cmd.to_string();
    let args: Vec<String> = args.iter().map(|s| (*s).to_string()).collect();

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(Command::new(&cmd).args(&args).output());
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok(output)) if output.status.success() => SubprocessResult::Success(output),
        Ok(Ok(output)) => SubprocessResult::Failed(output),
        Ok(Err(_)) | Err(mpsc::RecvTimeoutError::Disconnected) => SubprocessResult::SpawnError,
        Err(mpsc::RecvTimeoutError::Timeout) => SubprocessResult::Timeout,
    }
}
