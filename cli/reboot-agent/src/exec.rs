// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Timeout-bounded subprocess execution.
//!
//! Both the precondition script and the restart hooks run through
//! [`run_command`]. Execution is synchronous from the agent's point of
//! view: the caller awaits completion, and a child that outlives its
//! timeout is killed.

use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

/// How a subprocess run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecStatus {
    /// Process ran to completion with this exit code
    Exited(i32),
    /// Process was killed after exceeding its timeout
    TimedOut,
    /// Process could not be run, or died without an exit code
    Failed(String),
}

impl fmt::Display for ExecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecStatus::Exited(code) => write!(f, "exited with code {}", code),
            ExecStatus::TimedOut => write!(f, "timed out"),
            ExecStatus::Failed(reason) => write!(f, "failed to run: {}", reason),
        }
    }
}

/// Result of one subprocess run.
#[derive(Debug, Clone)]
pub struct ExecOutcome {
    pub status: ExecStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutcome {
    /// True only for a clean zero exit.
    pub fn success(&self) -> bool {
        matches!(self.status, ExecStatus::Exited(0))
    }

    fn failed(reason: String) -> Self {
        Self {
            status: ExecStatus::Failed(reason),
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Run an executable with no arguments under a timeout, capturing output.
///
/// Never returns an error: every failure mode (spawn failure, signal
/// death, timeout) is folded into [`ExecStatus`] so callers can apply
/// their own policy.
pub async fn run_command(path: &Path, limit: Duration) -> ExecOutcome {
    debug!(command = %path.display(), timeout = ?limit, "Executing command");

    let child = Command::new(path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // Dropping the wait future on timeout must not leak the child.
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) => {
            warn!(command = %path.display(), "Failed to spawn: {}", e);
            return ExecOutcome::failed(e.to_string());
        }
    };

    let output = match tokio::time::timeout(limit, child.wait_with_output()).await {
        Err(_) => {
            warn!(command = %path.display(), timeout = ?limit, "Command timed out");
            return ExecOutcome {
                status: ExecStatus::TimedOut,
                stdout: String::new(),
                stderr: String::new(),
            };
        }
        Ok(Err(e)) => return ExecOutcome::failed(e.to_string()),
        Ok(Ok(output)) => output,
    };

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let status = match output.status.code() {
        Some(code) => ExecStatus::Exited(code),
        None => ExecStatus::Failed("terminated by signal".to_string()),
    };

    debug!(command = %path.display(), %status, %stdout, %stderr, "Command finished");
    ExecOutcome {
        status,
        stdout,
        stderr,
    }
}
