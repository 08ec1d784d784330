// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Post-authorization restart hooks.
//!
//! Once the coordinator grants the go-ahead, the agent runs every entry of
//! the hooks directory in strict lexicographic path order, each under a
//! fixed timeout. What a hook does internally is opaque; this module only
//! sequences, times, and gates them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::AgentError;
use crate::exec::{self, ExecStatus};

/// Timeout applied to each individual hook.
const HOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Record of one executed hook.
#[derive(Debug, Clone)]
pub struct HookResult {
    pub path: PathBuf,
    pub status: ExecStatus,
}

/// Run all hooks in `dir`.
///
/// The directory was validated at startup, so finding it empty here is a
/// setup mistake and fatal, not a legitimate no-hooks scenario. Under
/// `allow_fail` every hook runs and failures are recorded; under the
/// strict policy the first failure aborts the sequence.
pub async fn run_hooks(dir: &Path, allow_fail: bool) -> Result<Vec<HookResult>, AgentError> {
    let mut hooks = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| {
        AgentError::Hook(format!(
            "Failed to list hook directory {}: {}",
            dir.display(),
            e
        ))
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| {
            AgentError::Hook(format!(
                "Failed to list hook directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        hooks.push(entry.path());
    }

    if hooks.is_empty() {
        return Err(AgentError::Hook(format!(
            "Could not find any restart hook scripts in {}",
            dir.display()
        )));
    }

    // Determinism requirement: same order on every run.
    hooks.sort();
    debug!(?hooks, "Found restart hook scripts");

    let mut results = Vec::with_capacity(hooks.len());
    for hook in hooks {
        info!(hook = %hook.display(), "Running restart hook");
        let outcome = exec::run_command(&hook, HOOK_TIMEOUT).await;

        if !outcome.success() {
            if allow_fail {
                warn!(
                    hook = %hook.display(),
                    status = %outcome.status,
                    "Restart hook failed, continuing"
                );
            } else {
                return Err(AgentError::Hook(format!(
                    "Restart hook {} {}",
                    hook.display(),
                    outcome.status
                )));
            }
        }

        results.push(HookResult {
            path: hook,
            status: outcome.status,
        });
    }

    Ok(results)
}
