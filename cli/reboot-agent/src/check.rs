// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Local restart precondition.
//!
//! The precondition is an opaque external program; only its exit code
//! matters. One configured code means "this node wants a restart", every
//! other outcome (other code, spawn failure, timeout) means it does not
//! and the agent falls through to inquiry. No payload is exchanged here.

use std::time::Duration;

use tracing::info;

use crate::config::AgentConfig;
use crate::exec::{self, ExecStatus};

/// Timeout for the precondition script.
const PRECONDITION_TIMEOUT: Duration = Duration::from_secs(5);

/// Evaluate the local precondition. Never fails: an unrunnable script is
/// simply "not met".
pub async fn restart_desired(config: &AgentConfig) -> bool {
    let outcome = exec::run_command(&config.restart_condition_script, PRECONDITION_TIMEOUT).await;

    match outcome.status {
        ExecStatus::Exited(code)
            if code == config.restart_condition_script_exit_code_for_reboot =>
        {
            info!(
                script = %config.restart_condition_script.display(),
                code,
                "Restart condition script reports a restart is wanted"
            );
            true
        }
        status => {
            info!(
                script = %config.restart_condition_script.display(),
                %status,
                "Restart condition not met"
            );
            false
        }
    }
}
