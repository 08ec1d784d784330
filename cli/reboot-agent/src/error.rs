// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for the reboot agent

use coordinator_client::ClientError;
use thiserror::Error;

/// Fatal conditions for one agent run.
///
/// The agent is a terminal program, not a library: every variant here ends
/// the run with a non-zero exit once it reaches `main`. Recoverable
/// conditions (a malformed response body, a failing hook under the
/// allow-fail policy) are logged where they happen and never surface here.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Missing or invalid configuration, or a referenced file is absent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport or service failure talking to the coordinator
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A successfully parsed response violated the protocol contract
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Could not determine hostname or uptime for the identity payload
    #[error("Host facts error: {0}")]
    Facts(String),

    /// Hook sequencing failure: empty hook directory, or a hook failed
    /// under the strict policy
    #[error("Hook error: {0}")]
    Hook(String),
}
