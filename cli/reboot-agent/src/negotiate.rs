// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! The negotiation state machine.
//!
//! One pass per process invocation:
//!
//! ```text
//! START -> PRECONDITION_CHECK -> {LOCAL_TRIGGER | INQUIRE}
//!       -> REQUEST_SENT -> WAITING -> REQUEST_RESENT
//!       -> {AUTHORIZED -> HOOKS_RUNNING -> DONE | REJECTED -> DONE}
//! ```
//!
//! Any transport or fatal-protocol error from any state aborts the run by
//! propagating an [`AgentError`]; everything else resolves to an
//! [`Outcome`] and the top-level handler in `main` decides the exit code.

use coordinator_client::CoordinatorClient;
use tracing::{info, warn};

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::{check, facts, hooks};

/// Message prefix by which the coordinator tells an inquiring node that it
/// should restart even though no local precondition fired.
pub const RESTART_SENTINEL: &str = "YesInquireToRestart";

/// Terminal, non-error result of one negotiation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Authorized; all hooks ran (or were allowed to fail)
    HooksCompleted,
    /// Inquiry answered with anything but the restart sentinel; a no-op
    InquiryDeclined { message: String },
    /// First request came back without a cluster or wait interval
    Rejected { message: String },
    /// Second request did not carry the go-ahead
    NotAuthorized { message: String },
}

impl Outcome {
    /// Process exit code for this outcome.
    ///
    /// A `Rejected` run exits non-zero so schedulers and operators can
    /// tell "the coordinator turned us down" apart from a quiet no-op;
    /// a withheld go-ahead after the wait is normal operation.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::HooksCompleted
            | Outcome::InquiryDeclined { .. }
            | Outcome::NotAuthorized { .. } => 0,
            Outcome::Rejected { .. } => 1,
        }
    }
}

/// Drives one negotiation pass against the coordination service.
pub struct Negotiator<'a> {
    config: &'a AgentConfig,
    client: &'a CoordinatorClient,
}

impl<'a> Negotiator<'a> {
    pub fn new(config: &'a AgentConfig, client: &'a CoordinatorClient) -> Self {
        Self { config, client }
    }

    /// Run the whole pass: precondition, then inquiry or request loop.
    pub async fn run(&self) -> Result<Outcome, AgentError> {
        if check::restart_desired(self.config).await {
            self.request_loop().await
        } else {
            info!("Did not find local reason to restart, asking the coordinator");
            self.inquire().await
        }
    }

    /// Ask whether the coordinator wants this node restarted anyway.
    async fn inquire(&self) -> Result<Outcome, AgentError> {
        let request = facts::build_request(self.config, None)?;
        let response = self.client.inquire(&request).await?;

        if response.message.starts_with(RESTART_SENTINEL) {
            info!(message = %response.message, "Coordinator wants this node to restart");
            self.request_loop().await
        } else {
            Ok(Outcome::InquiryDeclined {
                message: response.message,
            })
        }
    }

    /// The two-phase request/wait/reconfirm cycle.
    ///
    /// Exactly two round trips on the happy path, one on rejection; never
    /// more, and no local retry of a failed call.
    async fn request_loop(&self) -> Result<Outcome, AgentError> {
        let request = facts::build_request(self.config, None)?;
        let first = self.client.request_restart(&request).await?;

        if first.found_cluster.is_empty() || first.ask_again_in.is_empty() {
            return Ok(Outcome::Rejected {
                message: first.message,
            });
        }

        let wait = humantime::parse_duration(&first.ask_again_in).map_err(|e| {
            AgentError::Protocol(format!(
                "Invalid ask_again_in duration {:?}: {}",
                first.ask_again_in, e
            ))
        })?;

        info!(
            cluster = %first.found_cluster,
            wait = %first.ask_again_in,
            "Sleeping before reconfirming the restart request"
        );
        // The sole suspension point of the whole agent.
        tokio::time::sleep(wait).await;

        let request = facts::build_request(self.config, Some(first.request_id.clone()))?;
        let second = self.client.request_restart(&request).await?;

        if second.go_ahead {
            info!("Received go-ahead to restart, executing restart hooks");
            hooks::run_hooks(
                &self.config.os_restart_hooks_dir,
                self.config.os_restart_hooks_allow_fail,
            )
            .await?;
            Ok(Outcome::HooksCompleted)
        } else {
            warn!(message = %second.message, "Did not receive go-ahead to restart");
            Ok(Outcome::NotAuthorized {
                message: second.message,
            })
        }
    }
}
