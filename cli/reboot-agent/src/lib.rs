// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Reboot Agent Library
//!
//! Core functionality for the node-side reboot coordination agent. The
//! agent is a one-shot program, invoked periodically by an external
//! scheduler: it evaluates a local restart precondition, negotiates
//! permission with the fleet-wide coordination service, and runs the
//! configured restart hooks once authorized.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration loading and validation
//! - [`check`] - local restart precondition (external script)
//! - [`exec`] - timeout-bounded subprocess execution
//! - [`facts`] - hostname and uptime for the identity payload
//! - [`hooks`] - ordered post-authorization hook execution
//! - [`negotiate`] - the two-phase request/poll state machine

pub mod check;
pub mod config;
pub mod error;
pub mod exec;
pub mod facts;
pub mod hooks;
pub mod negotiate;

pub use config::AgentConfig;
pub use error::AgentError;
pub use negotiate::{Negotiator, Outcome};
