// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Shared wire-protocol types for the restart coordination service.
//!
//! This crate contains the request and response bodies exchanged between a
//! node-side reboot agent and the coordination service that rate-limits
//! simultaneous reboots across a fleet. Both endpoints
//! (`v1/inquire/restart/` and `v1/request/restart/os`) use the same shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity payload sent with every call to the coordination service.
///
/// A fresh payload is built per call. `request_id` is absent on the first
/// contact in a negotiation session and must echo the server-issued
/// correlation ID on every subsequent call of the same session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartRequest {
    /// Fully qualified hostname of the requesting node
    pub fqdn: String,
    /// Host uptime as a human-readable duration string (e.g. `"83836s"`)
    pub uptime: String,
    /// Correlation ID binding a sequence of calls into one session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Response body returned by both coordination endpoints.
///
/// Every field defaults when absent so that a partial body still decodes;
/// callers treat a decoded response as read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestartResponse {
    /// Server-side error message; non-empty means the call failed
    #[serde(default)]
    pub error: String,
    /// Server timestamp for the response
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Whether the node is authorized to restart now
    #[serde(default)]
    pub go_ahead: bool,
    /// Whether the requesting host is unknown to the coordinator
    #[serde(default)]
    pub unknown_host: bool,
    /// Server-directed wait before reconfirming, as a duration string
    #[serde(default)]
    pub ask_again_in: String,
    /// Correlation ID to echo on the next call of this session
    #[serde(default)]
    pub request_id: String,
    /// Cluster the coordinator matched this host against
    #[serde(default)]
    pub found_cluster: String,
    /// The FQDN the coordinator saw in the request
    #[serde(default)]
    pub requesting_fqdn: String,
    /// Human-readable reason accompanying the decision
    #[serde(default)]
    pub message: String,
}
