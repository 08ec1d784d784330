// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Host facts for the identity payload.
//!
//! Every call to the coordinator carries the node's FQDN and its current
//! uptime. A fresh payload is built per call so the uptime stays honest
//! across the wait between the two request rounds.

use coordinator_types::RestartRequest;

use crate::config::AgentConfig;
use crate::error::AgentError;

/// Uptime source on Linux: "<seconds>.<fraction> <idle>" in one line.
const PROC_UPTIME: &str = "/proc/uptime";

/// The FQDN reported to the coordinator.
///
/// The configured `requesting_fqdn` wins over the kernel hostname; some
/// fleets register nodes under names that differ from their hostname.
pub fn fqdn(config: &AgentConfig) -> Result<String, AgentError> {
    if let Some(fqdn) = &config.requesting_fqdn {
        return Ok(fqdn.clone());
    }
    let name = hostname::get()
        .map_err(|e| AgentError::Facts(format!("Error while getting hostname: {}", e)))?;
    Ok(name.to_string_lossy().into_owned())
}

/// Host uptime as a duration string, e.g. `"83836s"`.
pub fn uptime() -> Result<String, AgentError> {
    let data = std::fs::read_to_string(PROC_UPTIME)
        .map_err(|e| AgentError::Facts(format!("Error while reading {}: {}", PROC_UPTIME, e)))?;
    parse_uptime(&data)
}

/// Build the identity payload for one call to the coordinator.
pub fn build_request(
    config: &AgentConfig,
    request_id: Option<String>,
) -> Result<RestartRequest, AgentError> {
    Ok(RestartRequest {
        fqdn: fqdn(config)?,
        uptime: uptime()?,
        request_id,
    })
}

/// Extract whole seconds from `/proc/uptime` contents.
fn parse_uptime(data: &str) -> Result<String, AgentError> {
    let seconds = data
        .split_whitespace()
        .next()
        .and_then(|field| field.split('.').next())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AgentError::Facts(format!("Unexpected uptime format: {:?}", data)))?;

    // Reject non-numeric garbage before we put it on the wire.
    seconds
        .parse::<u64>()
        .map_err(|e| AgentError::Facts(format!("Failed to parse uptime {:?}: {}", seconds, e)))?;

    Ok(format!("{}s", seconds))
}
