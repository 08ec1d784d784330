// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for coordinator-client

use thiserror::Error;

/// Errors that can occur while talking to the coordination service.
///
/// All of these are fatal for the current agent run: the agent never
/// retries a failed call on its own, the external scheduler does.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, TLS, or body-read failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// A decoded response carried a non-empty `error` field
    #[error("Coordination service error: {0}")]
    Service(String),

    /// Failed to assemble the TLS trust store or client identity
    #[error("TLS setup error: {0}")]
    Tls(String),

    /// IO error while reading certificate material
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
