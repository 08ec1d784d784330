// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! HTTP client construction.
//!
//! The coordination service is typically fronted by an internal CA, so the
//! client trusts the system root store plus, if configured, one extra CA
//! file appended to the pool. When a client certificate and key are both
//! configured the client also presents that identity (mutual TLS).

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::ClientError;

/// TLS material referenced from the agent configuration.
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    /// Extra CA bundle (PEM) appended to the system trust store
    pub ca_file: Option<PathBuf>,
    /// Client certificate (PEM) presented to the service
    pub client_certificate: Option<PathBuf>,
    /// Private key (PEM) for the client certificate
    pub client_key: Option<PathBuf>,
}

/// Build the HTTP client used for all coordination-service calls.
///
/// `timeout` bounds each request end to end; there is no other per-request
/// customization anywhere in the agent.
pub fn build_client(tls: &TlsOptions, timeout: Duration) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder().timeout(timeout);

    if let Some(ca_file) = &tls.ca_file {
        for cert in load_ca_bundle(ca_file)? {
            builder = builder.add_root_certificate(cert);
        }
        debug!(path = %ca_file.display(), "Appended CA bundle to trusted roots");
    }

    if let (Some(cert), Some(key)) = (&tls.client_certificate, &tls.client_key) {
        builder = builder.identity(load_identity(cert, key)?);
        debug!(cert = %cert.display(), "Configured client TLS identity");
    }

    builder
        .build()
        .map_err(|e| ClientError::Tls(format!("Failed to build HTTP client: {}", e)))
}

/// Load every certificate from a PEM bundle.
fn load_ca_bundle(path: &Path) -> Result<Vec<reqwest::Certificate>, ClientError> {
    let pem = std::fs::read(path)?;
    reqwest::Certificate::from_pem_bundle(&pem).map_err(|e| {
        ClientError::Tls(format!(
            "Failed to parse CA bundle {}: {}",
            path.display(),
            e
        ))
    })
}

/// Build a client identity from separate certificate and key PEM files.
fn load_identity(cert: &Path, key: &Path) -> Result<reqwest::Identity, ClientError> {
    // reqwest expects certificate and key concatenated in one PEM blob.
    let mut pem = std::fs::read(cert)?;
    pem.push(b'\n');
    pem.extend_from_slice(&std::fs::read(key)?);
    reqwest::Identity::from_pem(&pem).map_err(|e| {
        ClientError::Tls(format!(
            "Failed to load client identity from {} and {}: {}",
            cert.display(),
            key.display(),
            e
        ))
    })
}
