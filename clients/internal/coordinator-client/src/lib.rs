// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Restart Coordination Service Client
//!
//! Thin HTTPS client for the two negotiation endpoints of the restart
//! coordination service. Both endpoints accept a JSON [`RestartRequest`]
//! via POST and answer with a [`RestartResponse`].
//!
//! Decode policy, shared by both calls:
//!
//! - connection, TLS, or body-read failures are fatal transport errors;
//! - a body that does not decode as the expected schema is logged as a
//!   warning and treated as an all-default response (recoverable);
//! - a decoded response carrying a non-empty `error` field is fatal.
//!
//! Each call is exactly one HTTP round trip; the client never retries.

pub mod error;
pub mod transport;

use coordinator_types::{RestartRequest, RestartResponse};
use tracing::{debug, warn};

pub use error::ClientError;
pub use transport::{TlsOptions, build_client};

/// Path of the inquiry endpoint, relative to the service base URL.
const INQUIRE_PATH: &str = "v1/inquire/restart/";

/// Path of the OS-restart request endpoint, relative to the service base URL.
const REQUEST_OS_PATH: &str = "v1/request/restart/os";

/// Client handle for the coordination service.
///
/// Constructed once at startup and passed by reference; holds no mutable
/// state beyond the connection pool inside [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct CoordinatorClient {
    base_url: String,
    http: reqwest::Client,
}

impl CoordinatorClient {
    /// Create a client for a service base URL.
    ///
    /// `base_url` must already be normalized to end with `/` (the agent's
    /// configuration loader guarantees this).
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Ask the coordinator whether this node should restart even though no
    /// local precondition fired.
    pub async fn inquire(&self, req: &RestartRequest) -> Result<RestartResponse, ClientError> {
        self.post(INQUIRE_PATH, req).await
    }

    /// Request permission for an OS restart.
    pub async fn request_restart(
        &self,
        req: &RestartRequest,
    ) -> Result<RestartResponse, ClientError> {
        self.post(REQUEST_OS_PATH, req).await
    }

    async fn post(
        &self,
        path: &str,
        req: &RestartRequest,
    ) -> Result<RestartResponse, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, fqdn = %req.fqdn, request_id = ?req.request_id, "Sending request");

        let response = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("Request to {} failed: {}", url, e)))?;

        let body = response.text().await.map_err(|e| {
            ClientError::Transport(format!("Failed to read response body from {}: {}", url, e))
        })?;
        debug!(%url, %body, "Received response");

        let decoded: RestartResponse = match serde_json::from_str(&body) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(%url, %body, "Could not parse JSON response: {}", e);
                RestartResponse::default()
            }
        };

        if !decoded.error.is_empty() {
            return Err(ClientError::Service(decoded.error));
        }

        debug!(%url, "Received valid response");
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request() -> RestartRequest {
        RestartRequest {
            fqdn: "node01.example.com".to_string(),
            uptime: "83836s".to_string(),
            request_id: None,
        }
    }

    async fn client_for(server: &MockServer) -> CoordinatorClient {
        let http = build_client(&TlsOptions::default(), std::time::Duration::from_secs(5))
            .expect("client should build");
        CoordinatorClient::new(format!("{}/", server.uri()), http)
    }

    #[tokio::test]
    async fn inquire_posts_json_to_inquiry_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/inquire/restart/"))
            .and(header("content-type", "application/json"))
            .and(body_json_string(
                r#"{"fqdn":"node01.example.com","uptime":"83836s"}"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "NoRestartNeeded",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let resp = client.inquire(&sample_request()).await.unwrap();
        assert_eq!(resp.message, "NoRestartNeeded");
        assert!(!resp.go_ahead);
    }

    #[tokio::test]
    async fn request_restart_hits_os_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/request/restart/os"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "found_cluster": "web",
                "ask_again_in": "30m",
                "request_id": "c7a9",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let resp = client.request_restart(&sample_request()).await.unwrap();
        assert_eq!(resp.found_cluster, "web");
        assert_eq!(resp.request_id, "c7a9");
    }

    #[tokio::test]
    async fn garbage_body_decodes_to_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/request/restart/os"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let resp = client.request_restart(&sample_request()).await.unwrap();
        assert_eq!(resp, RestartResponse::default());
    }

    #[tokio::test]
    async fn service_error_field_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/inquire/restart/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": "database unavailable",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.inquire(&sample_request()).await.unwrap_err();
        match err {
            ClientError::Service(msg) => assert_eq!(msg, "database unavailable"),
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn connection_failure_is_transport_error() {
        // Nothing listens on this port.
        let http = build_client(&TlsOptions::default(), std::time::Duration::from_secs(1))
            .expect("client should build");
        let client = CoordinatorClient::new("http://127.0.0.1:9/", http);
        let err = client.inquire(&sample_request()).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
