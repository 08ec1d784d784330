// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Agent configuration.
//!
//! Loaded once at startup from a YAML file and read-only afterwards. All
//! validation failures here are fatal: a node that cannot prove its
//! configuration is sane must not enter a restart negotiation.
//!
//! ```yaml
//! service_url: https://coordinator.example.com/
//! service_url_ca_file: /etc/reboot-agent/coordinator-ca.pem
//! timeout: 5s
//! restart_condition_script: /usr/local/sbin/needs-reboot
//! restart_condition_script_exit_code_for_reboot: 42
//! os_restart_hooks_dir: /etc/reboot-agent/hooks.d
//! os_restart_hooks_allow_fail: false
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::AgentError;

/// Default end-to-end timeout for each HTTP request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Key/value settings from the agent's config file.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// HTTP request timeout (humantime format, e.g. `5s`)
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Base URL of the coordination service; normalized to end with `/`
    pub service_url: String,

    /// Extra CA bundle appended to the system trust store
    #[serde(default)]
    pub service_url_ca_file: Option<PathBuf>,

    /// Override for the FQDN reported to the coordinator
    #[serde(default)]
    pub requesting_fqdn: Option<String>,

    /// Private key for the client TLS identity
    #[serde(default)]
    pub ssl_private_key: Option<PathBuf>,

    /// Certificate for the client TLS identity
    #[serde(default)]
    pub ssl_certificate_file: Option<PathBuf>,

    /// Require a complete client identity (certificate and key)
    #[serde(default)]
    pub ssl_require_and_verify_client_cert: bool,

    /// External program deciding whether this node wants a restart
    pub restart_condition_script: PathBuf,

    /// Exit code of the condition script that means "restart wanted"
    #[serde(default)]
    pub restart_condition_script_exit_code_for_reboot: i32,

    /// Directory of programs to run once a restart is authorized
    pub os_restart_hooks_dir: PathBuf,

    /// Continue past failing hooks instead of aborting the run
    #[serde(default)]
    pub os_restart_hooks_allow_fail: bool,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl AgentConfig {
    /// Read and validate the config file.
    pub fn load(path: &Path) -> Result<Self, AgentError> {
        debug!(path = %path.display(), "Reading config file");
        let data = std::fs::read_to_string(path).map_err(|e| {
            AgentError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config: AgentConfig = serde_yaml::from_str(&data)
            .map_err(|e| AgentError::Config(format!("In config file {}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&mut self) -> Result<(), AgentError> {
        Url::parse(&self.service_url).map_err(|e| {
            AgentError::Config(format!(
                "Failed to parse service_url {}: {}",
                self.service_url, e
            ))
        })?;
        if !self.service_url.ends_with('/') {
            self.service_url.push('/');
        }

        if let Some(path) = &self.service_url_ca_file {
            require_file("service_url_ca_file", path)?;
        }
        if let Some(path) = &self.ssl_private_key {
            require_file("ssl_private_key", path)?;
        }
        if let Some(path) = &self.ssl_certificate_file {
            require_file("ssl_certificate_file", path)?;
        }

        if self.ssl_require_and_verify_client_cert
            && (self.ssl_certificate_file.is_none() || self.ssl_private_key.is_none())
        {
            return Err(AgentError::Config(
                "ssl_require_and_verify_client_cert is set but ssl_certificate_file or \
                 ssl_private_key is missing"
                    .to_string(),
            ));
        }

        require_file("restart_condition_script", &self.restart_condition_script)?;

        if !self.os_restart_hooks_dir.is_dir() {
            return Err(AgentError::Config(format!(
                "Failed to find configured os_restart_hooks_dir {}",
                self.os_restart_hooks_dir.display()
            )));
        }

        Ok(())
    }
}

fn require_file(setting: &str, path: &Path) -> Result<(), AgentError> {
    if path.exists() {
        Ok(())
    } else {
        Err(AgentError::Config(format!(
            "Failed to find configured {} {}",
            setting,
            path.display()
        )))
    }
}
