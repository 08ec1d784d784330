// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Test helpers for reboot-agent integration tests.
//!
//! Provides a filesystem fixture (config file, precondition script, hooks
//! directory) plus wiremock matchers for the correlation-ID threading of
//! the negotiation protocol. Hooks append their names to `order.log` so
//! tests can assert execution order.

// Allow unused code - these helpers are infrastructure for integration tests
// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(dead_code, deprecated)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// FQDN pinned via the `requesting_fqdn` config override so request bodies
/// are deterministic in tests.
pub const TEST_FQDN: &str = "node01.example.com";

/// Exit code configured as "restart wanted" in test configs.
pub const REBOOT_EXIT_CODE: i32 = 42;

/// Get a Command for running the reboot-agent binary
pub fn agent_cmd() -> Command {
    Command::cargo_bin("reboot-agent").expect("Failed to find reboot-agent binary")
}

/// One agent run's worth of on-disk state.
pub struct Fixture {
    pub dir: TempDir,
    pub config: PathBuf,
    pub script: PathBuf,
    pub hooks_dir: PathBuf,
}

impl Fixture {
    /// Create a fixture with a "precondition not met" script and an empty
    /// hooks directory; tests add hooks and flip the precondition.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let script = dir.path().join("needs-reboot.sh");
        let hooks_dir = dir.path().join("hooks.d");
        std::fs::create_dir(&hooks_dir).expect("failed to create hooks dir");
        let config = dir.path().join("agent.yml");

        let fixture = Self {
            dir,
            config,
            script,
            hooks_dir,
        };
        fixture.set_precondition_exit(1);
        fixture
    }

    /// Make the precondition script exit with `code`.
    pub fn set_precondition_exit(&self, code: i32) {
        write_executable(&self.script, &format!("#!/bin/sh\nexit {}\n", code));
    }

    /// Add a hook that records its name in `order.log` and exits `code`.
    pub fn add_hook(&self, name: &str, code: i32) {
        let log = self.dir.path().join("order.log");
        write_executable(
            &self.hooks_dir.join(name),
            &format!("#!/bin/sh\necho {} >> {}\nexit {}\n", name, log.display(), code),
        );
    }

    /// Names from `order.log`, in execution order. Empty if no hook ran.
    pub fn hook_order(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("order.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Write a config pointing at `service_url`, plus any extra YAML lines.
    pub fn write_config(&self, service_url: &str, extra: &str) {
        let yaml = format!(
            "service_url: {}\n\
             requesting_fqdn: {}\n\
             timeout: 2s\n\
             restart_condition_script: {}\n\
             restart_condition_script_exit_code_for_reboot: {}\n\
             os_restart_hooks_dir: {}\n\
             {}",
            service_url,
            TEST_FQDN,
            self.script.display(),
            REBOOT_EXIT_CODE,
            self.hooks_dir.display(),
            extra
        );
        std::fs::write(&self.config, yaml).expect("failed to write config");
    }

    /// A Command preconfigured with this fixture's config path and a
    /// disable-file path that does not exist.
    pub fn cmd(&self) -> Command {
        let mut cmd = agent_cmd();
        cmd.arg("--config")
            .arg(&self.config)
            .arg("--disable-file")
            .arg(self.dir.path().join("disabled"));
        cmd
    }
}

fn write_executable(path: &Path, contents: &str) {
    std::fs::write(path, contents).expect("failed to write script");
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("failed to chmod script");
}

/// Matches a negotiation request body by its `request_id` field: either
/// absent (first contact) or equal to a specific correlation ID.
pub struct RequestIdIs(pub Option<&'static str>);

impl wiremock::Match for RequestIdIs {
    fn matches(&self, request: &wiremock::Request) -> bool {
        let body: serde_json::Value = match serde_json::from_slice(&request.body) {
            Ok(v) => v,
            Err(_) => return false,
        };
        match self.0 {
            Some(id) => body.get("request_id").and_then(|v| v.as_str()) == Some(id),
            None => body.get("request_id").is_none(),
        }
    }
}

/// Matches a body whose `fqdn` is the pinned test FQDN and whose `uptime`
/// looks like a seconds-denominated duration string.
pub struct IdentityPayload;

impl wiremock::Match for IdentityPayload {
    fn matches(&self, request: &wiremock::Request) -> bool {
        let body: serde_json::Value = match serde_json::from_slice(&request.body) {
            Ok(v) => v,
            Err(_) => return false,
        };
        let fqdn_ok = body.get("fqdn").and_then(|v| v.as_str()) == Some(TEST_FQDN);
        let uptime_ok = body
            .get("uptime")
            .and_then(|v| v.as_str())
            .is_some_and(|s| s.ends_with('s') && s[..s.len() - 1].parse::<u64>().is_ok());
        fqdn_ok && uptime_ok
    }
}
