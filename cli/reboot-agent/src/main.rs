// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Reboot Agent
//!
//! One-shot agent negotiating cluster-coordinated OS restarts. Meant to be
//! run periodically from cron or a systemd timer; preventing overlapping
//! invocations is the scheduler's job, not ours.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use coordinator_client::{CoordinatorClient, TlsOptions};
use reboot_agent::{AgentConfig, Negotiator, Outcome};

/// Version string including the CI buildstamp, for `--version`.
fn version_string() -> String {
    format!(
        "{} ({})",
        env!("CARGO_PKG_VERSION"),
        option_env!("STAMP").unwrap_or("no-STAMP")
    )
}

#[derive(Parser)]
#[command(
    name = "reboot-agent",
    version = version_string(),
    about = "Node-side agent for cluster-coordinated OS restarts"
)]
struct Cli {
    /// Path to the agent configuration file
    #[arg(short, long, default_value = "/etc/reboot-agent/agent.yml")]
    config: PathBuf,

    /// Marker file that disables the agent while present; its contents,
    /// if any, are logged as the reason
    #[arg(long, default_value = "/etc/reboot-agent/disabled")]
    disable_file: PathBuf,

    /// Log debug output
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug {
        "reboot_agent=debug,coordinator_client=debug"
    } else {
        "reboot_agent=info,coordinator_client=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
        ))
        .init();

    // The disable marker wins over everything, including broken config.
    if cli.disable_file.exists() {
        let reason = std::fs::read_to_string(&cli.disable_file).unwrap_or_default();
        let reason = reason.trim();
        if reason.is_empty() {
            info!(
                marker = %cli.disable_file.display(),
                "Disable marker present, skipping restart negotiation"
            );
        } else {
            info!(
                marker = %cli.disable_file.display(),
                %reason,
                "Disable marker present, skipping restart negotiation"
            );
        }
        return Ok(());
    }

    let config = AgentConfig::load(&cli.config)?;

    let tls = TlsOptions {
        ca_file: config.service_url_ca_file.clone(),
        client_certificate: config.ssl_certificate_file.clone(),
        client_key: config.ssl_private_key.clone(),
    };
    let http = coordinator_client::build_client(&tls, config.timeout)?;
    let client = CoordinatorClient::new(config.service_url.clone(), http);

    let outcome = Negotiator::new(&config, &client).run().await?;
    match &outcome {
        Outcome::HooksCompleted => {
            info!("All restart hooks completed, node is cleared to restart");
        }
        Outcome::InquiryDeclined { message } => {
            info!(%message, "Coordinator sees no reason to restart, nothing to do");
        }
        Outcome::NotAuthorized { message } => {
            info!(%message, "Restart not authorized this round");
        }
        Outcome::Rejected { message } => {
            warn!(%message, "Restart request rejected, exiting");
        }
    }

    let code = outcome.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
