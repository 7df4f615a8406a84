//! Validator operator dashboard binary.
//!
//! Serves the dashboard API, delegating every node operation to
//! `operator-cli`.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use operator_dashboard::{DashboardConfig, DashboardServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// HTTP API for the validator operator dashboard.
#[derive(Debug, Parser)]
#[command(name = "operator-dashboard", version, about)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "OPERATOR_DASHBOARD_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Name or path of the operator-cli program.
    #[arg(long, env = "OPERATOR_DASHBOARD_CLI", default_value = operator_cli::DEFAULT_PROGRAM)]
    cli_program: String,

    /// Upper bound on each operator-cli invocation, in seconds.
    #[arg(long, env = "OPERATOR_DASHBOARD_COMMAND_TIMEOUT_SECS", default_value_t = 30)]
    command_timeout_secs: u64,

    /// Allowed CORS origins; all origins are allowed when none are given.
    #[arg(long, env = "OPERATOR_DASHBOARD_CORS_ORIGINS", value_delimiter = ',')]
    cors_origin: Vec<String>,
}

impl Args {
    fn into_config(self) -> DashboardConfig {
        let mut config = DashboardConfig::new(self.bind)
            .with_cli_program(self.cli_program)
            .with_command_timeout(Duration::from_secs(self.command_timeout_secs));
        for origin in self.cors_origin {
            config = config.with_cors_origin(origin);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config();
    let bind_addr = config.bind_addr;

    info!(
        addr = %bind_addr,
        cli = %config.cli_program,
        timeout_secs = config.command_timeout.as_secs(),
        "Starting operator dashboard"
    );

    let server = DashboardServer::new(config);
    server
        .serve_with_shutdown(bind_addr, shutdown_signal())
        .await
        .with_context(|| format!("dashboard server on {bind_addr} failed"))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
