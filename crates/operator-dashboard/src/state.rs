//! Shared state for the dashboard server.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use operator_cli::{CommandRunner, OperatorCli, ProcessRunner};

use crate::config::DashboardConfig;
use crate::source::{MockStatusSource, StatusSource};
use crate::status_cache::StatusCache;

/// Shared state for the dashboard server.
#[derive(Debug)]
pub struct DashboardState {
    /// Dashboard configuration.
    config: Arc<DashboardConfig>,
    /// Client for the external CLI.
    cli: OperatorCli,
    /// Source of report payloads.
    status_source: Arc<dyn StatusSource>,
    /// Last known active status.
    status_cache: StatusCache,
    /// Server start time.
    start_time: Instant,
    /// Server start time (wall clock).
    started_at: DateTime<Utc>,
}

impl DashboardState {
    /// Create a new dashboard state that spawns the configured CLI.
    pub fn new(config: DashboardConfig) -> Self {
        Self::with_runner(config, Arc::new(ProcessRunner))
    }

    /// Create a new dashboard state backed by a custom command runner.
    pub fn with_runner(config: DashboardConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let cli = OperatorCli::with_runner(runner)
            .with_program(config.cli_program.clone())
            .with_timeout(config.command_timeout);
        let status_source: Arc<dyn StatusSource> = Arc::new(MockStatusSource::new(cli.clone()));

        Self {
            config: Arc::new(config),
            cli,
            status_source,
            status_cache: StatusCache::new(),
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Replace the report source.
    #[must_use]
    pub fn with_status_source(mut self, source: Arc<dyn StatusSource>) -> Self {
        self.status_source = source;
        self
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Get the CLI client.
    #[must_use]
    pub fn cli(&self) -> &OperatorCli {
        &self.cli
    }

    /// Get the report source.
    #[must_use]
    pub fn status_source(&self) -> &dyn StatusSource {
        self.status_source.as_ref()
    }

    /// Get the status cache.
    #[must_use]
    pub fn status_cache(&self) -> &StatusCache {
        &self.status_cache
    }

    /// Get server uptime in seconds.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// When the server started.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
