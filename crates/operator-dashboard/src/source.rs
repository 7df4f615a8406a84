//! Report sources for the history, performance, network and settings views.
//!
//! `operator-cli` does not yet print anything parseable for these reports.
//! Handlers depend on [`StatusSource`] only, so [`MockStatusSource`] can be
//! swapped for a parsing implementation without touching routing.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use operator_cli::{CliCommand, OperatorCli};
use tracing::{debug, warn};

use crate::error::DashboardResult;
use crate::types::{
    NetworkApr, NetworkHealth, NetworkLoad, NetworkReward, NetworkSize, NodeNetwork,
    NodePerformance, NodeSettings, NodeStatusHistory, PerformanceRange,
};

/// Boxed future returned by [`StatusSource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = DashboardResult<T>> + Send + 'a>>;

/// Supplies the dashboard's report payloads.
pub trait StatusSource: Send + Sync + fmt::Debug {
    /// Status history since `from`.
    fn history<'a>(&'a self, from: &'a str) -> SourceFuture<'a, NodeStatusHistory>;

    /// Performance figures for `range`.
    fn performance<'a>(&'a self, range: &'a PerformanceRange) -> SourceFuture<'a, NodePerformance>;

    /// Network-wide figures.
    fn network(&self) -> SourceFuture<'_, NodeNetwork>;

    /// Operator settings.
    fn settings(&self) -> SourceFuture<'_, NodeSettings>;
}

/// Returns fixed templates while still running the matching CLI command.
///
/// The command runs in a detached task; its outcome is only logged, so a
/// failing or slow CLI never affects the response.
#[derive(Debug, Clone)]
pub struct MockStatusSource {
    cli: OperatorCli,
}

impl MockStatusSource {
    /// Create a mock source that fires commands through `cli`.
    #[must_use]
    pub fn new(cli: OperatorCli) -> Self {
        Self { cli }
    }

    fn fire_and_forget(&self, command: CliCommand) {
        let cli = self.cli.clone();
        tokio::spawn(async move {
            match cli.execute(&command).await {
                Ok(output) => {
                    debug!(command = %command, stdout = %output.stdout_lossy(), "background operator-cli call finished");
                }
                Err(e) => {
                    warn!(command = %command, error = %e, "background operator-cli call failed");
                }
            }
        });
    }
}

impl StatusSource for MockStatusSource {
    fn history<'a>(&'a self, from: &'a str) -> SourceFuture<'a, NodeStatusHistory> {
        Box::pin(async move {
            self.fire_and_forget(CliCommand::Status);
            Ok(history_template(from))
        })
    }

    fn performance<'a>(&'a self, range: &'a PerformanceRange) -> SourceFuture<'a, NodePerformance> {
        Box::pin(async move {
            self.fire_and_forget(CliCommand::Performance);
            Ok(performance_template(range))
        })
    }

    fn network(&self) -> SourceFuture<'_, NodeNetwork> {
        Box::pin(async move {
            self.fire_and_forget(CliCommand::Network);
            Ok(network_template())
        })
    }

    fn settings(&self) -> SourceFuture<'_, NodeSettings> {
        Box::pin(async move {
            self.fire_and_forget(CliCommand::Settings);
            Ok(settings_template())
        })
    }
}

fn history_template(from: &str) -> NodeStatusHistory {
    NodeStatusHistory {
        state: "active".to_string(),
        stake_amount: "123456.78".to_string(),
        lifetime_earnings: "123.45".to_string(),
        date: from.to_string(),
    }
}

fn performance_template(range: &PerformanceRange) -> NodePerformance {
    let date = match range {
        PerformanceRange::Since(from) => from.clone(),
        PerformanceRange::Latest => String::new(),
    };

    NodePerformance {
        cpu: 80,
        ram: 60,
        disk: 35,
        network: 15,
        tps_throughput: 100,
        transactions_count: 9,
        state_storage: 45,
        date,
    }
}

fn network_template() -> NodeNetwork {
    NodeNetwork {
        size: NetworkSize {
            active: 9000,
            stand_by: 5000,
            desired: 8000,
            joining: 6000,
            syncing: 12345,
        },
        load: NetworkLoad {
            max_tps: 123,
            avg_tps: 99,
            total_processed: 500,
        },
        health: NetworkHealth {
            active_standby_ratio: 60,
            desired_active_standby_ratio: 75,
        },
        reward: NetworkReward {
            daily_issuance: "321.01".to_string(),
            avg_per_day: "123.45".to_string(),
            avg_per_node_day: "111.23".to_string(),
        },
        apr: NetworkApr {
            node_apr: 75,
            avg_apr: 55,
        },
    }
}

fn settings_template() -> NodeSettings {
    NodeSettings {
        reward_wallet_address: "0xA206aB7db8EfB9ca23a869D34cDb332842D5F4ba".to_string(),
        stake_wallet_address: "0xA206aB7db8EfB9ca23a869D34cDb332842D5F4cc".to_string(),
        alert_email: "test@shardeum.com".to_string(),
        alert_phone_number: "+11231231234".to_string(),
    }
}
