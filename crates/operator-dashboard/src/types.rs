//! Request and response types for the dashboard API.
//!
//! Everything on the wire is camelCase, which is what the dashboard front
//! end expects.

use std::num::FpCategory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{DashboardError, DashboardResult};

/// Body of `POST /node/stake` and `POST /node/unstake`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StakeRequest {
    /// Amount to stake or unstake.
    #[serde(default)]
    pub amount: Option<StakeAmount>,
}

/// A stake amount as sent by the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StakeAmount {
    /// A numeric string, forwarded verbatim.
    Text(String),
    /// A JSON number, forwarded in its decimal form.
    Number(Number),
}

impl StakeRequest {
    /// Parse a request body. An empty body is a request without an amount.
    ///
    /// # Errors
    ///
    /// Returns a bad request error if the body is not a JSON object of the
    /// expected shape.
    pub fn from_body(body: &[u8]) -> DashboardResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| DashboardError::BadRequest(format!("invalid request body: {e}")))
    }

    /// The amount to forward to the CLI.
    ///
    /// # Errors
    ///
    /// Returns a bad request error if the amount is missing, empty or a
    /// numeric zero. The string `"0"` is forwarded.
    pub fn required_amount(&self) -> DashboardResult<String> {
        match &self.amount {
            Some(StakeAmount::Text(text)) if !text.is_empty() => Ok(text.clone()),
            Some(StakeAmount::Number(number)) if !is_zero(number) => Ok(number.to_string()),
            _ => Err(DashboardError::BadRequest("no amount provided".to_string())),
        }
    }
}

fn is_zero(number: &Number) -> bool {
    number
        .as_f64()
        .is_some_and(|value| value.classify() == FpCategory::Zero)
}

/// Query parameters for `POST /node/status/history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// Start of the history window.
    pub from: Option<String>,
}

impl HistoryQuery {
    /// The `from` parameter; empty counts as missing.
    ///
    /// # Errors
    ///
    /// Returns a bad request error if `from` is missing.
    pub fn required_from(&self) -> DashboardResult<&str> {
        match self.from.as_deref() {
            Some(from) if !from.is_empty() => Ok(from),
            _ => Err(invalid_from(self.from.as_deref())),
        }
    }
}

/// Query parameters for `POST /node/performance`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceQuery {
    /// Start of the performance window.
    pub from: Option<String>,
    /// Request only the most recent entry.
    pub latest_entry: Option<String>,
}

/// Which performance figures were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerformanceRange {
    /// Figures since the given date.
    Since(String),
    /// Only the most recent entry.
    Latest,
}

impl PerformanceQuery {
    /// Resolve the requested range. `from` wins when both are present.
    ///
    /// # Errors
    ///
    /// Returns a bad request error if neither parameter is present.
    pub fn range(&self) -> DashboardResult<PerformanceRange> {
        match (self.from.as_deref(), self.latest_entry.as_deref()) {
            (Some(from), _) if !from.is_empty() => Ok(PerformanceRange::Since(from.to_string())),
            (_, Some(latest)) if !latest.is_empty() => Ok(PerformanceRange::Latest),
            (from, _) => Err(invalid_from(from)),
        }
    }
}

fn invalid_from(from: Option<&str>) -> DashboardError {
    DashboardError::BadRequest(format!(
        "invalid from Date parameter: '{}'",
        from.unwrap_or_default()
    ))
}

/// A point in the node's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatusHistory {
    /// Lifecycle state at that point.
    pub state: String,
    /// Staked amount.
    pub stake_amount: String,
    /// Earnings to date.
    pub lifetime_earnings: String,
    /// Date of the entry.
    pub date: String,
}

/// Resource and throughput figures for the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePerformance {
    /// CPU usage percentage.
    pub cpu: u32,
    /// Memory usage percentage.
    pub ram: u32,
    /// Disk usage percentage.
    pub disk: u32,
    /// Network usage percentage.
    pub network: u32,
    /// Transactions per second processed.
    pub tps_throughput: u32,
    /// Transactions processed.
    pub transactions_count: u64,
    /// State storage usage.
    pub state_storage: u64,
    /// Date of the sample.
    pub date: String,
}

/// Network-wide figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeNetwork {
    /// Node counts by state.
    pub size: NetworkSize,
    /// Throughput.
    pub load: NetworkLoad,
    /// Active/standby balance.
    pub health: NetworkHealth,
    /// Reward issuance.
    pub reward: NetworkReward,
    /// Annual percentage rates.
    pub apr: NetworkApr,
}

/// Node counts by state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSize {
    /// Active validators.
    pub active: u64,
    /// Standby validators.
    pub stand_by: u64,
    /// Desired active validators.
    pub desired: u64,
    /// Validators joining.
    pub joining: u64,
    /// Validators syncing.
    pub syncing: u64,
}

/// Network throughput.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkLoad {
    /// Peak transactions per second.
    pub max_tps: u64,
    /// Average transactions per second.
    pub avg_tps: u64,
    /// Transactions processed.
    pub total_processed: u64,
}

/// Active/standby balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkHealth {
    /// Current ratio.
    pub active_standby_ratio: u32,
    /// Target ratio.
    pub desired_active_standby_ratio: u32,
}

/// Reward issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkReward {
    /// Issued per day.
    pub daily_issuance: String,
    /// Average per day.
    pub avg_per_day: String,
    /// Average per node per day.
    pub avg_per_node_day: String,
}

/// Annual percentage rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkApr {
    /// This node's APR.
    pub node_apr: u32,
    /// Network average APR.
    pub avg_apr: u32,
}

/// Operator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSettings {
    /// Wallet receiving rewards.
    pub reward_wallet_address: String,
    /// Wallet holding the stake.
    pub stake_wallet_address: String,
    /// Email for alerts.
    pub alert_email: String,
    /// Phone number for alerts.
    pub alert_phone_number: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Status message.
    pub status: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// When the server started.
    pub started_at: DateTime<Utc>,
}
