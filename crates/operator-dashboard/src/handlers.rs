//! HTTP request handlers for the dashboard API.
//!
//! Every handler runs at most one `operator-cli` command, except
//! `update_node`, which runs `update` and then `restart`. Failures are
//! converted to responses here and never propagate further.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use operator_cli::{NodeStatus, NodeVersion};
use tracing::{error, info};

use crate::error::{DashboardError, DashboardResult};
use crate::state::DashboardState;
use crate::types::{
    HealthResponse, HistoryQuery, NodeNetwork, NodePerformance, NodeSettings, NodeStatusHistory,
    PerformanceQuery, StakeRequest,
};

const START_FAILED: &str = "Unable to start validator";
const STOP_FAILED: &str = "Unable to stop validator";
const STATUS_FAILED: &str = "Unable to fetch status";
const STAKE_FAILED: &str = "Unable to execute stake";
const UNSTAKE_FAILED: &str = "Unable to execute unstake";
const UPDATE_FAILED: &str = "Error occurred while updating";
const RESTART_FAILED: &str = "Error occurred while restarting the GUI";
const VERSION_FAILED: &str = "Unable to fetch version";

/// Handle GET /api/health - health check endpoint.
pub async fn health_check(State(state): State<Arc<DashboardState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.uptime_secs(),
        started_at: state.started_at(),
    })
}

/// Handle POST /api/node/start - start the validator.
pub async fn start_node(State(state): State<Arc<DashboardState>>) -> DashboardResult<()> {
    state
        .cli()
        .start()
        .await
        .map_err(|e| DashboardError::upstream(START_FAILED, e))
}

/// Handle POST /api/node/stop - stop the validator.
pub async fn stop_node(State(state): State<Arc<DashboardState>>) -> DashboardResult<()> {
    state
        .cli()
        .stop()
        .await
        .map_err(|e| DashboardError::upstream(STOP_FAILED, e))
}

/// Handle GET /api/node/status - current status, enriched from the cache.
pub async fn get_status(
    State(state): State<Arc<DashboardState>>,
) -> DashboardResult<Json<NodeStatus>> {
    let fresh = state
        .cli()
        .status()
        .await
        .map_err(|e| DashboardError::upstream(STATUS_FAILED, e))?;

    let status = state.status_cache().observe(fresh).await;
    Ok(Json(status))
}

/// Handle POST /api/node/stake - stake `amount`.
pub async fn stake(State(state): State<Arc<DashboardState>>, body: Bytes) -> DashboardResult<()> {
    let amount = StakeRequest::from_body(&body)?.required_amount()?;

    state
        .cli()
        .stake(&amount)
        .await
        .map_err(|e| DashboardError::upstream(STAKE_FAILED, e))
}

/// Handle POST /api/node/unstake - unstake `amount`.
pub async fn unstake(
    State(state): State<Arc<DashboardState>>,
    body: Bytes,
) -> DashboardResult<()> {
    let amount = StakeRequest::from_body(&body)?.required_amount()?;

    state
        .cli()
        .unstake(&amount)
        .await
        .map_err(|e| DashboardError::upstream(UNSTAKE_FAILED, e))
}

/// Handle POST /api/node/update - update, then restart.
///
/// `restart` only starts once `update` has finished successfully. A failed
/// update is reported and the restart is skipped; a failed restart after a
/// successful update is reported as is, without rollback.
pub async fn update_node(State(state): State<Arc<DashboardState>>) -> DashboardResult<()> {
    let cli = state.cli();

    if let Err(e) = cli.update().await {
        error!(error = %e, "validator update failed, not restarting");
        return Err(DashboardError::upstream(UPDATE_FAILED, e));
    }

    cli.restart()
        .await
        .map_err(|e| DashboardError::upstream(RESTART_FAILED, e))?;

    info!("validator updated and restarted");
    Ok(())
}

/// Handle POST /api/node/status/history - status history since `from`.
pub async fn get_status_history(
    State(state): State<Arc<DashboardState>>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> DashboardResult<Json<NodeStatusHistory>> {
    let Query(query) = query?;
    let from = query.required_from()?;
    let history = state.status_source().history(from).await?;
    Ok(Json(history))
}

/// Handle GET /api/node/version - CLI and validator versions.
pub async fn get_version(
    State(state): State<Arc<DashboardState>>,
) -> DashboardResult<Json<NodeVersion>> {
    let version = state
        .cli()
        .version()
        .await
        .map_err(|e| DashboardError::upstream(VERSION_FAILED, e))?;
    Ok(Json(version))
}

/// Handle POST /api/node/performance - performance figures.
pub async fn get_performance(
    State(state): State<Arc<DashboardState>>,
    query: Result<Query<PerformanceQuery>, QueryRejection>,
) -> DashboardResult<Json<NodePerformance>> {
    let Query(query) = query?;
    let range = query.range()?;
    let performance = state.status_source().performance(&range).await?;
    Ok(Json(performance))
}

/// Handle POST /api/node/network - network-wide figures.
pub async fn get_network(
    State(state): State<Arc<DashboardState>>,
) -> DashboardResult<Json<NodeNetwork>> {
    let network = state.status_source().network().await?;
    Ok(Json(network))
}

/// Handle POST /api/node/settings - operator settings.
pub async fn get_settings(
    State(state): State<Arc<DashboardState>>,
) -> DashboardResult<Json<NodeSettings>> {
    let settings = state.status_source().settings().await?;
    Ok(Json(settings))
}
