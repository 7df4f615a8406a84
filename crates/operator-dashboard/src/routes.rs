//! Route configuration for the dashboard API.

use std::sync::Arc;

use axum::routing::{get, post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::DashboardConfig;
use crate::handlers::{
    get_network, get_performance, get_settings, get_status, get_status_history, get_version,
    health_check, stake, start_node, stop_node, unstake, update_node,
};
use crate::state::DashboardState;

/// Create the dashboard API router.
pub fn create_router(state: Arc<DashboardState>) -> Router {
    let cors = build_cors_layer(state.config());

    let api_routes = Router::new()
        .route("/health", get(health_check))
        // Lifecycle
        .route("/node/start", post(start_node))
        .route("/node/stop", post(stop_node))
        .route("/node/update", post(update_node))
        // Staking
        .route("/node/stake", post(stake))
        .route("/node/unstake", post(unstake))
        // Status
        .route("/node/status", get(get_status))
        .route("/node/status/history", post(get_status_history))
        .route("/node/version", get(get_version))
        // Reports
        .route("/node/performance", post(get_performance))
        .route("/node/network", post(get_network))
        .route("/node/settings", post(get_settings));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &DashboardConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
