//! Dashboard server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::routes::create_router;
use crate::state::DashboardState;

/// HTTP server for the validator operator dashboard.
#[derive(Debug, Clone)]
pub struct DashboardServer {
    state: Arc<DashboardState>,
}

impl DashboardServer {
    /// Create a server that runs the configured `operator-cli` program.
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        Self::with_state(Arc::new(DashboardState::new(config)))
    }

    /// Create a server around existing state.
    #[must_use]
    pub fn with_state(state: Arc<DashboardState>) -> Self {
        Self { state }
    }

    /// Get the dashboard state for external access.
    #[must_use]
    pub fn state(&self) -> Arc<DashboardState> {
        self.state.clone()
    }

    /// Start the dashboard server and listen for connections.
    ///
    /// This method runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> DashboardResult<()> {
        self.serve_with_shutdown(addr, std::future::pending::<()>()).await
    }

    /// Start the dashboard server with graceful shutdown support.
    ///
    /// The server stops accepting connections when `shutdown` completes and
    /// returns once in-flight requests have finished.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, addr: SocketAddr, shutdown: F) -> DashboardResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| DashboardError::BindFailed(addr, e))?;

        let local_addr = listener.local_addr().unwrap_or(addr);
        info!(
            addr = %local_addr,
            cli = %self.state.cli().program(),
            "Dashboard server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| DashboardError::Internal(e.to_string()))?;

        info!("Dashboard server shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    ///
    /// Useful for testing or embedding in another server.
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }
}
