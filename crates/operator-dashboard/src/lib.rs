//! # operator-dashboard
//!
//! HTTP API behind the validator operator dashboard.
//!
//! Every endpoint is a thin wrapper around one `operator-cli` subcommand:
//! the CLI does the work, this crate turns its exit status and output into
//! HTTP responses. The only state kept between requests is the last status
//! seen while the validator was active, used to keep identifying the node
//! after it goes inactive.
//!
//! ## Example
//!
//! ```rust,no_run
//! use operator_dashboard::{DashboardConfig, DashboardServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = DashboardConfig::default().with_cli_program("/usr/local/bin/operator-cli");
//!     let server = DashboardServer::new(config);
//!     // server.serve("0.0.0.0:8080".parse().unwrap()).await.unwrap();
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/api/health` | GET | Liveness and uptime |
//! | `/api/node/start` | POST | Start the validator |
//! | `/api/node/stop` | POST | Stop the validator |
//! | `/api/node/update` | POST | Update, then restart |
//! | `/api/node/stake` | POST | Stake `amount` |
//! | `/api/node/unstake` | POST | Unstake `amount` |
//! | `/api/node/status` | GET | Current status |
//! | `/api/node/status/history` | POST | Status history since `from` |
//! | `/api/node/version` | GET | CLI and validator versions |
//! | `/api/node/performance` | POST | Performance figures |
//! | `/api/node/network` | POST | Network-wide figures |
//! | `/api/node/settings` | POST | Operator settings |
//!
//! A failing CLI call answers `502` with `{"error": <summary>, "detail": <stderr>}`;
//! a missing or unusable parameter answers `400` with `{"error": <message>}`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod source;
pub mod state;
pub mod status_cache;
pub mod types;

// Re-export main types
pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use routes::create_router;
pub use server::DashboardServer;
pub use source::{MockStatusSource, SourceFuture, StatusSource};
pub use state::DashboardState;
pub use status_cache::StatusCache;
pub use types::{
    HealthResponse, NodeNetwork, NodePerformance, NodeSettings, NodeStatusHistory,
    PerformanceRange, StakeRequest,
};
