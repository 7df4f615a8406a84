//! Error types for the dashboard server.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use operator_cli::CliError;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Result type alias for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Errors that can occur in the dashboard server.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// A required request parameter is missing or unusable.
    #[error("{0}")]
    BadRequest(String),

    /// An `operator-cli` call failed.
    #[error("{summary}: {source}")]
    Upstream {
        /// Fixed, route-specific description of what was attempted.
        summary: String,
        /// The underlying CLI failure.
        #[source]
        source: CliError,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    /// Wrap a CLI failure with the route's summary message.
    ///
    /// Arguments rejected before anything was executed are the caller's
    /// fault and become [`DashboardError::BadRequest`].
    #[must_use]
    pub fn upstream(summary: impl Into<String>, source: CliError) -> Self {
        if source.is_invalid_argument() {
            return Self::BadRequest(source.to_string());
        }
        Self::Upstream {
            summary: summary.into(),
            source,
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::BadRequest(message) => {
                debug!(%message, "rejecting request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: message.clone(),
                        detail: None,
                    },
                )
            }
            Self::Upstream { summary, source } => {
                warn!(%summary, error = %source, "operator-cli call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: summary.clone(),
                        detail: Some(source.detail()),
                    },
                )
            }
            Self::BindFailed(_, _) | Self::Internal(_) => {
                error!(error = %self, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: self.to_string(),
                        detail: None,
                    },
                )
            }
        };

        let json = serde_json::to_string(&body)
            .unwrap_or_else(|_| r#"{"error":"failed to serialize error"}"#.to_string());

        (status, [("content-type", "application/json")], json).into_response()
    }
}

impl From<QueryRejection> for DashboardError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.to_string())
    }
}
