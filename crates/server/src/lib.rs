//! Shopping Reply Bot Server
//!
//! HTTP surface around the reply engine: a comment pass over the configured
//! videos, a dry-run reply endpoint, health and Prometheus metrics.

pub mod http;
pub mod metrics;
pub mod state;
pub mod youtube;

pub use http::create_router;
pub use metrics::{init_metrics, record_pass};
pub use state::AppState;
pub use youtube::YoutubeClient;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Missing config: {0}")]
    MissingConfig(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("A comment pass is already running")]
    Busy,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Reply(#[from] shopbot_core::Error),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            ServerError::Busy => StatusCode::CONFLICT,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Reply(shopbot_core::Error::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ServerError::MissingConfig(_) | ServerError::Config(_) | ServerError::Reply(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        let body = serde_json::json!({
            "status": "error",
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
