//! HTTP Endpoints

use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use shopbot_agent::PassReport;
use shopbot_core::{ParsedRequest, ReplyDecision};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::metrics::{metrics_handler, record_pass};
use crate::state::AppState;
use crate::ServerError;

const BANNER: &str = "Shopping reply bot is running.";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
        .route("/check-comments", get(check_comments))
        .route("/api/reply", post(dry_run_reply))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn banner() -> &'static str {
    BANNER
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /check-comments` response
#[derive(Debug, Serialize)]
pub struct CheckCommentsResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub report: PassReport,
}

/// Run one comment pass over the configured videos
async fn check_comments(
    State(state): State<AppState>,
) -> Result<Json<CheckCommentsResponse>, ServerError> {
    let responder = state
        .responder()
        .map_err(|missing| ServerError::MissingConfig(missing.join(", ")))?;

    if state.settings.affiliate.effective_tag().is_none() {
        tracing::warn!("Affiliate tag missing; suggestion replies will be counted as failed");
    }

    let _guard = state.pass_lock().try_lock().map_err(|_| ServerError::Busy)?;

    let report = responder.run_pass(&state.settings.youtube.video_ids).await;
    record_pass(report.replies.len(), report.failed);

    Ok(Json(CheckCommentsResponse {
        status: "ok",
        report,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub parsed: Option<ParsedRequest>,
    pub decision: ReplyDecision,
    pub reply: String,
}

/// Run the reply pipeline on arbitrary text without touching any platform
async fn dry_run_reply(
    State(state): State<AppState>,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<ReplyResponse>, ServerError> {
    if request.text.trim().is_empty() {
        return Err(ServerError::InvalidRequest("text must not be empty".to_string()));
    }

    let reply = state.engine.respond(&request.text)?;
    Ok(Json(ReplyResponse {
        parsed: reply.parsed,
        decision: reply.decision,
        reply: reply.text,
    }))
}
