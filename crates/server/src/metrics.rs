//! Prometheus metrics

use axum::extract::State;
use axum::http::StatusCode;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use shopbot_agent::batch::counters;

use crate::state::AppState;

/// Install the global Prometheus recorder and describe the bot's counters
///
/// When a recorder is already installed (tests building several routers)
/// the returned handle renders an empty registry.
pub fn init_metrics() -> PrometheusHandle {
    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(error = %e, "Prometheus recorder not installed");
            PrometheusBuilder::new().build_recorder().handle()
        }
    };

    metrics::describe_counter!(counters::REPLIES_POSTED, "Replies posted to comment threads");
    metrics::describe_counter!(
        counters::COMMENTS_SKIPPED,
        "Comment threads skipped (answered, empty or no signal)"
    );
    metrics::describe_counter!(
        counters::COMMENTS_FAILED,
        "Comment threads whose reply could not be built or posted"
    );

    handle
}

/// Record one HTTP-triggered pass
pub fn record_pass(replies: usize, failed: usize) {
    metrics::counter!("shopbot_passes_total").increment(1);
    metrics::gauge!("shopbot_last_pass_replies").set(replies as f64);
    metrics::gauge!("shopbot_last_pass_failed").set(failed as f64);
}

/// `GET /metrics`
pub async fn metrics_handler(State(state): State<AppState>) -> (StatusCode, String) {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not initialized\n".to_string(),
        ),
    }
}
