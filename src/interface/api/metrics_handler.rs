//! Prometheus metrics handler

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics exporter
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Describe metrics
    describe_counter!("portal_logins_total", "Total number of login attempts");
    describe_counter!("portal_calls_total", "Total number of calls initiated");
    describe_counter!(
        "portal_call_transitions_total",
        "Total number of call status transitions"
    );
    describe_counter!(
        "portal_messages_total",
        "Total number of direct messages sent"
    );
    describe_counter!(
        "portal_voice_messages_total",
        "Total number of voice messages posted"
    );
    describe_counter!(
        "portal_assistant_requests_total",
        "Total number of AI assistant requests"
    );

    Ok(handle)
}

/// HTTP metrics handler
pub async fn metrics_handler(
    axum::extract::State(prometheus_handle): axum::extract::State<PrometheusHandle>,
) -> Response {
    let metrics = prometheus_handle.render();
    (StatusCode::OK, metrics).into_response()
}

/// Record a login attempt
pub fn record_login(success: bool) {
    counter!("portal_logins_total", "success" => success.to_string()).increment(1);
}

/// Record a call initiation
pub fn record_call_initiated() {
    counter!("portal_calls_total").increment(1);
}

/// Record a call status transition
pub fn record_call_transition(status: &str) {
    counter!("portal_call_transitions_total", "status" => status.to_string()).increment(1);
}

/// Record a direct message
pub fn record_message_sent() {
    counter!("portal_messages_total").increment(1);
}

/// Record a voice message
pub fn record_voice_message() {
    counter!("portal_voice_messages_total").increment(1);
}

/// Record an AI assistant request
pub fn record_assistant_request(success: bool) {
    counter!("portal_assistant_requests_total", "success" => success.to_string()).increment(1);
}
