use axum::extract::State;
use prometheus::Encoder;

use crate::error::ServerError;
use crate::state::ServerState;

/// Prometheus text exposition of every registered metric.
pub async fn get_metrics(State(state): State<ServerState>) -> Result<String, ServerError> {
    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&state.metrics_registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
