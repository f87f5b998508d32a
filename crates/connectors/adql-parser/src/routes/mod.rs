mod get_health;
mod get_metrics;
mod post_parse;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::ServerState;

pub use get_health::get_health;
pub use get_metrics::get_metrics;
pub use post_parse::{post_parse, ParseRequest, ParseResponse};

pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/metrics", get(get_metrics))
        .route("/parse", post(post_parse))
        .with_state(state)
}
