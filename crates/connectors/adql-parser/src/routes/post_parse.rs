use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use query_engine_translation::translation;

use crate::state::ServerState;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParseRequest {
    pub query: String,
}

/// Exactly one of the two fields is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParseResponse {
    pub error: String,
    pub parsed: String,
}

/// Translate one ADQL query. A query that fails to translate is still a successful
/// request: the failure is reported in `error`.
pub async fn post_parse(
    State(state): State<ServerState>,
    Json(request): Json<ParseRequest>,
) -> Json<ParseResponse> {
    tracing::info_span!("translate", query_length = request.query.len())
        .in_scope(|| translate(&state, &request.query))
}

fn translate(state: &ServerState, query: &str) -> Json<ParseResponse> {
    state.metrics.translate_total.inc();
    let timer = state.metrics.translate_duration_seconds.start_timer();
    let result = translation::query::translate(&state.configuration.index, query);
    timer.observe_duration();

    match result {
        Ok(parsed) => Json(ParseResponse {
            error: String::new(),
            parsed,
        }),
        Err(err) => {
            state.metrics.record_failure(err.kind());
            Json(ParseResponse {
                error: err.to_string(),
                parsed: String::new(),
            })
        }
    }
}
