use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failures of the service itself. Translation failures are not among them: they are
/// reported in the body of a successful response.
#[derive(Debug)]
pub enum ServerError {
    Internal(String),
}

#[derive(Serialize)]
struct JsonErrorResponse {
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        tracing::error!("returning error: {message} with status code: {status}");
        (status, Json(JsonErrorResponse { message })).into_response()
    }
}

impl From<prometheus::Error> for ServerError {
    fn from(value: prometheus::Error) -> Self {
        ServerError::Internal(value.to_string())
    }
}

impl From<std::string::FromUtf8Error> for ServerError {
    fn from(value: std::string::FromUtf8Error) -> Self {
        ServerError::Internal(value.to_string())
    }
}
