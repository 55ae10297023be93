use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request itself is unusable; nothing upstream was called.
    #[error("{0}")]
    BadRequest(String),

    /// Translation, weather lookup or storage failed.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Body text of every 500; the cause only goes to the log.
const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "bad_request",
            ServerError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = match &self {
            ServerError::BadRequest(msg) => msg.clone(),
            ServerError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                INTERNAL_MESSAGE.to_string()
            }
        };

        let body = ErrorEnvelope { error: ErrorBody { code: self.code(), message } };
        (self.status(), Json(body)).into_response()
    }
}
