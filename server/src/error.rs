//! HTTP error mapping.
//!
//! Every failure on a data endpoint becomes a response with a status code and
//! a `{"detail": "..."}` body. Nothing is retried.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use todo_core::{InvalidTodoId, TodoError};
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The service started without a usable database handle.
    #[error("Database not configured")]
    NotConfigured,

    #[error(transparent)]
    Todo(#[from] TodoError),

    /// The request body failed JSON extraction or schema validation.
    #[error("{message}")]
    Body { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Todo(TodoError::InvalidId(_) | TodoError::EmptyUpdate) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Todo(TodoError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Todo(TodoError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body { status, .. } => *status,
        }
    }
}

impl From<InvalidTodoId> for ApiError {
    fn from(err: InvalidTodoId) -> Self {
        ApiError::Todo(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, error = %self, "request failed");
        } else {
            debug!(%status, error = %self, "request rejected");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
