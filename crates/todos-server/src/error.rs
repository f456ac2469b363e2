//! Mapping of `TodoError` onto HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use todos_core::{ParseIdError, TodoError};

#[derive(Debug)]
pub struct ApiError(pub TodoError);

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorDetail<'a> {
    kind: &'a str,
    message: String,
}

impl From<TodoError> for ApiError {
    fn from(e: TodoError) -> Self {
        Self(e)
    }
}

impl From<ParseIdError> for ApiError {
    fn from(e: ParseIdError) -> Self {
        Self(e.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self(TodoError::validation(e.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_client_error() {
            tracing::warn!(kind = self.0.error_kind(), error = %self.0, "request rejected");
        } else {
            tracing::error!(kind = self.0.error_kind(), error = %self.0, "request failed");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                kind: self.0.error_kind(),
                message: self.0.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
