//! Error-to-response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use brandtrack_core::{OrderError, RecordError};
use brandtrack_shared::AppError;
use serde_json::json;
use tracing::error;

/// An application error rendered as a JSON `{error, message}` response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        Self(err.into())
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = self.0.error_code().to_lowercase();

        let message = if self.0.is_client_error() {
            self.0.to_string()
        } else {
            error!(error = %self.0, "Request failed");
            "An error occurred".to_string()
        };

        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}
