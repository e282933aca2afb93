// HTTP error envelope: every failure becomes `400 {"error": "..."}`

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::task::JoinError;

use crate::application::{dto::ErrorResponse, ServiceError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Malformed request: {}", .0.body_text())]
    InvalidJson(#[from] JsonRejection),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Solver task failed: {0}")]
    Join(#[from] JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match &self {
            ApiError::InvalidJson(_) | ApiError::Service(ServiceError::Formulation(_)) => {
                tracing::warn!(error = %message, "rejected request");
            }
            _ => {
                tracing::error!(error = %message, "request failed");
            }
        }

        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
    }
}
