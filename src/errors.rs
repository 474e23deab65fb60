use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::booking::BookingError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("{0} is required")]
    MissingParam(&'static str),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] anyhow::Error),

    #[error("database lock poisoned")]
    LockPoisoned,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Booking(e) => match e {
                BookingError::Validation(_) | BookingError::ServiceInactive(_) => {
                    StatusCode::BAD_REQUEST
                }
                BookingError::ServiceNotFound(_) => StatusCode::NOT_FOUND,
                BookingError::DatesUnavailable => StatusCode::CONFLICT,
                BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::MissingParam(_) | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
