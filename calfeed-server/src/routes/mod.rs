pub mod agenda;
pub mod health;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use calfeed_core::CalFeedError;
use serde::Serialize;
use tracing::{error, warn};

use crate::auth::AuthError;
use crate::feed::FeedError;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// An error with the HTTP status it should be reported as
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn new(status: StatusCode, error: impl Into<anyhow::Error>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, anyhow::anyhow!("{message}"))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.error, "request failed");
        } else {
            warn!(status = %self.status, error = %self.error, "request rejected");
        }

        let body = Json(ErrorResponse {
            success: false,
            error: self.error.to_string(),
        });
        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::BAD_GATEWAY
        };
        Self::new(status, err)
    }
}

impl From<CalFeedError> for AppError {
    fn from(err: CalFeedError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err)
    }
}
