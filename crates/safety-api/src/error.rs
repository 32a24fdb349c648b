use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use safety_alert::DispatchError;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email already registered")]
    DuplicateEmail,

    /// Login against an email nobody registered.
    #[error("Unknown account")]
    UnknownAccount,

    #[error("Incorrect password")]
    InvalidCredential,

    #[error("Not found")]
    NotFound,

    #[error("Admin token missing or wrong")]
    Unauthorized,

    #[error("Submission failed: {0}")]
    SubmissionFailed(&'static str),

    #[error("Dashboard aggregation failed: {0}")]
    Aggregation(anyhow::Error),

    #[error("SMS dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // serde's schema text stays in the logs
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::Validation("Invalid request body".into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            ApiError::DuplicateEmail => (StatusCode::BAD_REQUEST, "Email already registered!"),
            ApiError::UnknownAccount => (StatusCode::BAD_REQUEST, "User not found!"),
            ApiError::InvalidCredential => (StatusCode::UNAUTHORIZED, "Incorrect password!"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "User not found!"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ApiError::SubmissionFailed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, *msg),
            ApiError::Aggregation(e) => {
                error!("Dashboard read failed: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load dashboard data!")
            }
            ApiError::Dispatch(e) => {
                error!("SOS dispatch failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to send SOS alert!")
            }
            ApiError::Store(e) => {
                error!("Store error: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = json!({ "success": false, "message": message });
        (status, Json(body)).into_response()
    }
}
