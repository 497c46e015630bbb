//! Application error types.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::{ApiResponse, codes};
use crm_core::auth::AuthError;
use crm_core::rbac::RbacError;
use crm_core::store::StoreError;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status and envelope code mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The refresh token can no longer be exchanged; the user must log in.
    #[error("Session expired")]
    SessionExpired,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, msg) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, codes::BAD_REQUEST, m.as_str()),
            AppError::Unauthorized(m) => {
                (StatusCode::UNAUTHORIZED, codes::UNAUTHORIZED, m.as_str())
            }
            AppError::SessionExpired => (
                StatusCode::UNAUTHORIZED,
                codes::SESSION_EXPIRED,
                "Session expired, please log in again",
            ),
            AppError::StoreUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                codes::STORE_UNAVAILABLE,
                "Service temporarily unavailable",
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::INTERNAL_ERROR,
                "Internal server error",
            ),
        };
        if let AppError::StoreUnavailable(detail) | AppError::Internal(detail) = &self {
            error!(code, detail = %detail, "request failed");
        }
        let body = Json(ApiResponse::<()> {
            code,
            msg: msg.to_string(),
            data: None,
        });
        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::StoreUnavailable(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::CredentialError => AppError::Unauthorized("Invalid credentials".into()),
            AuthError::RefreshRejected => AppError::SessionExpired,
            AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            AuthError::ValidationError(msg) => AppError::Validation(msg),
            AuthError::Store(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RbacError> for AppError {
    fn from(e: RbacError) -> Self {
        match e {
            RbacError::Unauthenticated => AppError::Unauthorized("Not logged in".into()),
        }
    }
}
