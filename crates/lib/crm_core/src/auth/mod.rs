//! Authentication: password hashing and the access/refresh token contract.

pub mod jwt;
pub mod password;

use thiserror::Error;

use crate::store::StoreError;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    /// The presented refresh token is malformed, forged or expired. The
    /// session cannot be continued without logging in again.
    #[error("Refresh token rejected")]
    RefreshRejected,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}
