//! Request and response shapes of the HTTP API.
//!
//! Every response uses the `{code, msg, data}` envelope the front end expects.

use serde::{Deserialize, Serialize};

pub use crm_core::models::auth::TokenPair as TokenResponse;
pub use crm_core::models::rbac::UserInfo as UserInfoResponse;

/// Envelope codes.
pub mod codes {
    pub const SUCCESS: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    /// Refresh token rejected: the client must log in again.
    pub const SESSION_EXPIRED: u16 = 4010;
    pub const INTERNAL_ERROR: u16 = 500;
    pub const STORE_UNAVAILABLE: u16 = 503;
}

/// `{code, msg, data}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: codes::SUCCESS,
            msg: "success".to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success without payload (`data: null`).
    pub fn empty() -> Self {
        Self {
            code: codes::SUCCESS,
            msg: "success".to_string(),
            data: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub version: String,
    pub store_reachable: bool,
}
