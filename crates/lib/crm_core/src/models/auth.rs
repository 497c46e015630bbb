//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API request/response
//! shapes in `crm_api::models`.

use serde::{Deserialize, Serialize};

/// Domain user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub enabled: bool,
}

/// User with password hash and assigned role codes (for login).
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: Option<String>,
    /// Raw role codes as assigned; not yet checked against the role store.
    pub role_codes: Vec<String>,
}

/// The identity a token pair is minted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: i64,
    pub user_name: String,
    pub roles: Vec<String>,
}

impl Subject {
    /// A subject is usable only with a positive id and a non-empty name.
    pub fn is_identified(&self) -> bool {
        self.id > 0 && !self.user_name.trim().is_empty()
    }
}

/// JWT claims embedded in access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: numeric user ID (standard JWT `sub` claim).
    pub sub: i64,
    #[serde(rename = "userName")]
    pub user_name: String,
    /// Role codes (e.g. `["R_SALES"]`).
    pub roles: Vec<String>,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Token id, unique per issued token.
    pub jti: String,
}

impl TokenClaims {
    pub fn subject(&self) -> Subject {
        Subject {
            id: self.sub,
            user_name: self.user_name.clone(),
            roles: self.roles.clone(),
        }
    }
}

/// Which of the two session tokens a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// A freshly minted access + refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Access token.
    pub token: String,
    pub refresh_token: String,
}
