//! JWT token generation and verification.
//!
//! A session is a pair of independently signed HS256 tokens carrying the same
//! `{sub, userName, roles}` payload. The access token is short-lived; the
//! refresh token is long-lived, signed with its own key, and can be exchanged
//! for a brand-new pair. Nothing is stored server-side: a token is valid when
//! its signature and expiry check out.

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{debug, info, warn};

use super::AuthError;
use crate::models::auth::{Subject, TokenClaims, TokenKind, TokenPair};
use crate::uuid::token_id;

/// Access token lifetime: 2 hours.
pub const DEFAULT_ACCESS_TTL_SECS: i64 = 2 * 60 * 60;

/// Refresh token lifetime: 7 days.
pub const DEFAULT_REFRESH_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Upper bound for either lifetime: 100 years.
pub const MAX_TTL_SECS: i64 = 100 * 365 * 24 * 60 * 60;

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct TokenService {
    access_secret: Vec<u8>,
    refresh_secret: Vec<u8>,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Both TTLs must be positive and at most [`MAX_TTL_SECS`]. A refresh TTL
    /// that does not exceed the access TTL is allowed but logged.
    pub fn new(
        access_secret: &[u8],
        refresh_secret: &[u8],
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Result<Self, AuthError> {
        if access_ttl_secs <= 0 || refresh_ttl_secs <= 0 {
            return Err(AuthError::ValidationError(format!(
                "token TTLs must be positive (access {access_ttl_secs}s, refresh {refresh_ttl_secs}s)"
            )));
        }
        if access_ttl_secs > MAX_TTL_SECS || refresh_ttl_secs > MAX_TTL_SECS {
            return Err(AuthError::ValidationError(format!(
                "token TTLs must not exceed {MAX_TTL_SECS}s (access {access_ttl_secs}s, refresh {refresh_ttl_secs}s)"
            )));
        }
        if access_secret.is_empty() || refresh_secret.is_empty() {
            return Err(AuthError::ValidationError("JWT secrets must not be empty".into()));
        }
        if access_ttl_secs >= refresh_ttl_secs {
            warn!(
                access_ttl_secs,
                refresh_ttl_secs, "access token TTL is not shorter than refresh token TTL"
            );
        }
        Ok(Self {
            access_secret: access_secret.to_vec(),
            refresh_secret: refresh_secret.to_vec(),
            access_ttl_secs,
            refresh_ttl_secs,
        })
    }

    /// Configured lifetime of the given token kind, in seconds.
    pub fn ttl_secs(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_ttl_secs,
            TokenKind::Refresh => self.refresh_ttl_secs,
        }
    }

    fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => &self.access_secret,
            TokenKind::Refresh => &self.refresh_secret,
        }
    }

    /// Sign a single token for `subject`.
    pub fn issue(&self, kind: TokenKind, subject: &Subject) -> Result<String, AuthError> {
        if !subject.is_identified() {
            return Err(AuthError::ValidationError(
                "cannot issue a token without a subject id and user name".into(),
            ));
        }
        let now = Utc::now();
        let exp = Duration::try_seconds(self.ttl_secs(kind))
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AuthError::Internal("token expiry out of range".into()))?;
        let claims = TokenClaims {
            sub: subject.id,
            user_name: subject.user_name.clone(),
            roles: subject.roles.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: token_id(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret(kind)),
        )
        .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
    }

    /// Sign a fresh access + refresh pair for `subject`.
    pub fn issue_pair(&self, subject: &Subject) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            token: self.issue(TokenKind::Access, subject)?,
            refresh_token: self.issue(TokenKind::Refresh, subject)?,
        })
    }

    /// Verify a token of the given kind, returning the claims on success.
    ///
    /// Any failure (malformed, wrong key, expired beyond the default leeway)
    /// yields `None`.
    pub fn verify(&self, kind: TokenKind, token: &str) -> Option<TokenClaims> {
        let key = DecodingKey::from_secret(self.secret(kind));
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        match decode::<TokenClaims>(token, &key, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(?kind, error = %e, "token rejected");
                None
            }
        }
    }

    /// Exchange a refresh token for a new pair built from the same payload.
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self
            .verify(TokenKind::Refresh, refresh_token)
            .ok_or(AuthError::RefreshRejected)?;
        let subject = claims.subject();
        if !subject.is_identified() {
            return Err(AuthError::RefreshRejected);
        }
        debug!(user_id = subject.id, user_name = %subject.user_name, "rotating token pair");
        self.issue_pair(&subject)
    }
}

/// Resolve the JWT secret: env var `JWT_SECRET` → `AUTH_SECRET` → persisted file.
pub fn resolve_jwt_secret() -> String {
    for var in ["JWT_SECRET", "AUTH_SECRET"] {
        match std::env::var(var) {
            Ok(secret) if !secret.is_empty() => return secret,
            _ => {}
        }
    }
    load_or_create_secret(&jwt_secret_path())
}

/// Resolve the refresh-token secret: `JWT_REFRESH_SECRET`, else derived from
/// the access secret so that the two keys never coincide.
pub fn resolve_refresh_secret(access_secret: &str) -> String {
    match std::env::var("JWT_REFRESH_SECRET") {
        Ok(secret) if !secret.is_empty() && secret != access_secret => secret,
        _ => format!("{access_secret}.refresh"),
    }
}

/// Read a secret from `path`, generating and persisting one when absent.
pub fn load_or_create_secret(path: &Path) -> String {
    if let Ok(existing) = std::fs::read_to_string(path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = std::fs::write(path, &secret) {
        warn!(path = %path.display(), error = %e, "could not persist JWT secret");
    } else {
        info!(path = %path.display(), "generated new JWT secret");
    }
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crm")
        .join("jwt-secret")
}
