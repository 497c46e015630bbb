//! API server configuration.

use tracing::warn;

use crm_core::auth::jwt::{
    DEFAULT_ACCESS_TTL_SECS, DEFAULT_REFRESH_TTL_SECS, MAX_TTL_SECS, resolve_jwt_secret,
    resolve_refresh_secret,
};

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub pg_connection_url: String,
    /// Access token signing secret.
    pub jwt_secret: String,
    /// Refresh token signing secret.
    pub jwt_refresh_secret: String,
    /// Access token lifetime in seconds.
    pub access_ttl_secs: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_ttl_secs: i64,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                 | Default                                  |
    /// |--------------------------|------------------------------------------|
    /// | `BIND_ADDR`              | `127.0.0.1:3100`                         |
    /// | `DATABASE_URL`           | `postgres://localhost:5432/crm`          |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file        |
    /// | `JWT_REFRESH_SECRET`     | derived from the access secret           |
    /// | `ACCESS_TOKEN_TTL_SECS`  | `7200`                                   |
    /// | `REFRESH_TOKEN_TTL_SECS` | `604800`                                 |
    pub fn from_env() -> Self {
        let jwt_secret = resolve_jwt_secret();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".into()),
            pg_connection_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/crm".into()),
            jwt_refresh_secret: resolve_refresh_secret(&jwt_secret),
            jwt_secret,
            access_ttl_secs: ttl_from_env("ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TTL_SECS),
            refresh_ttl_secs: ttl_from_env("REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TTL_SECS),
        }
    }
}

/// Read a TTL in `1..=MAX_TTL_SECS` from `var`, falling back to `default`.
fn ttl_from_env(var: &str, default: i64) -> i64 {
    match std::env::var(var) {
        Ok(raw) => parse_ttl(var, &raw, default),
        Err(_) => default,
    }
}

fn parse_ttl(var: &str, raw: &str, default: i64) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(secs) if (1..=MAX_TTL_SECS).contains(&secs) => secs,
        _ => {
            warn!(var, value = raw, default, "invalid token TTL, using default");
            default
        }
    }
}
