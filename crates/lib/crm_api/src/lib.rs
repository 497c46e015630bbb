//! # crm_api
//!
//! HTTP API library for the CRM authorization core.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{auth, health, user};
use crm_core::auth::AuthError;
use crm_core::auth::jwt::TokenService;
use crm_core::store::{RoleStore, UserStore};

/// Route paths.
pub mod routes {
    pub const GET_API_HEALTH: &str = "/api/health";
    pub const POST_AUTH_LOGIN: &str = "/api/auth/login";
    pub const POST_AUTH_REFRESH: &str = "/api/auth/refresh";
    pub const POST_AUTH_LOGOUT: &str = "/api/auth/logout";
    pub const GET_USER_INFO: &str = "/api/user/info";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User lookups for login.
    pub users: Arc<dyn UserStore>,
    /// Role and permission lookups.
    pub roles: Arc<dyn RoleStore>,
    /// Token issuance and verification.
    pub tokens: TokenService,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Build state over a single store serving both users and roles.
    pub fn new<S>(config: ApiConfig, store: Arc<S>) -> Result<Self, AuthError>
    where
        S: UserStore + RoleStore + 'static,
    {
        let tokens = TokenService::new(
            config.jwt_secret.as_bytes(),
            config.jwt_refresh_secret.as_bytes(),
            config.access_ttl_secs,
            config.refresh_ttl_secs,
        )?;
        Ok(Self {
            users: store.clone(),
            roles: store,
            tokens,
            config,
        })
    }
}

/// Run embedded database migrations.
///
/// Delegates to `crm_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    crm_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler))
        .route(routes::POST_AUTH_REFRESH, post(auth::refresh_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(routes::GET_USER_INFO, get(user::user_info_handler))
        .route(routes::POST_AUTH_LOGOUT, post(auth::logout_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
