//! Authentication request handlers.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use tracing::debug;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{ApiResponse, LoginRequest, RefreshRequest, TokenResponse};
use crate::services::auth;

/// `POST /api/auth/login`: authenticate with user name + password.
pub async fn login_handler(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<TokenResponse>>> {
    let Json(body) = body?;
    let pair = auth::login(
        state.users.as_ref(),
        state.roles.as_ref(),
        &state.tokens,
        &body.user_name,
        &body.password,
    )
    .await?;
    Ok(Json(ApiResponse::ok(pair)))
}

/// `POST /api/auth/refresh`: exchange a refresh token for a new token pair.
pub async fn refresh_handler(
    State(state): State<AppState>,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<TokenResponse>>> {
    let Json(body) = body?;
    let pair = auth::refresh(&state.tokens, &body.refresh_token)?;
    Ok(Json(ApiResponse::ok(pair)))
}

/// `POST /api/auth/logout`: acknowledge logout. Requires authentication.
///
/// Tokens are stateless; the client drops its session.
pub async fn logout_handler(
    Extension(AuthenticatedUser(claims)): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<()>> {
    debug!(user_id = claims.sub, "user logged out");
    Json(ApiResponse::empty())
}
