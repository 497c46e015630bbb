//! Authentication middleware: Bearer token extraction and JWT verification.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::AppState;
use crate::error::AppError;
use crm_core::models::auth::{TokenClaims, TokenKind};

/// Key used to store `TokenClaims` in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies it as an
/// access token, and injects `AuthenticatedUser` into request extensions.
///
/// Tokens without a subject id or user name are treated as unauthenticated.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization scheme".into()))?;

    let claims = state
        .tokens
        .verify(TokenKind::Access, token.trim())
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".into()))?;

    if !claims.subject().is_identified() {
        debug!(sub = claims.sub, "token carries no usable identity");
        return Err(AppError::Unauthorized("Invalid or expired token".into()));
    }

    request.extensions_mut().insert(AuthenticatedUser(claims));

    Ok(next.run(request).await)
}
