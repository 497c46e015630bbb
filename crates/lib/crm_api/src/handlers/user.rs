//! User request handlers.

use axum::extract::State;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{ApiResponse, UserInfoResponse};
use crate::services::user;

/// `GET /api/user/info`: effective roles and buttons of the caller.
pub async fn user_info_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(claims)): Extension<AuthenticatedUser>,
) -> AppResult<Json<ApiResponse<UserInfoResponse>>> {
    let info = user::user_info(state.roles.as_ref(), &claims).await?;
    Ok(Json(ApiResponse::ok(info)))
}
