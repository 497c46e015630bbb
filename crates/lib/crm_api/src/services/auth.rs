//! Authentication service: login and refresh flows over `crm_core::auth`.

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crm_core::auth::jwt::TokenService;
use crm_core::auth::password::verify_password;
use crm_core::models::auth::{Subject, TokenPair};
use crm_core::store::{RoleStore, UserStore};

/// Authenticate with user name + password and issue a token pair.
///
/// Unknown users, disabled users, users without a password and wrong
/// passwords all produce the same generic error.
pub async fn login(
    users: &dyn UserStore,
    roles: &dyn RoleStore,
    tokens: &TokenService,
    user_name: &str,
    password: &str,
) -> AppResult<TokenPair> {
    let user_name = user_name.trim();
    if user_name.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "User name and password are required".into(),
        ));
    }

    let invalid = || AppError::Unauthorized("Invalid credentials".into());

    let creds = users.find_user_by_name(user_name).await?.ok_or_else(invalid)?;
    if !creds.user.enabled {
        debug!(user_id = creds.user.id, "login attempt for disabled user");
        return Err(invalid());
    }
    let pw_hash = creds.password_hash.as_deref().ok_or_else(invalid)?;
    if !verify_password(password, pw_hash)? {
        return Err(invalid());
    }

    let role_codes = roles.enabled_role_codes(&creds.role_codes).await?;
    let subject = Subject {
        id: creds.user.id,
        user_name: creds.user.user_name,
        roles: role_codes,
    };
    let pair = tokens.issue_pair(&subject)?;

    info!(user_id = subject.id, user_name = %subject.user_name, "user logged in");
    Ok(pair)
}

/// Exchange a refresh token for a new pair (rotation).
pub fn refresh(tokens: &TokenService, refresh_token: &str) -> AppResult<TokenPair> {
    Ok(tokens.refresh(refresh_token.trim())?)
}
