//! User info service: effective roles and buttons for the caller.

use crm_core::models::auth::TokenClaims;
use crm_core::models::rbac::UserInfo;
use crm_core::rbac::resolve_permissions;
use crm_core::store::RoleStore;

use crate::error::AppResult;

/// Resolve the caller's roles and buttons from the store.
///
/// Role codes come from the verified token; unknown or disabled ones are
/// dropped. A store failure still succeeds with static grants.
pub async fn user_info(roles: &dyn RoleStore, claims: &TokenClaims) -> AppResult<UserInfo> {
    let subject = claims.subject();
    let resolved = resolve_permissions(roles, &subject).await?;
    Ok(UserInfo {
        user_id: subject.id,
        user_name: subject.user_name,
        roles: resolved.roles,
        buttons: resolved.buttons.into_iter().collect(),
    })
}
