//! Effective roles and button sets for a user.
//!
//! Computed fresh for every `user/info` request and never cached.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::{R_ADMIN, R_SUPER, RbacError, STATIC_GRANTS};
use crate::models::auth::Subject;
use crate::store::{RoleStore, StoreError};

/// Outcome of the role → permission-key lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonLookup {
    Complete(BTreeSet<String>),
    /// The store failed. Contributes no keys; the caller still succeeds.
    Degraded(String),
}

impl ButtonLookup {
    pub fn is_degraded(&self) -> bool {
        matches!(self, ButtonLookup::Degraded(_))
    }
}

/// Result of resolving a subject's permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPermissions {
    /// Sanitized role codes plus implied roles.
    pub roles: Vec<String>,
    /// Store-granted keys unioned with static grants.
    pub buttons: BTreeSet<String>,
    /// How the store lookup went.
    pub lookup: ButtonLookup,
}

/// Apply role implication: `R_ADMIN` without `R_SUPER` gains `R_SUPER`.
///
/// Single step, not transitive. Order and duplicates of the input are kept.
pub fn effective_roles(sanitized: &[String]) -> Vec<String> {
    let mut roles = sanitized.to_vec();
    let has = |code: &str| sanitized.iter().any(|r| r == code);
    if has(R_ADMIN) && !has(R_SUPER) {
        roles.push(R_SUPER.to_string());
    }
    roles
}

/// Minimum grants carried by well-known roles.
pub fn static_grants(roles: &[String]) -> BTreeSet<String> {
    STATIC_GRANTS
        .iter()
        .filter(|(code, _)| roles.iter().any(|r| r.as_str() == *code))
        .flat_map(|(_, keys)| keys.iter().map(|k| k.to_string()))
        .collect()
}

async fn granted_keys(store: &dyn RoleStore, roles: &[String]) -> Result<Vec<String>, StoreError> {
    let role_ids = store.role_ids_by_codes(roles).await?;
    if role_ids.is_empty() {
        return Ok(Vec::new());
    }
    store.permission_keys_by_role_ids(&role_ids).await
}

/// Union the permission keys granted to `roles` in the store.
pub async fn lookup_buttons(store: &dyn RoleStore, roles: &[String]) -> ButtonLookup {
    if roles.is_empty() {
        return ButtonLookup::Complete(BTreeSet::new());
    }
    match granted_keys(store, roles).await {
        Ok(keys) => ButtonLookup::Complete(keys.into_iter().collect()),
        Err(e) => {
            warn!(error = %e, "permission lookup failed, serving static grants only");
            ButtonLookup::Degraded(e.to_string())
        }
    }
}

/// Resolve the effective roles and button set of an authenticated subject.
///
/// Fails only when the subject is not identified. If the store cannot
/// sanitize the roles, the subject's own role codes (sanitized when the token
/// was issued) are used and the lookup is reported as degraded.
pub async fn resolve_permissions(
    store: &dyn RoleStore,
    subject: &Subject,
) -> Result<ResolvedPermissions, RbacError> {
    if !subject.is_identified() {
        return Err(RbacError::Unauthenticated);
    }

    let (roles, lookup) = match store.enabled_role_codes(&subject.roles).await {
        Ok(sanitized) => {
            let roles = effective_roles(&sanitized);
            let lookup = lookup_buttons(store, &roles).await;
            (roles, lookup)
        }
        Err(e) => {
            warn!(error = %e, "role sanitization failed, using token roles");
            (
                effective_roles(&subject.roles),
                ButtonLookup::Degraded(e.to_string()),
            )
        }
    };

    let mut buttons = match &lookup {
        ButtonLookup::Complete(keys) => keys.clone(),
        ButtonLookup::Degraded(_) => BTreeSet::new(),
    };
    buttons.extend(static_grants(&roles));

    debug!(
        user_id = subject.id,
        roles = ?roles,
        buttons = buttons.len(),
        degraded = lookup.is_degraded(),
        "resolved permissions"
    );

    Ok(ResolvedPermissions {
        roles,
        buttons,
        lookup,
    })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::rbac::{R_FRONT_DESK, R_INFO, R_SALES};
    use crate::store::MemoryStore;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn subject(roles: &[&str]) -> Subject {
        Subject {
            id: 7,
            user_name: "desk".into(),
            roles: strings(roles),
        }
    }

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        for code in [R_SUPER, R_ADMIN, R_SALES, R_FRONT_DESK, R_INFO] {
            store.add_role(code, true);
        }
        store.add_role("R_RETIRED", false);
        store.grant(R_SALES, "Customer_view");
        store.grant(R_SALES, "ClueLeads_add");
        store.grant(R_ADMIN, "Customer_view");
        store.grant(R_SUPER, "Employee_delete");
        store
    }

    /// Sanitizes normally but fails every permission lookup.
    struct PermissionOutage(MemoryStore);

    #[async_trait]
    impl RoleStore for PermissionOutage {
        async fn enabled_role_codes(
            &self,
            candidates: &[String],
        ) -> Result<Vec<String>, StoreError> {
            self.0.enabled_role_codes(candidates).await
        }

        async fn role_ids_by_codes(&self, _codes: &[String]) -> Result<Vec<i64>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn permission_keys_by_role_ids(
            &self,
            _role_ids: &[i64],
        ) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    /// Fails every call, as a store with an unreachable database does.
    struct Unreachable;

    #[async_trait]
    impl RoleStore for Unreachable {
        async fn enabled_role_codes(
            &self,
            _candidates: &[String],
        ) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn role_ids_by_codes(&self, _codes: &[String]) -> Result<Vec<i64>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn permission_keys_by_role_ids(
            &self,
            _role_ids: &[i64],
        ) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[test]
    fn admin_implies_super() {
        assert_eq!(
            effective_roles(&strings(&[R_SALES, R_ADMIN])),
            strings(&[R_SALES, R_ADMIN, R_SUPER])
        );
    }

    #[test]
    fn implication_is_not_repeated() {
        let roles = strings(&[R_ADMIN, R_SUPER]);
        assert_eq!(effective_roles(&roles), roles);
    }

    #[test]
    fn without_admin_roles_are_unchanged() {
        for roles in [
            strings(&[]),
            strings(&[R_SALES]),
            strings(&[R_SUPER]),
            strings(&[R_INFO, R_INFO]),
        ] {
            assert_eq!(effective_roles(&roles), roles);
        }
    }

    #[test]
    fn static_grants_per_role() {
        assert_eq!(static_grants(&strings(&[R_FRONT_DESK])), set(&["add", "view"]));
        assert_eq!(
            static_grants(&strings(&[R_INFO, R_FRONT_DESK])),
            set(&["add", "edit", "delete", "import", "export", "view"])
        );
        assert!(static_grants(&strings(&[R_SALES])).is_empty());
    }

    #[tokio::test]
    async fn admin_gets_super_and_its_grants() {
        let store = seeded_store();
        let resolved = resolve_permissions(&store, &subject(&[R_ADMIN]))
            .await
            .unwrap();
        assert_eq!(resolved.roles, strings(&[R_ADMIN, R_SUPER]));
        assert_eq!(resolved.buttons, set(&["Customer_view", "Employee_delete"]));
        assert!(!resolved.lookup.is_degraded());
    }

    #[tokio::test]
    async fn same_key_from_two_roles_appears_once() {
        let store = seeded_store();
        let resolved = resolve_permissions(&store, &subject(&[R_SALES, R_ADMIN]))
            .await
            .unwrap();
        let views = resolved
            .buttons
            .iter()
            .filter(|b| *b == "Customer_view")
            .count();
        assert_eq!(views, 1);
    }

    #[tokio::test]
    async fn unknown_and_disabled_roles_are_dropped() {
        let store = seeded_store();
        let resolved = resolve_permissions(&store, &subject(&[R_SALES, "R_RETIRED", "R_GHOST"]))
            .await
            .unwrap();
        assert_eq!(resolved.roles, strings(&[R_SALES]));
        assert_eq!(resolved.buttons, set(&["ClueLeads_add", "Customer_view"]));
    }

    #[tokio::test]
    async fn front_desk_always_has_add_and_view() {
        let store = seeded_store();
        let resolved = resolve_permissions(&store, &subject(&[R_FRONT_DESK]))
            .await
            .unwrap();
        assert!(resolved.buttons.is_superset(&set(&["add", "view"])));

        let outage = PermissionOutage(seeded_store());
        let resolved = resolve_permissions(&outage, &subject(&[R_FRONT_DESK]))
            .await
            .unwrap();
        assert!(resolved.buttons.is_superset(&set(&["add", "view"])));
    }

    #[tokio::test]
    async fn store_outage_degrades_to_static_grants() {
        let outage = PermissionOutage(seeded_store());
        let resolved = resolve_permissions(&outage, &subject(&[R_SALES, R_INFO]))
            .await
            .unwrap();
        assert!(resolved.lookup.is_degraded());
        assert_eq!(resolved.roles, strings(&[R_SALES, R_INFO]));
        assert_eq!(
            resolved.buttons,
            set(&["add", "edit", "delete", "import", "export", "view"])
        );
    }

    #[tokio::test]
    async fn unreachable_store_falls_back_to_token_roles() {
        let resolved = resolve_permissions(&Unreachable, &subject(&[R_FRONT_DESK, R_ADMIN]))
            .await
            .unwrap();
        assert!(resolved.lookup.is_degraded());
        assert_eq!(resolved.roles, strings(&[R_FRONT_DESK, R_ADMIN, R_SUPER]));
        assert_eq!(resolved.buttons, set(&["add", "view"]));
    }

    #[tokio::test]
    async fn empty_roles_yield_empty_buttons() {
        let store = seeded_store();
        let resolved = resolve_permissions(&store, &subject(&[])).await.unwrap();
        assert!(resolved.roles.is_empty());
        assert!(resolved.buttons.is_empty());
        assert_eq!(resolved.lookup, ButtonLookup::Complete(BTreeSet::new()));
    }

    #[tokio::test]
    async fn unidentified_subject_short_circuits() {
        let store = seeded_store();
        let anonymous = Subject {
            id: 7,
            user_name: "  ".into(),
            roles: strings(&[R_ADMIN]),
        };
        assert!(matches!(
            resolve_permissions(&store, &anonymous).await,
            Err(RbacError::Unauthenticated)
        ));
    }
}
