//! In-memory store for tests and local runs without a database.
//!
//! Populated up front through `&mut self`, then shared read-only (typically
//! behind an `Arc`).

use async_trait::async_trait;

use super::{RoleStore, StoreError, UserStore};
use crate::models::auth::{User, UserCredentials};
use crate::models::rbac::{Role, RolePermission};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    roles: Vec<Role>,
    grants: Vec<RolePermission>,
    users: Vec<UserCredentials>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role and return its id. Re-adding a code updates its enabled flag.
    pub fn add_role(&mut self, role_code: &str, enabled: bool) -> i64 {
        if let Some(role) = self.roles.iter_mut().find(|r| r.role_code == role_code) {
            role.enabled = enabled;
            return role.id;
        }
        let id = self.roles.len() as i64 + 1;
        self.roles.push(Role {
            id,
            role_code: role_code.to_string(),
            role_name: role_code.to_string(),
            enabled,
        });
        id
    }

    /// Grant a permission key to a role, creating the role (enabled) if needed.
    pub fn grant(&mut self, role_code: &str, permission_key: &str) {
        let role_id = match self.roles.iter().find(|r| r.role_code == role_code) {
            Some(role) => role.id,
            None => self.add_role(role_code, true),
        };
        self.grants.push(RolePermission {
            role_id,
            permission_key: permission_key.to_string(),
        });
    }

    /// Add a user with raw role codes and return its id. Role codes are stored
    /// as given; unknown ones are filtered only when resolved.
    pub fn add_user(
        &mut self,
        user_name: &str,
        password_hash: Option<String>,
        role_codes: &[&str],
    ) -> i64 {
        let id = self.users.len() as i64 + 1;
        self.users.push(UserCredentials {
            user: User {
                id,
                user_name: user_name.to_string(),
                enabled: true,
            },
            password_hash,
            role_codes: role_codes.iter().map(|c| c.to_string()).collect(),
        });
        id
    }

    pub fn set_user_enabled(&mut self, user_name: &str, enabled: bool) {
        if let Some(creds) = self.users.iter_mut().find(|u| u.user.user_name == user_name) {
            creds.user.enabled = enabled;
        }
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn enabled_role_codes(&self, candidates: &[String]) -> Result<Vec<String>, StoreError> {
        Ok(candidates
            .iter()
            .filter(|code| {
                self.roles
                    .iter()
                    .any(|r| r.enabled && &r.role_code == *code)
            })
            .cloned()
            .collect())
    }

    async fn role_ids_by_codes(&self, codes: &[String]) -> Result<Vec<i64>, StoreError> {
        Ok(self
            .roles
            .iter()
            .filter(|r| codes.contains(&r.role_code))
            .map(|r| r.id)
            .collect())
    }

    async fn permission_keys_by_role_ids(
        &self,
        role_ids: &[i64],
    ) -> Result<Vec<String>, StoreError> {
        Ok(self
            .grants
            .iter()
            .filter(|g| role_ids.contains(&g.role_id))
            .map(|g| g.permission_key.clone())
            .collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_name(
        &self,
        user_name: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.user.user_name == user_name)
            .cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
