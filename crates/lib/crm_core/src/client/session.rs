//! The front end's single permission store.
//!
//! Populated on login and on every `user/info` fetch, cleared on logout, and
//! passed explicitly to whatever needs a permission decision.

use tracing::debug;

use super::gate::{self, Render};
use super::storage::TtlStorage;
use crate::models::auth::TokenPair;
use crate::models::rbac::UserInfo;

/// Storage namespace used for session data.
pub const DEFAULT_NAMESPACE: &str = "crm";

const TOKEN_KEY: &str = "token";
const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Where route permissions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Routes and buttons are issued by the backend.
    #[default]
    Dynamic,
    /// Routes are configured in the front end; the backend issues no buttons.
    Static,
}

#[derive(Debug, Default)]
pub struct PermissionSession {
    namespace: String,
    mode: AuthMode,
    storage: TtlStorage,
    info: Option<UserInfo>,
    /// Permission list declared on the current route.
    route_permissions: Vec<String>,
}

impl PermissionSession {
    pub fn new(mode: AuthMode) -> Self {
        Self::with_namespace(mode, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(mode: AuthMode, namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Keep a freshly issued pair, each token expiring with its own TTL.
    /// Entries that have already expired are dropped first.
    pub fn store_tokens(&mut self, pair: &TokenPair, access_ttl_secs: i64, refresh_ttl_secs: i64) {
        self.storage.purge_expired();
        self.storage.set(
            &self.namespace,
            TOKEN_KEY,
            pair.token.clone(),
            Some(access_ttl_secs),
        );
        self.storage.set(
            &self.namespace,
            REFRESH_TOKEN_KEY,
            pair.refresh_token.clone(),
            Some(refresh_ttl_secs),
        );
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get(&self.namespace, TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(&self.namespace, REFRESH_TOKEN_KEY)
    }

    /// The access token is gone but the refresh token is still usable.
    pub fn needs_refresh(&self) -> bool {
        self.access_token().is_none() && self.refresh_token().is_some()
    }

    /// Replace the user's roles and buttons with a fresh `user/info` payload.
    pub fn populate(&mut self, info: UserInfo) {
        debug!(
            user_id = info.user_id,
            buttons = info.buttons.len(),
            "permission session populated"
        );
        self.info = Some(info);
    }

    pub fn set_route_permissions(&mut self, permissions: Vec<String>) {
        self.route_permissions = permissions;
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        self.info.as_ref()
    }

    pub fn roles(&self) -> &[String] {
        self.info.as_ref().map(|i| i.roles.as_slice()).unwrap_or(&[])
    }

    pub fn buttons(&self) -> &[String] {
        self.info.as_ref().map(|i| i.buttons.as_slice()).unwrap_or(&[])
    }

    pub fn route_permissions(&self) -> &[String] {
        &self.route_permissions
    }

    /// Forget everything: user info, route permissions and stored tokens.
    pub fn clear(&mut self) {
        self.info = None;
        self.route_permissions.clear();
        self.storage.clear_namespace(&self.namespace);
    }

    /// Boolean gate for conditional view logic.
    pub fn has_auth(&self, action: &str) -> bool {
        gate::has_auth(self, action)
    }

    /// Whether an element bound to `action` should exist at all.
    pub fn render(&self, action: &str) -> Render {
        gate::render(self, action)
    }
}
