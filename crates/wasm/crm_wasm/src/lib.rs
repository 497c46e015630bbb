//! Browser bindings for permission checks.
//!
//! The front end keeps one `PermissionStore` per tab: populated from the
//! login and `user/info` responses, queried by view logic and by the element
//! directive, and cleared on logout.

use wasm_bindgen::prelude::*;

use crm_core::client::{AuthMode, PermissionSession, Render};
use crm_core::models::auth::TokenPair;
use crm_core::models::rbac::UserInfo;

/// Returns the version of the crm_wasm package.
#[wasm_bindgen]
pub fn version() -> String {
    crm_core::version().to_string()
}

/// Whether `permission_key` grants `action`.
#[wasm_bindgen(js_name = matchPermission)]
pub fn match_permission(permission_key: &str, action: &str) -> bool {
    crm_core::rbac::match_permission(permission_key, action)
}

#[wasm_bindgen]
pub struct PermissionStore {
    session: PermissionSession,
}

#[wasm_bindgen]
impl PermissionStore {
    /// `static_routes`: routes are configured in the front end and the
    /// backend issues no buttons.
    #[wasm_bindgen(constructor)]
    pub fn new(static_routes: bool) -> PermissionStore {
        let mode = if static_routes {
            AuthMode::Static
        } else {
            AuthMode::Dynamic
        };
        PermissionStore {
            session: PermissionSession::new(mode),
        }
    }

    /// Load the `data` object of a `user/info` response. Returns `false` and
    /// leaves the store untouched when the JSON does not parse.
    pub fn populate(&mut self, user_info_json: &str) -> bool {
        match serde_json::from_str::<UserInfo>(user_info_json) {
            Ok(info) => {
                self.session.populate(info);
                true
            }
            Err(_) => false,
        }
    }

    #[wasm_bindgen(js_name = setRoutePermissions)]
    pub fn set_route_permissions(&mut self, permissions: Vec<String>) {
        self.session.set_route_permissions(permissions);
    }

    #[wasm_bindgen(js_name = storeTokens)]
    pub fn store_tokens(
        &mut self,
        token: String,
        refresh_token: String,
        access_ttl_secs: u32,
        refresh_ttl_secs: u32,
    ) {
        let pair = TokenPair {
            token,
            refresh_token,
        };
        self.session
            .store_tokens(&pair, access_ttl_secs.into(), refresh_ttl_secs.into());
    }

    #[wasm_bindgen(js_name = accessToken)]
    pub fn access_token(&self) -> Option<String> {
        self.session.access_token()
    }

    #[wasm_bindgen(js_name = refreshToken)]
    pub fn refresh_token(&self) -> Option<String> {
        self.session.refresh_token()
    }

    #[wasm_bindgen(js_name = needsRefresh)]
    pub fn needs_refresh(&self) -> bool {
        self.session.needs_refresh()
    }

    #[wasm_bindgen(js_name = hasAuth)]
    pub fn has_auth(&self, action: &str) -> bool {
        self.session.has_auth(action)
    }

    /// Directive check: `false` means the bound element must be removed.
    #[wasm_bindgen(js_name = shouldRender)]
    pub fn should_render(&self, action: &str) -> bool {
        self.session.render(action) == Render::Materialized
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populate_rejects_malformed_json() {
        let mut store = PermissionStore::new(false);
        assert!(!store.populate("{\"userId\": 1"));
        assert!(!store.has_auth("view"));
    }

    #[test]
    fn populated_store_answers_queries() {
        let mut store = PermissionStore::new(false);
        assert!(store.populate(
            r#"{"userId":5,"userName":"eve","roles":["R_SALES"],"buttons":["Customer_view"]}"#
        ));
        assert!(store.has_auth("VIEW"));
        assert!(store.should_render("view"));
        assert!(!store.should_render("delete"));

        store.clear();
        assert!(!store.should_render("view"));
    }

    #[test]
    fn exported_matcher() {
        assert!(match_permission("ClueLeads_add", "add"));
        assert!(!match_permission("ClueLeads_delete", "add"));
    }
}
