//! Role and permission models.

use serde::{Deserialize, Serialize};

/// Administrator-managed role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i64,
    pub role_code: String,
    pub role_name: String,
    pub enabled: bool,
}

/// A single `(role, permission key)` grant. Not unique: the same key may be
/// granted to a role more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermission {
    pub role_id: i64,
    pub permission_key: String,
}

/// Payload of `GET /api/user/info`, also consumed by the client session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: i64,
    pub user_name: String,
    pub roles: Vec<String>,
    pub buttons: Vec<String>,
}
