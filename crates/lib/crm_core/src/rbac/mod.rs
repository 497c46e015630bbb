//! Role-based authorization: effective roles, button sets and permission-key
//! matching.

pub mod matcher;
pub mod resolver;

use thiserror::Error;

pub use matcher::{match_permission, matches_any};
pub use resolver::{ButtonLookup, ResolvedPermissions, resolve_permissions};

pub const R_SUPER: &str = "R_SUPER";
pub const R_ADMIN: &str = "R_ADMIN";
pub const R_SALES: &str = "R_SALES";
pub const R_FRONT_DESK: &str = "R_FRONT_DESK";
pub const R_INFO: &str = "R_INFO";

/// Minimum button grants some roles carry regardless of the permission store.
pub const STATIC_GRANTS: &[(&str, &[&str])] = &[
    (R_FRONT_DESK, &["add", "view"]),
    (R_INFO, &["add", "edit", "delete", "import", "export", "view"]),
];

/// Whether the role set carries administrator rights.
pub fn is_admin<S: AsRef<str>>(roles: &[S]) -> bool {
    roles
        .iter()
        .any(|r| matches!(r.as_ref(), R_SUPER | R_ADMIN))
}

/// Resolution errors.
#[derive(Debug, Error)]
pub enum RbacError {
    #[error("No authenticated identity")]
    Unauthenticated,
}
