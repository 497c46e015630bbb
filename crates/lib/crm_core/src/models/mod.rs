//! Domain models.

pub mod auth;
pub mod rbac;
