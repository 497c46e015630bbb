//! # crm_core
//!
//! Core authorization logic for the dealership CRM: role resolution,
//! permission-key matching, JWT issuance and the client-side session model.

pub mod auth;
pub mod client;
pub mod migrate;
pub mod models;
pub mod rbac;
pub mod store;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
