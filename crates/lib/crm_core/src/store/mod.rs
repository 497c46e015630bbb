//! Read-side access to users, roles and role permissions.
//!
//! The resolver and the login flow only ever read; role administration is
//! done elsewhere and takes effect on the next request.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::auth::UserCredentials;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Role and permission lookups.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Of the candidate codes, return those naming a known, enabled role.
    /// Candidate order is preserved.
    async fn enabled_role_codes(&self, candidates: &[String]) -> Result<Vec<String>, StoreError>;

    /// Ids of the roles whose code is in `codes`.
    async fn role_ids_by_codes(&self, codes: &[String]) -> Result<Vec<i64>, StoreError>;

    /// Every `permission_key` granted to any of `role_ids`, duplicates included.
    async fn permission_keys_by_role_ids(&self, role_ids: &[i64])
    -> Result<Vec<String>, StoreError>;
}

/// User lookups for the login flow.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user with password hash and raw role codes.
    async fn find_user_by_name(&self, user_name: &str)
    -> Result<Option<UserCredentials>, StoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
