//! Embedded schema for users, roles and role permissions.

use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};
use tracing::info;

/// Migrations compiled in from `crm_core/migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Bring the RBAC tables up to date.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!(embedded = MIGRATOR.iter().count(), "rbac schema up to date");
    Ok(())
}
