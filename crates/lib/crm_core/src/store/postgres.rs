//! PostgreSQL-backed store.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{RoleStore, StoreError, UserStore};
use crate::models::auth::{User, UserCredentials};

/// Store over the tables created by `crate::migrate`.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for PgStore {
    async fn enabled_role_codes(&self, candidates: &[String]) -> Result<Vec<String>, StoreError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let known = sqlx::query_scalar::<_, String>(
            "SELECT role_code FROM roles WHERE role_code = ANY($1) AND enabled",
        )
        .bind(candidates)
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates
            .iter()
            .filter(|code| known.contains(*code))
            .cloned()
            .collect())
    }

    async fn role_ids_by_codes(&self, codes: &[String]) -> Result<Vec<i64>, StoreError> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM roles WHERE role_code = ANY($1)")
            .bind(codes)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    async fn permission_keys_by_role_ids(
        &self,
        role_ids: &[i64],
    ) -> Result<Vec<String>, StoreError> {
        let keys = sqlx::query_scalar::<_, String>(
            "SELECT permission_key FROM role_permissions WHERE role_id = ANY($1)",
        )
        .bind(role_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(keys)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_name(
        &self,
        user_name: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        let row = sqlx::query_as::<_, (i64, String, Option<String>, bool)>(
            "SELECT id, user_name, password_hash, enabled FROM users WHERE user_name = $1",
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, user_name, password_hash, enabled)) = row else {
            return Ok(None);
        };

        let role_codes = sqlx::query_scalar::<_, String>(
            "SELECT r.role_code \
             FROM user_roles ur \
             JOIN roles r ON r.id = ur.role_id \
             WHERE ur.user_id = $1 \
             ORDER BY r.id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(UserCredentials {
            user: User {
                id,
                user_name,
                enabled,
            },
            password_hash,
            role_codes,
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
