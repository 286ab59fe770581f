use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::preferences::PreferenceKey;
use crate::store::PreferenceStore;

/// Preference store backed by the `portfolio_preferences` table.
pub struct PgPreferenceStore {
    pool: PgPool,
}

impl PgPreferenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceStore for PgPreferenceStore {
    async fn get(&self, key: PreferenceKey) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM portfolio_preferences WHERE key = $1",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    async fn set(&self, key: PreferenceKey, value: String) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO portfolio_preferences (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE
                SET value = EXCLUDED.value, updated_at = now()
            "#,
        )
        .bind(key.as_str())
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: PreferenceKey) -> Result<(), AppError> {
        sqlx::query("DELETE FROM portfolio_preferences WHERE key = $1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
