//! API key lookups.

use sqlx::PgPool;

use crate::entities::ApiKeyEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct ApiKeyRepository {
    pool: PgPool,
}

impl ApiKeyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Looks a key up by the SHA-256 hex digest of its full text.
    pub async fn find_by_key_hash(
        &self,
        key_hash: &str,
    ) -> Result<Option<ApiKeyEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_api_key_by_hash");
        let result = sqlx::query_as::<_, ApiKeyEntity>(
            r#"
            SELECT id, key_hash, key_prefix, name, team_id, is_active, is_admin,
                   last_used_at, created_at, expires_at
            FROM api_keys
            WHERE key_hash = $1
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Stamps `last_used_at` with the database clock.
    pub async fn touch(&self, key_id: i64) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("touch_api_key");
        let result = sqlx::query("UPDATE api_keys SET last_used_at = NOW() WHERE id = $1")
            .bind(key_id)
            .execute(&self.pool)
            .await;
        timer.record();
        result.map(|_| ())
    }
}
