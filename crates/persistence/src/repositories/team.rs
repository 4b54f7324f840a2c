//! Repository for team lookups and PPE configuration.

use sqlx::PgPool;

use crate::entities::TeamEntity;
use crate::metrics::QueryTimer;

/// Repository for team operations.
#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds a team by its URL slug.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<TeamEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_team_by_slug");
        let result = sqlx::query_as::<_, TeamEntity>(
            r#"
            SELECT id, slug, name, created_at
            FROM teams
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Display names of the PPE items a team currently tracks.
    ///
    /// Names are returned as configured; mapping them to known items is the
    /// caller's job.
    pub async fn find_active_ppe_item_names(
        &self,
        team_id: i64,
    ) -> Result<Vec<String>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_ppe_items");
        let result = sqlx::query_scalar::<_, String>(
            r#"
            SELECT p.name
            FROM team_ppe_items tp
            JOIN ppe_items p ON p.id = tp.ppe_item_id
            WHERE tp.team_id = $1 AND tp.active = TRUE
            ORDER BY p.id
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
