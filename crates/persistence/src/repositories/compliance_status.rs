//! Repository for team compliance statuses.

use sqlx::PgPool;

use crate::entities::ComplianceStatusEntity;
use crate::metrics::QueryTimer;

/// Repository for compliance status operations.
#[derive(Clone)]
pub struct ComplianceStatusRepository {
    pool: PgPool,
}

impl ComplianceStatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All statuses of a team in display order.
    pub async fn list_for_team(
        &self,
        team_id: i64,
    ) -> Result<Vec<ComplianceStatusEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_compliance_statuses");
        let result = sqlx::query_as::<_, ComplianceStatusEntity>(
            r#"
            SELECT id, team_id, name, code, color, icon, display_order, is_default
            FROM compliance_statuses
            WHERE team_id = $1
            ORDER BY display_order NULLS LAST, id
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Finds a status only if it belongs to the team.
    pub async fn find_in_team(
        &self,
        team_id: i64,
        status_id: i64,
    ) -> Result<Option<ComplianceStatusEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_compliance_status");
        let result = sqlx::query_as::<_, ComplianceStatusEntity>(
            r#"
            SELECT id, team_id, name, code, color, icon, display_order, is_default
            FROM compliance_statuses
            WHERE team_id = $1 AND id = $2
            "#,
        )
        .bind(team_id)
        .bind(status_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
