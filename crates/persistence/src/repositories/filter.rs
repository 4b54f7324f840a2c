//! Repository for the site topology: locations, zones, devices and filters.

use sqlx::PgPool;

use crate::entities::FilterInfoEntity;
use crate::metrics::QueryTimer;

/// Repository for filter placement lookups.
#[derive(Clone)]
pub struct FilterRepository {
    pool: PgPool,
}

impl FilterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every filter of a team with its zone and location.
    ///
    /// Walks location -> zone -> device -> filter. Filters on devices outside
    /// the team's locations are not returned.
    pub async fn list_for_team(&self, team_id: i64) -> Result<Vec<FilterInfoEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_team_filters");
        let result = sqlx::query_as::<_, FilterInfoEntity>(
            r#"
            SELECT fd.id AS filter_id,
                   z.id AS zone_id,
                   z.name AS zone_name,
                   l.id AS location_id,
                   l.name AS location_name
            FROM locations l
            JOIN zones z ON z.location_id = l.id
            JOIN devices d ON d.zone_id = z.id
            JOIN filter_devices fd ON fd.device_id = d.id
            WHERE l.team_id = $1
            ORDER BY fd.id, z.id
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Distinct zone names of a team, sorted.
    pub async fn list_zone_names(&self, team_id: i64) -> Result<Vec<String>, sqlx::Error> {
        let timer = QueryTimer::new("list_team_zone_names");
        let result = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT z.name
            FROM zones z
            JOIN locations l ON l.id = z.location_id
            WHERE l.team_id = $1
            ORDER BY z.name
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
