//! Team database entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database entity for the teams table.
#[derive(Debug, Clone, FromRow)]
pub struct TeamEntity {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<TeamEntity> for domain::models::Team {
    fn from(entity: TeamEntity) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug,
            name: entity.name,
            created_at: entity.created_at,
        }
    }
}
