//! Compliance comment database entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database entity for the compliance_comments table.
#[derive(Debug, Clone, FromRow)]
pub struct CommentEntity {
    pub id: i64,
    pub record_id: i64,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentEntity> for domain::models::Comment {
    fn from(entity: CommentEntity) -> Self {
        Self {
            id: entity.id,
            author: entity.author,
            text: entity.body,
            created_at: entity.created_at,
        }
    }
}
