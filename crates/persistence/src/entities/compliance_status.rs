//! Compliance status database entity.

use sqlx::FromRow;

/// Database entity for the compliance_statuses table.
#[derive(Debug, Clone, FromRow)]
pub struct ComplianceStatusEntity {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub code: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
    pub is_default: bool,
}

impl From<ComplianceStatusEntity> for domain::models::ComplianceStatus {
    fn from(entity: ComplianceStatusEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            code: entity.code,
            color: entity.color,
            icon: entity.icon,
            order: entity.display_order,
            is_default: entity.is_default,
        }
    }
}
