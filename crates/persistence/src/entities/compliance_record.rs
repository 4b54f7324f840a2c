//! Compliance record database entity.

use chrono::{DateTime, Utc};
use domain::models::{ComplianceRecord, ComplianceValue};
use sqlx::FromRow;

/// Database entity for the compliance_records table.
#[derive(Debug, Clone, FromRow)]
pub struct ComplianceRecordEntity {
    pub id: i64,
    pub team_id: i64,
    pub worker_id: String,
    pub filter_id: i64,
    pub recorded_at: DateTime<Utc>,
    pub severity: String,
    pub status_id: Option<i64>,
    pub compliances: serde_json::Value,
}

impl From<ComplianceRecordEntity> for ComplianceRecord {
    /// Comments are loaded separately and start out empty.
    fn from(entity: ComplianceRecordEntity) -> Self {
        let compliances = match entity.compliances {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(field, value)| (field.clone(), ComplianceValue::from_json(value)))
                .collect(),
            _ => Default::default(),
        };

        Self {
            id: entity.id,
            worker_id: entity.worker_id,
            filter_id: entity.filter_id,
            timestamp: entity.recorded_at,
            severity: entity.severity,
            status_id: entity.status_id,
            compliances,
            comments: Vec::new(),
        }
    }
}
