//! Compliance record domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use super::ppe::{ActivePpeItems, PpeItem};

/// A single PPE reading for one field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceValue {
    Yes,
    No,
    /// Anything that is neither "Yes" nor "No". Counts towards totals only.
    #[serde(other)]
    Unknown,
}

impl ComplianceValue {
    /// Interprets a raw JSON value stored by the detection pipeline.
    ///
    /// Accepts "Yes"/"No" in any case and JSON booleans.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) if s.eq_ignore_ascii_case("yes") => Self::Yes,
            serde_json::Value::String(s) if s.eq_ignore_ascii_case("no") => Self::No,
            serde_json::Value::Bool(true) => Self::Yes,
            serde_json::Value::Bool(false) => Self::No,
            _ => Self::Unknown,
        }
    }
}

/// A comment left on a compliance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// One detection event: a worker seen by a camera filter with per-item PPE readings.
///
/// Written by the ingestion pipeline; only `status_id` and comments change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecord {
    pub id: i64,
    pub worker_id: String,
    pub filter_id: i64,
    pub timestamp: DateTime<Utc>,
    pub severity: String,
    pub status_id: Option<i64>,
    /// Keyed by record field name ("HardHatCompliance"); may hold inactive or unknown fields.
    pub compliances: BTreeMap<String, ComplianceValue>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl ComplianceRecord {
    /// Reading for `item`, if the record carries one.
    pub fn value_for(&self, item: PpeItem) -> Option<ComplianceValue> {
        self.compliances.get(item.field_name()).copied()
    }

    /// Active items this record reports as "No", in canonical order.
    pub fn violated_items(&self, active: &ActivePpeItems) -> Vec<PpeItem> {
        active
            .iter()
            .filter(|item| self.value_for(*item) == Some(ComplianceValue::No))
            .collect()
    }
}

/// Request payload for adding a comment to a record.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Author must be between 1 and 100 characters"
    ))]
    pub author: String,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "Comment must be between 1 and 2000 characters"
    ))]
    pub text: String,
}
