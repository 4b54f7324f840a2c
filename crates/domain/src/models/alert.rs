//! Alert models.
//!
//! Alerts are derived from compliance records and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::compliance_record::Comment;
use super::compliance_status::ComplianceStatus;

/// A compliance record with at least one active violation, placed in its zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    pub worker_id: String,
    pub timestamp: DateTime<Utc>,
    pub zone_id: i64,
    pub zone: String,
    pub location: String,
    /// Display names of the violated items.
    pub violations: Vec<String>,
    pub severity: String,
    pub status: Option<ComplianceStatus>,
    pub comments: Vec<Comment>,
}

/// Query parameters for listing alerts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAlertsQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Inclusive, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    pub zone: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
}

/// Aggregate counts over a filtered alert set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    pub total_alerts: u64,
    pub total_violations: u64,
    pub by_severity: BTreeMap<String, u64>,
    pub by_status: BTreeMap<String, u64>,
    pub by_zone: BTreeMap<String, u64>,
    pub by_violation_type: BTreeMap<String, u64>,
}

/// Response for the all-alerts endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAlertsResponse {
    pub alerts: Vec<Alert>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub stats: AlertStats,
    /// Zones known to the team, for filter pickers.
    pub zones: Vec<String>,
    pub statuses: Vec<ComplianceStatus>,
    /// Severities seen in the requested window.
    pub severities: Vec<String>,
}

/// Response after a status transition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStatusResponse {
    pub id: i64,
    pub status: ComplianceStatus,
}
