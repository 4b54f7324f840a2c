//! Violation and alert extraction.
//!
//! An alert is a compliance record with at least one violated active item,
//! placed in the zone and location of the filter that produced it.

use chrono::NaiveDate;
use shared::validation::{parse_iso_date, validate_date_range};
use std::collections::BTreeSet;
use validator::ValidationError;

use crate::models::{
    ActivePpeItems, Alert, AlertStats, ComplianceRecord, FilterDirectory, ListAlertsQuery,
    StatusCatalog,
};

/// Everything extraction needs to know about a team, resolved once per request.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    pub active: &'a ActivePpeItems,
    pub filters: &'a FilterDirectory,
    pub statuses: &'a StatusCatalog,
}

/// Builds the alert for one record.
///
/// Returns `None` when the record has no active violations or its filter is
/// not placed in any zone of the team.
pub fn extract_alert(record: &ComplianceRecord, ctx: &ExtractionContext<'_>) -> Option<Alert> {
    let violated = record.violated_items(ctx.active);
    if violated.is_empty() {
        return None;
    }
    let filter = ctx.filters.resolve(record.filter_id)?;

    Some(Alert {
        id: record.id,
        worker_id: record.worker_id.clone(),
        timestamp: record.timestamp,
        zone_id: filter.zone_id,
        zone: filter.zone_name.clone(),
        location: filter.location_name.clone(),
        violations: violated
            .into_iter()
            .map(|item| item.display_name().to_string())
            .collect(),
        severity: record.severity.clone(),
        status: ctx.statuses.resolve(record.status_id).cloned(),
        comments: record.comments.clone(),
    })
}

/// Extracts alerts in record order.
pub fn extract_alerts(records: &[ComplianceRecord], ctx: &ExtractionContext<'_>) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let mut unplaced = 0usize;
    for record in records {
        match extract_alert(record, ctx) {
            Some(alert) => alerts.push(alert),
            None if ctx.filters.resolve(record.filter_id).is_none() => unplaced += 1,
            None => {}
        }
    }

    if unplaced > 0 {
        tracing::debug!(
            dropped = unplaced,
            "Dropped records with unresolvable filters"
        );
    }
    alerts
}

/// Optional narrowing applied to extracted alerts.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    /// Inclusive, compared against the UTC date of the alert.
    pub start_date: Option<NaiveDate>,
    /// Inclusive.
    pub end_date: Option<NaiveDate>,
    /// Zone name (case-insensitive) or zone id.
    pub zone: Option<String>,
    /// Status code, name or id.
    pub status: Option<String>,
    /// Case-insensitive.
    pub severity: Option<String>,
}

impl AlertFilter {
    /// Parses the narrowing part of a list query. Blank values mean "no filter".
    pub fn from_query(query: &ListAlertsQuery) -> Result<Self, ValidationError> {
        let start_date = non_blank(&query.start_date).map(parse_iso_date).transpose()?;
        let end_date = non_blank(&query.end_date).map(parse_iso_date).transpose()?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            validate_date_range(start, end)?;
        }

        Ok(Self {
            start_date,
            end_date,
            zone: non_blank(&query.zone).map(str::to_string),
            status: non_blank(&query.status).map(str::to_string),
            severity: non_blank(&query.severity).map(str::to_string),
        })
    }

    pub fn matches(&self, alert: &Alert) -> bool {
        let day = alert.timestamp.date_naive();
        if self.start_date.is_some_and(|start| day < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| day > end) {
            return false;
        }
        if let Some(zone) = self.zone.as_deref().map(str::trim) {
            let by_id = zone.parse::<i64>().is_ok_and(|id| id == alert.zone_id);
            if !by_id && !alert.zone.eq_ignore_ascii_case(zone) {
                return false;
            }
        }
        if let Some(status) = self.status.as_deref() {
            match &alert.status {
                Some(s) if s.matches(status) => {}
                _ => return false,
            }
        }
        if let Some(severity) = self.severity.as_deref() {
            if !alert.severity.eq_ignore_ascii_case(severity.trim()) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, alerts: Vec<Alert>) -> Vec<Alert> {
        alerts.into_iter().filter(|a| self.matches(a)).collect()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Key used in `byStatus` for alerts without any status.
pub const UNASSIGNED_STATUS: &str = "unassigned";

/// Aggregate counts over `alerts`.
pub fn summarize(alerts: &[Alert]) -> AlertStats {
    let mut stats = AlertStats::default();
    for alert in alerts {
        stats.total_alerts += 1;
        stats.total_violations += alert.violations.len() as u64;
        *stats.by_severity.entry(alert.severity.clone()).or_default() += 1;
        let status_key = alert
            .status
            .as_ref()
            .map(|s| s.code.clone())
            .unwrap_or_else(|| UNASSIGNED_STATUS.to_string());
        *stats.by_status.entry(status_key).or_default() += 1;
        *stats.by_zone.entry(alert.zone.clone()).or_default() += 1;
        for violation in &alert.violations {
            *stats.by_violation_type.entry(violation.clone()).or_default() += 1;
        }
    }
    stats
}

/// Distinct severities among `records`, sorted.
pub fn distinct_severities(records: &[ComplianceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.severity.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
