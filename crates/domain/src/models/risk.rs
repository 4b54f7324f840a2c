//! Risk ranking models: repeat offenders and high-risk zones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Three-tier worker risk classification.
///
/// Ordered from lowest to highest so that sorting by level is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Violation counts at which a worker moves into a higher risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskThresholds {
    pub high: u64,
    pub medium: u64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: 20,
            medium: 15,
        }
    }
}

impl RiskThresholds {
    pub fn level(&self, violations: u64) -> RiskLevel {
        if violations >= self.high {
            RiskLevel::High
        } else if violations >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Field a risk ranking is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskSortKey {
    #[default]
    Violations,
    LastViolation,
    Name,
    Location,
    RiskLevel,
}

impl FromStr for RiskSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "violations" => Ok(RiskSortKey::Violations),
            "lastviolation" | "last_violation" => Ok(RiskSortKey::LastViolation),
            "name" => Ok(RiskSortKey::Name),
            "location" => Ok(RiskSortKey::Location),
            "risklevel" | "risk_level" => Ok(RiskSortKey::RiskLevel),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// How to filter, sort and cut a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingOptions {
    /// Groups below this many violations are dropped.
    pub min_violations: u64,
    /// Applied after sorting.
    pub limit: usize,
    pub sort_by: RiskSortKey,
    pub order: SortOrder,
}

/// Query parameters shared by the ranking endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRankingQuery {
    pub min_violations: Option<u64>,
    pub limit: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    /// Look-back window in days.
    pub days: Option<i64>,
}

/// A worker who keeps violating PPE rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRiskEntry {
    pub worker_id: String,
    /// Every PPE violation occurrence in the window.
    pub violations: u64,
    pub last_violation: DateTime<Utc>,
    pub violation_types: Vec<String>,
    /// Zone of the most recent violation.
    pub zone: String,
    /// Location of the most recent violation.
    pub location: String,
    pub risk_level: RiskLevel,
}

/// A zone with many PPE violations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRiskData {
    pub zone_id: i64,
    pub zone_name: String,
    pub location_name: String,
    pub violations: u64,
    pub last_violation: DateTime<Utc>,
    pub violation_types: Vec<String>,
    /// Distinct workers with violations in this zone.
    pub workers_involved: usize,
}
