//! Violation trend models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Bucket granularity for trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    #[default]
    Week,
    Month,
}

impl FromStr for TrendPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" | "weekly" => Ok(TrendPeriod::Week),
            "month" | "monthly" => Ok(TrendPeriod::Month),
            _ => Err(format!("Unknown trend period: {}", s)),
        }
    }
}

/// Query parameters for the trends endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendQuery {
    pub period: Option<String>,
}

/// Violation counts for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendDataPoint {
    /// Display label, e.g. "Mar 04" or "Jan 2024".
    #[serde(rename = "bucketLabel")]
    pub label: String,
    /// First day of the bucket.
    pub date: NaiveDate,
    /// Violation count per active PPE display name.
    #[serde(flatten)]
    pub counts: BTreeMap<String, u64>,
    /// Set only for demo-mode filler values.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}
