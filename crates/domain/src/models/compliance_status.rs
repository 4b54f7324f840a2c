//! Team-defined compliance statuses (e.g. "Open", "Reviewed", "Resolved").

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A status a team can assign to compliance records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStatus {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    pub is_default: bool,
}

impl ComplianceStatus {
    /// True when `needle` names this status by id, code or name.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim();
        self.code.eq_ignore_ascii_case(needle)
            || self.name.eq_ignore_ascii_case(needle)
            || needle.parse::<i64>().is_ok_and(|id| id == self.id)
    }
}

/// All statuses of one team, indexed for lookups during alert extraction.
#[derive(Debug, Clone, Default)]
pub struct StatusCatalog {
    statuses: Vec<ComplianceStatus>,
    by_id: HashMap<i64, usize>,
    default_index: Option<usize>,
}

impl StatusCatalog {
    /// Builds a catalog; statuses are kept in display order.
    ///
    /// If several statuses claim to be the default, the first in display order wins.
    pub fn new(mut statuses: Vec<ComplianceStatus>) -> Self {
        statuses.sort_by_key(|s| (s.order.unwrap_or(i32::MAX), s.id));
        let by_id = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id, i))
            .collect();
        let default_index = statuses.iter().position(|s| s.is_default);
        Self {
            statuses,
            by_id,
            default_index,
        }
    }

    pub fn get(&self, id: i64) -> Option<&ComplianceStatus> {
        self.by_id.get(&id).map(|i| &self.statuses[*i])
    }

    pub fn default_status(&self) -> Option<&ComplianceStatus> {
        self.default_index.map(|i| &self.statuses[i])
    }

    /// Status for a record: its own if it resolves, else the team default.
    pub fn resolve(&self, status_id: Option<i64>) -> Option<&ComplianceStatus> {
        status_id
            .and_then(|id| self.get(id))
            .or_else(|| self.default_status())
    }

    pub fn as_slice(&self) -> &[ComplianceStatus] {
        &self.statuses
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

/// Request payload for moving a record to another status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlertStatusRequest {
    pub status_id: i64,
}
