//! Camera filter placement: which zone and location a filter watches.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where a detection filter is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterInfo {
    pub filter_id: i64,
    pub zone_id: i64,
    pub zone_name: String,
    pub location_id: i64,
    pub location_name: String,
}

/// Filter lookup for one team.
#[derive(Debug, Clone, Default)]
pub struct FilterDirectory {
    filters: HashMap<i64, FilterInfo>,
}

impl FilterDirectory {
    /// Builds the directory. A filter listed twice keeps its first placement.
    pub fn new(filters: impl IntoIterator<Item = FilterInfo>) -> Self {
        let mut map = HashMap::new();
        for info in filters {
            map.entry(info.filter_id).or_insert(info);
        }
        Self { filters: map }
    }

    pub fn resolve(&self, filter_id: i64) -> Option<&FilterInfo> {
        self.filters.get(&filter_id)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
