//! Repeat-offender and high-risk-zone ranking.
//!
//! Both rankings fold extracted alerts into per-key accumulators in a single
//! pass, drop groups under the violation threshold, sort, then truncate.
//! Groups are kept in first-appearance order before sorting and the sort is
//! stable, so ties keep that order in both directions.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::{
    Alert, PpeItem, RankingOptions, RiskSortKey, RiskThresholds, SortOrder, WorkerRiskEntry,
    ZoneRiskData,
};

#[derive(Debug)]
struct Accumulator {
    violations: u64,
    last_violation: DateTime<Utc>,
    types: BTreeSet<PpeItem>,
    zone_id: i64,
    zone: String,
    location: String,
    workers: HashSet<String>,
}

impl Accumulator {
    fn start(alert: &Alert) -> Self {
        Self {
            violations: 0,
            last_violation: alert.timestamp,
            types: BTreeSet::new(),
            zone_id: alert.zone_id,
            zone: alert.zone.clone(),
            location: alert.location.clone(),
            workers: HashSet::new(),
        }
    }

    fn add(&mut self, alert: &Alert) {
        self.violations += alert.violations.len() as u64;
        self.types.extend(
            alert
                .violations
                .iter()
                .filter_map(|name| PpeItem::from_display_name(name)),
        );
        self.workers.insert(alert.worker_id.clone());
        // Placement follows the most recent violation; equal timestamps keep the first seen.
        if alert.timestamp > self.last_violation {
            self.last_violation = alert.timestamp;
            self.zone_id = alert.zone_id;
            self.zone = alert.zone.clone();
            self.location = alert.location.clone();
        }
    }

    fn violation_types(&self) -> Vec<String> {
        self.types
            .iter()
            .map(|item| item.display_name().to_string())
            .collect()
    }
}

/// Groups alerts by `key`, preserving first-appearance order.
fn accumulate<K, F>(alerts: &[Alert], key: F) -> Vec<(K, Accumulator)>
where
    K: std::hash::Hash + Eq + Clone,
    F: Fn(&Alert) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Accumulator)> = Vec::new();

    for alert in alerts {
        let k = key(alert);
        let slot = match index.get(&k) {
            Some(slot) => *slot,
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, Accumulator::start(alert)));
                groups.len() - 1
            }
        };
        groups[slot].1.add(alert);
    }
    groups
}

fn sort_and_truncate<T, F>(mut entries: Vec<T>, options: &RankingOptions, compare: F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    match options.order {
        SortOrder::Asc => entries.sort_by(|a, b| compare(a, b)),
        SortOrder::Desc => entries.sort_by(|a, b| compare(b, a)),
    }
    entries.truncate(options.limit);
    entries
}

/// Ranks workers by PPE violations across `alerts`.
pub fn rank_workers(
    alerts: &[Alert],
    options: &RankingOptions,
    thresholds: &RiskThresholds,
) -> Vec<WorkerRiskEntry> {
    let entries: Vec<WorkerRiskEntry> = accumulate(alerts, |a| a.worker_id.clone())
        .into_iter()
        .filter(|(_, acc)| acc.violations >= options.min_violations)
        .map(|(worker_id, acc)| WorkerRiskEntry {
            violation_types: acc.violation_types(),
            risk_level: thresholds.level(acc.violations),
            worker_id,
            violations: acc.violations,
            last_violation: acc.last_violation,
            zone: acc.zone,
            location: acc.location,
        })
        .collect();

    sort_and_truncate(entries, options, |a, b| match options.sort_by {
        RiskSortKey::Violations => a.violations.cmp(&b.violations),
        RiskSortKey::LastViolation => a.last_violation.cmp(&b.last_violation),
        RiskSortKey::Name => a.worker_id.cmp(&b.worker_id),
        RiskSortKey::Location => a.location.cmp(&b.location).then_with(|| a.zone.cmp(&b.zone)),
        RiskSortKey::RiskLevel => a.risk_level.cmp(&b.risk_level),
    })
}

/// Ranks zones by PPE violations across `alerts`.
///
/// Zones carry no risk level; sorting by it falls back to violations.
pub fn rank_zones(alerts: &[Alert], options: &RankingOptions) -> Vec<ZoneRiskData> {
    let entries: Vec<ZoneRiskData> = accumulate(alerts, |a| a.zone_id)
        .into_iter()
        .filter(|(_, acc)| acc.violations >= options.min_violations)
        .map(|(zone_id, acc)| ZoneRiskData {
            violation_types: acc.violation_types(),
            workers_involved: acc.workers.len(),
            zone_id,
            zone_name: acc.zone,
            location_name: acc.location,
            violations: acc.violations,
            last_violation: acc.last_violation,
        })
        .collect();

    sort_and_truncate(entries, options, |a, b| match options.sort_by {
        RiskSortKey::Violations | RiskSortKey::RiskLevel => a.violations.cmp(&b.violations),
        RiskSortKey::LastViolation => a.last_violation.cmp(&b.last_violation),
        RiskSortKey::Name => a.zone_name.cmp(&b.zone_name),
        RiskSortKey::Location => a
            .location_name
            .cmp(&b.location_name)
            .then_with(|| a.zone_name.cmp(&b.zone_name)),
    })
}
