//! Compliance aggregation.
//!
//! Turns raw per-item readings into compliant/total tallies for the items a
//! team tracks. Ratios stay unrounded here; rounding happens when the tally
//! is turned into a response.

use std::collections::BTreeMap;

use crate::models::{
    ActivePpeItems, ComplianceDataResponse, ComplianceRecord, ComplianceValue, PpeItem,
};

/// Readings counted for one PPE item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldTally {
    pub total: u64,
    pub compliant: u64,
}

impl FieldTally {
    /// `compliant / total * 100`, or 0 when nothing was counted.
    pub fn percentage(&self) -> f64 {
        percentage(self.compliant, self.total)
    }
}

/// Per-item tallies over a record set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplianceTally {
    fields: BTreeMap<PpeItem, FieldTally>,
}

impl ComplianceTally {
    /// Tally for `item`; zero when the item is inactive or never reported.
    pub fn field(&self, item: PpeItem) -> FieldTally {
        self.fields.get(&item).copied().unwrap_or_default()
    }

    /// Sum over all counted items.
    pub fn overall(&self) -> FieldTally {
        self.fields
            .values()
            .fold(FieldTally::default(), |acc, t| FieldTally {
                total: acc.total + t.total,
                compliant: acc.compliant + t.compliant,
            })
    }

    /// Weighted overall compliance: Σcompliant / Σtotal.
    pub fn overall_percentage(&self) -> f64 {
        self.overall().percentage()
    }

    /// Response shape with every value rounded to one decimal.
    pub fn to_response(&self, active: &ActivePpeItems) -> ComplianceDataResponse {
        let pct = |item: PpeItem| round_one_decimal(self.field(item).percentage());
        let optional = |item: PpeItem| active.contains(item).then(|| pct(item));

        ComplianceDataResponse {
            overall: round_one_decimal(self.overall_percentage()),
            hard_hat: pct(PpeItem::HardHat),
            vest: pct(PpeItem::Vest),
            safety_glasses: pct(PpeItem::SafetyGlasses),
            gloves: pct(PpeItem::Gloves),
            ear_protection: optional(PpeItem::EarProtection),
            steel_toe_boots: optional(PpeItem::SteelToeBoots),
            respiratory_mask: optional(PpeItem::RespiratoryMask),
        }
    }
}

/// Counts readings of active items across `records`.
///
/// A reading counts towards the total when the record carries the field at
/// all; it counts as compliant only when it is `Yes`.
pub fn aggregate(records: &[ComplianceRecord], active: &ActivePpeItems) -> ComplianceTally {
    let mut fields: BTreeMap<PpeItem, FieldTally> =
        active.iter().map(|item| (item, FieldTally::default())).collect();

    for record in records {
        for (item, tally) in fields.iter_mut() {
            match record.value_for(*item) {
                Some(ComplianceValue::Yes) => {
                    tally.total += 1;
                    tally.compliant += 1;
                }
                Some(_) => tally.total += 1,
                None => {}
            }
        }
    }

    ComplianceTally { fields }
}

pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
