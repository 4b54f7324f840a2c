//! PPE item catalog.
//!
//! The single mapping between human-readable PPE names ("Hard Hat"), the
//! field names stored in compliance records ("HardHatCompliance") and the
//! keys used in API responses ("hardHat"). Every aggregation, extraction,
//! ranking and trend computation goes through this table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A trackable piece of personal protective equipment.
///
/// Variant order is the canonical reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PpeItem {
    HardHat,
    Vest,
    SafetyGlasses,
    Gloves,
    EarProtection,
    SteelToeBoots,
    RespiratoryMask,
}

struct PpeMapping {
    item: PpeItem,
    display_name: &'static str,
    field_name: &'static str,
    response_key: &'static str,
}

const MAPPINGS: [PpeMapping; 7] = [
    PpeMapping {
        item: PpeItem::HardHat,
        display_name: "Hard Hat",
        field_name: "HardHatCompliance",
        response_key: "hardHat",
    },
    PpeMapping {
        item: PpeItem::Vest,
        display_name: "Vest",
        field_name: "VestCompliance",
        response_key: "vest",
    },
    PpeMapping {
        item: PpeItem::SafetyGlasses,
        display_name: "Safety Glasses",
        field_name: "SafetyGlassesCompliance",
        response_key: "safetyGlasses",
    },
    PpeMapping {
        item: PpeItem::Gloves,
        display_name: "Gloves",
        field_name: "GlovesCompliance",
        response_key: "gloves",
    },
    PpeMapping {
        item: PpeItem::EarProtection,
        display_name: "Ear Protection",
        field_name: "EarProtectionCompliance",
        response_key: "earProtection",
    },
    PpeMapping {
        item: PpeItem::SteelToeBoots,
        display_name: "Steel Toe Boots",
        field_name: "SteelToeBootsCompliance",
        response_key: "steelToeBoots",
    },
    PpeMapping {
        item: PpeItem::RespiratoryMask,
        display_name: "Respiratory Mask",
        field_name: "RespiratoryMaskCompliance",
        response_key: "respiratoryMask",
    },
];

impl PpeItem {
    /// All items in canonical order.
    pub const ALL: [PpeItem; 7] = [
        PpeItem::HardHat,
        PpeItem::Vest,
        PpeItem::SafetyGlasses,
        PpeItem::Gloves,
        PpeItem::EarProtection,
        PpeItem::SteelToeBoots,
        PpeItem::RespiratoryMask,
    ];

    fn mapping(self) -> &'static PpeMapping {
        // MAPPINGS is declared in variant order.
        &MAPPINGS[self as usize]
    }

    /// Human-readable name, e.g. "Hard Hat".
    pub fn display_name(self) -> &'static str {
        self.mapping().display_name
    }

    /// Field name used inside a record's compliance map, e.g. "HardHatCompliance".
    pub fn field_name(self) -> &'static str {
        self.mapping().field_name
    }

    /// Key used in compliance-data responses, e.g. "hardHat".
    pub fn response_key(self) -> &'static str {
        self.mapping().response_key
    }

    /// Items always present in compliance-data responses, active or not.
    pub fn is_core(self) -> bool {
        matches!(
            self,
            PpeItem::HardHat | PpeItem::Vest | PpeItem::SafetyGlasses | PpeItem::Gloves
        )
    }

    /// Looks up an item by display name (case and surrounding whitespace ignored).
    pub fn from_display_name(name: &str) -> Option<Self> {
        let name = name.trim();
        MAPPINGS
            .iter()
            .find(|m| m.display_name.eq_ignore_ascii_case(name))
            .map(|m| m.item)
    }

    /// Looks up an item by record field name (exact match).
    pub fn from_field_name(field: &str) -> Option<Self> {
        MAPPINGS
            .iter()
            .find(|m| m.field_name == field)
            .map(|m| m.item)
    }
}

impl std::fmt::Display for PpeItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The PPE items a team currently tracks.
///
/// Resolved once per request from the team's configuration and passed into
/// every computation. Fields outside this set are neither compliant nor
/// violated, whatever a record contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivePpeItems {
    items: BTreeSet<PpeItem>,
}

impl ActivePpeItems {
    pub fn new(items: impl IntoIterator<Item = PpeItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Every known item.
    pub fn all() -> Self {
        Self::new(PpeItem::ALL)
    }

    /// Resolves configured display names.
    ///
    /// Returns the active set and the names that matched no known item.
    pub fn from_display_names<I, S>(names: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items = BTreeSet::new();
        let mut unknown = Vec::new();
        for name in names {
            let name = name.as_ref();
            match PpeItem::from_display_name(name) {
                Some(item) => {
                    items.insert(item);
                }
                None => unknown.push(name.to_string()),
            }
        }
        (Self { items }, unknown)
    }

    pub fn contains(&self, item: PpeItem) -> bool {
        self.items.contains(&item)
    }

    /// True when `field` maps to an active item.
    pub fn contains_field(&self, field: &str) -> bool {
        PpeItem::from_field_name(field).is_some_and(|item| self.contains(item))
    }

    /// Display name for an active field, `None` for inactive or unknown fields.
    pub fn display_name_for_field(&self, field: &str) -> Option<&'static str> {
        PpeItem::from_field_name(field)
            .filter(|item| self.contains(*item))
            .map(PpeItem::display_name)
    }

    /// Active items in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = PpeItem> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<PpeItem> for ActivePpeItems {
    fn from_iter<T: IntoIterator<Item = PpeItem>>(iter: T) -> Self {
        Self::new(iter)
    }
}
