//! Compliance percentage response model.

use serde::{Deserialize, Serialize};

/// Query parameters for the compliance-data endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplianceDataQuery {
    /// Restricts the aggregation to one UTC day, `YYYY-MM-DD`.
    pub date: Option<String>,
}

/// Compliance percentages for a team, rounded to one decimal.
///
/// The four core items are always reported (0 when inactive); the others
/// only when the team tracks them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceDataResponse {
    pub overall: f64,
    pub hard_hat: f64,
    pub vest: f64,
    pub safety_glasses: f64,
    pub gloves: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ear_protection: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steel_toe_boots: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respiratory_mask: Option<f64>,
}
