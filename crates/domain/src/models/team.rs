//! Team (tenant) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tenant. All compliance data is scoped to one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
