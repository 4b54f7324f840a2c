//! Domain services for SiteGuard.
//!
//! Pure functions over fetched records. Every computation takes the team's
//! active PPE items explicitly.

pub mod aggregation;
pub mod alert_extraction;
pub mod risk_ranking;
pub mod trends;

pub use aggregation::{aggregate, ComplianceTally, FieldTally};
pub use alert_extraction::{
    distinct_severities, extract_alert, extract_alerts, summarize, AlertFilter,
    ExtractionContext, UNASSIGNED_STATUS,
};
pub use risk_ranking::{rank_workers, rank_zones};
pub use trends::{build_trends, bucket_start, bucket_starts, range_start, TrendOptions};
