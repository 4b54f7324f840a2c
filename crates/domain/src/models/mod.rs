//! Domain models for SiteGuard.

pub mod alert;
pub mod compliance_data;
pub mod compliance_record;
pub mod compliance_status;
pub mod filter_info;
pub mod ppe;
pub mod risk;
pub mod team;
pub mod trend;

pub use alert::{Alert, AlertStats, AlertStatusResponse, ListAlertsQuery, ListAlertsResponse};
pub use compliance_data::{ComplianceDataQuery, ComplianceDataResponse};
pub use compliance_record::{Comment, ComplianceRecord, ComplianceValue, CreateCommentRequest};
pub use compliance_status::{ComplianceStatus, StatusCatalog, UpdateAlertStatusRequest};
pub use filter_info::{FilterDirectory, FilterInfo};
pub use ppe::{ActivePpeItems, PpeItem};
pub use risk::{
    RankingOptions, RiskLevel, RiskRankingQuery, RiskSortKey, RiskThresholds, SortOrder,
    WorkerRiskEntry, ZoneRiskData,
};
pub use team::Team;
pub use trend::{TrendDataPoint, TrendPeriod, TrendQuery};
