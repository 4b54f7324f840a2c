//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod api_key;
pub mod comment;
pub mod compliance_record;
pub mod compliance_status;
pub mod filter_info;
pub mod team;

pub use api_key::{ApiKeyEntity, KeyRejection};
pub use comment::CommentEntity;
pub use compliance_record::ComplianceRecordEntity;
pub use compliance_status::ComplianceStatusEntity;
pub use filter_info::FilterInfoEntity;
pub use team::TeamEntity;
