//! Repository implementations for database operations.

pub mod api_key;
pub mod compliance_record;
pub mod compliance_status;
pub mod filter;
pub mod team;

pub use api_key::ApiKeyRepository;
pub use compliance_record::ComplianceRecordRepository;
pub use compliance_status::ComplianceStatusRepository;
pub use filter::FilterRepository;
pub use team::TeamRepository;
