//! Custom Axum extractors.

pub mod api_key;
pub mod team;
pub mod validated;

pub use api_key::{ApiKeyAuth, API_KEY_HEADER};
pub use team::TeamAccess;
pub use validated::{ApiJson, ApiPath, ApiQuery};
