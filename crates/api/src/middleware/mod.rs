//! HTTP middleware components.

pub mod auth;
pub mod logging;
pub mod metrics;
pub mod response_cache;
pub mod trace_id;

pub use auth::require_auth;
pub use metrics::{init_metrics, metrics_handler, metrics_middleware};
pub use response_cache::{response_cache_middleware, ResponseCache};
pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};
