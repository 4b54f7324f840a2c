//! HTTP route handlers.

pub mod alerts;
pub mod compliance;
pub mod health;
pub mod risk;
pub mod trends;
