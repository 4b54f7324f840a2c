//! Domain layer for SiteGuard.
//!
//! This crate contains:
//! - The PPE item catalog and per-team active item sets
//! - Compliance record, status, alert, risk and trend models
//! - Pure aggregation, extraction, ranking and trend services

pub mod models;
pub mod services;
