//! SiteGuard compliance API.
//!
//! PPE compliance percentages, alerts, risk rankings and trends per team.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod services;
