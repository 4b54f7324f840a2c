//! Shared utilities and common types for the SiteGuard backend.
//!
//! This crate provides common functionality used across all other crates:
//! - API key hashing
//! - Offset pagination
//! - Query parameter validation (team slugs, ISO dates)
//! - A small TTL cache used for request de-duplication

pub mod cache;
pub mod crypto;
pub mod pagination;
pub mod validation;
