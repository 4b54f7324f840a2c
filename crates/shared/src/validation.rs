//! Common validation utilities.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Maximum length of a team slug.
const MAX_SLUG_LENGTH: usize = 64;

lazy_static! {
    static ref SLUG_PATTERN: Regex =
        Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").expect("slug pattern is valid");
}

/// Validates a team slug: lowercase alphanumerics and inner hyphens.
pub fn validate_team_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        let mut err = ValidationError::new("slug_required");
        err.message = Some("Team slug is required".into());
        return Err(err);
    }

    if slug.len() > MAX_SLUG_LENGTH || !SLUG_PATTERN.is_match(slug) {
        let mut err = ValidationError::new("slug_format");
        err.message = Some("Team slug has an invalid format".into());
        return Err(err);
    }

    Ok(())
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut err = ValidationError::new("date_format");
        err.message = Some(format!("Invalid date '{}', expected YYYY-MM-DD", value).into());
        err
    })
}

/// Validates that a date range is not inverted.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if start > end {
        let mut err = ValidationError::new("date_range");
        err.message = Some("startDate must not be after endDate".into());
        return Err(err);
    }
    Ok(())
}
