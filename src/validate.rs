//! Ordered validation predicates
//!
//! Each resource payload runs an explicit, ordered list of checks; the
//! first violated rule's message is what reaches the caller. These
//! helpers keep the rule messages declarative at the call site.

use crate::error::{validation_error, AppError};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

/// Indian 10-digit mobile number
static MOBILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("mobile regex"));

/// Loose phone pattern: digits with optional +, separators, 7-15 chars
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9\s\-()]{5,14}$").expect("phone regex"));

/// Require a present, non-blank string; returns it trimmed
pub fn required(value: &Option<String>, message: &str) -> Result<String, AppError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(validation_error(message)),
    }
}

/// Normalize an optional string: trimmed, blank collapses to None
pub fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn min_len(value: &str, min: usize, message: &str) -> Result<(), AppError> {
    if value.chars().count() < min {
        return Err(validation_error(message));
    }
    Ok(())
}

pub fn max_len(value: &str, max: usize, message: &str) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(validation_error(message));
    }
    Ok(())
}

pub fn email(value: &str, message: &str) -> Result<(), AppError> {
    if !value.validate_email() {
        return Err(validation_error(message));
    }
    Ok(())
}

/// 10-digit mobile number starting 6-9
pub fn mobile(value: &str, message: &str) -> Result<(), AppError> {
    if !MOBILE_RE.is_match(value) {
        return Err(validation_error(message));
    }
    Ok(())
}

/// General phone number (landline or mobile, separators allowed)
pub fn phone(value: &str, message: &str) -> Result<(), AppError> {
    if !PHONE_RE.is_match(value) {
        return Err(validation_error(message));
    }
    Ok(())
}

/// Parse a date string into a UTC timestamp.
///
/// Accepts RFC 3339 or a bare `YYYY-MM-DD` (taken as midnight UTC),
/// which is what the public site's date pickers submit.
pub fn parse_date(value: &str, message: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(validation_error(message))
}

pub fn non_negative(value: i64, message: &str) -> Result<(), AppError> {
    if value < 0 {
        return Err(validation_error(message));
    }
    Ok(())
}
