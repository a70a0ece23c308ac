//! Input checks shared by the services: result limits, title names and
//! rating or year bounds.

use super::error::AnalyticsError;
use crate::constants::limits::{MAX_RESULT_LIMIT, MIN_RESULT_LIMIT};

pub fn validate_limit(limit: u64) -> Result<u64, AnalyticsError> {
    if !(MIN_RESULT_LIMIT..=MAX_RESULT_LIMIT).contains(&limit) {
        return Err(AnalyticsError::invalid(format!(
            "Invalid limit: {limit}. Limit must be between {MIN_RESULT_LIMIT} and {MAX_RESULT_LIMIT}"
        )));
    }
    Ok(limit)
}

/// Applies `default` when `limit` is absent, then checks it against both the
/// global bounds and the configured `max`.
pub fn limit_or(limit: Option<u64>, default: u64, max: u64) -> Result<u64, AnalyticsError> {
    let limit = validate_limit(limit.unwrap_or(default))?;
    if limit > max {
        return Err(AnalyticsError::invalid(format!(
            "Invalid limit: {limit}. Limit must be at most {max}"
        )));
    }
    Ok(limit)
}

pub fn validate_name(name: &str) -> Result<&str, AnalyticsError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AnalyticsError::invalid("Title name cannot be empty"));
    }
    Ok(trimmed)
}

pub fn validate_rating(field: &str, rating: f64) -> Result<f64, AnalyticsError> {
    if !rating.is_finite() || !(0.0..=10.0).contains(&rating) {
        return Err(AnalyticsError::invalid(format!(
            "Invalid {field}: {rating}. Ratings must be between 0 and 10"
        )));
    }
    Ok(rating)
}

/// Rejects `min > max` for any pair of bounds that are both present.
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    field: &str,
    min: Option<T>,
    max: Option<T>,
) -> Result<(), AnalyticsError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(AnalyticsError::invalid(format!(
            "Invalid {field} range: {min} is greater than {max}"
        ))),
        _ => Ok(()),
    }
}
