//! Typed failures surfaced by every analytics operation.

use thiserror::Error;

/// Errors returned by the analytics engine and the services built on it.
///
/// None of these are retried internally. An empty statistic is always
/// [`AnalyticsError::NotFound`], never a zero.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl AnalyticsError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<sea_orm::DbErr> for AnalyticsError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::UpstreamUnavailable(err.to_string())
    }
}

impl From<anyhow::Error> for AnalyticsError {
    fn from(err: anyhow::Error) -> Self {
        Self::UpstreamUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AnalyticsError::not_found("Series not found: Nope");
        assert_eq!(err.to_string(), "Not found: Series not found: Nope");
        assert!(err.is_not_found());

        let err = AnalyticsError::invalid("limit must be between 1 and 100");
        assert_eq!(
            err.to_string(),
            "Invalid input: limit must be between 1 and 100"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn store_errors_are_upstream() {
        let err: AnalyticsError = sea_orm::DbErr::Custom("connection refused".into()).into();
        assert!(matches!(err, AnalyticsError::UpstreamUnavailable(_)));

        let err: AnalyticsError = anyhow::anyhow!("pool timed out").into();
        assert_eq!(err.to_string(), "Store unavailable: pool timed out");
    }
}
