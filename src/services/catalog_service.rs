//! Catalog-wide insights and store health.

use crate::analytics::AnalyticsError;
use crate::domain::TitleKind;
use crate::models::results::{DecadeBreakdown, GenreBreakdown, HealthReport};

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Rating statistics per genre string, best average first (at most the
    /// configured genre limit).
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UpstreamUnavailable`] if the store fails.
    async fn genre_analysis(
        &self,
        kind: TitleKind,
        min_votes: Option<u64>,
    ) -> Result<GenreBreakdown, AnalyticsError>;

    /// Rating statistics per decade from the configured floor year, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UpstreamUnavailable`] if the store fails.
    async fn decade_analysis(
        &self,
        kind: TitleKind,
        min_votes: Option<u64>,
    ) -> Result<DecadeBreakdown, AnalyticsError>;

    /// Store reachability and size.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UpstreamUnavailable`] if the store cannot be reached.
    async fn health(&self) -> Result<HealthReport, AnalyticsError>;
}
