//! Domain service for series-level analytics.
//!
//! Every operation that takes a series name resolves it first: an exact
//! (case-insensitive) title wins over a substring hit.

use crate::analytics::AnalyticsError;
use crate::analytics::filters::SeriesFilters;
use crate::domain::ScaleMode;
use crate::models::results::{
    ComparisonBatch, EpisodeList, SeriesAnalytics, SeriesBrowsePage, SeriesComparison,
    SeriesGraph, SeriesRef, SeriesSearchResults, TopEpisodes, WorstEpisodes,
};

/// Domain service trait for series analytics.
#[async_trait::async_trait]
pub trait SeriesService: Send + Sync {
    /// Resolves a series name to its canonical title.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NotFound`] when neither tier matches.
    async fn resolve_series(&self, name: &str) -> Result<SeriesRef, AnalyticsError>;

    /// All rated, placed episodes of a series in (season, episode) order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NotFound`] for an unknown series or one with
    /// no rated episodes.
    async fn episodes(&self, name: &str) -> Result<EpisodeList, AnalyticsError>;

    /// Episodes ranked by weighted rating.
    ///
    /// Omitted parameters fall back to the configured defaults
    /// (`min_votes` 1000, `limit` 10, `m` 1000).
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidInput`] for a limit outside `1..=100`
    /// or a non-positive `m`, and [`AnalyticsError::NotFound`] when no
    /// episode passes the vote filter.
    async fn top_episodes(
        &self,
        name: &str,
        min_votes: Option<u64>,
        limit: Option<u64>,
        m: Option<f64>,
    ) -> Result<TopEpisodes, AnalyticsError>;

    /// Lowest rated episodes; ties go to the more voted episode.
    ///
    /// # Errors
    ///
    /// Same as [`SeriesService::top_episodes`].
    async fn worst_episodes(
        &self,
        name: &str,
        min_votes: Option<u64>,
        limit: Option<u64>,
    ) -> Result<WorstEpisodes, AnalyticsError>;

    /// Summary statistics, season trends, rating distribution and finales.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NotFound`] when the series has no rated episodes.
    async fn series_analytics(&self, name: &str) -> Result<SeriesAnalytics, AnalyticsError>;

    /// Sequentially indexed episodes with per-season and overall trendlines.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NotFound`] when the series has no rated episodes.
    async fn episode_graph(
        &self,
        name: &str,
        scale: ScaleMode,
    ) -> Result<SeriesGraph, AnalyticsError>;

    /// Compares up to ten series side by side.
    ///
    /// An unknown series is reported inline with `found: false`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidInput`] for an empty batch or more
    /// than ten names.
    async fn compare_series(
        &self,
        names: &[String],
    ) -> Result<ComparisonBatch<SeriesComparison>, AnalyticsError>;

    /// Series matching the filters, best average episode rating first.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidInput`] for invalid filters or limit.
    async fn search_series(
        &self,
        filters: SeriesFilters,
        limit: Option<u64>,
    ) -> Result<SeriesSearchResults, AnalyticsError>;

    /// Quality-ranked page of series matching the filters.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidInput`] for invalid filters or page.
    async fn browse_series(
        &self,
        filters: SeriesFilters,
        offset: u64,
        limit: Option<u64>,
    ) -> Result<SeriesBrowsePage, AnalyticsError>;

    /// First page of the unfiltered series ranking.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidInput`] for an invalid limit.
    async fn ranked_series(&self, limit: Option<u64>) -> Result<SeriesBrowsePage, AnalyticsError>;
}
