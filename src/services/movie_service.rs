//! Domain service for movie lookups and rankings.

use crate::analytics::AnalyticsError;
use crate::analytics::filters::MovieFilters;
use crate::models::results::{
    ComparisonBatch, MovieBrowsePage, MovieDetails, MovieLookup, MovieSearchResults,
};
use crate::models::title::RatedTitle;

/// Domain service trait for movie operations.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Movies matching the filters, highest rated first (unrated last).
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidInput`] for invalid filters or limit.
    async fn search_movies(
        &self,
        filters: MovieFilters,
        limit: Option<u64>,
    ) -> Result<MovieSearchResults, AnalyticsError>;

    /// A single movie with its rating, looked up by id or by name.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NotFound`] when nothing matches.
    async fn movie_details(&self, lookup: MovieLookup) -> Result<MovieDetails, AnalyticsError>;

    /// Compares up to ten movies; unknown names are reported inline.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidInput`] for an empty batch or more
    /// than ten names.
    async fn compare_movies(
        &self,
        names: &[String],
    ) -> Result<ComparisonBatch<RatedTitle>, AnalyticsError>;

    /// Best rated movies with at least `filters.min_votes` votes
    /// (10 000 when omitted).
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidInput`] for invalid filters or limit.
    async fn top_movies(
        &self,
        filters: MovieFilters,
        limit: Option<u64>,
    ) -> Result<MovieSearchResults, AnalyticsError>;

    /// Quality-ranked page of rated movies matching the filters.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidInput`] for invalid filters or page.
    async fn browse_movies(
        &self,
        filters: MovieFilters,
        offset: u64,
        limit: Option<u64>,
    ) -> Result<MovieBrowsePage, AnalyticsError>;

    /// First page of the unfiltered movie ranking.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidInput`] for an invalid limit.
    async fn ranked_movies(&self, limit: Option<u64>) -> Result<MovieBrowsePage, AnalyticsError>;
}
