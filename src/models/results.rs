//! Structured results returned by the services.

use serde::Serialize;

use crate::analytics::aggregate::{CompareEntry, RatingBucket, SeasonTrend, Summary};
use crate::analytics::filters::{MovieFilters, SeriesFilters};
use crate::analytics::pagination::RankedPage;
use crate::analytics::resolver::{MatchTier, Resolved};
use crate::analytics::trend::EpisodeGraph;
use crate::db::{DecadeStatsRow, GenreStatsRow, SeriesStatsRow};
use crate::domain::{TitleId, TitleKind, split_genres};
use crate::models::episode::PanelEpisode;
use crate::models::title::RatedTitle;

/// A resolved series as echoed back in every series result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRef {
    pub id: TitleId,
    pub title: String,
    pub years: String,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub genres: Vec<String>,
    pub match_tier: MatchTier,
}

impl From<Resolved> for SeriesRef {
    fn from(resolved: Resolved) -> Self {
        let title = resolved.title.title;
        Self {
            years: title.years_label(),
            id: title.id,
            title: title.primary_title,
            start_year: title.start_year,
            end_year: title.end_year,
            genres: title.genres,
            match_tier: resolved.tier,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EpisodeList {
    pub series: SeriesRef,
    pub episode_count: usize,
    pub episodes: Vec<PanelEpisode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedEpisode {
    #[serde(flatten)]
    pub episode: PanelEpisode,
    pub weighted_rating: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopEpisodes {
    pub series: SeriesRef,
    pub min_votes: u64,
    pub m: f64,
    /// Mean rating of the vote-filtered episodes (`C`).
    pub prior_mean: f64,
    /// Episodes that passed the vote filter.
    pub considered: usize,
    pub episodes: Vec<WeightedEpisode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorstEpisodes {
    pub series: SeriesRef,
    pub min_votes: u64,
    pub considered: usize,
    pub episodes: Vec<PanelEpisode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesAnalytics {
    pub series: SeriesRef,
    pub summary: Summary,
    pub seasons: Vec<SeasonTrend>,
    pub distribution: Vec<RatingBucket>,
    pub finales: Vec<PanelEpisode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesGraph {
    pub series: SeriesRef,
    #[serde(flatten)]
    pub graph: EpisodeGraph,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesComparison {
    pub series: SeriesRef,
    pub summary: Summary,
    pub best_episode: PanelEpisode,
    pub worst_episode: PanelEpisode,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonBatch<T> {
    pub requested: usize,
    pub found: usize,
    pub entries: Vec<CompareEntry<T>>,
}

impl<T> ComparisonBatch<T> {
    #[must_use]
    pub fn new(entries: Vec<CompareEntry<T>>) -> Self {
        Self {
            requested: entries.len(),
            found: entries.iter().filter(|e| e.found).count(),
            entries,
        }
    }
}

/// Per-series aggregates used by search and browse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesHit {
    pub id: TitleId,
    pub title: String,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub genres: Vec<String>,
    pub total_episodes: u64,
    pub total_seasons: i64,
    pub avg_rating: f64,
    pub avg_votes: f64,
}

impl From<SeriesStatsRow> for SeriesHit {
    fn from(row: SeriesStatsRow) -> Self {
        Self {
            id: TitleId::from(row.id),
            title: row.primary_title,
            start_year: row.start_year,
            end_year: row.end_year,
            genres: split_genres(row.genres.as_deref()),
            total_episodes: u64::try_from(row.total_episodes).unwrap_or_default(),
            total_seasons: row.total_seasons,
            avg_rating: row.avg_rating,
            avg_votes: row.avg_votes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<F, T> {
    pub filters: F,
    pub limit: u64,
    pub result_count: usize,
    pub results: Vec<T>,
}

impl<F, T> SearchResults<F, T> {
    pub fn new(filters: F, limit: u64, results: Vec<T>) -> Self {
        Self {
            filters,
            limit,
            result_count: results.len(),
            results,
        }
    }
}

pub type SeriesSearchResults = SearchResults<SeriesFilters, SeriesHit>;
pub type MovieSearchResults = SearchResults<MovieFilters, RatedTitle>;

#[derive(Debug, Clone, Serialize)]
pub struct BrowsePage<F, T> {
    pub filters: F,
    #[serde(flatten)]
    pub page: RankedPage<T>,
}

pub type SeriesBrowsePage = BrowsePage<SeriesFilters, SeriesHit>;
pub type MovieBrowsePage = BrowsePage<MovieFilters, RatedTitle>;

/// How a caller identifies a movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieLookup {
    Id(TitleId),
    Title(String),
}

impl MovieLookup {
    /// An id wins when both are given.
    pub fn from_parts(
        title: Option<String>,
        id: Option<String>,
    ) -> Result<Self, crate::analytics::AnalyticsError> {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (non_blank(title), non_blank(id)) {
            (_, Some(id)) => Ok(Self::Id(TitleId::new(id.trim()))),
            (Some(title), None) => Ok(Self::Title(title)),
            (None, None) => Err(crate::analytics::AnalyticsError::invalid(
                "either a movie title or an id is required",
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MovieDetails {
    /// Absent when looked up by id.
    pub match_tier: Option<MatchTier>,
    #[serde(flatten)]
    pub movie: RatedTitle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreStats {
    pub genres: String,
    pub title_count: u64,
    pub avg_rating: f64,
    pub max_rating: f64,
    pub min_rating: f64,
    pub total_votes: u64,
}

impl From<GenreStatsRow> for GenreStats {
    fn from(row: GenreStatsRow) -> Self {
        Self {
            genres: row.genres,
            title_count: u64::try_from(row.title_count).unwrap_or_default(),
            avg_rating: row.avg_rating,
            max_rating: row.max_rating,
            min_rating: row.min_rating,
            total_votes: u64::try_from(row.total_votes).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreBreakdown {
    pub kind: TitleKind,
    pub min_votes: u64,
    pub genres: Vec<GenreStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeStats {
    pub decade: i32,
    pub label: String,
    pub title_count: u64,
    pub avg_rating: f64,
    pub max_rating: f64,
    pub total_votes: u64,
}

impl From<DecadeStatsRow> for DecadeStats {
    fn from(row: DecadeStatsRow) -> Self {
        Self {
            label: format!("{}s", row.decade),
            decade: row.decade,
            title_count: u64::try_from(row.title_count).unwrap_or_default(),
            avg_rating: row.avg_rating,
            max_rating: row.max_rating,
            total_votes: u64::try_from(row.total_votes).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DecadeBreakdown {
    pub kind: TitleKind,
    pub min_votes: u64,
    pub floor_year: i32,
    pub decades: Vec<DecadeStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: String,
    pub titles: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_lookup_requires_title_or_id() {
        assert_eq!(
            MovieLookup::from_parts(Some("Heat".into()), None).unwrap(),
            MovieLookup::Title("Heat".into())
        );
        assert_eq!(
            MovieLookup::from_parts(Some("Heat".into()), Some(" tt0113277 ".into())).unwrap(),
            MovieLookup::Id(TitleId::new("tt0113277"))
        );
        assert!(MovieLookup::from_parts(None, None).is_err());
        assert!(MovieLookup::from_parts(Some("  ".into()), Some(String::new())).is_err());
    }

    #[test]
    fn decade_label() {
        let stats = DecadeStats::from(DecadeStatsRow {
            decade: 1990,
            title_count: 3,
            avg_rating: 7.5,
            max_rating: 8.8,
            total_votes: 12_000,
        });
        assert_eq!(stats.label, "1990s");
        assert_eq!(stats.total_votes, 12_000);
    }

    #[test]
    fn comparison_batch_counts_found() {
        let batch = ComparisonBatch::new(vec![
            CompareEntry::found("A", 1),
            CompareEntry::missing("B", "Series not found: B"),
        ]);
        assert_eq!((batch.requested, batch.found), (2, 1));
    }
}
