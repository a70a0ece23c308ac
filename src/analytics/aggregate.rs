//! Descriptive statistics over episode sets and multi-entity comparison.

use std::collections::BTreeMap;
use std::future::Future;

use serde::Serialize;
use tracing::debug;

use super::error::AnalyticsError;
use super::scoring;
use crate::constants::limits::MAX_COMPARE_ENTITIES;
use crate::domain::SortOrder;
use crate::models::episode::PanelEpisode;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; absent below two episodes.
    pub stddev: Option<f64>,
    pub max: f64,
    pub min: f64,
    pub rating_range: f64,
    pub mean_votes: f64,
    pub total_votes: u64,
    /// Highest season number present.
    pub season_count: i32,
}

/// Single-pass summary of an episode set; `None` when `rows` is empty.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn summarize(rows: &[PanelEpisode]) -> Option<Summary> {
    let first = rows.first()?;

    let mut count = 0usize;
    let mut mean = 0.0_f64;
    let mut m2 = 0.0_f64;
    let mut max = first.rating;
    let mut min = first.rating;
    let mut total_votes = 0u64;
    let mut season_count = first.season;

    for row in rows {
        count += 1;
        let delta = row.rating - mean;
        mean += delta / count as f64;
        m2 += delta * (row.rating - mean);

        max = max.max(row.rating);
        min = min.min(row.rating);
        total_votes = total_votes.saturating_add(row.votes);
        season_count = season_count.max(row.season);
    }

    let stddev = (count > 1).then(|| (m2 / (count - 1) as f64).sqrt());

    Some(Summary {
        count,
        mean,
        stddev,
        max,
        min,
        rating_range: max - min,
        mean_votes: total_votes as f64 / count as f64,
        total_votes,
        season_count,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingBucket {
    pub floor: i32,
    pub label: String,
    pub episode_count: usize,
}

/// Histogram of ratings by integer floor, highest bucket first.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn distribution(rows: &[PanelEpisode]) -> Vec<RatingBucket> {
    let mut buckets: BTreeMap<i32, usize> = BTreeMap::new();
    for row in rows {
        *buckets.entry(row.rating.floor() as i32).or_default() += 1;
    }

    buckets
        .into_iter()
        .rev()
        .map(|(floor, episode_count)| RatingBucket {
            floor,
            label: format!("[{floor}, {})", floor + 1),
            episode_count,
        })
        .collect()
}

/// Last episode (highest episode number) of `season`.
#[must_use]
pub fn finale(rows: &[PanelEpisode], season: i32) -> Option<&PanelEpisode> {
    rows.iter()
        .filter(|r| r.season == season)
        .max_by_key(|r| r.episode)
}

/// The finale of every season, in season order.
#[must_use]
pub fn season_finales(rows: &[PanelEpisode]) -> Vec<PanelEpisode> {
    let mut finales: BTreeMap<i32, &PanelEpisode> = BTreeMap::new();
    for row in rows {
        finales
            .entry(row.season)
            .and_modify(|current| {
                if row.episode > current.episode {
                    *current = row;
                }
            })
            .or_insert(row);
    }
    finales.into_values().cloned().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonTrend {
    pub season: i32,
    pub episode_count: usize,
    pub avg_rating: f64,
    pub best_rating: f64,
    pub worst_rating: f64,
    pub total_votes: u64,
}

#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn season_trends(rows: &[PanelEpisode]) -> Vec<SeasonTrend> {
    let mut seasons: BTreeMap<i32, Vec<&PanelEpisode>> = BTreeMap::new();
    for row in rows {
        seasons.entry(row.season).or_default().push(row);
    }

    seasons
        .into_iter()
        .map(|(season, eps)| {
            let sum: f64 = eps.iter().map(|e| e.rating).sum();
            SeasonTrend {
                season,
                episode_count: eps.len(),
                avg_rating: sum / eps.len() as f64,
                best_rating: eps.iter().map(|e| e.rating).fold(f64::MIN, f64::max),
                worst_rating: eps.iter().map(|e| e.rating).fold(f64::MAX, f64::min),
                total_votes: eps.iter().map(|e| e.votes).sum(),
            }
        })
        .collect()
}

#[must_use]
pub fn best_episode(rows: &[PanelEpisode]) -> Option<&PanelEpisode> {
    scoring::extreme(rows, SortOrder::Descending)
}

#[must_use]
pub fn worst_episode(rows: &[PanelEpisode]) -> Option<&PanelEpisode> {
    scoring::extreme(rows, SortOrder::Ascending)
}

/// One slot of a comparison batch. A missing entity is a slot with
/// `found: false`, not an error for the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareEntry<T> {
    pub query: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub detail: Option<T>,
}

impl<T> CompareEntry<T> {
    pub fn found(query: impl Into<String>, detail: T) -> Self {
        Self {
            query: query.into(),
            found: true,
            error: None,
            detail: Some(detail),
        }
    }

    pub fn missing(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            found: false,
            error: Some(reason.into()),
            detail: None,
        }
    }
}

/// Splits a comma separated name list, dropping blank entries.
#[must_use]
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub fn check_batch(names: &[String]) -> Result<(), AnalyticsError> {
    if names.is_empty() {
        return Err(AnalyticsError::invalid("at least one name is required"));
    }
    if names.len() > MAX_COMPARE_ENTITIES {
        return Err(AnalyticsError::invalid(format!(
            "at most {MAX_COMPARE_ENTITIES} names can be compared, got {}",
            names.len()
        )));
    }
    Ok(())
}

/// Resolves and summarizes each name independently.
///
/// `NotFound` for one slot is recorded inline; any other error aborts the
/// batch since it means the store itself failed.
pub async fn compare<T, F, Fut>(
    names: &[String],
    mut summarize_one: F,
) -> Result<Vec<CompareEntry<T>>, AnalyticsError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, AnalyticsError>>,
{
    check_batch(names)?;

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        match summarize_one(name.clone()).await {
            Ok(detail) => entries.push(CompareEntry::found(name.as_str(), detail)),
            Err(AnalyticsError::NotFound(reason)) => {
                debug!(name = %name, "Comparison slot not found");
                entries.push(CompareEntry::missing(name.as_str(), reason));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(entries)
}
