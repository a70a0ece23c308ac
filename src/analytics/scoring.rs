//! Bayesian episode weighting and popularity-adjusted quality scores.
//!
//! Weighted rating: `WR = (v / (v + m)) * R + (m / (v + m)) * C` where `R` is
//! the episode rating, `v` its vote count, `m` the prior weight and `C` the
//! mean rating of the episode set being ranked.

use std::cmp::Ordering;

use serde::Serialize;

use super::error::AnalyticsError;
use crate::domain::SortOrder;
use crate::models::episode::PanelEpisode;

/// An input pair together with its weighted rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedScore {
    pub rating: f64,
    pub votes: u64,
    pub weighted_rating: f64,
}

/// Result of scoring an episode set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSet {
    /// Prior `C`: the plain mean rating of the scored set.
    pub prior_mean: f64,
    pub m: f64,
    /// One entry per input, in input order.
    pub scores: Vec<WeightedScore>,
}

#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn weighted_rating(rating: f64, votes: u64, m: f64, prior_mean: f64) -> f64 {
    let v = votes as f64;
    (v / (v + m)).mul_add(rating, (m / (v + m)) * prior_mean)
}

/// Scores `(rating, votes)` pairs against their own mean.
pub fn score(episodes: &[(f64, u64)], m: f64) -> Result<ScoredSet, AnalyticsError> {
    check_weight(m)?;
    let prior_mean = mean_rating(episodes.iter().map(|(r, _)| *r))
        .ok_or_else(|| AnalyticsError::not_found("No episodes to score"))?;

    let scores = episodes
        .iter()
        .map(|&(rating, votes)| WeightedScore {
            rating,
            votes,
            weighted_rating: weighted_rating(rating, votes, m, prior_mean),
        })
        .collect();

    Ok(ScoredSet {
        prior_mean,
        m,
        scores,
    })
}

pub fn check_weight(m: f64) -> Result<(), AnalyticsError> {
    if m.is_finite() && m > 0.0 {
        Ok(())
    } else {
        Err(AnalyticsError::invalid(format!(
            "weight m must be a positive number, got {m}"
        )))
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean_rating(ratings: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = ratings.fold((0.0, 0usize), |(sum, n), r| (sum + r, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Popularity-adjusted score used to order browse pages: `ln(1 + v) * R`.
///
/// Only meaningful for ordering; `v` below zero is treated as zero.
#[must_use]
pub fn quality_score(votes: f64, rating: f64) -> f64 {
    debug_assert!(votes >= 0.0 || votes.is_nan());
    votes.max(0.0).ln_1p() * rating
}

/// Episodes ordered by weighted rating.
pub fn rank_weighted(
    episodes: &[PanelEpisode],
    m: f64,
) -> Result<(ScoredSet, Vec<(PanelEpisode, f64)>), AnalyticsError> {
    let pairs: Vec<(f64, u64)> = episodes.iter().map(|e| (e.rating, e.votes)).collect();
    let scored = score(&pairs, m)?;

    let mut ranked: Vec<(PanelEpisode, f64)> = episodes
        .iter()
        .cloned()
        .zip(scored.scores.iter().map(|s| s.weighted_rating))
        .collect();

    ranked.sort_by(|(a, wa), (b, wb)| {
        wb.total_cmp(wa)
            .then_with(|| b.votes.cmp(&a.votes))
            .then_with(|| a.placement().cmp(&b.placement()))
    });

    Ok((scored, ranked))
}

/// Orders episodes by raw rating; vote count breaks ties in favour of the
/// more voted episode in both directions.
pub fn sort_by_rating(episodes: &mut [PanelEpisode], order: SortOrder) {
    episodes.sort_by(|a, b| compare_by_rating(a, b, order));
}

fn compare_by_rating(a: &PanelEpisode, b: &PanelEpisode, order: SortOrder) -> Ordering {
    let by_rating = if order.is_ascending() {
        a.rating.total_cmp(&b.rating)
    } else {
        b.rating.total_cmp(&a.rating)
    };
    by_rating
        .then_with(|| b.votes.cmp(&a.votes))
        .then_with(|| a.placement().cmp(&b.placement()))
}

/// The single best (`Descending`) or worst (`Ascending`) rated episode.
#[must_use]
pub fn extreme(episodes: &[PanelEpisode], order: SortOrder) -> Option<&PanelEpisode> {
    episodes
        .iter()
        .min_by(|a, b| compare_by_rating(a, b, order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TitleId;

    fn ep(season: i32, episode: i32, rating: f64, votes: u64) -> PanelEpisode {
        PanelEpisode {
            episode_id: TitleId::new(format!("tt{season}{episode:02}")),
            series_id: TitleId::new("tt0"),
            season,
            episode,
            title: None,
            rating,
            votes,
        }
    }

    #[test]
    fn weighted_rating_is_convex_combination() {
        let c = 7.0;
        for votes in [0, 1, 10, 1_000, 1_000_000] {
            let wr = weighted_rating(9.0, votes, 1000.0, c);
            assert!((c..=9.0).contains(&wr), "{wr} outside [C, R]");
        }
        assert!((weighted_rating(9.0, 0, 1000.0, c) - c).abs() < 1e-12);
        assert!((weighted_rating(9.0, u64::MAX, 1000.0, c) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn score_preserves_input_order() {
        let set = score(&[(8.0, 100), (9.0, 200), (7.0, 50)], 1000.0).unwrap();
        assert!((set.prior_mean - 8.0).abs() < 1e-12);
        let ratings: Vec<f64> = set.scores.iter().map(|s| s.rating).collect();
        assert_eq!(ratings, vec![8.0, 9.0, 7.0]);
    }

    #[test]
    fn score_rejects_empty_and_bad_weight() {
        assert!(matches!(
            score(&[], 1000.0),
            Err(AnalyticsError::NotFound(_))
        ));
        assert!(matches!(
            score(&[(8.0, 10)], 0.0),
            Err(AnalyticsError::InvalidInput(_))
        ));
        assert!(matches!(
            score(&[(8.0, 10)], f64::NAN),
            Err(AnalyticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn quality_score_monotone_in_votes() {
        let mut last = f64::NEG_INFINITY;
        for votes in [0.0, 1.0, 2.5, 10.0, 1e3, 1e6] {
            let s = quality_score(votes, 7.5);
            assert!(s >= last);
            last = s;
        }
        assert!(quality_score(0.0, 9.0).abs() < f64::EPSILON);
        assert!(quality_score(1e4, 8.0) > quality_score(1e4, 7.0));
    }

    #[test]
    fn rank_weighted_prefers_well_voted_episodes() {
        let episodes = vec![
            ep(1, 1, 9.8, 10),
            ep(1, 2, 9.2, 50_000),
            ep(1, 3, 7.0, 40_000),
        ];
        let (set, ranked) = rank_weighted(&episodes, 1000.0).unwrap();
        assert_eq!(set.scores.len(), 3);
        assert_eq!(ranked[0].0.placement(), (1, 2));
        assert_eq!(ranked[2].0.placement(), (1, 3));
    }

    #[test]
    fn worst_order_breaks_ties_by_votes() {
        let mut episodes = vec![ep(1, 1, 6.0, 100), ep(1, 2, 6.0, 900), ep(2, 1, 8.0, 10)];
        sort_by_rating(&mut episodes, SortOrder::Ascending);
        let order: Vec<_> = episodes.iter().map(PanelEpisode::placement).collect();
        assert_eq!(order, vec![(1, 2), (1, 1), (2, 1)]);

        assert_eq!(
            extreme(&episodes, SortOrder::Descending).map(PanelEpisode::placement),
            Some((2, 1))
        );
        assert_eq!(
            extreme(&episodes, SortOrder::Ascending).map(PanelEpisode::placement),
            Some((1, 2))
        );
        assert!(extreme(&[], SortOrder::Ascending).is_none());
    }
}
