//! Least-squares trendlines over episode ratings.

use serde::Serialize;

use crate::domain::ScaleMode;
use crate::models::episode::PanelEpisode;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trendline {
    pub slope: f64,
    pub intercept: f64,
}

/// Ordinary least squares fit of `y = slope * x + intercept`.
///
/// Returns `None` for an empty input. When every `x` is equal (including the
/// single point case) the slope is zero and the intercept is the mean `y`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn fit_line(points: &[(f64, f64)]) -> Option<Trendline> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|&(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|&(_, y)| y).sum::<f64>() / n;

    // centered sums keep precision when x sits far from zero
    let (mut sxy, mut sxx) = (0.0, 0.0);
    for &(x, y) in points {
        let dx = x - mean_x;
        sxy = dx.mul_add(y - mean_y, sxy);
        sxx = dx.mul_add(dx, sxx);
    }

    let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
    let intercept = slope.mul_add(-mean_x, mean_y);

    Some(Trendline { slope, intercept })
}

/// An episode placed on the graph's x axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphPoint {
    /// Zero-based position across the whole series.
    pub index: usize,
    #[serde(flatten)]
    pub episode: PanelEpisode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSegment {
    pub season: i32,
    pub episode_count: usize,
    pub avg_rating: f64,
    pub start_index: usize,
    pub end_index: usize,
    pub trendline: Trendline,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingRange {
    pub min: f64,
    pub max: f64,
}

impl RatingRange {
    /// Axis bounds a renderer should use for the given scale mode.
    #[must_use]
    pub fn axis(&self, scale: ScaleMode) -> Self {
        match scale {
            ScaleMode::Fixed => Self {
                min: 0.0,
                max: 10.0,
            },
            ScaleMode::Auto | ScaleMode::Autoscale => *self,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeGraph {
    pub scale: ScaleMode,
    pub points: Vec<GraphPoint>,
    pub seasons: Vec<SeasonSegment>,
    pub overall: Trendline,
    pub rating_range: RatingRange,
    pub axis: RatingRange,
}

/// Lays out episodes sequentially and fits a trendline per season and overall.
///
/// Seasons keep the global x index so their segments line up with the
/// overall fit. Returns `None` when there is nothing to plot.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn build_graph(episodes: &[PanelEpisode], scale: ScaleMode) -> Option<EpisodeGraph> {
    let mut ordered = episodes.to_vec();
    ordered.sort_by_key(PanelEpisode::placement);

    let points: Vec<GraphPoint> = ordered
        .into_iter()
        .enumerate()
        .map(|(index, episode)| GraphPoint { index, episode })
        .collect();

    let xy: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.index as f64, p.episode.rating))
        .collect();
    let overall = fit_line(&xy)?;

    let mut seasons = Vec::new();
    for run in points.chunk_by(|a, b| a.episode.season == b.episode.season) {
        let season_xy: Vec<(f64, f64)> = run
            .iter()
            .map(|p| (p.index as f64, p.episode.rating))
            .collect();
        let Some(trendline) = fit_line(&season_xy) else {
            continue;
        };
        let (first, last) = (&run[0], &run[run.len() - 1]);
        seasons.push(SeasonSegment {
            season: first.episode.season,
            episode_count: run.len(),
            avg_rating: season_xy.iter().map(|(_, y)| y).sum::<f64>() / run.len() as f64,
            start_index: first.index,
            end_index: last.index,
            trendline,
        });
    }

    let rating_range = points.iter().fold(
        RatingRange {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        },
        |range, p| RatingRange {
            min: range.min.min(p.episode.rating),
            max: range.max.max(p.episode.rating),
        },
    );

    Some(EpisodeGraph {
        scale,
        axis: rating_range.axis(scale),
        points,
        seasons,
        overall,
        rating_range,
    })
}
