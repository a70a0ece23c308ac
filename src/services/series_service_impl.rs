//! `SeaORM` implementation of the `SeriesService` trait.

use crate::analytics::filters::SeriesFilters;
use crate::analytics::pagination::{PageRequest, rank_and_paginate};
use crate::analytics::resolver::{Resolved, resolve};
use crate::analytics::validation::limit_or;
use crate::analytics::{AnalyticsError, aggregate, scoring, trend};
use crate::config::AnalyticsConfig;
use crate::db::Store;
use crate::domain::{ScaleMode, SortOrder, TitleKind};
use crate::models::episode::PanelEpisode;
use crate::models::results::{
    BrowsePage, ComparisonBatch, EpisodeList, SearchResults, SeriesAnalytics, SeriesBrowsePage,
    SeriesComparison, SeriesGraph, SeriesHit, SeriesRef, SeriesSearchResults, TopEpisodes,
    WeightedEpisode, WorstEpisodes,
};
use crate::services::series_service::SeriesService;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub struct SeaOrmSeriesService {
    store: Arc<Store>,
    settings: AnalyticsConfig,
}

impl SeaOrmSeriesService {
    #[must_use]
    pub const fn new(store: Arc<Store>, settings: AnalyticsConfig) -> Self {
        Self { store, settings }
    }

    async fn resolve(&self, name: &str) -> Result<Resolved, AnalyticsError> {
        resolve(&self.store, TitleKind::Series, name).await
    }

    /// Resolves `name` and loads its panel; an empty panel is `NotFound`.
    async fn load_panel(
        &self,
        name: &str,
    ) -> Result<(SeriesRef, Vec<PanelEpisode>), AnalyticsError> {
        let series = SeriesRef::from(self.resolve(name).await?);
        let rows = self.store.series_episodes(&series.id).await?;
        if rows.is_empty() {
            return Err(AnalyticsError::not_found(format!(
                "No rated episodes found for series: {}",
                series.title
            )));
        }
        Ok((series, rows))
    }

    async fn load_voted(
        &self,
        name: &str,
        min_votes: u64,
    ) -> Result<(SeriesRef, Vec<PanelEpisode>), AnalyticsError> {
        let series = SeriesRef::from(self.resolve(name).await?);
        let rows = self
            .store
            .series_episodes_with_votes(&series.id, min_votes)
            .await?;
        if rows.is_empty() {
            return Err(AnalyticsError::not_found(format!(
                "No episodes of {} with at least {min_votes} votes",
                series.title
            )));
        }
        Ok((series, rows))
    }

    fn limit(&self, limit: Option<u64>, default: u64) -> Result<u64, AnalyticsError> {
        limit_or(limit, default, self.settings.max_page_size)
    }

    async fn compare_one(&self, name: &str) -> Result<SeriesComparison, AnalyticsError> {
        let (series, rows) = self.load_panel(name).await?;
        let summary = aggregate::summarize(&rows)
            .ok_or_else(|| AnalyticsError::not_found("No episodes to summarize"))?;
        let best_episode = aggregate::best_episode(&rows)
            .cloned()
            .ok_or_else(|| AnalyticsError::not_found("No best episode"))?;
        let worst_episode = aggregate::worst_episode(&rows)
            .cloned()
            .ok_or_else(|| AnalyticsError::not_found("No worst episode"))?;

        Ok(SeriesComparison {
            series,
            summary,
            best_episode,
            worst_episode,
        })
    }
}

fn take_limit<T>(items: Vec<T>, limit: u64) -> Vec<T> {
    items
        .into_iter()
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .collect()
}

#[async_trait]
impl SeriesService for SeaOrmSeriesService {
    async fn resolve_series(&self, name: &str) -> Result<SeriesRef, AnalyticsError> {
        Ok(self.resolve(name).await?.into())
    }

    async fn episodes(&self, name: &str) -> Result<EpisodeList, AnalyticsError> {
        let (series, episodes) = self.load_panel(name).await?;
        Ok(EpisodeList {
            series,
            episode_count: episodes.len(),
            episodes,
        })
    }

    async fn top_episodes(
        &self,
        name: &str,
        min_votes: Option<u64>,
        limit: Option<u64>,
        m: Option<f64>,
    ) -> Result<TopEpisodes, AnalyticsError> {
        let limit = self.limit(limit, self.settings.episode_limit)?;
        let m = m.unwrap_or(self.settings.weight_m);
        scoring::check_weight(m)?;
        let min_votes = min_votes.unwrap_or(self.settings.default_min_votes);

        let (series, rows) = self.load_voted(name, min_votes).await?;
        let (scored, ranked) = scoring::rank_weighted(&rows, m)?;

        debug!(
            series = %series.id,
            considered = rows.len(),
            prior_mean = scored.prior_mean,
            "Ranked episodes by weighted rating"
        );

        let episodes = take_limit(ranked, limit)
            .into_iter()
            .map(|(episode, weighted_rating)| WeightedEpisode {
                episode,
                weighted_rating,
            })
            .collect();

        Ok(TopEpisodes {
            series,
            min_votes,
            m,
            prior_mean: scored.prior_mean,
            considered: rows.len(),
            episodes,
        })
    }

    async fn worst_episodes(
        &self,
        name: &str,
        min_votes: Option<u64>,
        limit: Option<u64>,
    ) -> Result<WorstEpisodes, AnalyticsError> {
        let limit = self.limit(limit, self.settings.episode_limit)?;
        let min_votes = min_votes.unwrap_or(self.settings.default_min_votes);

        let (series, mut rows) = self.load_voted(name, min_votes).await?;
        let considered = rows.len();
        scoring::sort_by_rating(&mut rows, SortOrder::Ascending);

        Ok(WorstEpisodes {
            series,
            min_votes,
            considered,
            episodes: take_limit(rows, limit),
        })
    }

    async fn series_analytics(&self, name: &str) -> Result<SeriesAnalytics, AnalyticsError> {
        let (series, rows) = self.load_panel(name).await?;
        let summary = aggregate::summarize(&rows)
            .ok_or_else(|| AnalyticsError::not_found("No episodes to summarize"))?;

        Ok(SeriesAnalytics {
            series,
            summary,
            seasons: aggregate::season_trends(&rows),
            distribution: aggregate::distribution(&rows),
            finales: aggregate::season_finales(&rows),
        })
    }

    async fn episode_graph(
        &self,
        name: &str,
        scale: ScaleMode,
    ) -> Result<SeriesGraph, AnalyticsError> {
        let (series, rows) = self.load_panel(name).await?;
        let graph = trend::build_graph(&rows, scale)
            .ok_or_else(|| AnalyticsError::not_found("No episodes to plot"))?;
        Ok(SeriesGraph { series, graph })
    }

    #[instrument(skip(self))]
    async fn compare_series(
        &self,
        names: &[String],
    ) -> Result<ComparisonBatch<SeriesComparison>, AnalyticsError> {
        let entries =
            aggregate::compare(names, |name| async move { self.compare_one(&name).await })
                .await?;
        let batch = ComparisonBatch::new(entries);
        info!(
            requested = batch.requested,
            found = batch.found,
            "Compared series"
        );
        Ok(batch)
    }

    async fn search_series(
        &self,
        filters: SeriesFilters,
        limit: Option<u64>,
    ) -> Result<SeriesSearchResults, AnalyticsError> {
        let limit = self.limit(limit, self.settings.page_size)?;
        let composed = filters.compose()?;
        debug!(applied = ?composed.applied, limit, "Searching series");

        let hits: Vec<SeriesHit> = self
            .store
            .series_stats(&composed, Some(limit))
            .await?
            .into_iter()
            .map(SeriesHit::from)
            .collect();

        Ok(SearchResults::new(filters, limit, hits))
    }

    #[instrument(skip(self))]
    async fn browse_series(
        &self,
        filters: SeriesFilters,
        offset: u64,
        limit: Option<u64>,
    ) -> Result<SeriesBrowsePage, AnalyticsError> {
        let page = PageRequest::new(offset, self.limit(limit, self.settings.page_size)?)?;
        let composed = filters.compose()?;

        let candidates: Vec<SeriesHit> = self
            .store
            .series_stats(&composed, None)
            .await?
            .into_iter()
            .map(SeriesHit::from)
            .collect();

        let page = rank_and_paginate(
            candidates,
            |hit| Some(scoring::quality_score(hit.avg_votes, hit.avg_rating)),
            |hit| hit.id.clone(),
            page,
        );

        info!(
            total = page.total_count,
            returned = page.result_count,
            has_more = page.has_more(),
            "Browsed series"
        );
        Ok(BrowsePage { filters, page })
    }

    async fn ranked_series(&self, limit: Option<u64>) -> Result<SeriesBrowsePage, AnalyticsError> {
        self.browse_series(SeriesFilters::default(), 0, limit).await
    }
}
