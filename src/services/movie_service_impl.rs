//! `SeaORM` implementation of the `MovieService` trait.

use crate::analytics::filters::MovieFilters;
use crate::analytics::pagination::{PageRequest, rank_and_paginate};
use crate::analytics::resolver::{resolve, resolve_id};
use crate::analytics::validation::limit_or;
use crate::analytics::{AnalyticsError, aggregate, scoring};
use crate::config::AnalyticsConfig;
use crate::db::Store;
use crate::domain::TitleKind;
use crate::models::results::{
    BrowsePage, ComparisonBatch, MovieBrowsePage, MovieDetails, MovieLookup, MovieSearchResults,
    SearchResults,
};
use crate::models::title::RatedTitle;
use crate::services::movie_service::MovieService;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub struct SeaOrmMovieService {
    store: Arc<Store>,
    settings: AnalyticsConfig,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Arc<Store>, settings: AnalyticsConfig) -> Self {
        Self { store, settings }
    }

    fn limit(&self, limit: Option<u64>, default: u64) -> Result<u64, AnalyticsError> {
        limit_or(limit, default, self.settings.max_page_size)
    }
}

#[allow(clippy::cast_precision_loss)]
fn movie_quality(movie: &RatedTitle) -> Option<f64> {
    movie
        .rating
        .map(|r| scoring::quality_score(r.num_votes as f64, r.average_rating))
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn search_movies(
        &self,
        filters: MovieFilters,
        limit: Option<u64>,
    ) -> Result<MovieSearchResults, AnalyticsError> {
        let limit = self.limit(limit, self.settings.page_size)?;
        let composed = filters.compose()?;
        debug!(applied = ?composed.applied, limit, "Searching movies");

        let movies = self.store.list_titles_by_rating(&composed, limit).await?;
        Ok(SearchResults::new(filters, limit, movies))
    }

    async fn movie_details(&self, lookup: MovieLookup) -> Result<MovieDetails, AnalyticsError> {
        match lookup {
            MovieLookup::Id(id) => Ok(MovieDetails {
                match_tier: None,
                movie: resolve_id(&self.store, TitleKind::Movie, &id).await?,
            }),
            MovieLookup::Title(name) => {
                let resolved = resolve(&self.store, TitleKind::Movie, &name).await?;
                Ok(MovieDetails {
                    match_tier: Some(resolved.tier),
                    movie: resolved.title,
                })
            }
        }
    }

    #[instrument(skip(self))]
    async fn compare_movies(
        &self,
        names: &[String],
    ) -> Result<ComparisonBatch<RatedTitle>, AnalyticsError> {
        let store = &self.store;
        let entries = aggregate::compare(names, |name| async move {
            Ok::<_, AnalyticsError>(resolve(store, TitleKind::Movie, &name).await?.title)
        })
        .await?;
        let batch = ComparisonBatch::new(entries);
        info!(
            requested = batch.requested,
            found = batch.found,
            "Compared movies"
        );
        Ok(batch)
    }

    async fn top_movies(
        &self,
        mut filters: MovieFilters,
        limit: Option<u64>,
    ) -> Result<MovieSearchResults, AnalyticsError> {
        let limit = self.limit(limit, self.settings.page_size)?;
        filters.min_votes = filters
            .min_votes
            .or(Some(self.settings.top_movies_min_votes));
        let composed = filters.compose_rated()?;

        let movies = self.store.list_titles_by_rating(&composed, limit).await?;
        Ok(SearchResults::new(filters, limit, movies))
    }

    #[instrument(skip(self))]
    async fn browse_movies(
        &self,
        filters: MovieFilters,
        offset: u64,
        limit: Option<u64>,
    ) -> Result<MovieBrowsePage, AnalyticsError> {
        let page = PageRequest::new(offset, self.limit(limit, self.settings.page_size)?)?;
        let composed = filters.compose_rated()?;

        let candidates = self.store.title_candidates(&composed).await?;
        let page = rank_and_paginate(candidates, movie_quality, |m| m.title.id.clone(), page);

        info!(
            total = page.total_count,
            returned = page.result_count,
            has_more = page.has_more(),
            "Browsed movies"
        );
        Ok(BrowsePage { filters, page })
    }

    async fn ranked_movies(&self, limit: Option<u64>) -> Result<MovieBrowsePage, AnalyticsError> {
        self.browse_movies(MovieFilters::default(), 0, limit).await
    }
}
