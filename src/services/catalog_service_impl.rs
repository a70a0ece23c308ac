//! `SeaORM` implementation of the `CatalogService` trait.

use crate::analytics::AnalyticsError;
use crate::config::AnalyticsConfig;
use crate::db::Store;
use crate::domain::TitleKind;
use crate::models::results::{
    DecadeBreakdown, DecadeStats, GenreBreakdown, GenreStats, HealthReport,
};
use crate::services::catalog_service::CatalogService;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct SeaOrmCatalogService {
    store: Arc<Store>,
    settings: AnalyticsConfig,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Arc<Store>, settings: AnalyticsConfig) -> Self {
        Self { store, settings }
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn genre_analysis(
        &self,
        kind: TitleKind,
        min_votes: Option<u64>,
    ) -> Result<GenreBreakdown, AnalyticsError> {
        let min_votes = min_votes.unwrap_or(self.settings.default_min_votes);
        let genres: Vec<GenreStats> = self
            .store
            .genre_breakdown(kind, min_votes, self.settings.genre_limit)
            .await?
            .into_iter()
            .map(GenreStats::from)
            .collect();

        debug!(%kind, min_votes, rows = genres.len(), "Genre analysis");
        Ok(GenreBreakdown {
            kind,
            min_votes,
            genres,
        })
    }

    async fn decade_analysis(
        &self,
        kind: TitleKind,
        min_votes: Option<u64>,
    ) -> Result<DecadeBreakdown, AnalyticsError> {
        let min_votes = min_votes.unwrap_or(self.settings.default_min_votes);
        let floor_year = self.settings.decade_floor;
        let decades: Vec<DecadeStats> = self
            .store
            .decade_breakdown(kind, min_votes, floor_year)
            .await?
            .into_iter()
            .map(DecadeStats::from)
            .collect();

        debug!(%kind, min_votes, rows = decades.len(), "Decade analysis");
        Ok(DecadeBreakdown {
            kind,
            min_votes,
            floor_year,
            decades,
        })
    }

    async fn health(&self) -> Result<HealthReport, AnalyticsError> {
        if let Err(e) = self.store.ping().await {
            warn!(error = %e, "Store health check failed");
            return Err(e.into());
        }

        Ok(HealthReport {
            status: "ok",
            database: self.store.location().to_string(),
            titles: self.store.count_titles().await?,
        })
    }
}
