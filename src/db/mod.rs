use crate::analytics::filters::ComposedFilter;
use crate::domain::{TitleId, TitleKind};
use crate::entities::{episodes, ratings, titles};
use crate::models::episode::PanelEpisode;
use crate::models::title::RatedTitle;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::insight::{DecadeStatsRow, GenreStatsRow};
pub use repositories::panel::SeriesStatsRow;

/// Handle over the ratings database. Cheap to clone; every clone shares the pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
    location: String,
}

fn is_memory_url(db_url: &str) -> bool {
    db_url.contains(":memory:")
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = is_memory_url(db_url);

        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if in_memory {
            // every pooled connection would otherwise see its own empty database
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            in_memory,
            "Database connected & migrations applied (pool: {}-{})",
            min_connections,
            max_connections
        );

        Ok(Self {
            conn,
            location: db_url.to_string(),
        })
    }

    /// Connection string the store was opened with.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn title_repo(&self) -> repositories::title::TitleRepository {
        repositories::title::TitleRepository::new(self.conn.clone())
    }

    fn panel_repo(&self) -> repositories::panel::PanelRepository {
        repositories::panel::PanelRepository::new(self.conn.clone())
    }

    fn insight_repo(&self) -> repositories::insight::InsightRepository {
        repositories::insight::InsightRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Loading
    // ========================================================================

    pub async fn insert_titles(&self, rows: Vec<titles::ActiveModel>) -> Result<()> {
        self.title_repo().batch_insert(rows).await
    }

    pub async fn insert_ratings(&self, rows: Vec<ratings::ActiveModel>) -> Result<()> {
        self.title_repo().batch_insert_ratings(rows).await
    }

    pub async fn insert_episodes(&self, rows: Vec<episodes::ActiveModel>) -> Result<()> {
        self.panel_repo().batch_insert_episodes(rows).await
    }

    // ========================================================================
    // Titles
    // ========================================================================

    pub async fn count_titles(&self) -> Result<u64> {
        self.title_repo().count().await
    }

    pub async fn find_title_exact(
        &self,
        kind: TitleKind,
        name: &str,
    ) -> Result<Option<RatedTitle>> {
        self.title_repo().find_exact(kind, name).await
    }

    pub async fn find_title_containing(
        &self,
        kind: TitleKind,
        needle: &str,
    ) -> Result<Option<RatedTitle>> {
        self.title_repo().find_containing(kind, needle).await
    }

    pub async fn get_title(&self, kind: TitleKind, id: &TitleId) -> Result<Option<RatedTitle>> {
        self.title_repo().get(kind, id).await
    }

    pub async fn list_titles_by_rating(
        &self,
        composed: &ComposedFilter,
        limit: u64,
    ) -> Result<Vec<RatedTitle>> {
        self.title_repo().list_by_rating(composed, limit).await
    }

    pub async fn title_candidates(&self, composed: &ComposedFilter) -> Result<Vec<RatedTitle>> {
        self.title_repo().candidates(composed).await
    }

    // ========================================================================
    // Episode panel
    // ========================================================================

    pub async fn series_episodes(&self, series_id: &TitleId) -> Result<Vec<PanelEpisode>> {
        self.panel_repo().for_series(series_id).await
    }

    pub async fn series_episodes_with_votes(
        &self,
        series_id: &TitleId,
        min_votes: u64,
    ) -> Result<Vec<PanelEpisode>> {
        self.panel_repo()
            .for_series_min_votes(series_id, min_votes)
            .await
    }

    pub async fn series_stats(
        &self,
        composed: &ComposedFilter,
        limit: Option<u64>,
    ) -> Result<Vec<SeriesStatsRow>> {
        self.panel_repo().series_stats(composed, limit).await
    }

    // ========================================================================
    // Catalog insights
    // ========================================================================

    pub async fn genre_breakdown(
        &self,
        kind: TitleKind,
        min_votes: u64,
        limit: u64,
    ) -> Result<Vec<GenreStatsRow>> {
        self.insight_repo()
            .genre_breakdown(kind, min_votes, limit)
            .await
    }

    pub async fn decade_breakdown(
        &self,
        kind: TitleKind,
        min_votes: u64,
        floor_year: i32,
    ) -> Result<Vec<DecadeStatsRow>> {
        self.insight_repo()
            .decade_breakdown(kind, min_votes, floor_year)
            .await
    }
}
