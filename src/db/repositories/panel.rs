use crate::analytics::filters::{
    ComposedFilter, avg_rating_expr, avg_votes_expr, season_count_expr,
};
use crate::domain::TitleId;
use crate::entities::{episode_panel, episodes, prelude::*, titles};
use crate::models::episode::PanelEpisode;
use anyhow::Result;
use sea_orm::sea_query::{Expr, Func, NullOrdering, Order, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

/// Episode placements and the derived `episode_panel` view.
pub struct PanelRepository {
    conn: DatabaseConnection,
}

impl PanelRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn batch_insert_episodes(&self, rows: Vec<episodes::ActiveModel>) -> Result<()> {
        for chunk in rows.chunks(100) {
            Episodes::insert_many(chunk.to_vec())
                .exec(&self.conn)
                .await?;
        }
        Ok(())
    }

    /// All panel episodes of a series in (season, episode) order.
    pub async fn for_series(&self, series_id: &TitleId) -> Result<Vec<PanelEpisode>> {
        self.for_series_min_votes(series_id, 0).await
    }

    pub async fn for_series_min_votes(
        &self,
        series_id: &TitleId,
        min_votes: u64,
    ) -> Result<Vec<PanelEpisode>> {
        let rows = EpisodePanel::find()
            .filter(episode_panel::Column::SeriesId.eq(series_id.as_str()))
            .filter(
                episode_panel::Column::NumVotes.gte(i64::try_from(min_votes).unwrap_or(i64::MAX)),
            )
            .order_by_asc(episode_panel::Column::SeasonNumber)
            .order_by_asc(episode_panel::Column::EpisodeNumber)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(PanelEpisode::from).collect())
    }

    /// Per-series aggregates over the panel, restricted by `composed`.
    ///
    /// Ordered by average episode rating, best first. `limit` of `None`
    /// returns every matching series.
    pub async fn series_stats(
        &self,
        composed: &ComposedFilter,
        limit: Option<u64>,
    ) -> Result<Vec<SeriesStatsRow>> {
        let episode_count: SimpleExpr = Func::count(Expr::col((
            episode_panel::Entity,
            episode_panel::Column::EpisodeId,
        )))
        .into();

        let mut query = Titles::find()
            .select_only()
            .column(titles::Column::Id)
            .column(titles::Column::PrimaryTitle)
            .column(titles::Column::StartYear)
            .column(titles::Column::EndYear)
            .column(titles::Column::Genres)
            .column_as(episode_count, "total_episodes")
            .column_as(season_count_expr(), "total_seasons")
            .column_as(avg_rating_expr(), "avg_rating")
            .column_as(avg_votes_expr(), "avg_votes")
            .join(JoinType::InnerJoin, titles::Relation::EpisodePanel.def())
            .filter(composed.predicate.clone())
            .group_by(titles::Column::Id)
            .group_by(titles::Column::PrimaryTitle)
            .group_by(titles::Column::StartYear)
            .group_by(titles::Column::EndYear)
            .group_by(titles::Column::Genres);

        if composed.has_having() {
            query = query.having(composed.having.clone());
        }

        query = query
            .order_by_with_nulls(avg_rating_expr(), Order::Desc, NullOrdering::Last)
            .order_by_asc(titles::Column::Id);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = query
            .into_model::<SeriesStatsRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }
}

/// Aggregated panel statistics for one series.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct SeriesStatsRow {
    pub id: String,
    pub primary_title: String,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub genres: Option<String>,
    pub total_episodes: i64,
    pub total_seasons: i64,
    pub avg_rating: f64,
    pub avg_votes: f64,
}
