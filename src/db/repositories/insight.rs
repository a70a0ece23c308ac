use crate::domain::TitleKind;
use crate::entities::{prelude::*, ratings, titles};
use anyhow::Result;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

/// Catalog-wide group-bys over rated titles.
pub struct InsightRepository {
    conn: DatabaseConnection,
}

fn rating_col() -> Expr {
    Expr::col((ratings::Entity, ratings::Column::AverageRating))
}

fn votes_col() -> Expr {
    Expr::col((ratings::Entity, ratings::Column::NumVotes))
}

fn title_count() -> SimpleExpr {
    Func::count(Expr::col((titles::Entity, titles::Column::Id))).into()
}

fn decade_expr() -> SimpleExpr {
    Expr::expr(Expr::col((titles::Entity, titles::Column::StartYear)).div(10)).mul(10)
}

impl InsightRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Rating statistics per distinct genre string, best average first.
    pub async fn genre_breakdown(
        &self,
        kind: TitleKind,
        min_votes: u64,
        limit: u64,
    ) -> Result<Vec<GenreStatsRow>> {
        let avg: SimpleExpr = Func::avg(rating_col()).into();

        let rows = Titles::find()
            .select_only()
            .column(titles::Column::Genres)
            .column_as(title_count(), "title_count")
            .column_as(avg.clone(), "avg_rating")
            .column_as(SimpleExpr::from(Func::max(rating_col())), "max_rating")
            .column_as(SimpleExpr::from(Func::min(rating_col())), "min_rating")
            .column_as(SimpleExpr::from(Func::sum(votes_col())), "total_votes")
            .join(JoinType::InnerJoin, titles::Relation::Ratings.def())
            .filter(kind.condition())
            .filter(titles::Column::Genres.is_not_null())
            .filter(titles::Column::Genres.ne("\\N"))
            .filter(titles::Column::Genres.ne(""))
            .filter(ratings::Column::NumVotes.gte(votes_param(min_votes)))
            .group_by(titles::Column::Genres)
            .order_by_desc(avg)
            .order_by_asc(titles::Column::Genres)
            .limit(limit)
            .into_model::<GenreStatsRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    /// Rating statistics per release decade, most recent first.
    pub async fn decade_breakdown(
        &self,
        kind: TitleKind,
        min_votes: u64,
        floor_year: i32,
    ) -> Result<Vec<DecadeStatsRow>> {
        let rows = Titles::find()
            .select_only()
            .column_as(decade_expr(), "decade")
            .column_as(title_count(), "title_count")
            .column_as(SimpleExpr::from(Func::avg(rating_col())), "avg_rating")
            .column_as(SimpleExpr::from(Func::max(rating_col())), "max_rating")
            .column_as(SimpleExpr::from(Func::sum(votes_col())), "total_votes")
            .join(JoinType::InnerJoin, titles::Relation::Ratings.def())
            .filter(kind.condition())
            .filter(titles::Column::StartYear.is_not_null())
            .filter(titles::Column::StartYear.gte(floor_year))
            .filter(ratings::Column::NumVotes.gte(votes_param(min_votes)))
            .group_by(decade_expr())
            .order_by_desc(decade_expr())
            .into_model::<DecadeStatsRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }
}

fn votes_param(votes: u64) -> i64 {
    i64::try_from(votes).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct GenreStatsRow {
    pub genres: String,
    pub title_count: i64,
    pub avg_rating: f64,
    pub max_rating: f64,
    pub min_rating: f64,
    pub total_votes: i64,
}

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct DecadeStatsRow {
    pub decade: i32,
    pub title_count: i64,
    pub avg_rating: f64,
    pub max_rating: f64,
    pub total_votes: i64,
}
