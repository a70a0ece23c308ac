use crate::analytics::filters::{ComposedFilter, title_contains, title_equals};
use crate::domain::{TitleId, TitleKind};
use crate::entities::{prelude::*, ratings, titles};
use crate::models::title::RatedTitle;
use anyhow::Result;
use sea_orm::sea_query::{NullOrdering, Order};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, SelectTwo,
};

/// Titles and their one-to-one ratings.
pub struct TitleRepository {
    conn: DatabaseConnection,
}

impl TitleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    pub async fn batch_insert(&self, rows: Vec<titles::ActiveModel>) -> Result<()> {
        // 9 columns * 100 rows stays under SQLite's bound parameter limit
        for chunk in rows.chunks(100) {
            Titles::insert_many(chunk.to_vec()).exec(&self.conn).await?;
        }
        Ok(())
    }

    pub async fn batch_insert_ratings(&self, rows: Vec<ratings::ActiveModel>) -> Result<()> {
        for chunk in rows.chunks(100) {
            Ratings::insert_many(chunk.to_vec()).exec(&self.conn).await?;
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Titles::find().count(&self.conn).await?)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    fn rated() -> SelectTwo<Titles, Ratings> {
        Titles::find().find_also_related(Ratings)
    }

    /// Case-insensitive exact name match. Several titles can share a name;
    /// the most voted, then most recent one wins.
    pub async fn find_exact(&self, kind: TitleKind, name: &str) -> Result<Option<RatedTitle>> {
        let row = Self::rated()
            .filter(kind.condition())
            .filter(title_equals(name))
            .order_by_with_nulls(ratings::Column::NumVotes, Order::Desc, NullOrdering::Last)
            .order_by_with_nulls(titles::Column::StartYear, Order::Desc, NullOrdering::Last)
            .order_by_asc(titles::Column::Id)
            .one(&self.conn)
            .await?;

        Ok(row.map(|(t, r)| RatedTitle::from_models(t, r)))
    }

    /// Case-insensitive substring match, most recent first.
    pub async fn find_containing(
        &self,
        kind: TitleKind,
        needle: &str,
    ) -> Result<Option<RatedTitle>> {
        let row = Self::rated()
            .filter(kind.condition())
            .filter(title_contains(needle))
            .order_by_with_nulls(titles::Column::StartYear, Order::Desc, NullOrdering::Last)
            .order_by_with_nulls(ratings::Column::NumVotes, Order::Desc, NullOrdering::Last)
            .order_by_asc(titles::Column::Id)
            .one(&self.conn)
            .await?;

        Ok(row.map(|(t, r)| RatedTitle::from_models(t, r)))
    }

    pub async fn get(&self, kind: TitleKind, id: &TitleId) -> Result<Option<RatedTitle>> {
        let row = Self::rated()
            .filter(kind.condition())
            .filter(titles::Column::Id.eq(id.as_str()))
            .one(&self.conn)
            .await?;

        Ok(row.map(|(t, r)| RatedTitle::from_models(t, r)))
    }

    // ========================================================================
    // Filtered listings
    // ========================================================================

    fn filtered(composed: &ComposedFilter) -> SelectTwo<Titles, Ratings> {
        Self::rated().filter(composed.predicate.clone())
    }

    /// Highest rated first, unrated last.
    pub async fn list_by_rating(
        &self,
        composed: &ComposedFilter,
        limit: u64,
    ) -> Result<Vec<RatedTitle>> {
        let rows = Self::filtered(composed)
            .order_by_with_nulls(
                ratings::Column::AverageRating,
                Order::Desc,
                NullOrdering::Last,
            )
            .order_by_with_nulls(ratings::Column::NumVotes, Order::Desc, NullOrdering::Last)
            .order_by_asc(titles::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(t, r)| RatedTitle::from_models(t, r))
            .collect())
    }

    /// Every title matching the filter, unordered. Ranking happens in the caller.
    pub async fn candidates(&self, composed: &ComposedFilter) -> Result<Vec<RatedTitle>> {
        let rows = Self::filtered(composed).all(&self.conn).await?;
        Ok(rows
            .into_iter()
            .map(|(t, r)| RatedTitle::from_models(t, r))
            .collect())
    }
}
