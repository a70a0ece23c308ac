//! Read-only entity over the `episode_panel` view.
//!
//! Every row is a placed, rated episode: season, episode number, rating and
//! vote count are guaranteed present by the view definition.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "episode_panel")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub episode_id: String,
    pub series_id: String,
    pub season_number: i32,
    pub episode_number: i32,
    pub episode_title: Option<String>,
    pub series_title: Option<String>,
    pub average_rating: f64,
    pub num_votes: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::titles::Entity",
        from = "Column::SeriesId",
        to = "super::titles::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Series,
}

impl Related<super::titles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Series.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
