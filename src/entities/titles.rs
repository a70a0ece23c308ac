use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "titles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(indexed)]
    pub title_type: String,
    pub primary_title: String,
    pub original_title: Option<String>,
    pub is_adult: bool,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub runtime_minutes: Option<i32>,
    /// Comma-delimited genre list as shipped by the corpus.
    pub genres: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::ratings::Entity")]
    Ratings,
    #[sea_orm(has_many = "super::episode_panel::Entity")]
    EpisodePanel,
}

impl Related<super::ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl Related<super::episode_panel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EpisodePanel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
