use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Titles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Ratings)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Episodes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_titles_type")
                    .table(TitlesIden::Table)
                    .col(TitlesIden::TitleType)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_titles_primary_title")
                    .table(TitlesIden::Table)
                    .col(TitlesIden::PrimaryTitle)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_episodes_parent")
                    .table(EpisodesIden::Table)
                    .col(EpisodesIden::ParentId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // One row per (series, season, episode); NULL placements are not constrained.
        manager
            .create_index(
                Index::create()
                    .name("idx_episodes_placement")
                    .table(EpisodesIden::Table)
                    .col(EpisodesIden::ParentId)
                    .col(EpisodesIden::SeasonNumber)
                    .col(EpisodesIden::EpisodeNumber)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EpisodesIden::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RatingsIden::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TitlesIden::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TitlesIden {
    #[sea_orm(iden = "titles")]
    Table,
    TitleType,
    PrimaryTitle,
}

#[derive(DeriveIden)]
enum RatingsIden {
    #[sea_orm(iden = "ratings")]
    Table,
}

#[derive(DeriveIden)]
enum EpisodesIden {
    #[sea_orm(iden = "episodes")]
    Table,
    ParentId,
    SeasonNumber,
    EpisodeNumber,
}
