use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Placed, rated episodes joined with their own and their series' titles.
const CREATE_EPISODE_PANEL: &str = r"
CREATE VIEW IF NOT EXISTS episode_panel AS
SELECT
    e.id AS episode_id,
    e.parent_id AS series_id,
    e.season_number AS season_number,
    e.episode_number AS episode_number,
    eb.primary_title AS episode_title,
    sb.primary_title AS series_title,
    r.average_rating AS average_rating,
    r.num_votes AS num_votes
FROM episodes e
LEFT JOIN titles eb ON e.id = eb.id
LEFT JOIN titles sb ON e.parent_id = sb.id
LEFT JOIN ratings r ON e.id = r.id
WHERE e.season_number IS NOT NULL
    AND e.episode_number IS NOT NULL
    AND r.average_rating IS NOT NULL
    AND r.num_votes IS NOT NULL
";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(CREATE_EPISODE_PANEL)
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP VIEW IF EXISTS episode_panel")
            .await?;
        Ok(())
    }
}
