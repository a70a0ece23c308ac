use crate::config::Config;
use crate::domain::TitleKind;
use crate::services::{CatalogService, SeaOrmCatalogService};

use super::{open_store, print_json};

pub async fn cmd_genres(
    config: &Config,
    kind: TitleKind,
    min_votes: Option<u64>,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let service = SeaOrmCatalogService::new(store, config.analytics.clone());
    print_json(&service.genre_analysis(kind, min_votes).await?)
}

pub async fn cmd_decades(
    config: &Config,
    kind: TitleKind,
    min_votes: Option<u64>,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let service = SeaOrmCatalogService::new(store, config.analytics.clone());
    print_json(&service.decade_analysis(kind, min_votes).await?)
}

pub async fn cmd_health(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let service = SeaOrmCatalogService::new(store, config.analytics.clone());
    print_json(&service.health().await?)
}
