use crate::analytics::aggregate::parse_name_list;
use crate::cli::SeriesCommands;
use crate::config::Config;
use crate::services::{SeaOrmSeriesService, SeriesService};

use super::{open_store, print_json};

pub async fn cmd_series(config: &Config, command: SeriesCommands) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let service = SeaOrmSeriesService::new(store, config.analytics.clone());

    match command {
        SeriesCommands::Resolve { name } => {
            print_json(&service.resolve_series(&name.join(" ")).await?)
        }
        SeriesCommands::Episodes { name } => print_json(&service.episodes(&name.join(" ")).await?),
        SeriesCommands::Top {
            name,
            min_votes,
            limit,
            m,
        } => print_json(
            &service
                .top_episodes(&name.join(" "), min_votes, limit, m)
                .await?,
        ),
        SeriesCommands::Worst {
            name,
            min_votes,
            limit,
        } => print_json(
            &service
                .worst_episodes(&name.join(" "), min_votes, limit)
                .await?,
        ),
        SeriesCommands::Analytics { name } => {
            print_json(&service.series_analytics(&name.join(" ")).await?)
        }
        SeriesCommands::Graph { name, scale } => {
            print_json(&service.episode_graph(&name.join(" "), scale).await?)
        }
        SeriesCommands::Compare { names } => {
            print_json(&service.compare_series(&parse_name_list(&names)).await?)
        }
        SeriesCommands::Search { filters, limit } => {
            print_json(&service.search_series(filters.into(), limit).await?)
        }
        SeriesCommands::Browse {
            filters,
            offset,
            limit,
        } => print_json(&service.browse_series(filters.into(), offset, limit).await?),
        SeriesCommands::Ranked { limit } => print_json(&service.ranked_series(limit).await?),
    }
}
