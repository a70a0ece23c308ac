use crate::analytics::aggregate::parse_name_list;
use crate::cli::MovieCommands;
use crate::config::Config;
use crate::models::results::MovieLookup;
use crate::services::{MovieService, SeaOrmMovieService};

use super::{open_store, print_json};

pub async fn cmd_movie(config: &Config, command: MovieCommands) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let service = SeaOrmMovieService::new(store, config.analytics.clone());

    match command {
        MovieCommands::Search { filters, limit } => {
            print_json(&service.search_movies(filters.into(), limit).await?)
        }
        MovieCommands::Details { title, id } => {
            let lookup = MovieLookup::from_parts(title, id)?;
            print_json(&service.movie_details(lookup).await?)
        }
        MovieCommands::Compare { names } => {
            print_json(&service.compare_movies(&parse_name_list(&names)).await?)
        }
        MovieCommands::Top { filters, limit } => {
            print_json(&service.top_movies(filters.into(), limit).await?)
        }
        MovieCommands::Browse {
            filters,
            offset,
            limit,
        } => print_json(&service.browse_movies(filters.into(), offset, limit).await?),
        MovieCommands::Ranked { limit } => print_json(&service.ranked_movies(limit).await?),
    }
}
