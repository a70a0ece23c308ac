use clap::Args;

use crate::analytics::{MovieFilters, SeriesFilters};

#[derive(Debug, Clone, Default, Args)]
pub struct SeriesFilterArgs {
    /// Title substring
    #[arg(long, short = 'q')]
    pub query: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    /// Earliest start year (inclusive)
    #[arg(long)]
    pub start_year: Option<i32>,
    /// Latest start year (inclusive)
    #[arg(long)]
    pub end_year: Option<i32>,
    #[arg(long)]
    pub min_rating: Option<f64>,
    #[arg(long)]
    pub max_rating: Option<f64>,
    /// Minimum average votes per episode
    #[arg(long)]
    pub min_votes: Option<u64>,
    #[arg(long)]
    pub min_seasons: Option<i32>,
    #[arg(long)]
    pub max_seasons: Option<i32>,
}

impl From<SeriesFilterArgs> for SeriesFilters {
    fn from(args: SeriesFilterArgs) -> Self {
        Self {
            query: args.query,
            genre: args.genre,
            start_year: args.start_year,
            end_year: args.end_year,
            min_rating: args.min_rating,
            max_rating: args.max_rating,
            min_votes: args.min_votes,
            min_seasons: args.min_seasons,
            max_seasons: args.max_seasons,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct MovieFilterArgs {
    /// Title substring
    #[arg(long, short = 'q')]
    pub query: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long)]
    pub start_year: Option<i32>,
    #[arg(long)]
    pub end_year: Option<i32>,
    #[arg(long)]
    pub min_rating: Option<f64>,
    #[arg(long)]
    pub max_rating: Option<f64>,
    #[arg(long)]
    pub min_votes: Option<u64>,
}

impl From<MovieFilterArgs> for MovieFilters {
    fn from(args: MovieFilterArgs) -> Self {
        Self {
            query: args.query,
            genre: args.genre,
            start_year: args.start_year,
            end_year: args.end_year,
            min_rating: args.min_rating,
            max_rating: args.max_rating,
            min_votes: args.min_votes,
        }
    }
}
