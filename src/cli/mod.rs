//! CLI module - Command-line interface for ratingraph
//!
//! Every analytics operation is a subcommand; results are printed as
//! pretty JSON.

mod args;
mod commands;

use clap::{Parser, Subcommand};

pub use args::{MovieFilterArgs, SeriesFilterArgs};

/// ratingraph - ratings analytics over a title/episode corpus
#[derive(Parser)]
#[command(name = "ratingraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Series analytics
    #[command(alias = "tv")]
    Series {
        #[command(subcommand)]
        command: SeriesCommands,
    },

    /// Movie lookups and rankings
    #[command(alias = "movies")]
    Movie {
        #[command(subcommand)]
        command: MovieCommands,
    },

    /// Rating statistics per genre
    Genres {
        /// Title kind (movie, series, episode, other)
        #[arg(long, default_value = "movie")]
        kind: crate::domain::TitleKind,
        #[arg(long)]
        min_votes: Option<u64>,
    },

    /// Rating statistics per decade
    Decades {
        /// Title kind (movie, series, episode, other)
        #[arg(long, default_value = "movie")]
        kind: crate::domain::TitleKind,
        #[arg(long)]
        min_votes: Option<u64>,
    },

    /// Check that the database is reachable
    Health,

    /// Create default config file
    Init,
}

#[derive(Subcommand)]
pub enum SeriesCommands {
    /// Resolve a series name to its canonical title
    Resolve {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// List every rated episode
    #[command(alias = "eps")]
    Episodes {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Best episodes by weighted rating
    Top {
        #[arg(required = true)]
        name: Vec<String>,
        #[arg(long)]
        min_votes: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
        /// Prior weight of the weighted rating
        #[arg(long)]
        m: Option<f64>,
    },

    /// Lowest rated episodes
    Worst {
        #[arg(required = true)]
        name: Vec<String>,
        #[arg(long)]
        min_votes: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Summary, season trends, distribution and finales
    #[command(alias = "stats")]
    Analytics {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Episode graph with trendlines
    Graph {
        #[arg(required = true)]
        name: Vec<String>,
        /// auto, 0-10 (fixed) or autoscale
        #[arg(long, default_value = "auto")]
        scale: crate::domain::ScaleMode,
    },

    /// Compare up to ten series (comma separated)
    Compare { names: String },

    /// Search series by title and filters
    #[command(alias = "s")]
    Search {
        #[command(flatten)]
        filters: SeriesFilterArgs,
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Quality-ranked, paginated series
    Browse {
        #[command(flatten)]
        filters: SeriesFilterArgs,
        #[arg(long, default_value_t = 0)]
        offset: u64,
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Top of the unfiltered series ranking
    Ranked {
        #[arg(long)]
        limit: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum MovieCommands {
    /// Search movies by title and filters
    #[command(alias = "s")]
    Search {
        #[command(flatten)]
        filters: MovieFilterArgs,
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Show one movie by title or id
    #[command(alias = "info")]
    Details {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        id: Option<String>,
    },

    /// Compare up to ten movies (comma separated)
    Compare { names: String },

    /// Best rated movies with enough votes
    Top {
        #[command(flatten)]
        filters: MovieFilterArgs,
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Quality-ranked, paginated movies
    Browse {
        #[command(flatten)]
        filters: MovieFilterArgs,
        #[arg(long, default_value_t = 0)]
        offset: u64,
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Top of the unfiltered movie ranking
    Ranked {
        #[arg(long)]
        limit: Option<u64>,
    },
}

pub use commands::*;
