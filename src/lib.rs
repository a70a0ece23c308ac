pub mod analytics;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;

use clap::Parser;
use cli::{
    Cli, Commands, cmd_decades, cmd_genres, cmd_health, cmd_movie, cmd_series,
};
pub use config::Config;
use config::LogFormat;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config);

    let cli = Cli::parse();

    match cli.command {
        Commands::Series { command } => cmd_series(&config, command).await,
        Commands::Movie { command } => cmd_movie(&config, command).await,
        Commands::Genres { kind, min_votes } => cmd_genres(&config, kind, min_votes).await,
        Commands::Decades { kind, min_votes } => cmd_decades(&config, kind, min_votes).await,
        Commands::Health => cmd_health(&config).await,
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("Created config.toml with default settings.");
            } else {
                println!("config.toml already exists.");
            }
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays machine readable.
fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let (pretty_layer, json_layer) = match config.general.log_format {
        LogFormat::Pretty => (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty_layer)
        .with(json_layer)
        .init();

    info!(
        format = ?config.general.log_format,
        database = %config.general.database_path,
        "Logging initialized"
    );
}
