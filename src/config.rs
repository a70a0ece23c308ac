use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{defaults, limits};

/// Environment variable that overrides `general.database_path`.
pub const DATABASE_ENV: &str = "RATINGRAPH_DATABASE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    pub log_format: LogFormat,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/ratingraph.db".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

/// Defaults for the analytics operations when the caller omits a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Episode vote threshold for top/worst lists and catalog insights.
    pub default_min_votes: u64,

    /// Prior weight `m` of the weighted episode rating.
    pub weight_m: f64,

    pub episode_limit: u64,

    pub page_size: u64,

    pub max_page_size: u64,

    pub top_movies_min_votes: u64,

    pub genre_limit: u64,

    /// Earliest start year included in decade analysis.
    pub decade_floor: i32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_min_votes: defaults::MIN_VOTES,
            weight_m: defaults::WEIGHT_M,
            episode_limit: defaults::EPISODE_LIMIT,
            page_size: defaults::PAGE_SIZE,
            max_page_size: limits::MAX_RESULT_LIMIT,
            top_movies_min_votes: defaults::TOP_MOVIES_MIN_VOTES,
            genre_limit: defaults::GENRE_LIMIT,
            decade_floor: defaults::DECADE_FLOOR,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });
        config.apply_database_override(std::env::var(DATABASE_ENV).ok());
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn apply_database_override(&mut self, value: Option<String>) {
        if let Some(path) = value.filter(|v| !v.trim().is_empty()) {
            info!("Using database from {}: {}", DATABASE_ENV, path);
            self.general.database_path = path;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("ratingraph").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".ratingraph").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        Self::create_default_at(&Self::default_config_path())
    }

    pub fn create_default_at(path: &Path) -> Result<bool> {
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.trim().is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if self.general.max_db_connections == 0 {
            anyhow::bail!("max_db_connections must be > 0");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!("min_db_connections cannot exceed max_db_connections");
        }

        let analytics = &self.analytics;
        if !(analytics.weight_m.is_finite() && analytics.weight_m > 0.0) {
            anyhow::bail!("analytics.weight_m must be a positive number");
        }

        if !(1..=limits::MAX_RESULT_LIMIT).contains(&analytics.max_page_size) {
            anyhow::bail!(
                "analytics.max_page_size must be between 1 and {}",
                limits::MAX_RESULT_LIMIT
            );
        }

        for (name, value) in [
            ("episode_limit", analytics.episode_limit),
            ("page_size", analytics.page_size),
            ("genre_limit", analytics.genre_limit),
        ] {
            if value == 0 || value > analytics.max_page_size {
                anyhow::bail!(
                    "analytics.{name} must be between 1 and {}",
                    analytics.max_page_size
                );
            }
        }

        Ok(())
    }
}
