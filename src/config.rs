use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::PageRequest;

/// Environment variable naming an explicit config file, checked before the
/// default search paths.
pub const CONFIG_ENV: &str = "FILMOTEKA_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub catalog: CatalogConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Emit logs as JSON lines instead of the human readable format.
    pub json_logs: bool,

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
            database_path: "sqlite:data/filmoteka.db".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    /// Proxy addresses allowed to supply the client address through
    /// `X-Forwarded-For`. When empty the socket peer address is recorded.
    pub trusted_proxy_ips: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8000,
            cors_allowed_origins: vec![
                "http://localhost:8000".to_string(),
                "http://127.0.0.1:8000".to_string(),
            ],
            trusted_proxy_ips: Vec::new(),
        }
    }
}

/// What happens when the same client rates the same movie twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingPolicy {
    /// Every submission is stored as a new rating.
    #[default]
    Insert,
    /// A later submission replaces the star of the earlier one.
    Upsert,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Page size used when a listing request does not name one.
    pub page_size: u64,

    /// Star levels registered at startup. Existing levels are never removed.
    pub rating_stars: Vec<i32>,

    pub rating_policy: RatingPolicy,

    /// Reject replies whose movie differs from the parent review's movie.
    pub enforce_reply_movie_match: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            rating_stars: vec![1, 2, 3, 4, 5],
            rating_policy: RatingPolicy::Insert,
            enforce_reply_movie_match: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(explicit);
            info!("Loading config from {}: {}", CONFIG_ENV, path.display());
            return Self::load_from_path(&path);
        }

        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("filmoteka").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".filmoteka").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.catalog.page_size == 0 || self.catalog.page_size > PageRequest::MAX_PAGE_SIZE {
            anyhow::bail!(
                "catalog.page_size must be between 1 and {}",
                PageRequest::MAX_PAGE_SIZE
            );
        }

        if let Some(bad) = self
            .catalog
            .rating_stars
            .iter()
            .find(|v| !(1..=10).contains(*v))
        {
            anyhow::bail!("Rating star {bad} is out of range, stars must be between 1 and 10");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!("min_db_connections cannot exceed max_db_connections");
        }

        Ok(())
    }
}
