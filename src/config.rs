// Runtime configuration.
// Defaults, then an optional TOML file, then environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::cache::paths;
use crate::error::{GhUsersError, Result};
use crate::github::client::GITHUB_API_BASE;
use crate::paging::PagingConfig;

/// Delay after the last keystroke before a search runs.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Keys accepted in `config.toml`; all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    token: Option<String>,
    api_base_url: Option<String>,
    page_size: Option<usize>,
    search_debounce_ms: Option<u64>,
    db_path: Option<PathBuf>,
}

#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub api_base_url: String,
    pub paging: PagingConfig,
    pub search_debounce: Duration,
    /// Overrides the platform cache location when set.
    pub db_path: Option<PathBuf>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("paging", &self.paging)
            .field("search_debounce", &self.search_debounce)
            .field("db_path", &self.db_path)
            .finish()
    }
}

impl Config {
    /// Load from the platform config file and the process environment.
    pub fn load() -> Result<Self> {
        let file = paths::config_path();
        Self::from_sources(file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build a config from an optional TOML file and an environment lookup.
    pub fn from_sources(file: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let file_config = match file {
            Some(path) if path.exists() => Self::read_file(path)?,
            _ => FileConfig::default(),
        };

        let token = env("GITHUB_TOKEN")
            .or(file_config.token)
            .filter(|token| !token.trim().is_empty())
            .ok_or(GhUsersError::MissingToken)?;

        let api_base_url = env("GHUSERS_API_URL")
            .or(file_config.api_base_url)
            .unwrap_or_else(|| GITHUB_API_BASE.to_string());

        let page_size = match env("GHUSERS_PAGE_SIZE") {
            Some(value) => value.parse::<usize>().map_err(|e| {
                GhUsersError::Config(format!("GHUSERS_PAGE_SIZE must be a number: {}", e))
            })?,
            None => file_config
                .page_size
                .unwrap_or(PagingConfig::default().page_size),
        };
        // GitHub caps per_page at 100
        if !(1..=100).contains(&page_size) {
            return Err(GhUsersError::Config(format!(
                "page size must be between 1 and 100, got {}",
                page_size
            )));
        }

        let search_debounce = file_config
            .search_debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SEARCH_DEBOUNCE);

        Ok(Self {
            token,
            api_base_url,
            paging: PagingConfig { page_size },
            search_debounce,
            db_path: file_config.db_path,
        })
    }

    fn read_file(path: &Path) -> Result<FileConfig> {
        debug!(path = %path.display(), "reading config file");
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            GhUsersError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Where the cache database lives.
    pub fn resolve_db_path(&self) -> Result<PathBuf> {
        self.db_path
            .clone()
            .or_else(paths::db_path)
            .ok_or_else(|| GhUsersError::Config("could not determine cache directory".to_string()))
    }
}
