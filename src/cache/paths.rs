// Cache path utilities.
// Resolves where the database, log and config files live on this platform.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const APP_NAME: &str = "ghusers";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the base cache directory (~/.cache/ghusers on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory (~/.config/ghusers on Linux).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path to the SQLite cache database.
pub fn db_path() -> Option<PathBuf> {
    cache_dir().map(|dir| db_path_in(&dir))
}

/// Path to the log file.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| log_path_in(&dir))
}

/// Path to the optional TOML config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

pub fn db_path_in(dir: &Path) -> PathBuf {
    dir.join("cache.db")
}

pub fn log_path_in(dir: &Path) -> PathBuf {
    dir.join(format!("{}.log", APP_NAME))
}
