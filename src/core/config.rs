//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::metrics::DEFAULT_TOP_N;

/// Database file used when nothing else is configured
pub const DEFAULT_DATABASE: &str = "food_wastage.db";

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = "fwms.yaml";

/// fwms configuration with layered hierarchy
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Path of the SQLite database file
    pub database: Option<PathBuf>,

    /// Default output format (auto, tsv, json, csv, md, id)
    pub default_format: Option<String>,

    /// Number of providers in the top-providers chart
    pub top_n: Option<usize>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(&cwd)
    }

    /// Load configuration, reading the local config file from `dir`
    pub fn load_from(dir: &Path) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/fwms/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Local config (./fwms.yaml)
        if let Some(local) = Self::read_file(&dir.join(LOCAL_CONFIG_FILE)) {
            config.merge(local);
        }

        // 4. Environment variables
        if let Ok(db) = std::env::var("FWMS_DB") {
            if !db.is_empty() {
                config.database = Some(PathBuf::from(db));
            }
        }
        if let Ok(format) = std::env::var("FWMS_FORMAT") {
            if !format.is_empty() {
                config.default_format = Some(format);
            }
        }

        config
    }

    /// Parse a config file; missing or malformed files are skipped
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                log::debug!("loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                log::warn!("ignoring malformed config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "fwms")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.top_n.is_some() {
            self.top_n = other.top_n;
        }
    }

    /// Database path, falling back to `food_wastage.db` in the working directory
    pub fn database(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    /// Size of the top-providers chart (at least 1)
    pub fn top_n(&self) -> usize {
        self.top_n.unwrap_or(DEFAULT_TOP_N).max(1)
    }
}
