use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::recommend::{RankOptions, DEFAULT_LIMIT};

/// Application configuration loaded from TOML config file.
/// Every field has a default, so the file is optional.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Labeled dataset for `evaluate` when none is passed on the command line.
    /// Unset means the built-in fixture.
    pub dataset: Option<PathBuf>,
    /// Number of evaluation workers. 0 = auto-detect (cores / 2, min 1).
    pub workers: usize,
    /// Recommendation ranking defaults.
    pub recommend: RecommendConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecommendConfig {
    /// Maximum tracks returned by `rank`.
    pub limit: usize,
    /// Tracks scoring below this are left out.
    pub min_score: f64,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            min_score: 0.0,
        }
    }
}

impl RecommendConfig {
    pub fn rank_options(&self) -> RankOptions {
        RankOptions {
            limit: self.limit,
            min_score: self.min_score,
        }
    }
}

impl AppConfig {
    /// Load config from `~/.config/moodtag/config.toml`, or defaults if there is none.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from an explicit path. Read or parse failures log a
    /// warning and fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                return Self::default();
            }
        };
        match Self::parse(&contents) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Resolve worker count: 0 → auto-detect (cores / 2, min 1).
    pub fn resolve_workers(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            let cores = std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(2);
            (cores / 2).max(1)
        }
    }

    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
