//! Configuration for neon.
//!
//! Everything has a default, so a missing or partial `config.toml` is fine.
//! The file lives in the platform config directory unless a path is given.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use neon_cursor::FollowerSettings;
use neon_menu::MenuSettings;
use neon_particles::FieldSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub effects: EffectsConfig,
    pub field: FieldSettings,
    pub cursor: FollowerSettings,
    pub menu: MenuSettings,
    pub feed: FeedConfig,
    pub stats: StatsConfig,
    pub banner: BannerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Start with effects on. Off dims the field rather than removing it.
    pub enabled: bool,
    /// Target frame interval.
    pub frame_ms: u64,
    /// Field opacity while effects are off.
    pub dimmed_opacity: f32,
    /// How long a notification stays on screen.
    pub toast_ms: u64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frame_ms: 33,
            dimmed_opacity: 0.3,
            toast_ms: 3000,
        }
    }
}

/// Plain-text update feed. Disabled without a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: Option<String>,
    pub interval_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: None,
            interval_secs: 30,
        }
    }
}

/// JSON statistics document shown in the status line. Disabled without a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub url: Option<String>,
    pub interval_secs: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            url: None,
            interval_secs: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub title: String,
    pub tagline: String,
    /// Section labels, in back/forward order.
    pub sections: Vec<String>,
    pub contact: String,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            title: "NEON".to_string(),
            tagline: "terminal portfolio".to_string(),
            sections: ["Home", "Projects", "About", "Contact"]
                .map(String::from)
                .to_vec(),
            contact: "hello@example.com".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("dev", "neon", "neon").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Load from `path`, or from [`config_path`] when none is given.
///
/// A missing file at the default location yields the defaults; a missing
/// explicit path is an error.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (config_path()?, false),
    };
    if !explicit && !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    Config::from_toml(&text)
}

pub fn load_or_default(path: Option<&Path>) -> Config {
    match load(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Using default config: {}", e);
            Config::default()
        }
    }
}
