//! questctl configuration
//!
//! Config file: ~/.config/questmaster/config.toml

use anyhow::{Context, Result};
use quest_engine::DATA_DIR_NAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main questctl configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestConfig {
    /// Where progression records live
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[serde(default)]
    pub log_level: Option<String>,
}

impl QuestConfig {
    /// Default config path: ~/.config/questmaster/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(DATA_DIR_NAME).join("config.toml"))
    }

    /// Load from `path`, or from the user config path when `None`
    ///
    /// A missing file yields defaults; an unreadable or invalid one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::user_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolve the data directory: flag, then config, then platform default
    pub fn resolve_data_dir(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = flag.or_else(|| self.data_dir.clone()) {
            return Ok(dir);
        }
        dirs::data_dir()
            .map(|dir| dir.join(DATA_DIR_NAME))
            .context("Cannot determine data directory; pass --data-dir")
    }

    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }
}
