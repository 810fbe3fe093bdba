//! Configuration for tmpl

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(default)]
    pub log_level: Option<String>,

    /// Fail on bare references to unset variables
    #[serde(default = "default_strict")]
    pub strict: bool,

    /// Include files added before any given on the command line
    #[serde(default)]
    pub includes: Vec<PathBuf>,
}

fn default_strict() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: None,
            strict: default_strict(),
            includes: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    ///
    /// An explicit path must exist; default locations are optional.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            debug!(path = %config_path.display(), "Config::load: explicit path");
            return Self::load_from(config_path);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("tmpl").join("config.yml")),
            Some(PathBuf::from("tmpl.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "Config::load: found default config");
                return Self::load_from(path);
            }
        }

        debug!("Config::load: no config file, using defaults");
        Ok(Config::default())
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }
}
