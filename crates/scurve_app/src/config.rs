//! `scurve.ron` configuration for the command-line dashboard.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use scurve_engine::{EngineConfig, FetchSettings, TranslationSettings};
use scurve_logging::LogDestination;
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "scurve.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslationConfig {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_target")]
    pub target: String,
}

fn default_target() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub expand_limit: Option<usize>,
    pub future_years: Option<u32>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log: LogDestination,
    pub log_level: String,
    pub translation: Option<TranslationConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            base_url: engine.base_url,
            expand_limit: engine.expand_limit,
            future_years: engine.future_years,
            connect_timeout_secs: engine.fetch.connect_timeout.as_secs(),
            request_timeout_secs: engine.fetch.request_timeout.as_secs(),
            log: LogDestination::default(),
            log_level: "info".to_string(),
            translation: None,
        }
    }
}

impl AppConfig {
    /// Unknown level names fall back to `Info`.
    pub fn level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn engine_config(&self) -> EngineConfig {
        let defaults = FetchSettings::default();
        EngineConfig {
            base_url: self.base_url.clone(),
            fetch: FetchSettings {
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                ..defaults
            },
            expand_limit: self.expand_limit,
            future_years: self.future_years,
            translation: self.translation.as_ref().map(|t| TranslationSettings {
                endpoint: t.endpoint.clone(),
                api_key: t.api_key.clone(),
                target_language: t.target.clone(),
            }),
        }
    }
}

/// Reads the configuration file; `Ok(None)` when it does not exist.
pub fn read(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}
