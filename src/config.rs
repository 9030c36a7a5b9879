use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::i18n::Language;

pub const HOME_ENV: &str = "TODOGATE_HOME";
pub const API_KEY_ENV: &str = "TODOGATE_FIREBASE_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {message}")]
    Read { path: PathBuf, message: String },
    #[error("failed to parse config from {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("the firebase provider needs an api key")]
    MissingApiKey,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Local,
    Firebase,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Web API key of the Firebase project.
    pub api_key: Option<String>,
    /// Identity toolkit base URL, e.g. an emulator.
    pub endpoint: Option<String>,
    /// Artificial delay for the local provider.
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Start on the home screen when the provider already holds a session.
    pub resume_session: bool,
    /// Show provider failures inline instead of ignoring them.
    pub surface_auth_errors: bool,
    pub language: Option<Language>,
    pub provider: ProviderConfig,
}

/// Directory holding `config.toml`.
///
/// Checks `TODOGATE_HOME` first, then the platform config directory.
pub fn home_dir() -> PathBuf {
    if let Ok(home) = std::env::var(HOME_ENV) {
        return PathBuf::from(home);
    }

    if let Some(project_dirs) = directories::ProjectDirs::from("rs", "Todogate", "Todogate") {
        project_dirs.config_dir().into()
    } else {
        std::env::current_dir().unwrap_or_default()
    }
}

pub fn config_path() -> PathBuf {
    home_dir().join("config.toml")
}

impl Config {
    pub async fn load() -> Result<Config, ConfigError> {
        let path = config_path();
        let config = Self::load_from(&path).await?;
        Ok(config.with_api_key(std::env::var(API_KEY_ENV).ok()))
    }

    /// Loads configuration from `path`, returning defaults when the file does
    /// not exist.
    pub async fn load_from(path: &Path) -> Result<Config, ConfigError> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => Self::parse(&contents, path),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
        }
    }

    pub fn parse(contents: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(contents).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Overrides the provider api key when `api_key` is set and non-empty.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|key| !key.is_empty()) {
            self.provider.api_key = Some(key);
        }
        self
    }
}
