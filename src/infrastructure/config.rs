//! Runtime settings: built-in defaults, an optional TOML file, the
//! `ZENA_ENDPOINT` environment variable and command-line overrides, applied
//! in that order.

use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://natishanau-amharic-fake-news-backend.hf.space/predict/";
pub const ENDPOINT_ENV: &str = "ZENA_ENDPOINT";
pub const CONFIG_FILE_NAME: &str = "zena.toml";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid endpoint '{value}': {reason}")]
    InvalidEndpoint { value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Classification endpoint receiving the POST.
    pub endpoint: Url,
    /// Request timeout in seconds; `None` or `0` waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout_secs: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from every source.
    ///
    /// `config_path` must exist when given. Without it the platform config
    /// file is used if present.
    pub fn load(config_path: Option<&Path>, cli_endpoint: Option<&str>) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => Some(read_file_settings(path)?),
            None => match default_config_path() {
                Some(path) if path.exists() => Some(read_file_settings(&path)?),
                _ => None,
            },
        };
        let env_endpoint = std::env::var(ENDPOINT_ENV).ok();
        Self::resolve(file.unwrap_or_default(), env_endpoint.as_deref(), cli_endpoint)
    }

    fn resolve(
        file: FileSettings,
        env_endpoint: Option<&str>,
        cli_endpoint: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        if let Some(endpoint) = file.endpoint.as_deref() {
            settings.endpoint = parse_endpoint(endpoint)?;
        }
        if let Some(timeout) = file.timeout_secs {
            settings.timeout_secs = Some(timeout);
        }
        if let Some(level) = file.log_level {
            settings.log_level = level;
        }

        for endpoint in [env_endpoint, cli_endpoint].into_iter().flatten() {
            if !endpoint.trim().is_empty() {
                settings.endpoint = parse_endpoint(endpoint)?;
            }
        }

        Ok(settings)
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            Some(0) | None => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }
}

/// Parses an endpoint URL, accepting only http and https.
pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let value = raw.trim();
    let url = Url::parse(value).map_err(|err| ConfigError::InvalidEndpoint {
        value: value.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEndpoint {
            value: value.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "zena").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn read_file_settings(path: &Path) -> Result<FileSettings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
