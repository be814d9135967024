//! Service configuration loading
//!
//! Resolution follows a fixed priority order per setting:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Levels 1 and 2 are collapsed by the binary's argument parser into
//! [`ConfigOverrides`]; this module merges them over the TOML file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::{Error, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL_PATH: &str = "models/airquality.json";
pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "http://api.openweathermap.org";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// On-disk TOML configuration. Every key is optional.
///
/// ```toml
/// host = "0.0.0.0"
/// port = 8080
/// model_path = "/srv/aqi/airquality.json"
///
/// [openweather]
/// api_key = "..."
/// base_url = "http://api.openweathermap.org"
/// timeout_secs = 5
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model_path: Option<PathBuf>,
    #[serde(default)]
    pub openweather: OpenWeatherToml,
}

/// `[openweather]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenWeatherToml {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub openweather_api_key: String,
    pub openweather_base_url: String,
    pub http_timeout: Duration,
}

impl ServiceConfig {
    /// Merge overrides over an optional TOML file over compiled defaults
    pub fn resolve(overrides: ConfigOverrides, file: Option<TomlConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let timeout_secs = overrides
            .timeout_secs
            .or(file.openweather.timeout_secs)
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("HTTP timeout must be at least 1 second".to_string()));
        }

        let base_url = overrides
            .base_url
            .or(file.openweather.base_url)
            .unwrap_or_else(|| DEFAULT_OPENWEATHER_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "OpenWeather base URL must be http(s): {}",
                base_url
            )));
        }

        let api_key = overrides
            .api_key
            .or(file.openweather.api_key)
            .unwrap_or_default();
        if api_key.is_empty() {
            warn!("No OpenWeather API key configured; city lookups will fail upstream");
        }

        Ok(Self {
            host: overrides
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            model_path: overrides
                .model_path
                .or(file.model_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            openweather_api_key: api_key,
            openweather_base_url: base_url.trim_end_matches('/').to_string(),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// `host:port` string for binding the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Platform config file location (`~/.config/aqi/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aqi").join("config.toml"))
}

/// Load the TOML config file
///
/// An explicitly requested file must exist. The platform default file is
/// optional; its absence yields `Ok(None)`. A file that exists but does not
/// parse is always an error.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using defaults");
                return Ok(None);
            }
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    debug!("Loaded config file {}", path.display());
    Ok(Some(config))
}
