use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::display::Locale;
use crate::error::ConfigError;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub display: DisplayConfig,
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the server exposing /api/restore
    pub base_url: String,
    /// Connect and metadata request timeout in seconds
    pub timeout_secs: u64,
    /// Session cookie sent with every request (e.g. "session=abc123")
    pub session_cookie: Option<String>,
    /// Accept self-signed TLS certificates
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Language for messages and dates: en, fr
    pub locale: Locale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Directory downloads are written to when no output path is given
    pub directory: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
            session_cookie: None,
            accept_invalid_certs: false,
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl ServerConfig {
    /// Parse and check the configured base URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Invalid(format!("base_url '{}' is not a valid URL: {}", self.base_url, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::Invalid(format!(
                "base_url must use http or https, got '{}'",
                other
            ))),
        }
    }
}

impl Config {
    /// Default config file location (`~/.config/restore-browser/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("restore-browser").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location yields defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !explicit && !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.clone(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.base_url()?;

        if self.server.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
