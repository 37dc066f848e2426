use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::display::{Locale, Message};

/// Core library errors
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No items selected")]
    EmptySelection,

    #[error("No backup selected")]
    NoBackupSelected,

    #[error("Backup not found: {0}")]
    BackupNotFound(String),

    #[error("Invalid backup key '{0}' (expected peer_id:source_server:share_name)")]
    InvalidBackupKey(String),

    #[error("Path not found in backup: {0}")]
    PathNotFound(String),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BrowserError {
    /// Localized text shown to the user for this error.
    ///
    /// Load failures map to the file-tree message; callers reporting a failed
    /// backup listing use [`Message::ErrorLoadingBackups`] directly.
    pub fn user_message(&self, locale: Locale) -> &'static str {
        let message = match self {
            BrowserError::Load(_) | BrowserError::PathNotFound(_) => Message::ErrorLoadingFiles,
            BrowserError::BackupNotFound(_) => Message::ErrorLoadingBackups,
            BrowserError::EmptySelection => Message::ErrorSelection,
            BrowserError::NoBackupSelected => Message::NoBackupSelected,
            BrowserError::Download(_)
            | BrowserError::Io { .. }
            | BrowserError::Config(_)
            | BrowserError::InvalidBackupKey(_) => Message::ErrorDownload,
        };
        locale.text(message)
    }
}

/// Failure to fetch or decode the backup list or a backup's file tree
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Failure while streaming a download to its destination
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to write download: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BrowserError>;
