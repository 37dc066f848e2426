//! Restore Browser - browse and download files from remote backup snapshots
//!
//! This crate provides functionality for:
//! - Listing the backups a restore server offers
//! - Navigating a backup's file tree and selecting files
//! - Downloading single files or bundled selections
//! - Interactive TUI over all of the above

pub mod api;
pub mod browser;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod tui;

// Re-export commonly used types
pub use browser::{BackupTreeBrowser, LoadOutcome, LoadTicket};
pub use config::Config;
pub use error::{BrowserError, Result};
