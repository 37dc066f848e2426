//! Subcommand implementations

pub mod backups;
pub mod browse;
pub mod download;

use crate::api::{HttpRestoreApi, RestoreApi};
use crate::browser::BackupTreeBrowser;
use crate::config::Config;
use crate::error::{BrowserError, Result};
use crate::model::BackupKey;

/// Build a browser talking to the configured server.
pub fn connect(config: &Config) -> Result<BackupTreeBrowser<HttpRestoreApi>> {
    let api = HttpRestoreApi::new(&config.server)?;
    tracing::debug!(base = %api.endpoints().base(), "Connecting to restore API");
    Ok(BackupTreeBrowser::new(api))
}

/// List backups and load the tree of the one matching `key`.
pub fn open_backup<A: RestoreApi>(browser: &mut BackupTreeBrowser<A>, key: &BackupKey) -> Result<()> {
    let backup = key
        .find(browser.list_backups()?)
        .cloned()
        .ok_or_else(|| BrowserError::BackupNotFound(key.to_string()))?;
    browser.select_backup(&backup)?;
    Ok(())
}
