//! Backup tree browser: the loaded tree, a directory cursor and a selection.
//!
//! State moves from *no backup* to *browsing at `/`* once a tree load
//! succeeds, and back to `/` with an empty selection on every later load.
//! Loads are tagged with a token; only the most recently issued one may
//! replace the tree, so a slow earlier response cannot overwrite a later
//! selection.

use std::io::Write;
use std::sync::Arc;

use crate::api::{BulkDownloadRequest, DownloadRequest, RestoreApi};
use crate::error::{BrowserError, LoadError, Result};
use crate::model::path::{self, Crumb};
use crate::model::{sorted_children, BackupDescriptor, SelectionSet, TreeNode};

/// A tree load that has been issued but not yet applied.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    token: u64,
    backup: BackupDescriptor,
}

impl LoadTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn backup(&self) -> &BackupDescriptor {
        &self.backup
    }
}

/// What happened to a finished load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The tree replaced the current one.
    Applied,
    /// A newer load was issued meanwhile; the result was discarded.
    Stale,
}

#[derive(Debug)]
struct LoadedBackup {
    backup: BackupDescriptor,
    tree: TreeNode,
}

pub struct BackupTreeBrowser<A> {
    api: Arc<A>,
    backups: Vec<BackupDescriptor>,
    loaded: Option<LoadedBackup>,
    current_path: String,
    selection: SelectionSet,
    latest_token: u64,
}

impl<A: RestoreApi> BackupTreeBrowser<A> {
    pub fn new(api: A) -> Self {
        Self::with_shared(Arc::new(api))
    }

    pub fn with_shared(api: Arc<A>) -> Self {
        Self {
            api,
            backups: Vec::new(),
            loaded: None,
            current_path: path::ROOT.to_string(),
            selection: SelectionSet::new(),
            latest_token: 0,
        }
    }

    /// Shared handle to the API, for loads run off the caller's thread.
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Fetch the available backups.
    ///
    /// On failure the previously listed backups are kept.
    pub fn list_backups(&mut self) -> std::result::Result<&[BackupDescriptor], LoadError> {
        let backups = self.api.list_backups()?;
        tracing::info!(count = backups.len(), "Loaded backup list");
        self.backups = backups;
        Ok(&self.backups)
    }

    pub fn backups(&self) -> &[BackupDescriptor] {
        &self.backups
    }

    /// Fetch and switch to the tree of `backup`.
    ///
    /// On failure the current tree, path and selection are left untouched.
    pub fn select_backup(
        &mut self,
        backup: &BackupDescriptor,
    ) -> std::result::Result<&TreeNode, LoadError> {
        let ticket = self.begin_load(backup.clone());
        let tree = self.api.load_tree(&ticket.backup)?;
        Ok(self.apply(ticket.backup, tree))
    }

    /// Issue a new load, superseding any load still in flight.
    pub fn begin_load(&mut self, backup: BackupDescriptor) -> LoadTicket {
        self.latest_token += 1;
        tracing::debug!(token = self.latest_token, backup = %backup.key(), "Loading tree");
        LoadTicket {
            token: self.latest_token,
            backup,
        }
    }

    /// Apply the result of a load issued with [`begin_load`](Self::begin_load).
    ///
    /// Results of superseded loads, successful or not, are discarded.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<TreeNode, LoadError>,
    ) -> std::result::Result<LoadOutcome, LoadError> {
        if ticket.token != self.latest_token {
            tracing::warn!(
                token = ticket.token,
                latest = self.latest_token,
                "Discarding stale tree load"
            );
            return Ok(LoadOutcome::Stale);
        }

        let tree = result?;
        self.apply(ticket.backup, tree);
        Ok(LoadOutcome::Applied)
    }

    fn apply(&mut self, backup: BackupDescriptor, tree: TreeNode) -> &TreeNode {
        tracing::info!(backup = %backup.key(), files = tree.file_count(), "Loaded tree");
        self.current_path = path::ROOT.to_string();
        self.selection.clear();
        &self.loaded.insert(LoadedBackup { backup, tree }).tree
    }

    pub fn current_backup(&self) -> Option<&BackupDescriptor> {
        self.loaded.as_ref().map(|l| &l.backup)
    }

    pub fn tree(&self) -> Option<&TreeNode> {
        self.loaded.as_ref().map(|l| &l.tree)
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Resolve a path in the loaded tree without moving the cursor.
    pub fn resolve(&self, path: &str) -> Option<&TreeNode> {
        self.tree()?.resolve(path)
    }

    /// Move the cursor to `path` and return the node there.
    ///
    /// Returns `None` and leaves the cursor where it was if the path does
    /// not resolve.
    pub fn navigate(&mut self, path: &str) -> Option<&TreeNode> {
        if self.resolve(path).is_none() {
            tracing::warn!(path, current = %self.current_path, "Cannot navigate to unknown path");
            return None;
        }
        self.current_path = path::normalize(path);
        self.current_node()
    }

    /// Move the cursor to the parent directory. Returns false at the root.
    pub fn navigate_up(&mut self) -> bool {
        if self.current_path == path::ROOT {
            return false;
        }
        let parent = path::parent(&self.current_path);
        self.navigate(&parent).is_some()
    }

    /// The node under the cursor.
    pub fn current_node(&self) -> Option<&TreeNode> {
        self.resolve(&self.current_path)
    }

    /// Entries under the cursor in listing order.
    pub fn entries(&self) -> Vec<&TreeNode> {
        self.current_node().map(sorted_children).unwrap_or_default()
    }

    pub fn breadcrumbs(&self) -> Vec<Crumb> {
        path::breadcrumbs(&self.current_path)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Flip selection of `path`, returning whether it is now selected.
    pub fn toggle_selection(&mut self, path: &str) -> bool {
        self.selection.toggle(path)
    }

    /// Add `path` to the selection. Returns false if already selected.
    pub fn select(&mut self, path: &str) -> bool {
        self.selection.insert(path)
    }

    fn visible_paths(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.path.clone()).collect()
    }

    /// Select every entry listed under the cursor.
    pub fn select_all_visible(&mut self) {
        self.set_all_visible(true);
    }

    /// Select or deselect every entry listed under the cursor, leaving
    /// selections in other directories alone.
    pub fn set_all_visible(&mut self, selected: bool) {
        for path in self.visible_paths() {
            if selected {
                self.selection.insert(&path);
            } else {
                self.selection.remove(&path);
            }
        }
    }

    /// True if the cursor lists at least one entry and all are selected.
    pub fn all_visible_selected(&self) -> bool {
        let entries = self.entries();
        !entries.is_empty() && entries.iter().all(|e| self.selection.contains(&e.path))
    }

    /// Empty the whole selection, in every directory.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Build the download request for one file of the loaded backup.
    pub fn request_download(&self, path: &str) -> Result<DownloadRequest> {
        let backup = self.current_backup().ok_or(BrowserError::NoBackupSelected)?;
        Ok(DownloadRequest {
            url: self.api.endpoints().download(backup, path),
            path: path.to_string(),
            file_name: path::file_name(path).to_string(),
        })
    }

    /// Build the bundled download request for the current selection.
    pub fn request_bulk_download(&self) -> Result<BulkDownloadRequest> {
        if self.selection.is_empty() {
            return Err(BrowserError::EmptySelection);
        }
        let backup = self.current_backup().ok_or(BrowserError::NoBackupSelected)?;
        Ok(BulkDownloadRequest {
            url: self.api.endpoints().download_multiple(backup),
            paths: self.selection.to_vec(),
            share_name: backup.share_name.clone(),
        })
    }

    /// Download one file into `out`.
    pub fn download(&self, path: &str, out: &mut dyn Write) -> Result<u64> {
        let request = self.request_download(path)?;
        let written = self.api.download_file(&request, out)?;
        tracing::info!(path, bytes = written, "Downloaded file");
        Ok(written)
    }

    /// Download the current selection as one archive into `out`.
    pub fn download_selection(&self, out: &mut dyn Write) -> Result<u64> {
        let request = self.request_bulk_download()?;
        let written = self.api.download_bulk(&request, out)?;
        tracing::info!(paths = request.paths.len(), bytes = written, "Downloaded selection");
        Ok(written)
    }
}
