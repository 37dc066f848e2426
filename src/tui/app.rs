//! Application state for the TUI.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Utc;

use crate::api::RestoreApi;
use crate::browser::{BackupTreeBrowser, LoadOutcome, LoadTicket};
use crate::display::{format_bytes, Locale, Message};
use crate::error::{BrowserError, LoadError};
use crate::model::{BackupDescriptor, TreeNode};

/// The current UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Choosing a backup from the list.
    Picker,
    /// Browsing the loaded backup's files.
    Browse,
    /// Help overlay mode.
    Help,
}

/// Work finished on a background thread.
pub enum Update {
    /// A tree load completed.
    Loaded {
        ticket: LoadTicket,
        result: Result<TreeNode, LoadError>,
    },
    /// A download was written (or failed and was removed).
    Downloaded {
        target: PathBuf,
        result: crate::Result<u64>,
    },
}

/// Main application state for the TUI.
pub struct App<A> {
    /// Backup list, loaded tree, cursor and selection.
    pub browser: BackupTreeBrowser<A>,

    /// Current UI mode.
    pub mode: Mode,

    /// Highlighted row in the backup picker.
    pub picker_selected: usize,

    /// Highlighted row in the directory listing.
    pub selected: usize,

    /// Language for messages and dates.
    pub locale: Locale,

    /// Where downloads are written.
    pub download_dir: PathBuf,

    /// Status message to display.
    pub status_message: Option<String>,

    /// A tree load is in flight.
    pub loading: bool,

    /// Downloads still running.
    pub downloads: usize,

    /// Application should quit.
    pub should_quit: bool,

    updates_tx: Sender<Update>,
    updates_rx: Receiver<Update>,
}

impl<A: RestoreApi + Send + Sync + 'static> App<A> {
    /// Create a new App instance.
    pub fn new(browser: BackupTreeBrowser<A>, locale: Locale, download_dir: PathBuf) -> Self {
        let (updates_tx, updates_rx) = mpsc::channel();
        Self {
            browser,
            mode: Mode::Picker,
            picker_selected: 0,
            selected: 0,
            locale,
            download_dir,
            status_message: None,
            loading: false,
            downloads: 0,
            should_quit: false,
            updates_tx,
            updates_rx,
        }
    }

    /// Fetch the backup list again.
    pub fn refresh_backups(&mut self) {
        match self.browser.list_backups() {
            Ok(backups) => {
                let count = backups.len();
                self.picker_selected = self.picker_selected.min(count.saturating_sub(1));
                self.status_message = if count == 0 {
                    Some(self.locale.text(Message::NoBackups).to_string())
                } else {
                    None
                };
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load backups");
                self.status_message = Some(self.locale.text(Message::ErrorLoadingBackups).to_string());
            }
        }
    }

    /// Start loading a backup's tree on a background thread.
    pub fn open_backup(&mut self, backup: BackupDescriptor) {
        let ticket = self.browser.begin_load(backup);
        let api = Arc::clone(self.browser.api());
        let tx = self.updates_tx.clone();

        self.loading = true;
        self.status_message = Some(self.locale.text(Message::Loading).to_string());

        thread::spawn(move || {
            let result = api.load_tree(ticket.backup());
            // The receiver only goes away when the app does
            let _ = tx.send(Update::Loaded { ticket, result });
        });
    }

    /// Open the backup highlighted in the picker.
    pub fn open_picked(&mut self) {
        if let Some(backup) = self.browser.backups().get(self.picker_selected).cloned() {
            self.open_backup(backup);
        }
    }

    /// Apply any finished background work without blocking.
    pub fn poll_updates(&mut self) {
        while let Ok(update) = self.updates_rx.try_recv() {
            self.apply_update(update);
        }
    }

    /// Block until one load or download finishes or `timeout` elapses.
    pub fn wait_for_update(&mut self, timeout: Duration) -> bool {
        match self.updates_rx.recv_timeout(timeout) {
            Ok(update) => {
                self.apply_update(update);
                true
            }
            Err(_) => false,
        }
    }

    fn apply_update(&mut self, update: Update) {
        match update {
            Update::Loaded { ticket, result } => self.apply_load(ticket, result),
            Update::Downloaded { target, result } => {
                self.downloads = self.downloads.saturating_sub(1);
                self.report_download(&target, result);
            }
        }
    }

    fn apply_load(&mut self, ticket: LoadTicket, result: Result<TreeNode, LoadError>) {
        match self.browser.finish_load(ticket, result) {
            Ok(LoadOutcome::Applied) => {
                self.loading = false;
                self.mode = Mode::Browse;
                self.selected = 0;
                self.status_message = None;
            }
            // A newer load is still running
            Ok(LoadOutcome::Stale) => {}
            Err(e) => {
                tracing::error!(error = %e, "Failed to load files");
                self.loading = false;
                self.status_message = Some(self.locale.text(Message::ErrorLoadingFiles).to_string());
            }
        }
    }

    /// Move the highlight in the active list by `delta` rows.
    pub fn move_selection(&mut self, delta: isize) {
        let (index, len) = match self.mode {
            Mode::Picker => (&mut self.picker_selected, self.browser.backups().len()),
            Mode::Browse => (&mut self.selected, self.browser.entries().len()),
            Mode::Help => return,
        };
        if len == 0 {
            *index = 0;
            return;
        }
        let next = (*index as isize + delta).clamp(0, len as isize - 1);
        *index = next as usize;
    }

    /// Jump to the first or last row of the listing.
    pub fn select_edge(&mut self, last: bool) {
        self.selected = if last {
            self.browser.entries().len().saturating_sub(1)
        } else {
            0
        };
    }

    /// The highlighted entry of the listing, if any.
    pub fn highlighted_entry(&self) -> Option<&TreeNode> {
        self.browser.entries().into_iter().nth(self.selected)
    }

    /// Enter the highlighted directory.
    pub fn enter_selected(&mut self) {
        let Some(path) = self
            .highlighted_entry()
            .filter(|e| e.is_dir)
            .map(|e| e.path.clone())
        else {
            return;
        };
        if self.browser.navigate(&path).is_some() {
            self.selected = 0;
        }
    }

    /// Go to the parent directory, highlighting the directory we came from.
    pub fn go_up(&mut self) {
        let from = self.browser.current_path().to_string();
        if !self.browser.navigate_up() {
            return;
        }
        self.selected = self
            .browser
            .entries()
            .iter()
            .position(|e| crate::model::path::normalize(&e.path) == from)
            .unwrap_or(0);
    }

    pub fn toggle_selected(&mut self) {
        if let Some(path) = self.highlighted_entry().map(|e| e.path.clone()) {
            self.browser.toggle_selection(&path);
        }
    }

    /// Select all visible entries, or deselect them if all already are.
    pub fn toggle_all_visible(&mut self) {
        let all = self.browser.all_visible_selected();
        self.browser.set_all_visible(!all);
    }

    pub fn clear_selection(&mut self) {
        self.browser.clear_selection();
    }

    /// Return to the backup picker, keeping the loaded tree.
    pub fn back_to_picker(&mut self) {
        self.mode = Mode::Picker;
    }

    /// Download the highlighted file into the download directory.
    pub fn download_highlighted(&mut self) {
        let Some(entry) = self.highlighted_entry().filter(|e| !e.is_dir) else {
            return;
        };
        let target = self.download_dir.join(&entry.name);
        let request = match self.browser.request_download(&entry.path) {
            Ok(request) => request,
            Err(e) => {
                self.status_message = Some(e.user_message(self.locale).to_string());
                return;
            }
        };

        self.spawn_download(target, move |api, out| {
            let written = api.download_file(&request, out)?;
            tracing::info!(path = %request.path, bytes = written, "Downloaded file");
            Ok(written)
        });
    }

    /// Download the selection as one archive into the download directory.
    pub fn download_selection(&mut self) {
        let request = match self.browser.request_bulk_download() {
            Ok(request) => request,
            Err(e) => {
                self.status_message = Some(e.user_message(self.locale).to_string());
                return;
            }
        };
        let target = self.download_dir.join(request.archive_name(Utc::now()));

        self.spawn_download(target, move |api, out| {
            let written = api.download_bulk(&request, out)?;
            tracing::info!(paths = request.paths.len(), bytes = written, "Downloaded selection");
            Ok(written)
        });
    }

    /// Stream a download into `target` on a background thread.
    fn spawn_download<F>(&mut self, target: PathBuf, download: F)
    where
        F: FnOnce(&A, &mut dyn Write) -> crate::Result<u64> + Send + 'static,
    {
        let api = Arc::clone(self.browser.api());
        let tx = self.updates_tx.clone();

        self.downloads += 1;
        self.status_message = Some(format!(
            "{} {}...",
            self.locale.text(Message::DownloadAction),
            target.display()
        ));

        thread::spawn(move || {
            let result = save(&target, |out| download(&*api, out));
            let _ = tx.send(Update::Downloaded { target, result });
        });
    }

    fn report_download(&mut self, target: &Path, result: crate::Result<u64>) {
        self.status_message = Some(match result {
            Ok(written) => format!(
                "{} {} ({})",
                self.locale.text(Message::Saved),
                target.display(),
                format_bytes(written)
            ),
            Err(e) => {
                tracing::error!(error = %e, "Download failed");
                e.user_message(self.locale).to_string()
            }
        });
    }
}

/// Write a download to `target`, removing the file if it fails.
fn save<F>(target: &Path, download: F) -> crate::Result<u64>
where
    F: FnOnce(&mut dyn Write) -> crate::Result<u64>,
{
    let io_error = |source: std::io::Error| BrowserError::Io {
        path: target.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(target).map_err(io_error)?);
    let result = download(&mut writer).and_then(|written| {
        writer.flush().map_err(io_error)?;
        Ok(written)
    });

    if result.is_err() {
        drop(writer);
        let _ = fs::remove_file(target);
    }
    result
}
