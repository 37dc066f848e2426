//! Client side of the restore HTTP API.
//!
//! [`RestoreApi`] is the seam between the browser model and the network:
//! the model only ever talks to this trait, so it can be driven by the
//! blocking [`HttpRestoreApi`] or by an in-memory fake in tests.

mod http;

use std::io::Write;

use chrono::{DateTime, Utc};
use reqwest::Url;

use crate::error::{DownloadError, LoadError};
use crate::model::{BackupDescriptor, TreeNode};

pub use http::HttpRestoreApi;

/// The restore API operations the browser depends on.
pub trait RestoreApi {
    /// URL builder for this server.
    fn endpoints(&self) -> &Endpoints;

    /// `GET /api/restore/backups`
    fn list_backups(&self) -> Result<Vec<BackupDescriptor>, LoadError>;

    /// `GET /api/restore/files`
    fn load_tree(&self, backup: &BackupDescriptor) -> Result<TreeNode, LoadError>;

    /// Stream one file into `out`, returning the number of bytes written.
    fn download_file(
        &self,
        request: &DownloadRequest,
        out: &mut dyn Write,
    ) -> Result<u64, DownloadError>;

    /// Stream the archive of several paths into `out`.
    fn download_bulk(
        &self,
        request: &BulkDownloadRequest,
        out: &mut dyn Write,
    ) -> Result<u64, DownloadError>;
}

/// Decode a backup list payload. The server sends `null` for an empty list.
pub fn parse_backup_list(bytes: &[u8]) -> Result<Vec<BackupDescriptor>, LoadError> {
    let backups: Option<Vec<BackupDescriptor>> = serde_json::from_slice(bytes)?;
    Ok(backups.unwrap_or_default())
}

/// Builds restore API URLs relative to a server base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        Self { base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base.clone();
        let path = format!("{}api/restore/{}", self.base.path(), name);
        url.set_path(&path);
        url
    }

    pub fn backups(&self) -> Url {
        self.endpoint("backups")
    }

    pub fn files(&self, backup: &BackupDescriptor) -> Url {
        let mut url = self.endpoint("files");
        url.query_pairs_mut()
            .append_pair("peer_id", &backup.peer_id.to_string())
            .append_pair("backup", &backup.share_name)
            .append_pair("source_server", &backup.source_server);
        url
    }

    pub fn download(&self, backup: &BackupDescriptor, file: &str) -> Url {
        let mut url = self.endpoint("download");
        url.query_pairs_mut()
            .append_pair("peer_id", &backup.peer_id.to_string())
            .append_pair("backup", &backup.share_name)
            .append_pair("file", file)
            .append_pair("source_server", &backup.source_server);
        url
    }

    pub fn download_multiple(&self, backup: &BackupDescriptor) -> Url {
        let mut url = self.endpoint("download-multiple");
        url.query_pairs_mut()
            .append_pair("peer_id", &backup.peer_id.to_string())
            .append_pair("backup", &backup.share_name)
            .append_pair("source_server", &backup.source_server);
        url
    }
}

/// A single-file download, ready to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: Url,
    /// Path of the file inside the backup
    pub path: String,
    /// Suggested local file name
    pub file_name: String,
}

/// A bundled download of several paths, posted as repeated `paths` form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkDownloadRequest {
    pub url: Url,
    pub paths: Vec<String>,
    pub share_name: String,
}

impl BulkDownloadRequest {
    /// Form body fields, one `paths` entry per selected path, in order.
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        self.paths.iter().map(|p| ("paths", p.as_str())).collect()
    }

    /// Local file name for the archive, matching the server's naming.
    pub fn archive_name(&self, now: DateTime<Utc>) -> String {
        format!(
            "restore_{}_{}.zip",
            self.share_name.replace(['/', '\\'], "_"),
            now.timestamp()
        )
    }
}
