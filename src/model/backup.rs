use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BrowserError;

/// One restorable backup snapshot as listed by the restore API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupDescriptor {
    pub peer_id: i64,

    /// Display name of the peer holding the backup
    #[serde(default)]
    pub peer_name: Option<String>,

    pub source_server: String,
    pub share_name: String,

    #[serde(default)]
    pub file_count: u64,

    /// Total size in bytes
    #[serde(default)]
    pub total_size: u64,

    pub last_modified: DateTime<Utc>,
}

impl BackupDescriptor {
    /// The unique key of this backup.
    pub fn key(&self) -> BackupKey {
        BackupKey {
            peer_id: self.peer_id,
            source_server: self.source_server.clone(),
            share_name: self.share_name.clone(),
        }
    }

    /// Human label, e.g. `"offsite - docs (from srv1)"`.
    pub fn label(&self) -> String {
        format!(
            "{} - {} (from {})",
            self.peer_name.as_deref().unwrap_or(""),
            self.share_name,
            self.source_server
        )
    }
}

/// The `(peer_id, source_server, share_name)` triple identifying a backup.
///
/// Written as `peer_id:source_server:share_name`; the share name takes
/// everything after the second colon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackupKey {
    pub peer_id: i64,
    pub source_server: String,
    pub share_name: String,
}

impl BackupKey {
    pub fn matches(&self, backup: &BackupDescriptor) -> bool {
        backup.peer_id == self.peer_id
            && backup.source_server == self.source_server
            && backup.share_name == self.share_name
    }

    /// Find the descriptor with this key in a backup list.
    pub fn find<'a>(&self, backups: &'a [BackupDescriptor]) -> Option<&'a BackupDescriptor> {
        backups.iter().find(|b| self.matches(b))
    }
}

impl FromStr for BackupKey {
    type Err = BrowserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BrowserError::InvalidBackupKey(s.to_string());

        let mut parts = s.splitn(3, ':');
        let peer_id = parts
            .next()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .ok_or_else(invalid)?;
        let source_server = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let share_name = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;

        Ok(Self {
            peer_id,
            source_server: source_server.to_string(),
            share_name: share_name.to_string(),
        })
    }
}

impl fmt::Display for BackupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.peer_id, self.source_server, self.share_name)
    }
}
