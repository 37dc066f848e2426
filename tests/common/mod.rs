//! In-memory restore API shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use reqwest::Url;
use restore_browser::api::{BulkDownloadRequest, DownloadRequest, Endpoints, RestoreApi};
use restore_browser::error::{DownloadError, LoadError};
use restore_browser::model::{BackupDescriptor, TreeNode};

/// The single backup from the end-to-end scenario.
pub fn docs_backup() -> BackupDescriptor {
    backup(1, "srv1", "docs")
}

pub fn backup(peer_id: i64, server: &str, share: &str) -> BackupDescriptor {
    BackupDescriptor {
        peer_id,
        peer_name: Some("offsite".to_string()),
        source_server: server.to_string(),
        share_name: share.to_string(),
        file_count: 3,
        total_size: 4096,
        last_modified: "2024-01-01T00:00:00Z".parse().unwrap(),
    }
}

/// `/docs/a.txt` under a root directory, as the server sends it.
pub const DOCS_TREE: &str = r#"{
    "name": "", "path": "/", "is_dir": true,
    "children": {
        "docs": {
            "name": "docs", "path": "/docs", "is_dir": true,
            "children": {
                "a.txt": {"name": "a.txt", "path": "/docs/a.txt", "is_dir": false, "size": 10}
            }
        }
    }
}"#;

/// The same shape with relative node paths, as some servers send them.
pub const RELATIVE_TREE: &str = r#"{
    "name": "/", "path": "/", "is_dir": true,
    "children": {
        "docs": {
            "name": "docs", "path": "docs", "is_dir": true,
            "children": {
                "a.txt": {"name": "a.txt", "path": "docs/a.txt", "is_dir": false, "size": 10},
                "sub": {
                    "name": "sub", "path": "docs/sub", "is_dir": true,
                    "children": {
                        "b.txt": {"name": "b.txt", "path": "docs/sub/b.txt", "is_dir": false, "size": 20}
                    }
                }
            }
        },
        "notes.md": {"name": "notes.md", "path": "notes.md", "is_dir": false, "size": 5}
    }
}"#;

pub fn relative_tree() -> TreeNode {
    TreeNode::from_json(RELATIVE_TREE.as_bytes()).unwrap()
}

/// A wider tree for navigation and sorting tests.
pub fn sample_tree() -> TreeNode {
    let mut root = TreeNode::new_dir("/");

    let mut docs = TreeNode::new_dir("/docs");
    docs.insert_child(TreeNode::new_file("/docs/b.txt", 2048, None));
    docs.insert_child(TreeNode::new_dir("/docs/A"));
    docs.insert_child(TreeNode::new_file("/docs/a.txt", 10, None));

    let mut photos = TreeNode::new_dir("/photos");
    let mut year = TreeNode::new_dir("/photos/2024");
    year.insert_child(TreeNode::new_file("/photos/2024/beach.jpg", 1_572_864, None));
    photos.insert_child(year);

    root.insert_child(docs);
    root.insert_child(photos);
    root.insert_child(TreeNode::new_file("/readme.md", 3, None));
    root
}

/// Requests the fake has served, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Served {
    Backups,
    Tree(String),
    File(Url),
    Bulk(Url, Vec<String>),
}

pub struct FakeApi {
    endpoints: Endpoints,
    backups: Vec<BackupDescriptor>,
    trees: HashMap<String, TreeNode>,
    delays: HashMap<String, Duration>,
    pub served: Mutex<Vec<Served>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            endpoints: Endpoints::new(Url::parse("http://nas.local:8080").unwrap()),
            backups: Vec::new(),
            trees: HashMap::new(),
            delays: HashMap::new(),
            served: Mutex::new(Vec::new()),
        }
    }

    /// Offer `backup` with the given tree.
    pub fn with_backup(mut self, backup: BackupDescriptor, tree: TreeNode) -> Self {
        self.trees.insert(backup.share_name.clone(), tree);
        self.backups.push(backup);
        self
    }

    /// Offer `backup` but fail to load its tree.
    pub fn with_broken_backup(mut self, backup: BackupDescriptor) -> Self {
        self.backups.push(backup);
        self
    }

    /// Hold the tree load of `share` for `delay`.
    pub fn with_delay(mut self, share: &str, delay: Duration) -> Self {
        self.delays.insert(share.to_string(), delay);
        self
    }

    pub fn served(&self) -> Vec<Served> {
        self.served.lock().unwrap().clone()
    }
}

impl RestoreApi for FakeApi {
    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn list_backups(&self) -> Result<Vec<BackupDescriptor>, LoadError> {
        self.served.lock().unwrap().push(Served::Backups);
        Ok(self.backups.clone())
    }

    fn load_tree(&self, backup: &BackupDescriptor) -> Result<TreeNode, LoadError> {
        if let Some(delay) = self.delays.get(&backup.share_name) {
            thread::sleep(*delay);
        }
        self.served
            .lock()
            .unwrap()
            .push(Served::Tree(backup.share_name.clone()));
        self.trees
            .get(&backup.share_name)
            .cloned()
            .ok_or_else(|| LoadError::Malformed(format!("no tree for {}", backup.share_name)))
    }

    fn download_file(
        &self,
        request: &DownloadRequest,
        out: &mut dyn Write,
    ) -> Result<u64, DownloadError> {
        self.served
            .lock()
            .unwrap()
            .push(Served::File(request.url.clone()));
        let body = format!("contents of {}", request.path);
        out.write_all(body.as_bytes())?;
        Ok(body.len() as u64)
    }

    fn download_bulk(
        &self,
        request: &BulkDownloadRequest,
        out: &mut dyn Write,
    ) -> Result<u64, DownloadError> {
        self.served
            .lock()
            .unwrap()
            .push(Served::Bulk(request.url.clone(), request.paths.clone()));
        out.write_all(b"PK\x05\x06")?;
        Ok(4)
    }
}
