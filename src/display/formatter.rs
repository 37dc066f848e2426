use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{sorted_children, BackupDescriptor, SelectionSet, TreeNode};

use super::i18n::{Locale, Message};
use super::size::format_bytes;
use super::time::{format_modified, format_relative};

/// Format options for tree output
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Maximum depth to display
    pub max_depth: Option<usize>,
    /// Show only the first N entries per directory
    pub top_n: Option<usize>,
    /// Show file sizes
    pub show_sizes: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(3),
            top_n: Some(50),
            show_sizes: true,
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    pub fn with_sizes(mut self, show: bool) -> Self {
        self.show_sizes = show;
        self
    }

    pub fn unlimited() -> Self {
        Self {
            max_depth: None,
            top_n: None,
            show_sizes: true,
        }
    }
}

/// Flat, serializable view of a listing entry (no children).
#[derive(Debug, Clone, Serialize)]
pub struct SummarizedEntry {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mod_time: Option<DateTime<Utc>>,
    pub selected: bool,
}

impl SummarizedEntry {
    pub fn from_node(node: &TreeNode, selection: &SelectionSet) -> Self {
        Self {
            name: node.name.clone(),
            path: node.path.clone(),
            is_dir: node.is_dir,
            size: if node.is_dir { node.total_size() } else { node.size },
            mod_time: node.modified_at,
            selected: selection.contains(&node.path),
        }
    }
}

/// Format a node and its descendants as a tree string
pub fn format_tree(node: &TreeNode, options: &FormatOptions) -> String {
    let mut output = String::new();
    format_tree_recursive(node, &mut output, "", true, 0, options);
    output
}

fn format_tree_recursive(
    node: &TreeNode,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    options: &FormatOptions,
) {
    if let Some(max_depth) = options.max_depth {
        if depth > max_depth {
            return;
        }
    }

    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    let name = if depth == 0 {
        node.path.clone()
    } else if node.is_dir {
        format!("{}/", node.name)
    } else {
        node.name.clone()
    };

    if options.show_sizes {
        let size = if node.is_dir { node.total_size() } else { node.size };
        output.push_str(&format!(
            "{}{}{}  ({})\n",
            prefix,
            connector,
            name,
            format_bytes(size)
        ));
    } else {
        output.push_str(&format!("{}{}{}\n", prefix, connector, name));
    }

    if !node.is_dir || node.children.is_empty() {
        return;
    }

    let new_prefix = if depth == 0 {
        String::new()
    } else if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let children = sorted_children(node);
    let shown = options.top_n.map_or(children.len(), |n| n.min(children.len()));
    let remaining = children.len() - shown;

    for (i, child) in children.iter().take(shown).enumerate() {
        let is_last_child = i == shown - 1 && remaining == 0;
        format_tree_recursive(child, output, &new_prefix, is_last_child, depth + 1, options);
    }

    if remaining > 0 {
        output.push_str(&format!(
            "{}└── ... and {} more entries\n",
            new_prefix, remaining
        ));
    }
}

/// Format the entries of one directory as a table
pub fn format_listing(
    entries: &[&TreeNode],
    selection: &SelectionSet,
    now: DateTime<Utc>,
    locale: Locale,
) -> String {
    if entries.is_empty() {
        return format!("{}\n", locale.text(Message::EmptyDirectory));
    }

    let mut output = String::new();
    output.push_str(&format!("    {:>10}  {:<16}  {}\n", "SIZE", "MODIFIED", "NAME"));

    for entry in entries {
        let mark = if selection.contains(&entry.path) {
            "[x]"
        } else {
            "[ ]"
        };
        let (size, modified, name) = if entry.is_dir {
            ("-".to_string(), "-".to_string(), format!("{}/", entry.name))
        } else {
            (
                format_bytes(entry.size),
                format_modified(entry.modified_at, now, locale),
                entry.name.clone(),
            )
        };
        output.push_str(&format!(
            "{} {:>10}  {:<16}  {}\n",
            mark, size, modified, name
        ));
    }

    output
}

/// Format the backup list as a table
pub fn format_backups(backups: &[BackupDescriptor], now: DateTime<Utc>, locale: Locale) -> String {
    if backups.is_empty() {
        return format!("{}\n", locale.text(Message::NoBackups));
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<28}  {:>7}  {:>10}  {:<16}  {}\n",
        "KEY", "FILES", "SIZE", "MODIFIED", "BACKUP"
    ));

    for backup in backups {
        output.push_str(&format!(
            "{:<28}  {:>7}  {:>10}  {:<16}  {}\n",
            backup.key().to_string(),
            backup.file_count,
            format_bytes(backup.total_size),
            format_relative(backup.last_modified, now, locale),
            backup.label()
        ));
    }

    output
}
