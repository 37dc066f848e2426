//! Slash-separated paths inside a backup snapshot.

use serde::Serialize;

/// Path of the snapshot root.
pub const ROOT: &str = "/";

/// Iterate over the non-empty segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Normalize a path to its absolute form (`"docs//a/"` -> `"/docs/a"`).
pub fn normalize(path: &str) -> String {
    let mut out = String::new();
    for segment in segments(path) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        ROOT.to_string()
    } else {
        out
    }
}

/// Join a directory path and a child name.
pub fn join(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    format!("{}/{}", dir, name)
}

/// Parent of a path; the root is its own parent.
pub fn parent(path: &str) -> String {
    let normalized = normalize(path);
    match normalized.rfind('/') {
        Some(0) | None => ROOT.to_string(),
        Some(idx) => normalized[..idx].to_string(),
    }
}

/// Last segment of a path, empty for the root.
pub fn file_name(path: &str) -> &str {
    segments(path).last().unwrap_or("")
}

/// One element of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub name: String,
    pub path: String,
}

/// Breadcrumb trail from the root down to `path`.
pub fn breadcrumbs(path: &str) -> Vec<Crumb> {
    let mut trail = vec![Crumb {
        name: ROOT.to_string(),
        path: ROOT.to_string(),
    }];

    let mut accumulated = String::new();
    for segment in segments(path) {
        accumulated.push('/');
        accumulated.push_str(segment);
        trail.push(Crumb {
            name: segment.to_string(),
            path: accumulated.clone(),
        });
    }

    trail
}
