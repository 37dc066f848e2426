use std::collections::HashSet;

/// Set of selected item paths, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path. Returns false if it was already selected.
    pub fn insert(&mut self, path: &str) -> bool {
        if !self.members.insert(path.to_string()) {
            return false;
        }
        self.order.push(path.to_string());
        true
    }

    /// Remove a path. Returns false if it was not selected.
    pub fn remove(&mut self, path: &str) -> bool {
        if !self.members.remove(path) {
            return false;
        }
        self.order.retain(|p| p != path);
        true
    }

    /// Flip membership of a path, returning the new membership.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.remove(path) {
            false
        } else {
            self.insert(path)
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.members.contains(path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.order.clone()
    }
}
