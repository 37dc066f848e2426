mod backup;
mod listing;
mod node;
pub mod path;
mod selection;

pub use backup::{BackupDescriptor, BackupKey};
pub use listing::{compare_entries, compare_names, sorted_children};
pub use node::TreeNode;
pub use path::Crumb;
pub use selection::SelectionSet;
