use std::cmp::{Ordering, Reverse};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::node::TreeNode;

/// Sort key for an entry name, compared level by level: base letters with
/// case and accents folded away, then accents (`e` before `é`), then case
/// (lowercase before uppercase).
fn name_key(name: &str) -> (String, String, Reverse<String>) {
    let base: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    let accented: String = name.nfc().collect::<String>().to_lowercase();
    (base, accented, Reverse(name.nfc().collect()))
}

/// Compare entry names the way a file browser lists them: accent and
/// case-insensitive first, unaccented before accented and lowercase before
/// uppercase on ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    name_key(a).cmp(&name_key(b))
}

/// Compare two entries: directories before files, then by name.
pub fn compare_entries(a: &TreeNode, b: &TreeNode) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Children of a node in listing order. Empty for files.
pub fn sorted_children(node: &TreeNode) -> Vec<&TreeNode> {
    let mut entries: Vec<&TreeNode> = node.children.values().collect();
    entries.sort_by_cached_key(|e| (!e.is_dir, name_key(&e.name)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[&TreeNode]) -> Vec<String> {
        entries.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_directories_first() {
        let mut root = TreeNode::new_dir("/");
        root.insert_child(TreeNode::new_file("/b.txt", 1, None));
        root.insert_child(TreeNode::new_dir("/A"));
        root.insert_child(TreeNode::new_file("/a.txt", 1, None));

        assert_eq!(names(&sorted_children(&root)), vec!["A", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_case_insensitive_within_group() {
        let mut root = TreeNode::new_dir("/");
        root.insert_child(TreeNode::new_dir("/photos"));
        root.insert_child(TreeNode::new_dir("/Music"));
        root.insert_child(TreeNode::new_dir("/archive"));
        root.insert_child(TreeNode::new_file("/Zeta.md", 1, None));
        root.insert_child(TreeNode::new_file("/alpha.md", 1, None));

        assert_eq!(
            names(&sorted_children(&root)),
            vec!["archive", "Music", "photos", "alpha.md", "Zeta.md"]
        );
    }

    #[test]
    fn test_lowercase_wins_ties() {
        assert_eq!(compare_names("a", "A"), Ordering::Less);
        assert_eq!(compare_names("A", "a"), Ordering::Greater);
        assert_eq!(compare_names("a", "a"), Ordering::Equal);
    }

    #[test]
    fn test_accents_sort_with_their_base_letter() {
        let mut root = TreeNode::new_dir("/");
        root.insert_child(TreeNode::new_file("/zeta.txt", 1, None));
        root.insert_child(TreeNode::new_file("/été.txt", 1, None));
        root.insert_child(TreeNode::new_file("/fiche.txt", 1, None));
        root.insert_child(TreeNode::new_dir("/École"));
        root.insert_child(TreeNode::new_dir("/documents"));

        assert_eq!(
            names(&sorted_children(&root)),
            vec!["documents", "École", "été.txt", "fiche.txt", "zeta.txt"]
        );
    }

    #[test]
    fn test_unaccented_wins_ties() {
        assert_eq!(compare_names("resume", "résumé"), Ordering::Less);
        assert_eq!(compare_names("Élan", "elan"), Ordering::Greater);
        assert_eq!(compare_names("cote", "côté"), Ordering::Less);
        // Decomposed and precomposed forms are the same name
        assert_eq!(compare_names("e\u{301}t\u{e9}", "\u{e9}t\u{e9}"), Ordering::Equal);
    }

    #[test]
    fn test_file_has_no_children() {
        let file = TreeNode::new_file("/a.txt", 1, None);
        assert!(sorted_children(&file).is_empty());
    }
}
