use crate::paths;
use crate::tree::TreeNode;
use indexmap::IndexSet;

/// Expand/collapse state for every node of one tree, keyed by path.
///
/// Non-root nodes start collapsed and are expanded while their path is in the
/// set. The synthetic root starts expanded and tracks its own flag, so
/// [`ExpandedPaths::collapse_all`] can restore it to that default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpandedPaths {
    expanded: IndexSet<String>,
    root_collapsed: bool,
}

impl ExpandedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        if paths::is_root(path) {
            !self.root_collapsed
        } else {
            self.expanded.contains(path)
        }
    }

    /// Flip one node. Returns the new state.
    pub fn toggle(&mut self, path: &str) -> bool {
        let expanded = !self.is_expanded(path);
        self.set_expanded(path, expanded);
        expanded
    }

    pub fn set_expanded(&mut self, path: &str, expanded: bool) {
        if paths::is_root(path) {
            self.root_collapsed = !expanded;
        } else if expanded {
            self.expanded.insert(path.to_string());
        } else {
            self.expanded.shift_remove(path);
        }
    }

    /// Close every node; the root goes back to its default.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.root_collapsed = false;
    }

    /// Drop entries for paths that are no longer directories in `tree`.
    pub fn retain_existing(&mut self, tree: &TreeNode) {
        self.expanded
            .retain(|path| tree.find(path).is_some_and(TreeNode::is_directory));
    }

    pub fn expanded_paths(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::FileRecord;
    use crate::tree::build_tree;

    #[test]
    fn defaults() {
        let state = ExpandedPaths::new();
        assert!(state.is_expanded(paths::ROOT_PATH));
        assert!(!state.is_expanded("a"));
    }

    #[test]
    fn toggle_affects_only_that_node() {
        let mut state = ExpandedPaths::new();
        assert!(state.toggle("a"));
        assert!(state.is_expanded("a"));
        assert!(!state.is_expanded("a/c"));
        assert!(state.is_expanded(paths::ROOT_PATH));

        assert!(!state.toggle("a"));
        assert!(!state.is_expanded("a"));
    }

    #[test]
    fn collapse_all_closes_everything_and_restores_root_default() {
        let mut state = ExpandedPaths::new();
        state.set_expanded("a", true);
        state.set_expanded("a/c", true);
        state.set_expanded("x", true);
        state.set_expanded(paths::ROOT_PATH, false);

        state.collapse_all();

        for path in ["a", "a/c", "x"] {
            assert!(!state.is_expanded(path));
        }
        assert!(state.is_expanded(paths::ROOT_PATH));
        assert_eq!(state.expanded_paths().count(), 0);
    }

    #[test]
    fn retain_existing_prunes_vanished_directories() {
        let records = vec![FileRecord::new("a/b.txt"), FileRecord::new("keep/x.txt")];
        let built = build_tree(&records, "root");

        let mut state = ExpandedPaths::new();
        state.set_expanded("a", true);
        state.set_expanded("keep", true);
        state.set_expanded("gone", true);
        state.set_expanded("a/b.txt", true);

        state.retain_existing(&built.root);
        assert_eq!(state.expanded_paths().collect::<Vec<_>>(), vec!["a", "keep"]);
    }
}
