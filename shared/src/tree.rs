//! Hierarchical view over a flat, path-keyed listing.
//!
//! [`build_tree`] walks every record's path prefixes, synthesizes the
//! intermediate directories on demand and attaches records at their full
//! path. Nodes live in an index-based arena while building and are turned
//! into an owned, sorted [`TreeNode`] hierarchy at the end.

use crate::paths::{self, ROOT_PATH};
use crate::records::{DIRECTORY_CONTENT_TYPE, FileRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub path: String,
    pub filename: String,
    pub kind: NodeKind,
    /// Backing record, `None` for the synthetic root and synthesized directories
    pub record: Option<FileRecord>,
    pub children: Vec<TreeNode>,
}

/// Result of a build: the root plus every path that appeared more than once.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltTree {
    pub root: TreeNode,
    pub duplicate_paths: Vec<String>,
}

impl TreeNode {
    pub fn is_root(&self) -> bool {
        paths::is_root(&self.path)
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn size_bytes(&self) -> u64 {
        self.record.as_ref().map_or(0, |record| record.size_bytes)
    }

    pub fn uploaded_at(&self) -> Option<&str> {
        self.record.as_ref().and_then(|record| record.uploaded_at.as_deref())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.record.as_ref().and_then(|record| record.content_type.as_deref())
    }

    /// Record form of this node, synthesized for directories without one.
    pub fn to_record(&self) -> FileRecord {
        match &self.record {
            Some(record) => record.clone(),
            None => FileRecord::new(self.path.clone()).with_content_type(DIRECTORY_CONTENT_TYPE),
        }
    }

    /// Find a node anywhere in this subtree by its full path.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }

    /// Whether `path` is this node or lies somewhere beneath it.
    ///
    /// Walks the subtree instead of comparing prefixes, so `a/bc` is never
    /// mistaken for a child of `a/b`.
    pub fn contains(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// Paths of every record-backed node, in tree order.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.visit(&mut |node| {
            if node.record.is_some() {
                paths.push(node.path.clone());
            }
        });
        paths
    }

    /// Depth-first, pre-order traversal.
    pub fn visit<'a>(&'a self, visitor: &mut impl FnMut(&'a TreeNode)) {
        visitor(self);
        for child in &self.children {
            child.visit(visitor);
        }
    }

    /// Number of nodes in this subtree, root included.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn sort_recursive(&mut self) {
        self.children.sort_by(compare_siblings);
        for child in &mut self.children {
            child.sort_recursive();
        }
    }
}

/// Directories first, then lexicographic by filename.
pub fn compare_siblings(left: &TreeNode, right: &TreeNode) -> Ordering {
    match (left.kind, right.kind) {
        (NodeKind::Directory, NodeKind::File) => Ordering::Less,
        (NodeKind::File, NodeKind::Directory) => Ordering::Greater,
        _ => left.filename.cmp(&right.filename),
    }
}

struct ArenaNode {
    path: String,
    filename: String,
    record: Option<FileRecord>,
    declared_directory: bool,
    children: Vec<usize>,
}

struct Arena {
    nodes: Vec<ArenaNode>,
    index: HashMap<String, usize>,
}

impl Arena {
    const ROOT: usize = 0;

    fn new(root_label: &str) -> Self {
        Self {
            nodes: vec![ArenaNode {
                path: ROOT_PATH.to_string(),
                filename: root_label.to_string(),
                record: None,
                declared_directory: true,
                children: Vec::new(),
            }],
            index: HashMap::new(),
        }
    }

    /// Index of the node at `path`, synthesizing it under `parent` if needed.
    fn node_at(&mut self, path: &str, parent: usize) -> usize {
        if let Some(&existing) = self.index.get(path) {
            return existing;
        }
        let id = self.nodes.len();
        self.nodes.push(ArenaNode {
            path: path.to_string(),
            filename: paths::file_name(path).to_string(),
            record: None,
            declared_directory: false,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        self.index.insert(path.to_string(), id);
        id
    }

    fn into_tree(mut self, id: usize) -> TreeNode {
        let children = std::mem::take(&mut self.nodes[id].children);
        self.materialize(id, children)
    }

    fn materialize(&mut self, id: usize, children: Vec<usize>) -> TreeNode {
        let children: Vec<TreeNode> = children
            .into_iter()
            .map(|child| {
                let grandchildren = std::mem::take(&mut self.nodes[child].children);
                self.materialize(child, grandchildren)
            })
            .collect();
        let node = &mut self.nodes[id];
        let kind = if id == Self::ROOT || node.declared_directory || !children.is_empty() {
            NodeKind::Directory
        } else {
            NodeKind::File
        };
        TreeNode {
            path: std::mem::take(&mut node.path),
            filename: std::mem::take(&mut node.filename),
            kind,
            record: node.record.take(),
            children,
        }
    }
}

/// Build the project tree from an unordered listing.
///
/// Duplicate paths follow "last one wins"; they are reported in
/// [`BuiltTree::duplicate_paths`] so callers can surface them.
pub fn build_tree<'a>(
    records: impl IntoIterator<Item = &'a FileRecord>,
    root_label: &str,
) -> BuiltTree {
    let mut arena = Arena::new(root_label);
    let mut duplicate_paths = Vec::new();

    for raw in records {
        let record = raw.normalized();
        if record.path.is_empty() {
            continue;
        }

        let mut parent = Arena::ROOT;
        let mut prefix = String::new();
        for segment in paths::segments(&record.path) {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            parent = arena.node_at(&prefix, parent);
        }

        let node = &mut arena.nodes[parent];
        if node.record.is_some() && !duplicate_paths.contains(&record.path) {
            duplicate_paths.push(record.path.clone());
        }
        node.declared_directory |= raw.declares_directory();
        node.record = Some(record);
    }

    let mut root = arena.into_tree(Arena::ROOT);
    root.sort_recursive();
    BuiltTree {
        root,
        duplicate_paths,
    }
}
