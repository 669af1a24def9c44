//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use super::model::FolderRecord;

/// A node in a folder tree: one folder plus its children in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderTreeNode {
    /// The folder at this node.
    pub folder: FolderRecord,
    /// Child folder nodes.
    pub children: Vec<FolderTreeNode>,
}

impl FolderTreeNode {
    /// Create a leaf node.
    pub fn leaf(folder: FolderRecord) -> Self {
        Self {
            folder,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(FolderTreeNode::size).sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(FolderTreeNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// A complete folder tree hanging off a root folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderTree {
    /// The root folder the tree hangs off (`None` for the implicit root).
    pub root_id: Option<String>,
    /// Top-level nodes.
    pub roots: Vec<FolderTreeNode>,
    /// Total number of folders in the tree.
    pub total_folders: usize,
}

impl FolderTree {
    /// Wrap a set of top-level nodes.
    pub fn new(root_id: Option<String>, roots: Vec<FolderTreeNode>) -> Self {
        let total_folders = roots.iter().map(FolderTreeNode::size).sum();
        Self {
            root_id,
            roots,
            total_folders,
        }
    }

    /// Create an empty folder tree.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the tree has no folders.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_depth() {
        let tree = FolderTreeNode {
            folder: FolderRecord::new("A", "Sem 1", None),
            children: vec![
                FolderTreeNode {
                    folder: FolderRecord::new("B", "Maths", Some("A")),
                    children: vec![FolderTreeNode::leaf(FolderRecord::new(
                        "D",
                        "Unit 1",
                        Some("B"),
                    ))],
                },
                FolderTreeNode::leaf(FolderRecord::new("C", "Physics", Some("A"))),
            ],
        };
        assert_eq!(tree.size(), 4);
        assert_eq!(tree.depth(), 3);
        assert_eq!(FolderTree::new(None, vec![tree]).total_folders, 4);
    }
}
