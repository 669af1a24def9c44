//! Folder domain entities.

pub mod model;
pub mod tree;

pub use model::{Folder, FolderRecord};
pub use tree::{FolderTree, FolderTreeNode};
