//! Flat folder records → nested tree.

use std::collections::{HashMap, HashSet};

use pdfvault_entity::folder::{FolderRecord, FolderTree, FolderTreeNode};

/// Build the tree hanging off `root`.
///
/// Top-level nodes are the records whose parent equals `root` (`None`
/// selects records without a parent). Siblings keep their input order.
/// Records whose parent chain never reaches `root` are left out, and a
/// chain that comes back to an id already on the current path stops there.
pub fn build_tree(records: &[FolderRecord], root: Option<&str>) -> Vec<FolderTreeNode> {
    let mut by_parent: HashMap<Option<&str>, Vec<&FolderRecord>> = HashMap::new();
    for record in records {
        by_parent
            .entry(record.parent_id.as_deref())
            .or_default()
            .push(record);
    }

    let mut path: HashSet<&str> = root.into_iter().collect();
    children_of(root, &by_parent, &mut path)
}

fn children_of<'a>(
    parent: Option<&'a str>,
    by_parent: &HashMap<Option<&'a str>, Vec<&'a FolderRecord>>,
    path: &mut HashSet<&'a str>,
) -> Vec<FolderTreeNode> {
    let Some(children) = by_parent.get(&parent) else {
        return Vec::new();
    };

    let mut nodes = Vec::with_capacity(children.len());
    for &record in children {
        let id = record.id.as_str();
        if !path.insert(id) {
            continue;
        }
        let grandchildren = children_of(Some(id), by_parent, path);
        path.remove(id);
        nodes.push(FolderTreeNode {
            folder: record.clone(),
            children: grandchildren,
        });
    }
    nodes
}

/// Build a [`FolderTree`] for display.
pub fn build_folder_tree(records: &[FolderRecord], root: Option<&str>) -> FolderTree {
    FolderTree::new(root.map(str::to_string), build_tree(records, root))
}

/// Render a tree as indented lines, one folder per line.
pub fn render_tree_lines(tree: &FolderTree) -> Vec<String> {
    let mut lines = Vec::with_capacity(tree.total_folders);
    let count = tree.roots.len();
    for (i, node) in tree.roots.iter().enumerate() {
        render_node(node, "", i + 1 == count, &mut lines);
    }
    lines
}

fn render_node(node: &FolderTreeNode, prefix: &str, last: bool, lines: &mut Vec<String>) {
    let branch = if last { "└── " } else { "├── " };
    lines.push(format!("{prefix}{branch}{} ({})", node.folder.name, node.folder.id));

    let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        render_node(child, &child_prefix, i + 1 == count, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(nodes: &[FolderTreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.folder.id.as_str()).collect()
    }

    #[test]
    fn test_orphans_are_left_out() {
        let records = vec![
            FolderRecord::new("A", "A", None),
            FolderRecord::new("B", "B", Some("A")),
            FolderRecord::new("C", "C", Some("A")),
            FolderRecord::new("D", "D", Some("X")),
        ];
        let tree = build_tree(&records, None);
        assert_eq!(ids(&tree), vec!["A"]);
        assert_eq!(ids(&tree[0].children), vec!["B", "C"]);
        assert!(tree[0].children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_sibling_order_is_input_order() {
        let records = vec![
            FolderRecord::new("z", "Zoology", None),
            FolderRecord::new("a", "Art", None),
            FolderRecord::new("m", "Maths", None),
        ];
        assert_eq!(ids(&build_tree(&records, None)), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_named_root() {
        let records = vec![
            FolderRecord::new("s1", "Sem 1", Some("base")),
            FolderRecord::new("s2", "Sem 2", Some("base")),
            FolderRecord::new("dbms", "DBMS", Some("s2")),
        ];
        let tree = build_tree(&records, Some("base"));
        assert_eq!(ids(&tree), vec!["s1", "s2"]);
        assert_eq!(ids(&tree[1].children), vec!["dbms"]);

        assert!(build_tree(&records, Some("missing")).is_empty());
        assert!(build_tree(&[], None).is_empty());
    }

    #[test]
    fn test_cycles_terminate() {
        // A -> B -> A, unreachable from the implicit root.
        let cycle = vec![
            FolderRecord::new("A", "A", Some("B")),
            FolderRecord::new("B", "B", Some("A")),
        ];
        assert!(build_tree(&cycle, None).is_empty());

        // Entered through one of its members.
        let tree = build_tree(&cycle, Some("A"));
        assert_eq!(ids(&tree), vec!["B"]);
        assert!(tree[0].children.is_empty());

        // Self-parented folder.
        let selfish = vec![FolderRecord::new("S", "S", Some("S"))];
        let tree = build_tree(&selfish, Some("S"));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_cycle_below_root_is_cut() {
        // R -> A -> B -> C -> A
        let records = vec![
            FolderRecord::new("A", "A", Some("R")),
            FolderRecord::new("A2", "A again", Some("C")),
            FolderRecord::new("B", "B", Some("A")),
            FolderRecord::new("C", "C", Some("B")),
            FolderRecord::new("A", "A dup", Some("C")),
        ];
        let tree = build_folder_tree(&records, Some("R"));
        assert_eq!(tree.roots.len(), 1);
        let c = &tree.roots[0].children[0].children[0];
        assert_eq!(c.folder.id, "C");
        // "A" is on the path already; "A2" is a fresh id and is kept.
        assert_eq!(ids(&c.children), vec!["A2"]);
        assert_eq!(tree.total_folders, 4);
    }

    #[test]
    fn test_deterministic() {
        let records: Vec<FolderRecord> = (0..50)
            .map(|i| {
                let parent = (i > 0).then(|| format!("f{}", i / 3));
                FolderRecord::new(format!("f{i}"), format!("Folder {i}"), parent.as_deref())
            })
            .collect();
        let first = build_tree(&records, None);
        let second = build_tree(&records, None);
        assert_eq!(first, second);
        assert_eq!(first.iter().map(FolderTreeNode::size).sum::<usize>(), 50);
    }

    #[test]
    fn test_render_lines() {
        let records = vec![
            FolderRecord::new("A", "Sem 1", None),
            FolderRecord::new("B", "Maths", Some("A")),
            FolderRecord::new("C", "Physics", Some("A")),
            FolderRecord::new("D", "Sem 2", None),
        ];
        let lines = render_tree_lines(&build_folder_tree(&records, None));
        assert_eq!(
            lines,
            vec![
                "├── Sem 1 (A)",
                "│   ├── Maths (B)",
                "│   └── Physics (C)",
                "└── Sem 2 (D)",
            ]
        );
    }
}
