//! Tree projection: flat file list to an ordered, render-ready forest.
//!
//! The projection runs in three steps:
//!
//! 1. Drop files whose path cannot be rendered (see [`path::is_projectable`]).
//! 2. Stable-sort the remaining files by path so the result does not depend
//!    on arrival order. Items sharing a path keep their list order, so the
//!    later one wins below.
//! 3. Insert every file into an arena keyed by `(path, kind)`. Lookups always
//!    go through the index, so a folder or file is never created twice and
//!    no merge pass is needed afterwards.
//!
//! The arena is then materialized into nested [`FileTreeNode`]s, with each
//! level sorted folders-first and by name.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::path;
use crate::types::{FileItem, FileTreeNode, NodeKind};

/// Project the flat file list into a sorted forest.
pub fn project(files: &[Arc<FileItem>]) -> Vec<FileTreeNode> {
    let mut valid: Vec<&Arc<FileItem>> = files
        .iter()
        .filter(|file| path::is_projectable(&file.path))
        .collect();
    valid.sort_by(|a, b| path::normalize(&a.path).cmp(path::normalize(&b.path)));

    let mut arena = Arena::default();
    for file in valid {
        arena.insert(file);
    }
    arena.materialize()
}

/// Ordering of sibling nodes: folders first, then by name.
pub fn compare_nodes(a: &FileTreeNode, b: &FileTreeNode) -> Ordering {
    a.kind.cmp(&b.kind).then_with(|| compare_names(&a.name, &b.name))
}

/// Locale-style name ordering.
///
/// Case-insensitive first; on a tie lowercase sorts before uppercase, and
/// byte order settles anything left.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

#[derive(Debug)]
struct ArenaNode {
    name: String,
    path: String,
    kind: NodeKind,
    children: Vec<usize>,
    file: Option<Arc<FileItem>>,
}

#[derive(Debug, Default)]
struct Arena {
    nodes: Vec<ArenaNode>,
    index: HashMap<(String, NodeKind), usize>,
    roots: Vec<usize>,
}

impl Arena {
    fn insert(&mut self, file: &Arc<FileItem>) {
        let parts: Vec<&str> = path::segments(path::normalize(&file.path)).collect();
        let mut parent = None;
        let mut current = String::new();

        for (i, part) in parts.iter().enumerate() {
            current = path::join(&current, part);

            if i + 1 == parts.len() {
                let id = self.get_or_insert(parent, part, &current, NodeKind::File);
                // Last write wins for items sharing a path.
                self.nodes[id].file = Some(Arc::clone(file));
            } else {
                parent = Some(self.get_or_insert(parent, part, &current, NodeKind::Folder));
            }
        }
    }

    fn get_or_insert(&mut self, parent: Option<usize>, name: &str, path: &str, kind: NodeKind) -> usize {
        let key = (path.to_string(), kind);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }

        let id = self.nodes.len();
        self.nodes.push(ArenaNode {
            name: name.to_string(),
            path: path.to_string(),
            kind,
            children: Vec::new(),
            file: None,
        });
        self.index.insert(key, id);

        match parent {
            Some(p) => self.nodes[p].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn materialize(&self) -> Vec<FileTreeNode> {
        self.build_level(&self.roots)
    }

    fn build_level(&self, ids: &[usize]) -> Vec<FileTreeNode> {
        let mut level: Vec<FileTreeNode> = ids
            .iter()
            .map(|&id| &self.nodes[id])
            .filter(|node| is_renderable(node))
            .map(|node| match node.kind {
                NodeKind::Folder => FileTreeNode {
                    name: node.name.clone(),
                    path: node.path.clone(),
                    kind: NodeKind::Folder,
                    children: Some(self.build_level(&node.children)),
                    file: None,
                },
                NodeKind::File => FileTreeNode {
                    name: node.name.clone(),
                    path: node.path.clone(),
                    kind: NodeKind::File,
                    children: None,
                    file: node.file.clone(),
                },
            })
            .collect();

        level.sort_by(compare_nodes);
        level
    }
}

// Unreachable through `project`, which filters first; kept so a node that
// slips past the filter is dropped instead of rendered broken.
fn is_renderable(node: &ArenaNode) -> bool {
    if !path::is_valid_segment(&node.name) {
        return false;
    }
    match node.kind {
        NodeKind::Folder => true,
        NodeKind::File => node.file.is_some() && path::has_extension(&node.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::FileStatus;
    use crate::types::find_node;

    fn item(path: &str, content: &str) -> Arc<FileItem> {
        Arc::new(FileItem::with_content(path, content, FileStatus::Creating))
    }

    fn names(nodes: &[FileTreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(project(&[]).is_empty());
    }

    #[test]
    fn test_nested_structure() {
        let files = vec![
            item("infra/modules/vpc/main.tf", ""),
            item("infra/modules/vpc/variables.tf", ""),
            item("infra/modules/rds/main.tf", ""),
        ];
        let tree = project(&files);

        assert_eq!(names(&tree), vec!["infra"]);
        let modules = &tree[0].children()[0];
        assert_eq!(modules.name, "modules");
        assert_eq!(modules.path, "infra/modules");
        assert_eq!(names(modules.children()), vec!["rds", "vpc"]);
        assert_eq!(
            names(modules.children()[1].children()),
            vec!["main.tf", "variables.tf"]
        );
    }

    #[test]
    fn test_folders_sort_before_files() {
        let files = vec![
            item("infra/file1.tf", ""),
            item("infra/folder1/sub.tf", ""),
            item("infra/file2.tf", ""),
            item("infra/zzz.tf", ""),
            item("infra/sub/inner.tf", ""),
        ];
        let tree = project(&files);
        let kinds: Vec<NodeKind> = tree[0].children().iter().map(|n| n.kind).collect();

        assert_eq!(
            names(tree[0].children()),
            vec!["folder1", "sub", "file1.tf", "file2.tf", "zzz.tf"]
        );
        assert_eq!(kinds[..2], [NodeKind::Folder, NodeKind::Folder]);
    }

    #[test]
    fn test_order_independence() {
        let forward = project(&[item("x/a.tf", ""), item("x/b.tf", ""), item("x/c.tf", "")]);
        let shuffled = project(&[item("x/c.tf", ""), item("x/a.tf", ""), item("x/b.tf", "")]);

        assert_eq!(forward, shuffled);
        assert_eq!(names(forward[0].children()), vec!["a.tf", "b.tf", "c.tf"]);
    }

    #[test]
    fn test_duplicate_paths_last_write_wins() {
        let files = vec![item("infra/main.tf", "old"), item("infra/main.tf", "new")];
        let tree = project(&files);

        assert_eq!(tree[0].children().len(), 1);
        let node = &tree[0].children()[0];
        assert_eq!(node.file.as_ref().unwrap().content, "new");
    }

    #[test]
    fn test_invalid_paths_are_excluded() {
        let files = vec![
            item("infra/modules/vpc/main.tf", ""),
            item("infra/modules/vpc/invalid", ""),
            item("infra/file.", ""),
            item("   ", ""),
            item("", ""),
            item("///", ""),
            item("infra/../escape.tf", ""),
        ];
        let tree = project(&files);

        assert_eq!(names(&tree), vec!["infra"]);
        assert!(find_node(&tree, "infra/modules/vpc/invalid").is_none());
        assert!(find_node(&tree, "infra/file.").is_none());
        assert!(find_node(&tree, "escape.tf").is_none());
        assert_eq!(tree[0].children().len(), 1);
    }

    #[test]
    fn test_extra_separators_are_collapsed() {
        let files = vec![item("/infra//main.tf", ""), item("infra/outputs.tf/", "")];
        let tree = project(&files);

        assert_eq!(names(&tree), vec!["infra"]);
        assert_eq!(names(tree[0].children()), vec!["main.tf", "outputs.tf"]);
        assert_eq!(tree[0].children()[0].path, "infra/main.tf");
    }

    #[test]
    fn test_file_and_folder_sharing_a_path() {
        let files = vec![item("x/a.tf", ""), item("x/a.tf/inner.tf", "")];
        let tree = project(&files);
        let children = tree[0].children();

        assert_eq!(children.len(), 2);
        assert!(children[0].is_folder());
        assert!(children[1].is_file());
        assert_eq!(children[0].path, children[1].path);
    }

    #[test]
    fn test_file_nodes_share_store_items() {
        let file = item("main.tf", "body");
        let tree = project(std::slice::from_ref(&file));

        assert!(Arc::ptr_eq(tree[0].file.as_ref().unwrap(), &file));
        assert!(tree[0].children.is_none());
    }

    #[test]
    fn test_compare_names() {
        assert_eq!(compare_names("alpha", "Beta"), Ordering::Less);
        assert_eq!(compare_names("b", "B"), Ordering::Less);
        assert_eq!(compare_names("main.tf", "main.tf"), Ordering::Equal);
        assert_eq!(compare_names("outputs.tf", "main.tf"), Ordering::Greater);
    }
}
