//! Core types for the virtual file store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::FileStatus;

/// One virtual file known to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    /// Full `/`-separated path, unique within the store
    pub path: String,
    /// Latest full content snapshot
    #[serde(default)]
    pub content: String,
    /// Lifecycle status
    pub status: FileStatus,
    /// When the file was created
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When content or status last changed
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FileItem {
    /// Create a new, empty file in the `creating` state.
    pub fn new(path: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            content: String::new(),
            status: FileStatus::Creating,
            created_at: Some(created_at),
            updated_at: None,
        }
    }

    /// Build an item without timestamps, e.g. when injecting state.
    pub fn with_content(path: impl Into<String>, content: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            status,
            created_at: None,
            updated_at: None,
        }
    }

    /// Final path segment.
    pub fn name(&self) -> &str {
        crate::path::segments(&self.path).last().unwrap_or("")
    }
}

/// Kind of a projected tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    // Declared first so folders sort ahead of files.
    Folder,
    File,
}

/// A node of the projected file tree.
///
/// Nodes are rebuilt on every read and never stored. File nodes share the
/// store's item through an `Arc`; the snapshot cannot be mutated through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTreeNode {
    /// Final path segment
    pub name: String,
    /// Full path from the root
    pub path: String,
    /// Folder or file
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Ordered children (folders only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileTreeNode>>,
    /// Backing file snapshot (files only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<Arc<FileItem>>,
}

impl FileTreeNode {
    /// Create an empty folder node.
    pub fn folder(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Folder,
            children: Some(Vec::new()),
            file: None,
        }
    }

    /// Create a file node backed by `file`.
    pub fn file(name: impl Into<String>, path: impl Into<String>, file: Arc<FileItem>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File,
            children: None,
            file: Some(file),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Children of a folder, empty for files.
    pub fn children(&self) -> &[FileTreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Status of the backing file, if this is a file node.
    pub fn status(&self) -> Option<FileStatus> {
        self.file.as_ref().map(|f| f.status)
    }

    /// Find a descendant (or self) by full path.
    pub fn find(&self, path: &str) -> Option<&FileTreeNode> {
        if self.path == path {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(path))
    }
}

/// Find a node by full path anywhere in a forest.
pub fn find_node<'a>(forest: &'a [FileTreeNode], path: &str) -> Option<&'a FileTreeNode> {
    forest.iter().find_map(|node| node.find(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_item_creation() {
        let now = Utc::now();
        let item = FileItem::new("infra/main.tf", now);

        assert_eq!(item.status, FileStatus::Creating);
        assert!(item.content.is_empty());
        assert_eq!(item.created_at, Some(now));
        assert_eq!(item.updated_at, None);
        assert_eq!(item.name(), "main.tf");
    }

    #[test]
    fn test_file_item_serde() {
        let item = FileItem::with_content("a.tf", "x", FileStatus::Writing);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["path"], "a.tf");
        assert_eq!(json["status"], "writing");
        assert!(json.get("createdAt").is_none());

        let parsed: FileItem =
            serde_json::from_str(r#"{"path":"b.tf","status":"creating"}"#).unwrap();
        assert_eq!(parsed.content, "");
    }

    #[test]
    fn test_node_serialization() {
        let file = Arc::new(FileItem::with_content("infra/main.tf", "", FileStatus::Complete));
        let mut folder = FileTreeNode::folder("infra", "infra");
        folder
            .children
            .as_mut()
            .unwrap()
            .push(FileTreeNode::file("main.tf", "infra/main.tf", file));

        let json = serde_json::to_value(&folder).unwrap();
        assert_eq!(json["type"], "folder");
        assert_eq!(json["children"][0]["type"], "file");
        assert_eq!(json["children"][0]["file"]["status"], "complete");
        assert!(json["children"][0].get("children").is_none());
    }

    #[test]
    fn test_find_node() {
        let file = Arc::new(FileItem::with_content("a/b.tf", "", FileStatus::Creating));
        let mut folder = FileTreeNode::folder("a", "a");
        folder
            .children
            .as_mut()
            .unwrap()
            .push(FileTreeNode::file("b.tf", "a/b.tf", file));
        let forest = vec![folder];

        assert!(find_node(&forest, "a/b.tf").unwrap().is_file());
        assert!(find_node(&forest, "a").unwrap().is_folder());
        assert!(find_node(&forest, "a/c.tf").is_none());
    }
}
