//! Read-only helpers for tree and editor views.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde::Serialize;

use crate::path;
use crate::status::FileStatus;
use crate::types::{FileItem, FileTreeNode, NodeKind};

/// One visible row of a rendered file tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    /// Nesting level, 0 for roots
    pub depth: usize,
    pub expanded: bool,
    pub selected: bool,
    pub has_children: bool,
    /// Status of the backing file (files only)
    pub status: Option<FileStatus>,
}

/// Flatten a forest into the rows a tree view shows.
///
/// Children of collapsed folders are left out.
pub fn visible_rows(
    forest: &[FileTreeNode],
    expanded: &BTreeSet<String>,
    selected: Option<&str>,
) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_rows(forest, 0, expanded, selected, &mut rows);
    rows
}

fn push_rows(
    nodes: &[FileTreeNode],
    depth: usize,
    expanded: &BTreeSet<String>,
    selected: Option<&str>,
    rows: &mut Vec<TreeRow>,
) {
    for node in nodes {
        let is_expanded = node.is_folder() && expanded.contains(&node.path);
        rows.push(TreeRow {
            name: node.name.clone(),
            path: node.path.clone(),
            kind: node.kind,
            depth,
            expanded: is_expanded,
            selected: selected == Some(node.path.as_str()),
            has_children: !node.children().is_empty(),
            status: node.status(),
        });

        if is_expanded {
            push_rows(node.children(), depth + 1, expanded, selected, rows);
        }
    }
}

/// Editor language identifier for a path.
pub fn language_for(file_path: &str) -> &'static str {
    let name = path::segments(file_path).last().unwrap_or("");
    match path::extension(name).map(|ext| ext.to_lowercase()).as_deref() {
        Some("tf") => "hcl",
        Some("yml") | Some("yaml") => "yaml",
        Some("json") => "json",
        Some("md") => "markdown",
        Some("py") => "python",
        Some("js") | Some("jsx") => "javascript",
        Some("ts") | Some("tsx") => "typescript",
        _ => "plaintext",
    }
}

/// Header data for the editor pane showing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileView {
    pub path: String,
    pub language: &'static str,
    pub status: FileStatus,
    pub status_label: &'static str,
    pub line_count: usize,
    /// UTF-16 code units, as the editor counts them
    pub char_count: usize,
    /// Editing is disabled while content streams in
    pub read_only: bool,
}

impl FileView {
    pub fn of(file: &FileItem) -> Self {
        let line_count = if file.content.is_empty() {
            0
        } else {
            file.content.split('\n').count()
        };

        Self {
            path: file.path.clone(),
            language: language_for(&file.path),
            status: file.status,
            status_label: file.status.label(),
            line_count,
            char_count: file.content.encode_utf16().count(),
            read_only: file.status == FileStatus::Writing,
        }
    }
}

/// Status marker used by the text renderer.
fn marker(status: Option<FileStatus>) -> &'static str {
    match status {
        Some(FileStatus::Creating) => " (creating)",
        Some(FileStatus::Writing) => " (writing)",
        Some(FileStatus::Complete) => " ✓",
        None => "",
    }
}

/// Render the visible part of a forest as indented text.
pub fn render_text(
    forest: &[FileTreeNode],
    expanded: &BTreeSet<String>,
    selected: Option<&str>,
) -> String {
    let mut out = String::new();
    for row in visible_rows(forest, expanded, selected) {
        let indent = "  ".repeat(row.depth);
        let icon = match (row.kind, row.expanded) {
            (NodeKind::Folder, true) => "▾ ",
            (NodeKind::Folder, false) => "▸ ",
            (NodeKind::File, _) => "  ",
        };
        let cursor = if row.selected { " <" } else { "" };
        let _ = writeln!(out, "{}{}{}{}{}", indent, icon, row.name, marker(row.status), cursor);
    }
    out
}
