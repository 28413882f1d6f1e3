//! Rendering of a store for the terminal.

use std::collections::BTreeSet;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use forge_vfs::{render_text, FileStore, FileTreeNode, StoreStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented tree with status markers
    Text,
    /// Pretty-printed JSON report
    Json,
}

/// Snapshot of a store suitable for JSON output.
#[derive(Debug, Serialize)]
pub struct StoreReport<'a> {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub stats: StoreStats,
    #[serde(rename = "selectedFile")]
    pub selected_file: Option<&'a str>,
    #[serde(rename = "expandedFolders")]
    pub expanded_folders: &'a BTreeSet<String>,
    pub tree: Vec<FileTreeNode>,
}

impl<'a> StoreReport<'a> {
    pub fn of(store: &'a FileStore) -> Self {
        Self {
            session_id: store.session_id().to_string(),
            stats: store.stats(),
            selected_file: store.selected_file(),
            expanded_folders: store.expanded_folders(),
            tree: store.file_tree(),
        }
    }
}

/// Format a store in the requested format.
pub fn render(store: &FileStore, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&StoreReport::of(store))?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Text => Ok(render_text(
            &store.file_tree(),
            store.expanded_folders(),
            store.selected_file(),
        )),
    }
}

/// One-line summary of the store's counts.
pub fn summary(stats: &StoreStats) -> String {
    let mut line = format!(
        "{} file(s): {} ready, {} writing, {} creating",
        stats.total, stats.complete, stats.writing, stats.creating
    );
    if stats.hidden > 0 {
        line.push_str(&format!(", {} hidden", stats.hidden));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> FileStore {
        let mut store = FileStore::new();
        store.create_file("infra/main.tf");
        store.stream_content("infra/main.tf", "terraform {}");
        store.complete_file("infra/main.tf");
        store.create_file("README");
        store
    }

    #[test]
    fn test_text_render() {
        let store = sample_store();
        let text = render(&store, OutputFormat::Text).unwrap();

        assert!(text.contains("infra"));
        assert!(text.contains("main.tf ✓"));
        assert!(!text.contains("README"));
    }

    #[test]
    fn test_json_report() {
        let store = sample_store();
        let json: serde_json::Value =
            serde_json::from_str(&render(&store, OutputFormat::Json).unwrap()).unwrap();

        assert_eq!(json["stats"]["total"], 2);
        assert_eq!(json["stats"]["hidden"], 1);
        assert_eq!(json["selectedFile"], "README");
        assert_eq!(json["tree"][0]["name"], "infra");
        assert_eq!(json["tree"][0]["type"], "folder");
    }

    #[test]
    fn test_summary_mentions_hidden_only_when_present() {
        let stats = StoreStats {
            total: 3,
            creating: 1,
            writing: 0,
            complete: 2,
            hidden: 0,
        };
        assert_eq!(summary(&stats), "3 file(s): 2 ready, 0 writing, 1 creating");

        let stats = StoreStats { hidden: 1, ..stats };
        assert!(summary(&stats).ends_with(", 1 hidden"));
    }
}
