//! Core types for agent tool calls.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use forge_vfs::FileStore;

use crate::error::ChatResult;

/// Store shared between the tool handlers and the views.
///
/// There is one logical writer per session; the mutex only serializes
/// handlers that run on different tasks.
pub type SharedStore = Arc<Mutex<FileStore>>;

/// Wrap a store for sharing.
pub fn shared(store: FileStore) -> SharedStore {
    Arc::new(Mutex::new(store))
}

/// Lifecycle of a single tool call as reported by the agent runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ToolCallStatus {
    /// Arguments are still streaming in
    InProgress,
    /// Arguments are final and the handler runs
    Executing,
    /// The handler returned
    Complete,
}

/// Partial arguments of a `writeToFile` call.
///
/// Both fields may be missing while the agent is still streaming them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriteToFileArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl WriteToFileArgs {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            content: Some(content.into()),
        }
    }

    /// Path if present and non-empty.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    /// Content if present and non-empty.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

/// One recorded tool call snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Tool name, e.g. `writeToFile`
    pub tool: String,
    pub status: ToolCallStatus,
    /// Raw arguments as streamed so far
    #[serde(default)]
    pub args: serde_json::Value,
}

/// Load a recorded tool-call script (JSON array, JSON lines or YAML list).
pub fn load_tool_script(path: &Path) -> ChatResult<Vec<ToolCallRecord>> {
    Ok(forge_vfs::config::load_list(path)?)
}

fn default_settle_ms() -> u64 {
    200
}

/// Tool handler configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolConfig {
    /// Pause after a write before replying, letting the view catch up
    #[serde(default = "default_settle_ms")]
    pub write_settle_ms: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            write_settle_ms: default_settle_ms(),
        }
    }
}

impl ToolConfig {
    pub fn write_settle(&self) -> Duration {
        Duration::from_millis(self.write_settle_ms)
    }
}
