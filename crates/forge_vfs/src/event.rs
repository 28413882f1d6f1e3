//! File events emitted by the agent tool layer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::load_list;
use crate::error::{VfsError, VfsResult};

/// One file event, as produced upstream and recorded in replay scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileEvent {
    /// The agent started a file
    Create { path: String },
    /// A full content snapshot arrived (not a delta)
    Stream { path: String, content: String },
    /// The agent finished a file
    Complete { path: String },
}

impl FileEvent {
    pub fn create(path: impl Into<String>) -> Self {
        Self::Create { path: path.into() }
    }

    pub fn stream(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Stream {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn complete(path: impl Into<String>) -> Self {
        Self::Complete { path: path.into() }
    }

    /// Path the event refers to.
    pub fn path(&self) -> &str {
        match self {
            Self::Create { path } | Self::Stream { path, .. } | Self::Complete { path } => path,
        }
    }

    /// Short name of the event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Stream { .. } => "stream",
            Self::Complete { .. } => "complete",
        }
    }
}

/// Load a recorded event script (JSON array, JSON lines or YAML list).
pub fn load_script(path: &Path) -> VfsResult<Vec<FileEvent>> {
    load_list(path).map_err(|e| match e {
        VfsError::Json(err) => VfsError::InvalidScript(format!("{}: {}", path.display(), err)),
        VfsError::Yaml(err) => VfsError::InvalidScript(format!("{}: {}", path.display(), err)),
        other => other,
    })
}
