//! Error types for the tool-call bridge.

use thiserror::Error;

/// Result type for tool operations
pub type ChatResult<T> = Result<T, ChatError>;

/// Tool-call bridge errors
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] forge_vfs::VfsError),
}

impl ChatError {
    pub fn invalid_arguments(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
