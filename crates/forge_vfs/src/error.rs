//! Error types for the virtual file store.
//!
//! Store mutations never fail; these errors only surface at the edges
//! where configuration and recorded event scripts are read from disk.

use thiserror::Error;

/// Result type alias for file store operations.
pub type VfsResult<T> = Result<T, VfsError>;

/// Errors that can occur while loading store inputs.
#[derive(Error, Debug)]
pub enum VfsError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid event script: {0}")]
    InvalidScript(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_wrapped_errors_render_cause_once() {
        let cause = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let message = cause.to_string();

        let err = VfsError::from(cause);

        assert_eq!(err.to_string(), message);
        assert!(err.source().is_none());
    }
}
