//! CLI configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use forge_chat::ToolConfig;
use forge_vfs::config::load_document;
use forge_vfs::StoreConfig;

/// Combined configuration, e.g.
///
/// ```yaml
/// store:
///   transition_policy: forward-only
/// tools:
///   write_settle_ms: 0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub tools: ToolConfig,
}

impl ForgeConfig {
    /// Load from `path` if given, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                load_document(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_env()
    }

    fn apply_env(mut self) -> Result<Self> {
        self.store = self
            .store
            .apply_env()
            .context("Invalid environment override")?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_vfs::TransitionPolicy;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_yaml_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("forge.yaml");
        fs::write(
            &path,
            "store:\n  transition_policy: forward-only\ntools:\n  write_settle_ms: 5\n",
        )
        .unwrap();

        let config: ForgeConfig = load_document(&path).unwrap();

        assert_eq!(config.store.transition_policy, TransitionPolicy::ForwardOnly);
        assert!(config.store.auto_select_on_create);
        assert_eq!(config.tools.write_settle_ms, 5);
    }

    #[test]
    fn test_load_toml_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("forge.toml");
        fs::write(&path, "[store]\nauto_expand_on_create = false\n").unwrap();

        let config: ForgeConfig = load_document(&path).unwrap();

        assert!(!config.store.auto_expand_on_create);
        assert_eq!(config.tools, ToolConfig::default());
    }

    #[test]
    fn test_missing_config_file_fails() {
        let dir = tempdir().unwrap();
        let err = ForgeConfig::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
