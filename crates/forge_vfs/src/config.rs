//! Store configuration and document loading.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{VfsError, VfsResult};
use crate::status::TransitionPolicy;

/// Environment variable overriding the transition policy.
pub const TRANSITION_POLICY_ENV: &str = "FORGE_TRANSITION_POLICY";

/// On-disk document formats understood by the loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    /// One JSON value per line
    JsonLines,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> VfsResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "jsonl" | "ndjson" => Ok(Self::JsonLines),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(VfsError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse a single document.
    pub fn parse<T: DeserializeOwned>(&self, content: &str) -> VfsResult<T> {
        match self {
            Self::Json => Ok(serde_json::from_str(content)?),
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
            Self::Toml => Ok(toml::from_str(content)?),
            Self::JsonLines => Err(VfsError::UnsupportedFormat(
                "JSON lines cannot hold a single document".to_string(),
            )),
        }
    }

    /// Parse a sequence of records.
    pub fn parse_list<T: DeserializeOwned>(&self, content: &str) -> VfsResult<Vec<T>> {
        match self {
            Self::JsonLines => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with("//"))
                .map(|line| serde_json::from_str(line).map_err(VfsError::from))
                .collect(),
            Self::Json => Ok(serde_json::from_str(content)?),
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
            Self::Toml => Err(VfsError::UnsupportedFormat(
                "TOML cannot hold a top-level list".to_string(),
            )),
        }
    }
}

/// Read and parse a single document, choosing the format by extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> VfsResult<T> {
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    debug!("Loading {:?} document from {}", format, path.display());
    format.parse(&content)
}

/// Read and parse a list of records, choosing the format by extension.
pub fn load_list<T: DeserializeOwned>(path: &Path) -> VfsResult<Vec<T>> {
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    debug!("Loading {:?} records from {}", format, path.display());
    format.parse_list(&content)
}

fn default_true() -> bool {
    true
}

/// Behavioural switches for a [`FileStore`](crate::FileStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreConfig {
    /// How backward status changes are treated
    #[serde(default)]
    pub transition_policy: TransitionPolicy,
    /// Select a file as soon as it is created
    #[serde(default = "default_true")]
    pub auto_select_on_create: bool,
    /// Expand every ancestor folder of a newly created file
    #[serde(default = "default_true")]
    pub auto_expand_on_create: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            transition_policy: TransitionPolicy::default(),
            auto_select_on_create: true,
            auto_expand_on_create: true,
        }
    }
}

impl StoreConfig {
    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.transition_policy = policy;
        self
    }

    /// Load configuration from a YAML, TOML or JSON file.
    pub fn from_file(path: &Path) -> VfsResult<Self> {
        load_document(path)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> VfsResult<Self> {
        Self::default().apply_env()
    }

    /// Apply environment overrides on top of this configuration.
    pub fn apply_env(self) -> VfsResult<Self> {
        match std::env::var(TRANSITION_POLICY_ENV) {
            Ok(value) => self.apply_policy_override(&value),
            Err(_) => Ok(self),
        }
    }

    fn apply_policy_override(mut self, value: &str) -> VfsResult<Self> {
        self.transition_policy = TransitionPolicy::from_str(value).ok_or_else(|| {
            VfsError::InvalidConfig(format!("{}={}", TRANSITION_POLICY_ENV, value))
        })?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("events.jsonl")).unwrap(),
            DocumentFormat::JsonLines
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("forge.YML")).unwrap(),
            DocumentFormat::Yaml
        );
        assert!(DocumentFormat::from_path(Path::new("events.txt")).is_err());
        assert!(DocumentFormat::from_path(Path::new("events")).is_err());
    }

    #[test]
    fn test_config_defaults_from_partial_yaml() {
        let config: StoreConfig =
            DocumentFormat::Yaml.parse("transition_policy: forward-only\n").unwrap();

        assert_eq!(config.transition_policy, TransitionPolicy::ForwardOnly);
        assert!(config.auto_select_on_create);
        assert!(config.auto_expand_on_create);
    }

    #[test]
    fn test_config_from_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("forge.toml");
        fs::write(&path, "auto_select_on_create = false\n").unwrap();

        let config = StoreConfig::from_file(&path).unwrap();
        assert!(!config.auto_select_on_create);
        assert_eq!(config.transition_policy, TransitionPolicy::Permissive);
    }

    #[test]
    fn test_policy_override() {
        let config = StoreConfig::default()
            .apply_policy_override("strict")
            .unwrap();
        assert_eq!(config.transition_policy, TransitionPolicy::ForwardOnly);

        let err = StoreConfig::default().apply_policy_override("sometimes");
        assert!(matches!(err, Err(VfsError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_json_lines_skips_blank_lines() {
        let values: Vec<serde_json::Value> = DocumentFormat::JsonLines
            .parse_list("{\"a\":1}\n\n// note\n{\"a\":2}\n")
            .unwrap();
        assert_eq!(values.len(), 2);
    }
}
