//! File lifecycle states and the transition table between them.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a virtual file.
///
/// The natural order is `Creating -> Writing -> Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Announced by the agent, no content yet
    Creating,
    /// Content is streaming in
    Writing,
    /// The agent finished the file
    Complete,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Creating => "creating",
            FileStatus::Writing => "writing",
            FileStatus::Complete => "complete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "creating" => Some(FileStatus::Creating),
            "writing" => Some(FileStatus::Writing),
            "complete" => Some(FileStatus::Complete),
            _ => None,
        }
    }

    /// Human-readable label shown next to a file in an editor header.
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Creating => "Creating...",
            FileStatus::Writing => "Writing...",
            FileStatus::Complete => "Ready",
        }
    }

    /// Whether content is still expected for this file.
    pub fn is_pending(&self) -> bool {
        !matches!(self, FileStatus::Complete)
    }

    /// Classify a move from `self` to `to`.
    pub fn transition(&self, to: FileStatus) -> Transition {
        use std::cmp::Ordering;

        match to.cmp(self) {
            Ordering::Greater => Transition::Forward,
            Ordering::Equal => Transition::Same,
            Ordering::Less => Transition::Backward,
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of a requested status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Forward,
    Same,
    Backward,
}

/// How the store treats status changes that move backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionPolicy {
    /// Apply every transition, including backward ones.
    #[default]
    Permissive,
    /// Ignore transitions that move back to an earlier status.
    ForwardOnly,
}

impl TransitionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPolicy::Permissive => "permissive",
            TransitionPolicy::ForwardOnly => "forward-only",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "permissive" => Some(TransitionPolicy::Permissive),
            "forward-only" | "strict" => Some(TransitionPolicy::ForwardOnly),
            _ => None,
        }
    }

    /// Whether a transition of the given kind may be applied.
    pub fn allows(&self, transition: Transition) -> bool {
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::ForwardOnly => transition != Transition::Backward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use FileStatus::*;

        assert_eq!(Creating.transition(Writing), Transition::Forward);
        assert_eq!(Creating.transition(Complete), Transition::Forward);
        assert_eq!(Writing.transition(Complete), Transition::Forward);
        assert_eq!(Writing.transition(Writing), Transition::Same);
        assert_eq!(Complete.transition(Writing), Transition::Backward);
        assert_eq!(Complete.transition(Creating), Transition::Backward);
        assert_eq!(Writing.transition(Creating), Transition::Backward);
    }

    #[test]
    fn test_policy_allows() {
        assert!(TransitionPolicy::Permissive.allows(Transition::Backward));
        assert!(TransitionPolicy::ForwardOnly.allows(Transition::Same));
        assert!(TransitionPolicy::ForwardOnly.allows(Transition::Forward));
        assert!(!TransitionPolicy::ForwardOnly.allows(Transition::Backward));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            TransitionPolicy::from_str("forward_only"),
            Some(TransitionPolicy::ForwardOnly)
        );
        assert_eq!(
            TransitionPolicy::from_str(" Permissive "),
            Some(TransitionPolicy::Permissive)
        );
        assert_eq!(TransitionPolicy::from_str("lenient"), None);
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&FileStatus::Writing).unwrap();
        assert_eq!(json, "\"writing\"");

        let status: FileStatus = serde_json::from_str("\"complete\"").unwrap();
        assert_eq!(status, FileStatus::Complete);
        assert_eq!(status.label(), "Ready");
    }
}
