//! The file event store.
//!
//! [`FileStore`] owns every [`FileItem`] of a session together with the UI
//! state (selection and expanded folders). It is driven by file events from
//! the agent tool layer and read by tree and editor views.
//!
//! Mutations never fail. Events that make no sense for the current state
//! (unknown path, duplicate create, empty path) are ignored and reported as
//! [`StoreChange::Ignored`], because the upstream agent may retry, race or
//! send malformed tool calls.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::event::FileEvent;
use crate::path;
use crate::status::FileStatus;
use crate::tree;
use crate::types::{FileItem, FileTreeNode};

/// Snapshot of everything a store holds for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreState {
    /// Known files, in creation order
    #[serde(default)]
    pub files: Vec<Arc<FileItem>>,
    /// Currently selected path (not necessarily an existing file)
    #[serde(rename = "selectedFile", default)]
    pub selected_file: Option<String>,
    /// Paths of expanded folders
    #[serde(rename = "expandedFolders", default)]
    pub expanded_folders: BTreeSet<String>,
}

impl StoreState {
    /// State holding the given files and no UI state.
    pub fn with_files(files: impl IntoIterator<Item = FileItem>) -> Self {
        Self {
            files: files.into_iter().map(Arc::new).collect(),
            ..Self::default()
        }
    }
}

/// Why a mutation left the store untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The path was empty after trimming
    EmptyPath,
    /// A file with this path already exists
    DuplicatePath,
    /// No file with this path exists
    UnknownPath,
    /// The transition policy rejected a move back to an earlier status
    BackwardTransition { from: FileStatus, to: FileStatus },
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "empty path"),
            Self::DuplicatePath => write!(f, "path already exists"),
            Self::UnknownPath => write!(f, "unknown path"),
            Self::BackwardTransition { from, to } => {
                write!(f, "backward transition {} -> {}", from, to)
            }
        }
    }
}

/// Outcome of a store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Applied,
    Ignored(IgnoreReason),
}

impl StoreChange {
    pub fn is_applied(&self) -> bool {
        matches!(self, StoreChange::Applied)
    }
}

/// File counts for a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total: usize,
    pub creating: usize,
    pub writing: usize,
    pub complete: usize,
    /// Files whose path keeps them out of the tree
    pub hidden: usize,
}

/// Virtual file store for one chat session.
pub struct FileStore {
    state: StoreState,
    session_id: Uuid,
    config: StoreConfig,
    clock: Arc<dyn Clock>,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore {
    /// Create an empty store with default configuration.
    pub fn new() -> Self {
        Self::from_state(StoreState::default())
    }

    /// Create an empty store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self::new().config(config)
    }

    /// Create a store from an existing state.
    pub fn from_state(state: StoreState) -> Self {
        Self {
            state,
            session_id: Uuid::new_v4(),
            config: StoreConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the configuration.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the time source.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // Mutations

    /// Register a new file announced by the agent.
    ///
    /// The path is trimmed. The new file is selected and all of its ancestor
    /// folders are expanded so the view reveals it.
    pub fn create_file(&mut self, path: &str) -> StoreChange {
        let path = path::normalize(path);
        if path.is_empty() {
            return self.ignored("create", path, IgnoreReason::EmptyPath);
        }
        if self.contains(path) {
            return self.ignored("create", path, IgnoreReason::DuplicatePath);
        }

        let item = FileItem::new(path, self.clock.now());
        self.state.files.push(Arc::new(item));

        if self.config.auto_select_on_create {
            self.state.selected_file = Some(path.to_string());
        }
        if self.config.auto_expand_on_create {
            self.state.expanded_folders.extend(path::ancestors(path));
        }

        debug!("[{}] Created file: {}", self.session_id, path);
        StoreChange::Applied
    }

    /// Replace the content of an existing file with a new full snapshot.
    pub fn stream_content(&mut self, path: &str, content: impl Into<String>) -> StoreChange {
        self.update("stream", path, FileStatus::Writing, Some(content.into()))
    }

    /// Mark an existing file as complete.
    pub fn complete_file(&mut self, path: &str) -> StoreChange {
        self.update("complete", path, FileStatus::Complete, None)
    }

    /// Point the selection at `path`. The path does not need to exist.
    pub fn select_file(&mut self, path: impl Into<String>) {
        self.state.selected_file = Some(path.into());
    }

    /// Flip a folder between expanded and collapsed.
    ///
    /// Returns whether the folder is expanded afterwards.
    pub fn toggle_folder(&mut self, path: &str) -> bool {
        if self.state.expanded_folders.remove(path) {
            false
        } else {
            self.state.expanded_folders.insert(path.to_string());
            true
        }
    }

    /// Drop all files and UI state, starting a new session.
    pub fn reset_store(&mut self) {
        let previous = self.session_id;
        self.state = StoreState::default();
        self.session_id = Uuid::new_v4();
        info!("Reset file store: session {} -> {}", previous, self.session_id);
    }

    /// Apply a file event from the tool layer.
    pub fn apply(&mut self, event: &FileEvent) -> StoreChange {
        match event {
            FileEvent::Create { path } => self.create_file(path),
            FileEvent::Stream { path, content } => self.stream_content(path, content.as_str()),
            FileEvent::Complete { path } => self.complete_file(path),
        }
    }

    /// Apply a sequence of events, returning how many changed the store.
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a FileEvent>) -> usize {
        events
            .into_iter()
            .map(|event| self.apply(event))
            .filter(StoreChange::is_applied)
            .count()
    }

    // Reads

    /// Project the current files into a sorted tree.
    pub fn file_tree(&self) -> Vec<FileTreeNode> {
        tree::project(&self.state.files)
    }

    pub fn files(&self) -> &[Arc<FileItem>] {
        &self.state.files
    }

    /// Look up a file by exact path.
    pub fn file(&self, path: &str) -> Option<&Arc<FileItem>> {
        self.state.files.iter().find(|f| f.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.file(path).is_some()
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.state.selected_file.as_deref()
    }

    /// The selected file, if the selection points at an existing one.
    pub fn selected(&self) -> Option<&Arc<FileItem>> {
        self.selected_file().and_then(|path| self.file(path))
    }

    pub fn expanded_folders(&self) -> &BTreeSet<String> {
        &self.state.expanded_folders
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.state.expanded_folders.contains(path)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn store_config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn is_empty(&self) -> bool {
        self.state.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.state.files.len()
    }

    /// Count files by status.
    pub fn stats(&self) -> StoreStats {
        self.state
            .files
            .iter()
            .fold(StoreStats::default(), |mut stats, file| {
                stats.total += 1;
                match file.status {
                    FileStatus::Creating => stats.creating += 1,
                    FileStatus::Writing => stats.writing += 1,
                    FileStatus::Complete => stats.complete += 1,
                }
                if !path::is_projectable(&file.path) {
                    stats.hidden += 1;
                }
                stats
            })
    }

    // Internal: copy-on-write update of every item at `path`.
    // All-or-nothing: if the policy rejects any matching item, none change.
    fn update(
        &mut self,
        operation: &str,
        path: &str,
        to: FileStatus,
        content: Option<String>,
    ) -> StoreChange {
        let policy = self.config.transition_policy;
        let mut matched = false;
        let mut rejected = None;

        for file in self.state.files.iter().filter(|f| f.path == path) {
            matched = true;
            let from = file.status;
            if !policy.allows(from.transition(to)) {
                rejected = Some(IgnoreReason::BackwardTransition { from, to });
                break;
            }
        }

        match (matched, rejected) {
            (false, _) => return self.ignored(operation, path, IgnoreReason::UnknownPath),
            (true, Some(reason)) => return self.ignored(operation, path, reason),
            (true, None) => {}
        }

        let now = self.clock.now();
        for slot in self.state.files.iter_mut().filter(|f| f.path == path) {
            let mut next = FileItem::clone(&**slot);
            if let Some(content) = &content {
                next.content = content.clone();
            }
            next.status = to;
            next.updated_at = Some(now);
            *slot = Arc::new(next);
        }
        StoreChange::Applied
    }

    fn ignored(&self, operation: &str, path: &str, reason: IgnoreReason) -> StoreChange {
        debug!(
            "[{}] Ignored {} for '{}': {}",
            self.session_id, operation, path, reason
        );
        StoreChange::Ignored(reason)
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("session_id", &self.session_id)
            .field("files", &self.state.files.len())
            .field("selected_file", &self.state.selected_file)
            .field("expanded_folders", &self.state.expanded_folders)
            .field("config", &self.config)
            .finish()
    }
}
