//! Streaming write tracker.
//!
//! The agent runtime re-renders a `writeToFile` call every time more of its
//! arguments arrive, so the same path and content snapshots show up many
//! times. [`WriteTracker`] remembers what it already forwarded and turns
//! that stream of snapshots into at most one create, one stream per new
//! content snapshot and one complete per file.

use tracing::debug;

use forge_vfs::{FileEvent, FileStore};

use crate::types::{ToolCallStatus, WriteToFileArgs};

/// Something the tracker did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteAction {
    /// The file already existed and was selected instead of created
    Select(String),
    /// A store event was applied
    Event(FileEvent),
}

/// Per-call memory for one `writeToFile` tool call.
#[derive(Debug, Default)]
pub struct WriteTracker {
    path: Option<String>,
    created: bool,
    last_content: String,
    completed: bool,
}

impl WriteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path currently being tracked.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Forget everything, e.g. when the session is reset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed the latest argument snapshot and call status.
    ///
    /// Returns the actions applied to `store`, in order.
    pub fn observe(
        &mut self,
        store: &mut FileStore,
        args: &WriteToFileArgs,
        status: ToolCallStatus,
    ) -> Vec<WriteAction> {
        let mut actions = Vec::new();
        let Some(path) = args.path() else {
            return actions;
        };

        if self.path.as_deref() != Some(path) {
            debug!("Tracking write to {}", path);
            *self = Self {
                path: Some(path.to_string()),
                ..Self::default()
            };
        }

        if !self.created {
            if store.contains(path) {
                store.select_file(path);
                actions.push(WriteAction::Select(path.to_string()));
            } else {
                let event = FileEvent::create(path);
                store.apply(&event);
                actions.push(WriteAction::Event(event));
            }
            self.created = true;
        }

        if let Some(content) = args.content() {
            if content != self.last_content {
                store.select_file(path);
                let event = FileEvent::stream(path, content);
                store.apply(&event);
                actions.push(WriteAction::Event(event));
                self.last_content = content.to_string();
            }
        }

        if status == ToolCallStatus::Complete && !self.completed {
            self.completed = true;
            let event = FileEvent::complete(path);
            store.apply(&event);
            actions.push(WriteAction::Event(event));
        }

        actions
    }
}
