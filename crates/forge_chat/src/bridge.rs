//! Routes tool-call snapshots to the store.
//!
//! Streaming `writeToFile` snapshots go through the [`WriteTracker`]; once a
//! call reaches [`ToolCallStatus::Executing`] its final arguments are handed
//! to the registered tool.

use tracing::{debug, info};

use crate::error::{ChatError, ChatResult};
use crate::tools::{ToolRegistry, WriteToFileTool};
use crate::tracker::{WriteAction, WriteTracker};
use crate::types::{SharedStore, ToolCallRecord, ToolCallStatus, ToolConfig, WriteToFileArgs};

/// Outcome of feeding one tool-call snapshot.
#[derive(Debug, Default)]
pub struct BridgeOutcome {
    /// Store actions taken by the streaming tracker
    pub actions: Vec<WriteAction>,
    /// Reply from the tool handler, if it ran
    pub reply: Option<String>,
}

pub struct ToolBridge {
    store: SharedStore,
    registry: ToolRegistry,
    tracker: WriteTracker,
}

impl ToolBridge {
    /// Bridge with the file tools bound to `store`.
    pub fn new(store: SharedStore, config: ToolConfig) -> Self {
        let registry = ToolRegistry::with_file_tools(store.clone(), config);
        Self::with_registry(store, registry)
    }

    pub fn with_registry(store: SharedStore, registry: ToolRegistry) -> Self {
        Self {
            store,
            registry,
            tracker: WriteTracker::new(),
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Feed one snapshot of a tool call.
    pub async fn handle(&mut self, record: &ToolCallRecord) -> ChatResult<BridgeOutcome> {
        let mut outcome = BridgeOutcome::default();

        if record.tool == WriteToFileTool::NAME {
            let args: WriteToFileArgs = if record.args.is_null() {
                WriteToFileArgs::default()
            } else {
                serde_json::from_value(record.args.clone()).map_err(|e| {
                    ChatError::invalid_arguments(WriteToFileTool::NAME, e.to_string())
                })?
            };
            let mut store = self.store.lock();
            outcome.actions = self.tracker.observe(&mut store, &args, record.status);
        }

        if record.status == ToolCallStatus::Executing {
            debug!("Executing tool call: {}", record.tool);
            outcome.reply = Some(self.registry.dispatch(&record.tool, &record.args).await?);
        }

        Ok(outcome)
    }

    /// Feed every snapshot in order, collecting the outcomes.
    pub async fn handle_all(&mut self, records: &[ToolCallRecord]) -> ChatResult<Vec<BridgeOutcome>> {
        let mut outcomes = Vec::with_capacity(records.len());
        for record in records {
            outcomes.push(self.handle(record).await?);
        }
        Ok(outcomes)
    }

    /// Start a fresh session.
    pub fn reset(&mut self) {
        self.store.lock().reset_store();
        self.tracker.reset();
        info!("Tool bridge reset");
    }
}

impl std::fmt::Debug for ToolBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolBridge")
            .field("registry", &self.registry)
            .field("tracker", &self.tracker)
            .finish()
    }
}
