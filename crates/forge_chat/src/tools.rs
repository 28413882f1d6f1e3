//! Frontend tools the agent calls to scaffold files.
//!
//! Each tool receives the raw JSON arguments of a tool call and replies with
//! the text handed back to the agent.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::{ChatError, ChatResult};
use crate::types::{SharedStore, ToolConfig};

/// A tool the agent can invoke.
#[async_trait]
pub trait FrontendTool: Send + Sync {
    /// Name the agent uses to call the tool
    fn name(&self) -> &str;

    /// Description shown to the agent
    fn description(&self) -> &str;

    /// Run the tool with the final arguments.
    async fn handle(&self, args: &Value) -> ChatResult<String>;
}

/// Read a required string argument.
fn required_str<'a>(tool: &str, args: &'a Value, name: &str) -> ChatResult<&'a str> {
    match args.get(name) {
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(other) => Err(ChatError::invalid_arguments(
            tool,
            format!("'{}' must be a string, got {}", name, other),
        )),
        None => Err(ChatError::invalid_arguments(
            tool,
            format!("missing '{}'", name),
        )),
    }
}

/// `createFile`: add an empty file to the project tree.
pub struct CreateFileTool {
    store: SharedStore,
}

impl CreateFileTool {
    pub const NAME: &'static str = "createFile";

    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FrontendTool for CreateFileTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Create a new file in the project tree. writeToFile handles the UI display."
    }

    async fn handle(&self, args: &Value) -> ChatResult<String> {
        let path = required_str(Self::NAME, args, "path")?;
        self.store.lock().create_file(path);
        Ok(format!("File created: {}", path))
    }
}

/// `writeToFile`: make sure the file exists and is selected, then confirm.
///
/// Content arrives through the streaming render path (see
/// [`WriteTracker`](crate::tracker::WriteTracker)); the handler only runs
/// once the arguments are final.
pub struct WriteToFileTool {
    store: SharedStore,
    config: ToolConfig,
}

impl WriteToFileTool {
    pub const NAME: &'static str = "writeToFile";

    pub fn new(store: SharedStore, config: ToolConfig) -> Self {
        Self { store, config }
    }
}

#[async_trait]
impl FrontendTool for WriteToFileTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Write content to a SINGLE file. Call this for ONE file at a time and wait \
         for it to complete before writing the next file."
    }

    async fn handle(&self, args: &Value) -> ChatResult<String> {
        let path = required_str(Self::NAME, args, "path")?;

        {
            let mut store = self.store.lock();
            if !store.contains(path) {
                store.create_file(path);
            }
            store.select_file(path);
        }

        tokio::time::sleep(self.config.write_settle()).await;

        Ok(format!(
            "✓ File written successfully: {}\n\nIMPORTANT: Wait for this message, then call \
             writeToFile for the NEXT file. For Terraform steps, you MUST write ALL THREE files: \
             main.tf, variables.tf, outputs.tf. Do NOT stop after main.tf!",
            path
        ))
    }
}

/// Tools available to the agent, keyed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn FrontendTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry with the file tools bound to `store`.
    pub fn with_file_tools(store: SharedStore, config: ToolConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CreateFileTool::new(store.clone())));
        registry.register(Arc::new(WriteToFileTool::new(store, config)));
        registry
    }

    /// Register a tool under its `name()`, replacing any previous one.
    pub fn register(&mut self, tool: Arc<dyn FrontendTool>) {
        let name = tool.name().to_string();
        debug!("Registering tool: {}", name);
        self.tools.insert(name, tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn FrontendTool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run the named tool.
    pub async fn dispatch(&self, name: &str, args: &Value) -> ChatResult<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| ChatError::ToolNotFound(name.to_string()))?;
        debug!("Dispatching tool call: {}", name);
        tool.handle(args).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
