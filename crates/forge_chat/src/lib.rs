//! # forge_chat - Agent tool-call bridge for Blueprint Forge
//!
//! The agent scaffolds a project by calling frontend tools. This crate turns
//! those calls into file events on a shared [`forge_vfs::FileStore`]:
//!
//! - [`WriteTracker`] dedupes the repeated argument snapshots of a streaming
//!   `writeToFile` call
//! - [`ToolRegistry`] holds the `createFile` and `writeToFile` handlers
//! - [`ToolBridge`] feeds recorded tool calls through both
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Tool call    │────▶│ WriteTracker │────▶│  FileStore   │
//! │ snapshots    │     └──────────────┘     └──────▲───────┘
//! └──────┬───────┘                                 │
//!        │ executing   ┌──────────────┐            │
//!        └────────────▶│ ToolRegistry │────────────┘
//!                      └──────────────┘
//! ```

pub mod bridge;
pub mod error;
pub mod tools;
pub mod tracker;
pub mod types;

pub use bridge::{BridgeOutcome, ToolBridge};
pub use error::{ChatError, ChatResult};
pub use tools::{CreateFileTool, FrontendTool, ToolRegistry, WriteToFileTool};
pub use tracker::{WriteAction, WriteTracker};
pub use types::*;
