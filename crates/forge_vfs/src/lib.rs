//! # forge_vfs
//!
//! Virtual file store for Blueprint Forge.
//!
//! While the agent scaffolds a blueprint it announces files, streams their
//! content and marks them complete. This crate keeps those files in a flat,
//! session-scoped store and projects them into the ordered tree the file
//! explorer and editor panes render.
//!
//! ## Features
//!
//! - Tolerates duplicate, out-of-order and malformed file events
//! - Auto-expands the ancestors of newly created files
//! - Deterministic tree: folders first, names in locale order
//! - Explicit `creating -> writing -> complete` lifecycle with a
//!   configurable policy for backward moves
//! - Immutable `Arc` snapshots shared between store and views
//!
//! ## Example
//!
//! ```rust
//! use forge_vfs::{FileStatus, FileStore};
//!
//! let mut store = FileStore::new();
//! store.create_file("infra/modules/vpc/main.tf");
//! store.stream_content("infra/modules/vpc/main.tf", r#"resource "aws_vpc" "main" {}"#);
//! store.complete_file("infra/modules/vpc/main.tf");
//!
//! let tree = store.file_tree();
//! assert_eq!(tree[0].name, "infra");
//! assert!(store.is_expanded("infra/modules"));
//! assert_eq!(store.files()[0].status, FileStatus::Complete);
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod path;
pub mod status;
pub mod store;
pub mod tree;
pub mod types;
pub mod view;

pub use clock::{Clock, SystemClock};
pub use config::{DocumentFormat, StoreConfig};
pub use error::{VfsError, VfsResult};
pub use event::{load_script, FileEvent};
pub use status::{FileStatus, Transition, TransitionPolicy};
pub use store::{FileStore, IgnoreReason, StoreChange, StoreState, StoreStats};
pub use tree::project;
pub use types::{find_node, FileItem, FileTreeNode, NodeKind};
pub use view::{language_for, render_text, visible_rows, FileView, TreeRow};
