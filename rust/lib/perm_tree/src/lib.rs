//! Permission tree: checkbox state for a role's resource picker.
//!
//! Resources form a forest. Each node has two kinds of descendants:
//! sub-resources (`children`) and action buttons (`buttonItems`). Ticking a
//! node ticks its whole subtree through both edge kinds; the header
//! "select all" toggle ticks or clears the entire forest.
//!
//! # Requests
//!
//! - `perm/load`: index a freshly loaded forest
//! - `perm/select-all`: check or clear everything
//! - `perm/selection-change`: clear, then check each selected subtree
//! - `perm/restore`: check exactly a saved permission list
//!
//! # State
//!
//! - `perm/forest`: the indexed `ResourceForest`
//! - `perm/selected`: the last select-all `SelectedRows`
//!
//! # Example
//!
//! ```ignore
//! use openerp_perm_tree::{PermTree, LoadForestReq, SelectionChangeReq};
//!
//! let tree = PermTree::new();
//! tree.emit(LoadForestReq { roots })?;
//! tree.emit(SelectionChangeReq { selection: vec!["pms:device".into()] })?;
//! assert!(tree.with_forest(|f| f.is_checked(&"pms:device".into()))? == Some(true));
//! ```

pub mod app;
pub mod cascade;
pub mod config;
pub mod error;
pub mod forest;
pub mod handlers;
pub mod node;
pub mod request;
pub mod state;
pub mod store;
pub mod topic;

// Re-export primary types at crate root.
pub use app::PermTree;
pub use cascade::{find_and_update, set_checked_recursive};
pub use config::{PermTreeConfig, SearchScope};
pub use error::PermTreeError;
pub use forest::ResourceForest;
pub use node::{EdgeKind, NodeId, ResourceNode};
pub use request::{
    LoadForestReq, PermRequest, RestorePermissionsReq, SelectAllReq, SelectionChangeReq,
};
pub use state::{SelectedRows, StateChange};
pub use store::{ChangeHandler, PermTreeStore, SubscriptionId};
