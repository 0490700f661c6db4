//! State held by the store, addressed by path.

use serde::{Deserialize, Serialize};

use crate::forest::ResourceForest;
use crate::node::NodeId;

impl ResourceForest {
    pub const PATH: &'static str = "perm/forest";
}

/// Rows the table reported on the last select-all toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedRows(pub Vec<NodeId>);

impl SelectedRows {
    pub const PATH: &'static str = "perm/selected";

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Payload delivered to subscribers after a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// The forest was loaded or its checked flags changed.
    /// Carries the checked ids after the write, in pre-order.
    Forest { checked: Vec<NodeId> },
    /// `SelectedRows` was replaced.
    SelectedRows(SelectedRows),
}
