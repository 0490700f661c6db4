//! Resource node model.
//!
//! A resource is either a navigable page/menu entry or an action button.
//! Nodes hang off their parent through one of two edge kinds:
//! `children` (sub-resources) and `buttonItems` (actions on the resource).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a resource node, unique within a forest.
///
/// The id doubles as the permission string saved on a role, e.g.
/// `"pms:device"` or `"pms:device:delete"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Relation between a node and one of its descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Sub-resource, stored in `children`.
    Child,
    /// Action button, stored in `buttonItems`.
    Button,
}

/// A node in the permission resource forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: NodeId,

    /// Display label.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Whether the checkbox for this node is ticked.
    #[serde(default)]
    pub checked: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResourceNode>,

    /// Accepts the legacy `btnList` field name on input.
    #[serde(
        rename = "buttonItems",
        alias = "btnList",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub button_items: Vec<ResourceNode>,
}

impl ResourceNode {
    /// Create an unchecked leaf node.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            checked: false,
            children: Vec::new(),
            button_items: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_children(mut self, children: Vec<ResourceNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_buttons(mut self, buttons: Vec<ResourceNode>) -> Self {
        self.button_items = buttons;
        self
    }

    /// Nodes attached through the given edge kind.
    pub fn edge(&self, kind: EdgeKind) -> &[ResourceNode] {
        match kind {
            EdgeKind::Child => &self.children,
            EdgeKind::Button => &self.button_items,
        }
    }

    pub fn edge_mut(&mut self, kind: EdgeKind) -> &mut Vec<ResourceNode> {
        match kind {
            EdgeKind::Child => &mut self.children,
            EdgeKind::Button => &mut self.button_items,
        }
    }

    /// All direct descendants tagged with their edge kind, children first.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKind, &ResourceNode)> {
        self.children
            .iter()
            .map(|n| (EdgeKind::Child, n))
            .chain(self.button_items.iter().map(|n| (EdgeKind::Button, n)))
    }

    pub fn edges_mut(&mut self) -> impl Iterator<Item = (EdgeKind, &mut ResourceNode)> {
        self.children
            .iter_mut()
            .map(|n| (EdgeKind::Child, n))
            .chain(self.button_items.iter_mut().map(|n| (EdgeKind::Button, n)))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.button_items.is_empty()
    }
}

/// Drops the subtree iteratively: each descendant is detached before it is
/// dropped, so drop depth stays constant regardless of tree depth.
impl Drop for ResourceNode {
    fn drop(&mut self) {
        if self.is_leaf() {
            return;
        }
        let mut pending = std::mem::take(&mut self.children);
        pending.append(&mut self.button_items);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
            pending.append(&mut node.button_items);
        }
    }
}
