//! Indexed resource forest.
//!
//! `ResourceForest` owns the root nodes and an id index that is built once
//! per load. Each node gets a slot holding its parent link, edge kind and
//! position, so building the index is linear in the node count. The tree
//! shape is frozen after construction; only `checked` flags change, so
//! slots stay valid for the forest's lifetime.

use std::collections::HashMap;

use crate::cascade::{cascade, set_checked_recursive};
use crate::config::SearchScope;
use crate::error::PermTreeError;
use crate::node::{EdgeKind, NodeId, ResourceNode};

/// One index entry per node. A node's location is rebuilt by walking
/// `parent` links up to its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    /// Parent slot, `None` for roots.
    parent: Option<usize>,
    /// Edge from the parent. Roots use `EdgeKind::Child`.
    kind: EdgeKind,
    /// Position within the parent's edge vector (or within the roots).
    pos: usize,
    /// Whether any edge between a root and this node is a button edge.
    via_button: bool,
}

#[derive(Debug, Clone)]
pub struct ResourceForest {
    roots: Vec<ResourceNode>,
    slots: Vec<Slot>,
    index: HashMap<NodeId, usize>,
}

impl ResourceForest {
    /// Take ownership of `roots` and index every node by id.
    ///
    /// Fails if an id is blank or appears more than once (across both
    /// edge kinds).
    pub fn new(roots: Vec<ResourceNode>) -> Result<Self, PermTreeError> {
        let mut index = HashMap::new();
        let mut slots = Vec::new();
        let mut stack: Vec<(usize, &ResourceNode)> = Vec::with_capacity(roots.len());
        for (pos, node) in roots.iter().enumerate() {
            slots.push(Slot {
                parent: None,
                kind: EdgeKind::Child,
                pos,
                via_button: false,
            });
            stack.push((pos, node));
        }

        while let Some((slot, node)) = stack.pop() {
            if node.id.is_empty() {
                return Err(PermTreeError::EmptyId);
            }
            if index.insert(node.id.clone(), slot).is_some() {
                return Err(PermTreeError::DuplicateId(node.id.clone()));
            }
            let via_button = slots[slot].via_button;
            for kind in [EdgeKind::Child, EdgeKind::Button] {
                for (pos, sub) in node.edge(kind).iter().enumerate() {
                    slots.push(Slot {
                        parent: Some(slot),
                        kind,
                        pos,
                        via_button: via_button || kind == EdgeKind::Button,
                    });
                    stack.push((slots.len() - 1, sub));
                }
            }
        }

        Ok(Self {
            roots,
            slots,
            index,
        })
    }

    fn slot(&self, id: &NodeId) -> Option<&Slot> {
        self.slots.get(*self.index.get(id)?)
    }

    /// Root position plus the (edge, position) steps leading from that root
    /// down to `id`.
    fn locate(&self, id: &NodeId) -> Option<(usize, Vec<(EdgeKind, usize)>)> {
        let mut slot = self.slot(id)?;
        let mut steps = Vec::new();
        while let Some(parent) = slot.parent {
            steps.push((slot.kind, slot.pos));
            slot = self.slots.get(parent)?;
        }
        steps.reverse();
        Some((slot.pos, steps))
    }

    pub fn to_json_pretty(&self) -> Result<String, PermTreeError> {
        Ok(serde_json::to_string_pretty(&self.roots)?)
    }

    pub fn roots(&self) -> &[ResourceNode] {
        &self.roots
    }

    /// Total number of nodes, buttons included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &NodeId) -> Option<&ResourceNode> {
        let (root, steps) = self.locate(id)?;
        let mut node = self.roots.get(root)?;
        for (kind, pos) in steps {
            node = node.edge(kind).get(pos)?;
        }
        Some(node)
    }

    /// Kept private: handing out `&mut ResourceNode` would let callers
    /// reshape the tree behind the index.
    fn node_mut(&mut self, id: &NodeId) -> Option<&mut ResourceNode> {
        let (root, steps) = self.locate(id)?;
        let mut node = self.roots.get_mut(root)?;
        for (kind, pos) in steps {
            node = node.edge_mut(kind).get_mut(pos)?;
        }
        Some(node)
    }

    pub fn is_checked(&self, id: &NodeId) -> Option<bool> {
        self.get(id).map(|n| n.checked)
    }

    /// Depth-first pre-order over every node, children before buttons.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Ids of all checked nodes, in pre-order.
    pub fn checked_ids(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|n| n.checked)
            .map(|n| n.id.clone())
            .collect()
    }

    /// Set every node in the forest to `checked`.
    pub fn set_all(&mut self, checked: bool) {
        set_checked_recursive(&mut self.roots, checked);
    }

    /// Look `target` up through the index and cascade `checked` into it.
    ///
    /// Under `SearchScope::Children` a node reachable only through a button
    /// edge counts as absent. Returns `false` (and changes nothing) when the
    /// target is absent.
    pub fn find_and_update(&mut self, target: &NodeId, checked: bool, scope: SearchScope) -> bool {
        match self.slot(target) {
            Some(slot) if scope.includes_buttons() || !slot.via_button => {}
            _ => return false,
        }
        match self.node_mut(target) {
            Some(node) => {
                cascade(node, checked);
                true
            }
            None => false,
        }
    }

    /// Clear the forest, then tick exactly the given ids without cascading.
    ///
    /// Returns the ids that were not found.
    pub fn check_exact<'a, I>(&mut self, ids: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        self.set_all(false);
        let mut missing = Vec::new();
        for id in ids {
            match self.node_mut(id) {
                Some(node) => node.checked = true,
                None => missing.push(id.clone()),
            }
        }
        missing
    }
}

/// Pre-order iterator returned by [`ResourceForest::iter`].
pub struct Iter<'a> {
    stack: Vec<&'a ResourceNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ResourceNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.button_items.iter().rev());
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
