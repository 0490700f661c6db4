//! Checked-state propagation over resource trees.
//!
//! These functions work on plain node slices and need no index. They are
//! the building blocks `ResourceForest` uses, and are usable on detached
//! sub-trees as well.

use crate::config::SearchScope;
use crate::node::{NodeId, ResourceNode};

/// Set `checked` on every node in `nodes` and on everything reachable from
/// them through either edge kind.
///
/// Uses an explicit stack so arbitrarily deep trees are safe.
pub fn set_checked_recursive(nodes: &mut [ResourceNode], checked: bool) {
    let mut stack: Vec<&mut ResourceNode> = nodes.iter_mut().collect();
    while let Some(node) = stack.pop() {
        node.checked = checked;
        stack.extend(node.edges_mut().map(|(_, n)| n));
    }
}

/// Set `checked` on `node` and its whole subtree.
pub fn cascade(node: &mut ResourceNode, checked: bool) {
    set_checked_recursive(std::slice::from_mut(node), checked);
}

/// Depth-first search for `target` in `nodes`; on a hit, cascade `checked`
/// into the node and its subtree.
///
/// The search descends into `children` always and into `buttonItems` only
/// when `scope` allows it. Returns `false` when nothing matched, in which
/// case no node was touched.
pub fn find_and_update(
    nodes: &mut [ResourceNode],
    target: &NodeId,
    checked: bool,
    scope: SearchScope,
) -> bool {
    // Reversed so nodes pop in pre-order.
    let mut stack: Vec<&mut ResourceNode> = nodes.iter_mut().rev().collect();
    while let Some(node) = stack.pop() {
        if node.id == *target {
            cascade(node, checked);
            return true;
        }
        if scope.includes_buttons() {
            stack.extend(node.button_items.iter_mut().rev());
        }
        stack.extend(node.children.iter_mut().rev());
    }
    false
}
