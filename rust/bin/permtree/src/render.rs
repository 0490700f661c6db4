//! Text rendering of a forest's checkbox state.

use openerp_perm_tree::{EdgeKind, ResourceForest, ResourceNode};

/// Render the forest as an indented checkbox list.
///
/// ```text
/// [x] sys  System
///   [x] sys:user  Users
///     [x] #sys:user:add
/// ```
///
/// Buttons are prefixed with `#`.
pub fn render_table(forest: &ResourceForest) -> String {
    let mut out = String::new();
    let mut stack: Vec<(usize, EdgeKind, &ResourceNode)> = forest
        .roots()
        .iter()
        .rev()
        .map(|n| (0, EdgeKind::Child, n))
        .collect();

    while let Some((depth, kind, node)) = stack.pop() {
        let mark = if node.checked { "[x]" } else { "[ ]" };
        let prefix = match kind {
            EdgeKind::Child => "",
            EdgeKind::Button => "#",
        };
        out.push_str(&"  ".repeat(depth));
        out.push_str(mark);
        out.push(' ');
        out.push_str(prefix);
        out.push_str(node.id.as_str());
        if !node.name.is_empty() {
            out.push_str("  ");
            out.push_str(&node.name);
        }
        out.push('\n');

        let subs: Vec<_> = node.edges().collect();
        for (sub_kind, sub) in subs.into_iter().rev() {
            stack.push((depth + 1, sub_kind, sub));
        }
    }
    out
}
