//! Identifier collection for name filters.

use crate::node::{Node, NodeData};
use crate::walker::walk_pre;
use rustc_hash::FxHashSet;

/// Every resolved identifier text that occurs under `root`.
pub fn identifier_names(root: &Node) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    walk_pre(root, &mut names, |node, _, names| {
        if let NodeData::Identifier(ident) = &node.data
            && !names.contains(ident.resolved.as_str())
        {
            names.insert(ident.resolved.clone());
        }
    });
    names
}
