//! Ancestry queries without parent pointers.
//!
//! Nodes do not know their parents. When a consumer needs ancestry it builds
//! an [`AstPath`] with a dedicated top-down walk and asks the path instead.

use crate::ids::NodeId;
use crate::node::Node;
use crate::walker::walk_pre;

/// Stack of nodes from the root (bottom) to the innermost node (top).
#[derive(Clone, Debug, Default)]
pub struct AstPath<'a> {
    nodes: Vec<&'a Node>,
}

impl<'a> AstPath<'a> {
    pub fn new() -> Self {
        AstPath { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: &'a Node) {
        self.nodes.push(node);
    }

    pub fn pop(&mut self) -> Option<&'a Node> {
        self.nodes.pop()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Innermost node.
    pub fn top(&self) -> Option<&'a Node> {
        self.nodes.last().copied()
    }

    /// Parent of the innermost node.
    pub fn parent(&self) -> Option<&'a Node> {
        self.nodes.len().checked_sub(2).map(|i| self.nodes[i])
    }

    /// Parent of the path element with identity `id`.
    pub fn parent_of(&self, id: NodeId) -> Option<&'a Node> {
        let idx = self.nodes.iter().position(|node| node.id == id)?;
        idx.checked_sub(1).map(|i| self.nodes[i])
    }

    /// Innermost-first iteration.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.nodes.iter().rev().copied()
    }

    /// Root-first slice.
    pub fn nodes(&self) -> &[&'a Node] {
        &self.nodes
    }
}

/// Path from `root` to the innermost positioned node whose span contains
/// `pos`. Nodes without a span are transparent: they are never on the path
/// but their children are searched.
pub fn ast_path_at_position(root: &Node, pos: u32) -> AstPath<'_> {
    let mut path = AstPath::new();
    walk_pre(root, &mut path, |node, options, path| match node.span {
        Some(span) if span.start <= pos && pos < span.end => path.push(node),
        Some(_) => options.go_children = false,
        None => {}
    });
    path
}
