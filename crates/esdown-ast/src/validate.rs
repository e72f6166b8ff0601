//! Span validity scanning.
//!
//! Trees built through [`crate::Node::with_span`] cannot hold inverted spans,
//! but deserialized trees can. Positioned children must also nest inside the
//! nearest positioned ancestor.

use crate::ids::NodeId;
use crate::node::{Node, NodeKind};
use crate::walker::{WalkOptions, walk};
use esdown_common::Span;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanProblem {
    Inverted,
    EscapesParent { parent: Span },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpanIssue {
    pub node: NodeId,
    pub kind: NodeKind,
    pub span: Span,
    pub problem: SpanProblem,
}

/// Every node under `root` whose span is inverted or escapes its nearest
/// positioned ancestor.
pub fn invalid_spans(root: &Node) -> Vec<SpanIssue> {
    struct Scan {
        enclosing: Vec<Option<Span>>,
        issues: Vec<SpanIssue>,
    }

    let mut scan = Scan {
        enclosing: Vec::new(),
        issues: Vec::new(),
    };
    let mut options = WalkOptions::default();

    let mut pre = |node: &Node, _: &mut WalkOptions, scan: &mut Scan| {
        if let Some(span) = node.span {
            if span.start > span.end {
                scan.issues.push(SpanIssue {
                    node: node.id,
                    kind: node.kind(),
                    span,
                    problem: SpanProblem::Inverted,
                });
            } else if let Some(parent) = scan.enclosing.iter().rev().find_map(|s| *s)
                && (span.start < parent.start || span.end > parent.end)
            {
                scan.issues.push(SpanIssue {
                    node: node.id,
                    kind: node.kind(),
                    span,
                    problem: SpanProblem::EscapesParent { parent },
                });
            }
        }
        let valid = node.span.filter(|span| span.start <= span.end);
        scan.enclosing.push(valid);
    };
    let mut post = |_: &Node, _: &mut WalkOptions, scan: &mut Scan| {
        scan.enclosing.pop();
    };

    walk(root, &mut pre, Some(&mut post), &mut options, &mut scan);
    if !scan.issues.is_empty() {
        debug!(count = scan.issues.len(), "found invalid spans");
    }
    scan.issues
}
