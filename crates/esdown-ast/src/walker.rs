//! Generic pre/post-order tree walker.
//!
//! Child order comes from a table with exactly one children visitor per
//! [`NodeKind`]. The table is built on first use and panics if any kind is
//! missing or registered twice, so grammar drift fails loudly instead of
//! silently skipping subtrees.
//!
//! The walker assumes the tree is acyclic; single ownership of children
//! guarantees that for any tree built from [`Node`] values.

use crate::node::*;
use once_cell::sync::Lazy;
use smallvec::SmallVec;

/// Children of one node in visit order.
pub type ChildBuffer<'a> = SmallVec<[&'a Node; 8]>;

/// Pushes the present children of a node, in grammar order.
pub type ChildrenVisitor = for<'a> fn(&'a Node, &mut ChildBuffer<'a>);

/// Mutable flags a callback uses to steer the traversal.
#[derive(Clone, Copy, Debug)]
pub struct WalkOptions {
    /// Cleared by a pre callback to skip the current node's children. Reset
    /// to `true` right after it is read.
    pub go_children: bool,
    /// Set by any callback to abandon the rest of the traversal.
    pub stop_walk: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        WalkOptions {
            go_children: true,
            stop_walk: false,
        }
    }
}

/// Callback signature for [`walk`].
pub type WalkCallback<'a, 'w, S> = dyn FnMut(&'a Node, &mut WalkOptions, &mut S) + 'w;

/// Walk `root` depth-first, calling `pre` before and `post` after each
/// node's children. Lists are transparent: their elements are visited as
/// children of the owning node.
pub fn walk<'a, 'w, S>(
    root: &'a Node,
    pre: &'w mut WalkCallback<'a, 'w, S>,
    post: Option<&'w mut WalkCallback<'a, 'w, S>>,
    options: &'w mut WalkOptions,
    state: &'w mut S,
) {
    let mut walker = Walker {
        pre,
        post,
        options,
        state,
    };
    walker.visit(root);
}

/// Convenience wrapper for traversals that only need a pre callback.
pub fn walk_pre<'a, S>(
    root: &'a Node,
    state: &mut S,
    mut pre: impl FnMut(&'a Node, &mut WalkOptions, &mut S),
) {
    let mut options = WalkOptions::default();
    walk(root, &mut pre, None, &mut options, state);
}

struct Walker<'a, 'w, S> {
    pre: &'w mut WalkCallback<'a, 'w, S>,
    post: Option<&'w mut WalkCallback<'a, 'w, S>>,
    options: &'w mut WalkOptions,
    state: &'w mut S,
}

impl<'a, S> Walker<'a, '_, S> {
    fn visit(&mut self, node: &'a Node) {
        (self.pre)(node, &mut *self.options, &mut *self.state);
        if self.options.stop_walk {
            return;
        }

        let go_children = std::mem::replace(&mut self.options.go_children, true);
        if go_children {
            let mut children = ChildBuffer::new();
            children_of(node, &mut children);
            for child in children {
                self.visit(child);
                if self.options.stop_walk {
                    return;
                }
            }
        }

        if let Some(post) = self.post.as_mut() {
            post(node, &mut *self.options, &mut *self.state);
        }
    }
}

/// Push the children of `node` into `out` in walk order.
#[inline]
pub fn children_of<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    (CHILDREN_VISITORS[node.kind().index()])(node, out);
}

/// The registered visitor for `kind`. Forces the table, so calling this
/// for every kind checks the table's completeness.
pub fn children_visitor(kind: NodeKind) -> ChildrenVisitor {
    CHILDREN_VISITORS[kind.index()]
}

static CHILDREN_VISITORS: Lazy<[ChildrenVisitor; NodeKind::COUNT]> =
    Lazy::new(build_children_visitors);

fn build_children_visitors() -> [ChildrenVisitor; NodeKind::COUNT] {
    let mut table: [Option<ChildrenVisitor>; NodeKind::COUNT] = [None; NodeKind::COUNT];
    let mut register = |kind: NodeKind, visitor: ChildrenVisitor| {
        let slot = &mut table[kind.index()];
        assert!(slot.is_none(), "duplicate children visitor for {kind}");
        *slot = Some(visitor);
    };

    for kind in [
        NodeKind::Identifier,
        NodeKind::NumericLiteral,
        NodeKind::StringLiteral,
        NodeKind::RegularExpressionLiteral,
        NodeKind::TrueLiteral,
        NodeKind::FalseLiteral,
        NodeKind::NullLiteral,
        NodeKind::ThisExpression,
        NodeKind::SuperExpression,
        NodeKind::OmittedExpression,
        NodeKind::DebuggerStatement,
        NodeKind::EmptyStatement,
    ] {
        register(kind, leaf_children);
    }

    register(NodeKind::TypeReference, type_reference_children);
    register(NodeKind::GenericType, generic_type_children);
    register(NodeKind::TypeQuery, type_query_children);
    register(NodeKind::TypeParameter, type_parameter_children);
    register(NodeKind::ObjectType, object_type_children);

    register(NodeKind::Script, script_children);
    register(NodeKind::ModuleDeclaration, module_children);
    register(NodeKind::ClassDeclaration, class_children);
    register(NodeKind::InterfaceDeclaration, interface_children);
    register(NodeKind::FunctionDeclaration, function_children);
    register(NodeKind::VariableDeclaration, variable_declaration_children);
    register(NodeKind::VariableDeclarator, variable_declarator_children);
    register(NodeKind::Parameter, parameter_children);
    register(NodeKind::PropertyDeclaration, property_children);
    register(NodeKind::EnumMember, enum_member_children);
    register(NodeKind::ImportDeclaration, import_children);
    register(NodeKind::ExportAssignment, export_assignment_children);

    register(NodeKind::BinaryExpression, binary_children);
    register(NodeKind::UnaryExpression, unary_children);
    register(NodeKind::ArrayLiteral, array_children);
    register(NodeKind::ObjectLiteral, object_children);
    register(NodeKind::CallExpression, invocation_children);
    register(NodeKind::NewExpression, invocation_children);
    register(NodeKind::ConditionalExpression, conditional_children);
    register(NodeKind::TypeAssertion, type_assertion_children);

    register(NodeKind::Block, block_children);
    register(NodeKind::VariableStatement, variable_statement_children);
    register(NodeKind::ExpressionStatement, expression_statement_children);
    register(NodeKind::IfStatement, if_children);
    register(NodeKind::WhileStatement, while_children);
    register(NodeKind::DoStatement, do_children);
    register(NodeKind::ForStatement, for_children);
    register(NodeKind::ForInStatement, for_in_children);
    register(NodeKind::SwitchStatement, switch_children);
    register(NodeKind::CaseClause, case_children);
    register(NodeKind::TryStatement, try_children);
    register(NodeKind::CatchClause, catch_children);
    register(NodeKind::ReturnStatement, return_children);
    register(NodeKind::BreakStatement, jump_children);
    register(NodeKind::ContinueStatement, jump_children);
    register(NodeKind::ThrowStatement, throw_children);
    register(NodeKind::WithStatement, with_children);
    register(NodeKind::LabeledStatement, labeled_children);

    let mut visitors = [leaf_children as ChildrenVisitor; NodeKind::COUNT];
    for kind in NodeKind::ALL {
        match table[kind.index()] {
            Some(visitor) => visitors[kind.index()] = visitor,
            None => panic!("walker has no children visitor for {kind}"),
        }
    }
    visitors
}

// =============================================================================
// Children visitors
// =============================================================================

#[inline]
fn push<'a>(out: &mut ChildBuffer<'a>, node: &'a Node) {
    out.push(node);
}

#[inline]
fn push_opt<'a>(out: &mut ChildBuffer<'a>, node: &'a Option<Box<Node>>) {
    if let Some(node) = node {
        out.push(node);
    }
}

#[inline]
fn push_list<'a>(out: &mut ChildBuffer<'a>, list: &'a NodeList) {
    out.extend(list.iter());
}

fn leaf_children<'a>(_node: &'a Node, _out: &mut ChildBuffer<'a>) {}

fn type_reference_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::TypeReference(data) = &node.data {
        push(out, &data.term);
    }
}

fn generic_type_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::GenericType(data) = &node.data {
        push(out, &data.name);
        push_list(out, &data.type_arguments);
    }
}

fn type_query_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::TypeQuery(data) = &node.data {
        push(out, &data.name);
    }
}

fn type_parameter_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::TypeParameter(data) = &node.data {
        push(out, &data.name);
        push_opt(out, &data.constraint);
    }
}

fn object_type_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ObjectType(data) = &node.data {
        push_list(out, &data.members);
    }
}

fn script_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::Script(data) = &node.data {
        push_list(out, &data.statements);
    }
}

fn module_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ModuleDeclaration(data) = &node.data {
        push(out, &data.name);
        push_list(out, &data.members);
    }
}

fn class_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ClassDeclaration(data) = &node.data {
        push(out, &data.name);
        push_list(out, &data.type_parameters);
        push_list(out, &data.extends);
        push_list(out, &data.implements);
        push_opt(out, &data.constructor);
        push_list(out, &data.members);
    }
}

fn interface_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::InterfaceDeclaration(data) = &node.data {
        push(out, &data.name);
        push_list(out, &data.type_parameters);
        push_list(out, &data.extends);
        push_list(out, &data.members);
    }
}

fn function_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::FunctionDeclaration(data) = &node.data {
        push_opt(out, &data.name);
        push_list(out, &data.type_parameters);
        push_list(out, &data.parameters);
        push_opt(out, &data.return_type);
        push_opt(out, &data.body);
    }
}

fn variable_declaration_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::VariableDeclaration(data) = &node.data {
        push_list(out, &data.declarators);
    }
}

fn variable_declarator_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::VariableDeclarator(data) = &node.data {
        push(out, &data.name);
        push_opt(out, &data.type_annotation);
        push_opt(out, &data.initializer);
    }
}

fn parameter_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::Parameter(data) = &node.data {
        push(out, &data.name);
        push_opt(out, &data.type_annotation);
        push_opt(out, &data.initializer);
    }
}

fn property_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::PropertyDeclaration(data) = &node.data {
        push(out, &data.name);
        push_opt(out, &data.type_annotation);
        push_opt(out, &data.initializer);
    }
}

fn enum_member_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::EnumMember(data) = &node.data {
        push(out, &data.name);
        push_opt(out, &data.initializer);
    }
}

fn import_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ImportDeclaration(data) = &node.data {
        push(out, &data.name);
        push(out, &data.reference);
    }
}

fn export_assignment_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ExportAssignment(data) = &node.data {
        push(out, &data.name);
    }
}

fn binary_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::BinaryExpression(data) = &node.data {
        push(out, &data.left);
        push(out, &data.right);
    }
}

fn unary_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::UnaryExpression(data) = &node.data {
        push(out, &data.operand);
    }
}

fn array_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ArrayLiteral(data) = &node.data {
        push_list(out, &data.elements);
    }
}

fn object_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ObjectLiteral(data) = &node.data {
        push_list(out, &data.members);
    }
}

fn invocation_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::CallExpression(data) | NodeData::NewExpression(data) = &node.data {
        push(out, &data.target);
        push_list(out, &data.type_arguments);
        push_list(out, &data.arguments);
    }
}

fn conditional_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ConditionalExpression(data) = &node.data {
        push(out, &data.condition);
        push(out, &data.when_true);
        push(out, &data.when_false);
    }
}

fn type_assertion_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::TypeAssertion(data) = &node.data {
        push(out, &data.type_node);
        push(out, &data.operand);
    }
}

fn block_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::Block(data) = &node.data {
        push_list(out, &data.statements);
    }
}

fn variable_statement_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::VariableStatement(data) = &node.data {
        push(out, &data.declaration);
    }
}

fn expression_statement_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ExpressionStatement(data) = &node.data {
        push(out, &data.expression);
    }
}

fn if_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::IfStatement(data) = &node.data {
        push(out, &data.condition);
        push(out, &data.then_branch);
        push_opt(out, &data.else_branch);
    }
}

fn while_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::WhileStatement(data) = &node.data {
        push(out, &data.condition);
        push(out, &data.body);
    }
}

fn do_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::DoStatement(data) = &node.data {
        push(out, &data.body);
        push(out, &data.condition);
    }
}

fn for_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ForStatement(data) = &node.data {
        push_opt(out, &data.initializer);
        push_opt(out, &data.condition);
        push_opt(out, &data.incrementor);
        push(out, &data.body);
    }
}

fn for_in_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ForInStatement(data) = &node.data {
        push(out, &data.variable);
        push(out, &data.expression);
        push(out, &data.body);
    }
}

fn switch_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::SwitchStatement(data) = &node.data {
        push(out, &data.expression);
        push_list(out, &data.cases);
    }
}

fn case_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::CaseClause(data) = &node.data {
        push_opt(out, &data.expression);
        push_list(out, &data.statements);
    }
}

fn try_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::TryStatement(data) = &node.data {
        push(out, &data.block);
        push_opt(out, &data.catch_clause);
        push_opt(out, &data.finally_block);
    }
}

fn catch_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::CatchClause(data) = &node.data {
        push(out, &data.variable);
        push(out, &data.block);
    }
}

fn return_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ReturnStatement(data) = &node.data {
        push_opt(out, &data.expression);
    }
}

fn jump_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::BreakStatement(data) | NodeData::ContinueStatement(data) = &node.data {
        push_opt(out, &data.label);
    }
}

fn throw_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::ThrowStatement(data) = &node.data {
        push(out, &data.expression);
    }
}

fn with_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::WithStatement(data) = &node.data {
        push(out, &data.expression);
        push(out, &data.body);
    }
}

fn labeled_children<'a>(node: &'a Node, out: &mut ChildBuffer<'a>) {
    if let NodeData::LabeledStatement(data) = &node.data {
        push(out, &data.label);
        push(out, &data.statement);
    }
}
