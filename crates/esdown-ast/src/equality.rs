//! Structural equality over trees.
//!
//! Two trees are equal when they have the same shape, the same payload
//! values and the same attached comments. Identities and semantic handles
//! never participate. Spans participate only when `include_position` is set.

use crate::comment::Comment;
use crate::node::*;

/// Deep comparison of two optional subtrees.
///
/// Total over every node kind: it never panics and two absent nodes are
/// equal. Numeric literals compare NaN equal to NaN.
pub fn structurally_equal(a: Option<&Node>, b: Option<&Node>, include_position: bool) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => nodes_equal(a, b, include_position),
        _ => false,
    }
}

/// Element-wise comparison of two lists; no reordering tolerance.
pub fn lists_equal(a: &NodeList, b: &NodeList, include_position: bool) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b.iter())
            .all(|(x, y)| nodes_equal(x, y, include_position))
}

fn nodes_equal(a: &Node, b: &Node, pos: bool) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    if a.kind() != b.kind() || a.flags != b.flags {
        return false;
    }
    if pos && a.span != b.span {
        return false;
    }
    comments_equal(&a.leading_comments, &b.leading_comments, pos)
        && comments_equal(&a.trailing_comments, &b.trailing_comments, pos)
        && data_equal(&a.data, &b.data, pos)
}

fn comments_equal(a: &[Comment], b: &[Comment], pos: bool) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x.same_content(y) && (!pos || x.span == y.span))
}

#[inline]
fn child(a: &Node, b: &Node, pos: bool) -> bool {
    nodes_equal(a, b, pos)
}

#[inline]
fn opt(a: &Option<Box<Node>>, b: &Option<Box<Node>>, pos: bool) -> bool {
    structurally_equal(a.as_deref(), b.as_deref(), pos)
}

#[inline]
fn list(a: &NodeList, b: &NodeList, pos: bool) -> bool {
    lists_equal(a, b, pos)
}

fn numbers_equal(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn data_equal(a: &NodeData, b: &NodeData, pos: bool) -> bool {
    // Kinds already match; each arm destructures `b` to the same variant.
    macro_rules! same {
        ($variant:ident) => {
            match b {
                NodeData::$variant(other) => other,
                _ => return false,
            }
        };
    }

    match a {
        NodeData::Identifier(x) => {
            let y = same!(Identifier);
            x.text == y.text && x.is_numeric_name == y.is_numeric_name
        }
        NodeData::NumericLiteral(x) => {
            let y = same!(NumericLiteral);
            numbers_equal(x.value, y.value) && x.text == y.text
        }
        NodeData::StringLiteral(x) => x.text == same!(StringLiteral).text,
        NodeData::RegularExpressionLiteral(x) => x.text == same!(RegularExpressionLiteral).text,
        NodeData::TrueLiteral
        | NodeData::FalseLiteral
        | NodeData::NullLiteral
        | NodeData::ThisExpression
        | NodeData::SuperExpression
        | NodeData::OmittedExpression
        | NodeData::DebuggerStatement
        | NodeData::EmptyStatement => true,

        NodeData::TypeReference(x) => {
            let y = same!(TypeReference);
            x.array_rank == y.array_rank && child(&x.term, &y.term, pos)
        }
        NodeData::GenericType(x) => {
            let y = same!(GenericType);
            child(&x.name, &y.name, pos) && list(&x.type_arguments, &y.type_arguments, pos)
        }
        NodeData::TypeQuery(x) => child(&x.name, &same!(TypeQuery).name, pos),
        NodeData::TypeParameter(x) => {
            let y = same!(TypeParameter);
            child(&x.name, &y.name, pos) && opt(&x.constraint, &y.constraint, pos)
        }
        NodeData::ObjectType(x) => list(&x.members, &same!(ObjectType).members, pos),

        NodeData::Script(x) => {
            let y = same!(Script);
            x.is_declaration_file == y.is_declaration_file
                && list(&x.statements, &y.statements, pos)
        }
        NodeData::ModuleDeclaration(x) => {
            let y = same!(ModuleDeclaration);
            x.flavor == y.flavor
                && x.is_ambient == y.is_ambient
                && child(&x.name, &y.name, pos)
                && list(&x.members, &y.members, pos)
        }
        NodeData::ClassDeclaration(x) => {
            let y = same!(ClassDeclaration);
            x.is_ambient == y.is_ambient
                && child(&x.name, &y.name, pos)
                && list(&x.type_parameters, &y.type_parameters, pos)
                && list(&x.extends, &y.extends, pos)
                && list(&x.implements, &y.implements, pos)
                && opt(&x.constructor, &y.constructor, pos)
                && list(&x.members, &y.members, pos)
        }
        NodeData::InterfaceDeclaration(x) => {
            let y = same!(InterfaceDeclaration);
            child(&x.name, &y.name, pos)
                && list(&x.type_parameters, &y.type_parameters, pos)
                && list(&x.extends, &y.extends, pos)
                && list(&x.members, &y.members, pos)
        }
        NodeData::FunctionDeclaration(x) => {
            let y = same!(FunctionDeclaration);
            x.role == y.role
                && x.is_static == y.is_static
                && x.is_expression == y.is_expression
                && x.is_arrow == y.is_arrow
                && x.is_ambient == y.is_ambient
                && opt(&x.name, &y.name, pos)
                && list(&x.type_parameters, &y.type_parameters, pos)
                && list(&x.parameters, &y.parameters, pos)
                && opt(&x.return_type, &y.return_type, pos)
                && opt(&x.body, &y.body, pos)
        }
        NodeData::VariableDeclaration(x) => {
            list(&x.declarators, &same!(VariableDeclaration).declarators, pos)
        }
        NodeData::VariableDeclarator(x) => {
            let y = same!(VariableDeclarator);
            child(&x.name, &y.name, pos)
                && opt(&x.type_annotation, &y.type_annotation, pos)
                && opt(&x.initializer, &y.initializer, pos)
        }
        NodeData::Parameter(x) => {
            let y = same!(Parameter);
            x.is_optional == y.is_optional
                && x.is_rest == y.is_rest
                && x.is_property == y.is_property
                && child(&x.name, &y.name, pos)
                && opt(&x.type_annotation, &y.type_annotation, pos)
                && opt(&x.initializer, &y.initializer, pos)
        }
        NodeData::PropertyDeclaration(x) => {
            let y = same!(PropertyDeclaration);
            x.is_static == y.is_static
                && child(&x.name, &y.name, pos)
                && opt(&x.type_annotation, &y.type_annotation, pos)
                && opt(&x.initializer, &y.initializer, pos)
        }
        NodeData::EnumMember(x) => {
            let y = same!(EnumMember);
            child(&x.name, &y.name, pos) && opt(&x.initializer, &y.initializer, pos)
        }
        NodeData::ImportDeclaration(x) => {
            let y = same!(ImportDeclaration);
            x.is_external == y.is_external
                && child(&x.name, &y.name, pos)
                && child(&x.reference, &y.reference, pos)
        }
        NodeData::ExportAssignment(x) => child(&x.name, &same!(ExportAssignment).name, pos),

        NodeData::BinaryExpression(x) => {
            let y = same!(BinaryExpression);
            x.operator == y.operator
                && child(&x.left, &y.left, pos)
                && child(&x.right, &y.right, pos)
        }
        NodeData::UnaryExpression(x) => {
            let y = same!(UnaryExpression);
            x.operator == y.operator && child(&x.operand, &y.operand, pos)
        }
        NodeData::ArrayLiteral(x) => list(&x.elements, &same!(ArrayLiteral).elements, pos),
        NodeData::ObjectLiteral(x) => list(&x.members, &same!(ObjectLiteral).members, pos),
        NodeData::CallExpression(x) => invocations_equal(x, same!(CallExpression), pos),
        NodeData::NewExpression(x) => invocations_equal(x, same!(NewExpression), pos),
        NodeData::ConditionalExpression(x) => {
            let y = same!(ConditionalExpression);
            child(&x.condition, &y.condition, pos)
                && child(&x.when_true, &y.when_true, pos)
                && child(&x.when_false, &y.when_false, pos)
        }
        NodeData::TypeAssertion(x) => {
            let y = same!(TypeAssertion);
            child(&x.type_node, &y.type_node, pos) && child(&x.operand, &y.operand, pos)
        }

        NodeData::Block(x) => list(&x.statements, &same!(Block).statements, pos),
        NodeData::VariableStatement(x) => {
            let y = same!(VariableStatement);
            x.is_ambient == y.is_ambient && child(&x.declaration, &y.declaration, pos)
        }
        NodeData::ExpressionStatement(x) => {
            child(&x.expression, &same!(ExpressionStatement).expression, pos)
        }
        NodeData::IfStatement(x) => {
            let y = same!(IfStatement);
            child(&x.condition, &y.condition, pos)
                && child(&x.then_branch, &y.then_branch, pos)
                && opt(&x.else_branch, &y.else_branch, pos)
        }
        NodeData::WhileStatement(x) => {
            let y = same!(WhileStatement);
            child(&x.condition, &y.condition, pos) && child(&x.body, &y.body, pos)
        }
        NodeData::DoStatement(x) => {
            let y = same!(DoStatement);
            child(&x.body, &y.body, pos) && child(&x.condition, &y.condition, pos)
        }
        NodeData::ForStatement(x) => {
            let y = same!(ForStatement);
            opt(&x.initializer, &y.initializer, pos)
                && opt(&x.condition, &y.condition, pos)
                && opt(&x.incrementor, &y.incrementor, pos)
                && child(&x.body, &y.body, pos)
        }
        NodeData::ForInStatement(x) => {
            let y = same!(ForInStatement);
            child(&x.variable, &y.variable, pos)
                && child(&x.expression, &y.expression, pos)
                && child(&x.body, &y.body, pos)
        }
        NodeData::SwitchStatement(x) => {
            let y = same!(SwitchStatement);
            child(&x.expression, &y.expression, pos) && list(&x.cases, &y.cases, pos)
        }
        NodeData::CaseClause(x) => {
            let y = same!(CaseClause);
            opt(&x.expression, &y.expression, pos) && list(&x.statements, &y.statements, pos)
        }
        NodeData::TryStatement(x) => {
            let y = same!(TryStatement);
            child(&x.block, &y.block, pos)
                && opt(&x.catch_clause, &y.catch_clause, pos)
                && opt(&x.finally_block, &y.finally_block, pos)
        }
        NodeData::CatchClause(x) => {
            let y = same!(CatchClause);
            child(&x.variable, &y.variable, pos) && child(&x.block, &y.block, pos)
        }
        NodeData::ReturnStatement(x) => opt(&x.expression, &same!(ReturnStatement).expression, pos),
        NodeData::BreakStatement(x) => opt(&x.label, &same!(BreakStatement).label, pos),
        NodeData::ContinueStatement(x) => opt(&x.label, &same!(ContinueStatement).label, pos),
        NodeData::ThrowStatement(x) => child(&x.expression, &same!(ThrowStatement).expression, pos),
        NodeData::WithStatement(x) => {
            let y = same!(WithStatement);
            child(&x.expression, &y.expression, pos) && child(&x.body, &y.body, pos)
        }
        NodeData::LabeledStatement(x) => {
            let y = same!(LabeledStatement);
            child(&x.label, &y.label, pos) && child(&x.statement, &y.statement, pos)
        }
    }
}

fn invocations_equal(x: &Invocation, y: &Invocation, pos: bool) -> bool {
    child(&x.target, &y.target, pos)
        && list(&x.type_arguments, &y.type_arguments, pos)
        && list(&x.arguments, &y.arguments, pos)
}
