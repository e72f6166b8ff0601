//! Constructors for building trees by hand.
//!
//! Parsers and tests use these instead of spelling out payload structs.
//! Every function returns a fresh node with no span and no handles; attach
//! those with the `Node::with_*` builders.

use crate::node::*;
use esdown_common::LineMap;

pub fn ident(text: &str) -> Node {
    Node::new(Identifier::new(text))
}

pub fn num(value: f64) -> Node {
    let text = if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e21 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    };
    Node::new(NumericLiteral { value, text })
}

/// Double-quoted string literal with `value` as its contents.
pub fn string(value: &str) -> Node {
    Node::new(StringLiteral {
        text: format!("\"{value}\""),
    })
}

pub fn regex(text: &str) -> Node {
    Node::new(RegularExpressionLiteral {
        text: text.to_string(),
    })
}

pub fn true_lit() -> Node {
    Node::new(NodeData::TrueLiteral)
}

pub fn false_lit() -> Node {
    Node::new(NodeData::FalseLiteral)
}

pub fn null_lit() -> Node {
    Node::new(NodeData::NullLiteral)
}

pub fn this_expr() -> Node {
    Node::new(NodeData::ThisExpression)
}

pub fn super_expr() -> Node {
    Node::new(NodeData::SuperExpression)
}

pub fn omitted() -> Node {
    Node::new(NodeData::OmittedExpression)
}

// =============================================================================
// Expressions
// =============================================================================

pub fn binary(operator: BinaryOperator, left: Node, right: Node) -> Node {
    Node::new(BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn assign(left: Node, right: Node) -> Node {
    binary(BinaryOperator::Assign, left, right)
}

/// `target.name`
pub fn dot(target: Node, name: &str) -> Node {
    binary(BinaryOperator::Dot, target, ident(name))
}

pub fn index(target: Node, key: Node) -> Node {
    binary(BinaryOperator::Index, target, key)
}

/// `name: value` inside an object literal.
pub fn member(name: Node, value: Node) -> Node {
    binary(BinaryOperator::Member, name, value)
}

pub fn unary(operator: UnaryOperator, operand: Node) -> Node {
    Node::new(UnaryExpression {
        operator,
        operand: Box::new(operand),
    })
}

pub fn paren(operand: Node) -> Node {
    unary(UnaryOperator::Parenthesized, operand)
}

pub fn call(target: Node, arguments: Vec<Node>) -> Node {
    Node::new(NodeData::CallExpression(Invocation {
        target: Box::new(target),
        type_arguments: NodeList::default(),
        arguments: arguments.into(),
    }))
}

pub fn new_expr(target: Node, arguments: Vec<Node>) -> Node {
    Node::new(NodeData::NewExpression(Invocation {
        target: Box::new(target),
        type_arguments: NodeList::default(),
        arguments: arguments.into(),
    }))
}

pub fn array(elements: Vec<Node>) -> Node {
    Node::new(ArrayLiteral {
        elements: elements.into(),
    })
}

pub fn object(members: Vec<Node>) -> Node {
    Node::new(ObjectLiteral {
        members: members.into(),
    })
}

pub fn conditional(condition: Node, when_true: Node, when_false: Node) -> Node {
    Node::new(ConditionalExpression {
        condition: Box::new(condition),
        when_true: Box::new(when_true),
        when_false: Box::new(when_false),
    })
}

pub fn type_assertion(type_node: Node, operand: Node) -> Node {
    Node::new(TypeAssertion {
        type_node: Box::new(type_node),
        operand: Box::new(operand),
    })
}

// =============================================================================
// Types
// =============================================================================

pub fn type_ref(name: &str) -> Node {
    Node::new(TypeReference {
        term: Box::new(ident(name)),
        array_rank: 0,
    })
}

pub fn type_query(name: Node) -> Node {
    Node::new(TypeQuery {
        name: Box::new(name),
    })
}

// =============================================================================
// Declarations
// =============================================================================

pub fn script(file_name: &str, statements: Vec<Node>) -> Node {
    Node::new(Script {
        file_name: file_name.to_string(),
        statements: statements.into(),
        line_map: LineMap::default(),
        is_declaration_file: false,
    })
}

/// Script whose line map is built from `source`.
pub fn script_with_source(file_name: &str, source: &str, statements: Vec<Node>) -> Node {
    Node::new(Script {
        file_name: file_name.to_string(),
        statements: statements.into(),
        line_map: LineMap::build(source),
        is_declaration_file: false,
    })
}

pub fn module(name: Node, members: Vec<Node>) -> Node {
    Node::new(ModuleDeclaration {
        name: Box::new(name),
        members: members.into(),
        flavor: ModuleFlavor::Namespace,
        is_ambient: false,
    })
}

pub fn external_module(name: &str, members: Vec<Node>) -> Node {
    Node::new(ModuleDeclaration {
        name: Box::new(string(name)),
        members: members.into(),
        flavor: ModuleFlavor::External,
        is_ambient: false,
    })
}

pub fn enum_decl(name: Node, members: Vec<Node>) -> Node {
    Node::new(ModuleDeclaration {
        name: Box::new(name),
        members: members.into(),
        flavor: ModuleFlavor::Enum,
        is_ambient: false,
    })
}

pub fn enum_member(name: Node, initializer: Option<Node>) -> Node {
    Node::new(EnumMember {
        name: Box::new(name),
        initializer: initializer.map(Box::new),
    })
    .with_flags(crate::NodeFlags::ENUM_MEMBER)
}

pub fn class(
    name: Node,
    extends: Option<Node>,
    constructor: Option<Node>,
    members: Vec<Node>,
) -> Node {
    Node::new(ClassDeclaration {
        name: Box::new(name),
        type_parameters: NodeList::default(),
        extends: extends.into_iter().collect::<Vec<_>>().into(),
        implements: NodeList::default(),
        constructor: constructor.map(Box::new),
        members: members.into(),
        is_ambient: false,
    })
}

pub fn interface(name: Node, members: Vec<Node>) -> Node {
    Node::new(InterfaceDeclaration {
        name: Box::new(name),
        type_parameters: NodeList::default(),
        extends: NodeList::default(),
        members: members.into(),
    })
}

pub fn function(func: FunctionDeclaration) -> Node {
    Node::new(func)
}

pub fn param(name: Node) -> Node {
    Node::new(Parameter {
        name: Box::new(name),
        type_annotation: None,
        initializer: None,
        is_optional: false,
        is_rest: false,
        is_property: false,
    })
}

pub fn param_with_default(name: Node, default: Node) -> Node {
    Node::new(Parameter {
        name: Box::new(name),
        type_annotation: None,
        initializer: Some(Box::new(default)),
        is_optional: true,
        is_rest: false,
        is_property: false,
    })
}

pub fn rest_param(name: Node) -> Node {
    Node::new(Parameter {
        name: Box::new(name),
        type_annotation: None,
        initializer: None,
        is_optional: false,
        is_rest: true,
        is_property: false,
    })
}

/// Constructor parameter that also declares an instance property.
pub fn property_param(name: Node) -> Node {
    Node::new(Parameter {
        name: Box::new(name),
        type_annotation: None,
        initializer: None,
        is_optional: false,
        is_rest: false,
        is_property: true,
    })
}

pub fn property(name: Node, initializer: Option<Node>, is_static: bool) -> Node {
    Node::new(PropertyDeclaration {
        name: Box::new(name),
        type_annotation: None,
        initializer: initializer.map(Box::new),
        is_static,
    })
}

pub fn declarator(name: Node, initializer: Option<Node>) -> Node {
    Node::new(VariableDeclarator {
        name: Box::new(name),
        type_annotation: None,
        initializer: initializer.map(Box::new),
    })
}

pub fn var_decl(declarators: Vec<Node>) -> Node {
    Node::new(VariableDeclaration {
        declarators: declarators.into(),
    })
}

/// `var name = initializer;` as a statement.
pub fn var_stmt(name: Node, initializer: Option<Node>) -> Node {
    var_stmt_multi(vec![declarator(name, initializer)])
}

pub fn var_stmt_multi(declarators: Vec<Node>) -> Node {
    Node::new(VariableStatement {
        declaration: Box::new(var_decl(declarators)),
        is_ambient: false,
    })
}

pub fn import_alias(name: Node, reference: Node) -> Node {
    Node::new(ImportDeclaration {
        name: Box::new(name),
        reference: Box::new(reference),
        is_external: false,
    })
}

pub fn import_require(name: Node, module_name: &str) -> Node {
    Node::new(ImportDeclaration {
        name: Box::new(name),
        reference: Box::new(string(module_name)),
        is_external: true,
    })
}

pub fn export_assignment(name: Node) -> Node {
    Node::new(ExportAssignment {
        name: Box::new(name),
    })
}

// =============================================================================
// Statements
// =============================================================================

pub fn block(statements: Vec<Node>) -> Node {
    Node::new(Block {
        statements: statements.into(),
    })
}

pub fn expr_stmt(expression: Node) -> Node {
    Node::new(ExpressionStatement {
        expression: Box::new(expression),
    })
}

pub fn return_stmt(expression: Option<Node>) -> Node {
    Node::new(ReturnStatement {
        expression: expression.map(Box::new),
    })
}

pub fn if_stmt(condition: Node, then_branch: Node, else_branch: Option<Node>) -> Node {
    Node::new(IfStatement {
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: else_branch.map(Box::new),
    })
}

pub fn while_stmt(condition: Node, body: Node) -> Node {
    Node::new(WhileStatement {
        condition: Box::new(condition),
        body: Box::new(body),
    })
}

pub fn do_stmt(body: Node, condition: Node) -> Node {
    Node::new(DoStatement {
        body: Box::new(body),
        condition: Box::new(condition),
    })
}

pub fn for_stmt(
    initializer: Option<Node>,
    condition: Option<Node>,
    incrementor: Option<Node>,
    body: Node,
) -> Node {
    Node::new(ForStatement {
        initializer: initializer.map(Box::new),
        condition: condition.map(Box::new),
        incrementor: incrementor.map(Box::new),
        body: Box::new(body),
    })
}

pub fn for_in(variable: Node, expression: Node, body: Node) -> Node {
    Node::new(ForInStatement {
        variable: Box::new(variable),
        expression: Box::new(expression),
        body: Box::new(body),
    })
}

pub fn switch(expression: Node, cases: Vec<Node>) -> Node {
    Node::new(SwitchStatement {
        expression: Box::new(expression),
        cases: cases.into(),
    })
}

pub fn case(expression: Option<Node>, statements: Vec<Node>) -> Node {
    Node::new(CaseClause {
        expression: expression.map(Box::new),
        statements: statements.into(),
    })
}

pub fn try_stmt(block: Node, catch_clause: Option<Node>, finally_block: Option<Node>) -> Node {
    Node::new(TryStatement {
        block: Box::new(block),
        catch_clause: catch_clause.map(Box::new),
        finally_block: finally_block.map(Box::new),
    })
}

pub fn catch(variable: Node, block: Node) -> Node {
    Node::new(CatchClause {
        variable: Box::new(variable),
        block: Box::new(block),
    })
}

pub fn break_stmt(label: Option<Node>) -> Node {
    Node::new(NodeData::BreakStatement(JumpStatement {
        label: label.map(Box::new),
    }))
}

pub fn continue_stmt(label: Option<Node>) -> Node {
    Node::new(NodeData::ContinueStatement(JumpStatement {
        label: label.map(Box::new),
    }))
}

pub fn throw(expression: Node) -> Node {
    Node::new(ThrowStatement {
        expression: Box::new(expression),
    })
}

pub fn with_stmt(expression: Node, body: Node) -> Node {
    Node::new(WithStatement {
        expression: Box::new(expression),
        body: Box::new(body),
    })
}

pub fn labeled(label: Node, statement: Node) -> Node {
    Node::new(LabeledStatement {
        label: Box::new(label),
        statement: Box::new(statement),
    })
}

pub fn debugger() -> Node {
    Node::new(NodeData::DebuggerStatement)
}

pub fn empty() -> Node {
    Node::new(NodeData::EmptyStatement)
}
