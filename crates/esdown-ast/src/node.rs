//! Node model.
//!
//! Every tree element is a [`Node`]: a header shared by all variants (span,
//! flags, comments, semantic handles, identity) plus a [`NodeData`] payload.
//! Composite payloads own their children; a node never appears twice in a
//! tree. Field order inside each payload is the order the walker visits
//! children in.

use crate::comment::Comment;
use crate::flags::NodeFlags;
use crate::ids::{DeclId, NodeId, SymbolId};
use esdown_common::{LineMap, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Node header
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct Node {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub span: Option<Span>,
    #[serde(default, skip_serializing_if = "NodeFlags::is_empty")]
    pub flags: NodeFlags,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leading_comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailing_comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_symbol: Option<SymbolId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration: Option<DeclId>,
    pub data: NodeData,
}

impl Clone for Node {
    /// Deep copy with fresh identities; handles and spans are preserved.
    fn clone(&self) -> Self {
        Node {
            id: NodeId::fresh(),
            span: self.span,
            flags: self.flags,
            leading_comments: self.leading_comments.clone(),
            trailing_comments: self.trailing_comments.clone(),
            symbol: self.symbol,
            alias_symbol: self.alias_symbol,
            declaration: self.declaration,
            data: self.data.clone(),
        }
    }
}

impl Node {
    pub fn new(data: impl Into<NodeData>) -> Self {
        Node {
            id: NodeId::fresh(),
            span: None,
            flags: NodeFlags::empty(),
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            symbol: None,
            alias_symbol: None,
            declaration: None,
            data: data.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn with_span(mut self, start: u32, end: u32) -> Self {
        self.span = Some(Span::new(start, end));
        self
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn with_alias_symbol(mut self, symbol: SymbolId) -> Self {
        self.alias_symbol = Some(symbol);
        self
    }

    pub fn with_declaration(mut self, decl: DeclId) -> Self {
        self.declaration = Some(decl);
        self
    }

    pub fn with_leading_comment(mut self, comment: Comment) -> Self {
        self.leading_comments.push(comment);
        self
    }

    pub fn with_trailing_comment(mut self, comment: Comment) -> Self {
        self.trailing_comments.push(comment);
        self
    }

    /// Resolved text if this node is an identifier.
    pub fn identifier_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Identifier(ident) => Some(&ident.resolved),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDeclaration> {
        match &self.data {
            NodeData::FunctionDeclaration(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryExpression> {
        match &self.data {
            NodeData::BinaryExpression(bin) => Some(bin),
            _ => None,
        }
    }

    pub fn is_super(&self) -> bool {
        matches!(self.data, NodeData::SuperExpression)
    }
}

// =============================================================================
// NodeList
// =============================================================================

/// Ordered sibling sequence used for statements, arguments, parameters and
/// members. Lists are not nodes: the walker visits their elements directly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeList {
    pub nodes: Vec<Node>,
}

impl NodeList {
    pub fn new(nodes: Vec<Node>) -> Self {
        NodeList { nodes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}

impl From<Vec<Node>> for NodeList {
    fn from(nodes: Vec<Node>) -> Self {
        NodeList { nodes }
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

// =============================================================================
// Operators and behavioral enums
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    AndAssign,
    XorAssign,
    OrAssign,
    LeftShiftAssign,
    SignedRightShiftAssign,
    UnsignedRightShiftAssign,
    Comma,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equals,
    NotEquals,
    StrictEquals,
    StrictNotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    InstanceOf,
    In,
    LeftShift,
    SignedRightShift,
    UnsignedRightShift,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    /// `left.right`
    Dot,
    /// `left[right]`
    Index,
    /// `name: value` inside an object literal.
    Member,
}

impl BinaryOperator {
    /// Source token for infix operators. `Dot`, `Index` and `Member` have
    /// bespoke layouts and return their separator.
    pub fn token(self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Assign => "=",
            AddAssign => "+=",
            SubtractAssign => "-=",
            MultiplyAssign => "*=",
            DivideAssign => "/=",
            ModuloAssign => "%=",
            AndAssign => "&=",
            XorAssign => "^=",
            OrAssign => "|=",
            LeftShiftAssign => "<<=",
            SignedRightShiftAssign => ">>=",
            UnsignedRightShiftAssign => ">>>=",
            Comma => ",",
            LogicalOr => "||",
            LogicalAnd => "&&",
            BitwiseOr => "|",
            BitwiseXor => "^",
            BitwiseAnd => "&",
            Equals => "==",
            NotEquals => "!=",
            StrictEquals => "===",
            StrictNotEquals => "!==",
            LessThan => "<",
            LessThanOrEqual => "<=",
            GreaterThan => ">",
            GreaterThanOrEqual => ">=",
            InstanceOf => "instanceof",
            In => "in",
            LeftShift => "<<",
            SignedRightShift => ">>",
            UnsignedRightShift => ">>>",
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Modulo => "%",
            Dot => ".",
            Index => "[",
            Member => ":",
        }
    }

    pub fn is_assignment(self) -> bool {
        use BinaryOperator::*;
        matches!(
            self,
            Assign
                | AddAssign
                | SubtractAssign
                | MultiplyAssign
                | DivideAssign
                | ModuloAssign
                | AndAssign
                | XorAssign
                | OrAssign
                | LeftShiftAssign
                | SignedRightShiftAssign
                | UnsignedRightShiftAssign
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    LogicalNot,
    BitwiseNot,
    Negate,
    Plus,
    TypeOf,
    Delete,
    Void,
    Parenthesized,
}

impl UnaryOperator {
    pub fn is_postfix(self) -> bool {
        matches!(
            self,
            UnaryOperator::PostIncrement | UnaryOperator::PostDecrement
        )
    }

    /// Prefix or postfix token. Keyword operators include their trailing space.
    pub fn token(self) -> &'static str {
        use UnaryOperator::*;
        match self {
            PreIncrement | PostIncrement => "++",
            PreDecrement | PostDecrement => "--",
            LogicalNot => "!",
            BitwiseNot => "~",
            Negate => "-",
            Plus => "+",
            TypeOf => "typeof ",
            Delete => "delete ",
            Void => "void ",
            Parenthesized => "(",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessorKind {
    Get,
    Set,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionRole {
    #[default]
    Plain,
    Method,
    Accessor(AccessorKind),
    Constructor,
    CallSignature,
    IndexSignature,
    ConstructSignature,
}

impl FunctionRole {
    pub fn is_signature(self) -> bool {
        matches!(
            self,
            FunctionRole::CallSignature
                | FunctionRole::IndexSignature
                | FunctionRole::ConstructSignature
        )
    }

    pub fn accessor(self) -> Option<AccessorKind> {
        match self {
            FunctionRole::Accessor(kind) => Some(kind),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleFlavor {
    #[default]
    Namespace,
    Enum,
    /// A dynamic module: the whole file is the module body.
    External,
}

// =============================================================================
// Leaf payloads
// =============================================================================

/// Identifier with both its source spelling and its de-escaped form.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "IdentifierSource")]
pub struct Identifier {
    /// Source spelling, escapes preserved.
    pub text: String,
    /// De-escaped text used for symbol lookup.
    pub resolved: String,
    pub is_numeric_name: bool,
}

#[derive(Deserialize)]
struct IdentifierSource {
    text: String,
    #[serde(default)]
    is_numeric_name: bool,
}

impl From<IdentifierSource> for Identifier {
    fn from(source: IdentifierSource) -> Self {
        let mut ident = Identifier::new(source.text);
        ident.is_numeric_name = source.is_numeric_name;
        ident
    }
}

/// Internal key `__proto__` resolves to, so it can never collide with the
/// real prototype slot of a symbol table.
pub const PROTO_KEY: &str = "#__proto__";

impl Identifier {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let resolved = resolve_identifier_text(&text);
        Identifier {
            text,
            resolved,
            is_numeric_name: false,
        }
    }

    pub fn numeric(text: impl Into<String>) -> Self {
        let mut ident = Identifier::new(text);
        ident.is_numeric_name = true;
        ident
    }
}

/// Decode `\uXXXX` and `\u{X...}` escapes and map `__proto__` to its
/// internal key.
pub fn resolve_identifier_text(raw: &str) -> String {
    let resolved = if raw.contains('\\') {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(pos) = rest.find("\\u") {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 2..];
            let (code, consumed) = if let Some(braced) = after.strip_prefix('{') {
                match braced.find('}') {
                    Some(close) => (u32::from_str_radix(&braced[..close], 16).ok(), close + 2),
                    None => (None, 0),
                }
            } else if after.len() >= 4 && after.is_char_boundary(4) {
                (u32::from_str_radix(&after[..4], 16).ok(), 4)
            } else {
                (None, 0)
            };
            match code.and_then(char::from_u32) {
                Some(ch) => {
                    out.push(ch);
                    rest = &after[consumed..];
                }
                None => {
                    out.push_str("\\u");
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    } else {
        raw.to_string()
    };
    if resolved == "__proto__" {
        PROTO_KEY.to_string()
    } else {
        resolved
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NumericLiteral {
    pub value: f64,
    /// Source spelling, printed verbatim.
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StringLiteral {
    /// Source spelling including quotes.
    pub text: String,
}

impl StringLiteral {
    /// Text between the quotes.
    pub fn value(&self) -> &str {
        let text = self.text.as_str();
        if text.len() >= 2 && (text.starts_with('"') || text.starts_with('\'')) {
            &text[1..text.len() - 1]
        } else {
            text
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegularExpressionLiteral {
    pub text: String,
}

// =============================================================================
// Type payloads (never emitted)
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeReference {
    pub term: Box<Node>,
    #[serde(default)]
    pub array_rank: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenericType {
    pub name: Box<Node>,
    pub type_arguments: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeQuery {
    pub name: Box<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: Box<Node>,
    #[serde(default)]
    pub constraint: Option<Box<Node>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectType {
    pub members: NodeList,
}

// =============================================================================
// Declaration payloads
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Script {
    pub file_name: String,
    pub statements: NodeList,
    #[serde(default)]
    pub line_map: LineMap,
    #[serde(default)]
    pub is_declaration_file: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModuleDeclaration {
    /// An identifier, or a string literal for external modules. Dotted
    /// declarations (`module A.B {}`) arrive already nested as `A { B }`.
    pub name: Box<Node>,
    pub members: NodeList,
    #[serde(default)]
    pub flavor: ModuleFlavor,
    #[serde(default)]
    pub is_ambient: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassDeclaration {
    pub name: Box<Node>,
    #[serde(default)]
    pub type_parameters: NodeList,
    #[serde(default)]
    pub extends: NodeList,
    #[serde(default)]
    pub implements: NodeList,
    #[serde(default)]
    pub constructor: Option<Box<Node>>,
    pub members: NodeList,
    #[serde(default)]
    pub is_ambient: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InterfaceDeclaration {
    pub name: Box<Node>,
    #[serde(default)]
    pub type_parameters: NodeList,
    #[serde(default)]
    pub extends: NodeList,
    pub members: NodeList,
}

/// Every function-like construct: declarations, expressions, desugared
/// arrows, methods, accessors, constructors and signatures.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    #[serde(default)]
    pub name: Option<Box<Node>>,
    #[serde(default)]
    pub type_parameters: NodeList,
    pub parameters: NodeList,
    #[serde(default)]
    pub return_type: Option<Box<Node>>,
    /// A `Block`, or an expression for arrow functions with expression
    /// bodies. `None` for signatures and ambient declarations.
    #[serde(default)]
    pub body: Option<Box<Node>>,
    #[serde(default)]
    pub role: FunctionRole,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_expression: bool,
    #[serde(default)]
    pub is_arrow: bool,
    #[serde(default)]
    pub is_ambient: bool,
}

impl FunctionDeclaration {
    pub fn new(name: Option<Node>, parameters: Vec<Node>, body: Option<Node>) -> Self {
        FunctionDeclaration {
            name: name.map(Box::new),
            parameters: parameters.into(),
            body: body.map(Box::new),
            ..FunctionDeclaration::default()
        }
    }

    pub fn with_role(mut self, role: FunctionRole) -> Self {
        self.role = role;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn as_expression(mut self) -> Self {
        self.is_expression = true;
        self
    }

    pub fn as_arrow(mut self) -> Self {
        self.is_arrow = true;
        self.is_expression = true;
        self
    }

    pub fn as_ambient(mut self) -> Self {
        self.is_ambient = true;
        self
    }

    pub fn name_text(&self) -> Option<&str> {
        self.name.as_deref().and_then(Node::identifier_text)
    }

    /// Signatures and bodiless ambient functions produce no output.
    pub fn is_signature_only(&self) -> bool {
        self.role.is_signature() || self.body.is_none()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableStatement {
    pub declaration: Box<Node>,
    #[serde(default)]
    pub is_ambient: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub declarators: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub name: Box<Node>,
    #[serde(default)]
    pub type_annotation: Option<Box<Node>>,
    #[serde(default)]
    pub initializer: Option<Box<Node>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Parameter {
    pub name: Box<Node>,
    #[serde(default)]
    pub type_annotation: Option<Box<Node>>,
    /// Default value.
    #[serde(default)]
    pub initializer: Option<Box<Node>>,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub is_rest: bool,
    /// Constructor parameter with an accessibility modifier; declares an
    /// instance property of the same name.
    #[serde(default)]
    pub is_property: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    pub name: Box<Node>,
    #[serde(default)]
    pub type_annotation: Option<Box<Node>>,
    #[serde(default)]
    pub initializer: Option<Box<Node>>,
    #[serde(default)]
    pub is_static: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: Box<Node>,
    #[serde(default)]
    pub initializer: Option<Box<Node>>,
}

/// `import name = reference;`. For external imports `reference` is the
/// string literal passed to `require`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImportDeclaration {
    pub name: Box<Node>,
    pub reference: Box<Node>,
    #[serde(default)]
    pub is_external: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportAssignment {
    pub name: Box<Node>,
}

// =============================================================================
// Expression payloads
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrayLiteral {
    pub elements: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectLiteral {
    pub members: NodeList,
}

/// Shared payload of `CallExpression` and `NewExpression`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Invocation {
    pub target: Box<Node>,
    #[serde(default)]
    pub type_arguments: NodeList,
    pub arguments: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConditionalExpression {
    pub condition: Box<Node>,
    pub when_true: Box<Node>,
    pub when_false: Box<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeAssertion {
    pub type_node: Box<Node>,
    pub operand: Box<Node>,
}

// =============================================================================
// Statement payloads
// =============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Block {
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Box<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: Box<Node>,
    pub then_branch: Box<Node>,
    #[serde(default)]
    pub else_branch: Option<Box<Node>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WhileStatement {
    pub condition: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DoStatement {
    pub body: Box<Node>,
    pub condition: Box<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForStatement {
    /// A `VariableDeclaration` or an expression.
    #[serde(default)]
    pub initializer: Option<Box<Node>>,
    #[serde(default)]
    pub condition: Option<Box<Node>>,
    #[serde(default)]
    pub incrementor: Option<Box<Node>>,
    pub body: Box<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForInStatement {
    /// A `VariableDeclaration` or an lvalue expression.
    pub variable: Box<Node>,
    pub expression: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwitchStatement {
    pub expression: Box<Node>,
    pub cases: NodeList,
}

/// `case e:` or, with no expression, `default:`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseClause {
    #[serde(default)]
    pub expression: Option<Box<Node>>,
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TryStatement {
    pub block: Box<Node>,
    #[serde(default)]
    pub catch_clause: Option<Box<Node>>,
    #[serde(default)]
    pub finally_block: Option<Box<Node>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatchClause {
    pub variable: Box<Node>,
    pub block: Box<Node>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReturnStatement {
    #[serde(default)]
    pub expression: Option<Box<Node>>,
}

/// Payload of `break` and `continue`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JumpStatement {
    #[serde(default)]
    pub label: Option<Box<Node>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThrowStatement {
    pub expression: Box<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WithStatement {
    pub expression: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabeledStatement {
    pub label: Box<Node>,
    pub statement: Box<Node>,
}

// =============================================================================
// NodeData / NodeKind
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeData {
    // Literals and leaves
    Identifier(Identifier),
    NumericLiteral(NumericLiteral),
    StringLiteral(StringLiteral),
    RegularExpressionLiteral(RegularExpressionLiteral),
    TrueLiteral,
    FalseLiteral,
    NullLiteral,
    ThisExpression,
    SuperExpression,
    OmittedExpression,

    // Types
    TypeReference(TypeReference),
    GenericType(GenericType),
    TypeQuery(TypeQuery),
    TypeParameter(TypeParameter),
    ObjectType(ObjectType),

    // Declarations
    Script(Script),
    ModuleDeclaration(ModuleDeclaration),
    ClassDeclaration(ClassDeclaration),
    InterfaceDeclaration(InterfaceDeclaration),
    FunctionDeclaration(FunctionDeclaration),
    VariableDeclaration(VariableDeclaration),
    VariableDeclarator(VariableDeclarator),
    Parameter(Parameter),
    PropertyDeclaration(PropertyDeclaration),
    EnumMember(EnumMember),
    ImportDeclaration(ImportDeclaration),
    ExportAssignment(ExportAssignment),

    // Expressions
    BinaryExpression(BinaryExpression),
    UnaryExpression(UnaryExpression),
    ArrayLiteral(ArrayLiteral),
    ObjectLiteral(ObjectLiteral),
    CallExpression(Invocation),
    NewExpression(Invocation),
    ConditionalExpression(ConditionalExpression),
    TypeAssertion(TypeAssertion),

    // Statements
    Block(Block),
    VariableStatement(VariableStatement),
    ExpressionStatement(ExpressionStatement),
    IfStatement(IfStatement),
    WhileStatement(WhileStatement),
    DoStatement(DoStatement),
    ForStatement(ForStatement),
    ForInStatement(ForInStatement),
    SwitchStatement(SwitchStatement),
    CaseClause(CaseClause),
    TryStatement(TryStatement),
    CatchClause(CatchClause),
    ReturnStatement(ReturnStatement),
    BreakStatement(JumpStatement),
    ContinueStatement(JumpStatement),
    ThrowStatement(ThrowStatement),
    WithStatement(WithStatement),
    LabeledStatement(LabeledStatement),
    DebuggerStatement,
    EmptyStatement,
}

/// Fieldless tag of a [`NodeData`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum NodeKind {
    Identifier,
    NumericLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    TrueLiteral,
    FalseLiteral,
    NullLiteral,
    ThisExpression,
    SuperExpression,
    OmittedExpression,
    TypeReference,
    GenericType,
    TypeQuery,
    TypeParameter,
    ObjectType,
    Script,
    ModuleDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    FunctionDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    Parameter,
    PropertyDeclaration,
    EnumMember,
    ImportDeclaration,
    ExportAssignment,
    BinaryExpression,
    UnaryExpression,
    ArrayLiteral,
    ObjectLiteral,
    CallExpression,
    NewExpression,
    ConditionalExpression,
    TypeAssertion,
    Block,
    VariableStatement,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForInStatement,
    SwitchStatement,
    CaseClause,
    TryStatement,
    CatchClause,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    WithStatement,
    LabeledStatement,
    DebuggerStatement,
    EmptyStatement,
}

impl NodeKind {
    pub const COUNT: usize = 55;

    /// Every kind, in declaration order; `ALL[k as usize] == k`.
    pub const ALL: [NodeKind; NodeKind::COUNT] = [
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
        NodeKind::TypeReference,
        NodeKind::GenericType,
        NodeKind::TypeQuery,
        NodeKind::TypeParameter,
        NodeKind::ObjectType,
        NodeKind::Script,
        NodeKind::ModuleDeclaration,
        NodeKind::ClassDeclaration,
        NodeKind::InterfaceDeclaration,
        NodeKind::FunctionDeclaration,
        NodeKind::VariableDeclaration,
        NodeKind::VariableDeclarator,
        NodeKind::Parameter,
        NodeKind::PropertyDeclaration,
        NodeKind::EnumMember,
        NodeKind::ImportDeclaration,
        NodeKind::ExportAssignment,
        NodeKind::BinaryExpression,
        NodeKind::UnaryExpression,
        NodeKind::ArrayLiteral,
        NodeKind::ObjectLiteral,
        NodeKind::CallExpression,
        NodeKind::NewExpression,
        NodeKind::ConditionalExpression,
        NodeKind::TypeAssertion,
        NodeKind::Block,
        NodeKind::VariableStatement,
        NodeKind::ExpressionStatement,
        NodeKind::IfStatement,
        NodeKind::WhileStatement,
        NodeKind::DoStatement,
        NodeKind::ForStatement,
        NodeKind::ForInStatement,
        NodeKind::SwitchStatement,
        NodeKind::CaseClause,
        NodeKind::TryStatement,
        NodeKind::CatchClause,
        NodeKind::ReturnStatement,
        NodeKind::BreakStatement,
        NodeKind::ContinueStatement,
        NodeKind::ThrowStatement,
        NodeKind::WithStatement,
        NodeKind::LabeledStatement,
        NodeKind::DebuggerStatement,
        NodeKind::EmptyStatement,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kinds that exist only for the type checker and have no textual form.
    pub fn is_type_only(self) -> bool {
        matches!(
            self,
            NodeKind::TypeReference
                | NodeKind::GenericType
                | NodeKind::TypeQuery
                | NodeKind::TypeParameter
                | NodeKind::ObjectType
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Identifier(_) => NodeKind::Identifier,
            NodeData::NumericLiteral(_) => NodeKind::NumericLiteral,
            NodeData::StringLiteral(_) => NodeKind::StringLiteral,
            NodeData::RegularExpressionLiteral(_) => NodeKind::RegularExpressionLiteral,
            NodeData::TrueLiteral => NodeKind::TrueLiteral,
            NodeData::FalseLiteral => NodeKind::FalseLiteral,
            NodeData::NullLiteral => NodeKind::NullLiteral,
            NodeData::ThisExpression => NodeKind::ThisExpression,
            NodeData::SuperExpression => NodeKind::SuperExpression,
            NodeData::OmittedExpression => NodeKind::OmittedExpression,
            NodeData::TypeReference(_) => NodeKind::TypeReference,
            NodeData::GenericType(_) => NodeKind::GenericType,
            NodeData::TypeQuery(_) => NodeKind::TypeQuery,
            NodeData::TypeParameter(_) => NodeKind::TypeParameter,
            NodeData::ObjectType(_) => NodeKind::ObjectType,
            NodeData::Script(_) => NodeKind::Script,
            NodeData::ModuleDeclaration(_) => NodeKind::ModuleDeclaration,
            NodeData::ClassDeclaration(_) => NodeKind::ClassDeclaration,
            NodeData::InterfaceDeclaration(_) => NodeKind::InterfaceDeclaration,
            NodeData::FunctionDeclaration(_) => NodeKind::FunctionDeclaration,
            NodeData::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            NodeData::VariableDeclarator(_) => NodeKind::VariableDeclarator,
            NodeData::Parameter(_) => NodeKind::Parameter,
            NodeData::PropertyDeclaration(_) => NodeKind::PropertyDeclaration,
            NodeData::EnumMember(_) => NodeKind::EnumMember,
            NodeData::ImportDeclaration(_) => NodeKind::ImportDeclaration,
            NodeData::ExportAssignment(_) => NodeKind::ExportAssignment,
            NodeData::BinaryExpression(_) => NodeKind::BinaryExpression,
            NodeData::UnaryExpression(_) => NodeKind::UnaryExpression,
            NodeData::ArrayLiteral(_) => NodeKind::ArrayLiteral,
            NodeData::ObjectLiteral(_) => NodeKind::ObjectLiteral,
            NodeData::CallExpression(_) => NodeKind::CallExpression,
            NodeData::NewExpression(_) => NodeKind::NewExpression,
            NodeData::ConditionalExpression(_) => NodeKind::ConditionalExpression,
            NodeData::TypeAssertion(_) => NodeKind::TypeAssertion,
            NodeData::Block(_) => NodeKind::Block,
            NodeData::VariableStatement(_) => NodeKind::VariableStatement,
            NodeData::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            NodeData::IfStatement(_) => NodeKind::IfStatement,
            NodeData::WhileStatement(_) => NodeKind::WhileStatement,
            NodeData::DoStatement(_) => NodeKind::DoStatement,
            NodeData::ForStatement(_) => NodeKind::ForStatement,
            NodeData::ForInStatement(_) => NodeKind::ForInStatement,
            NodeData::SwitchStatement(_) => NodeKind::SwitchStatement,
            NodeData::CaseClause(_) => NodeKind::CaseClause,
            NodeData::TryStatement(_) => NodeKind::TryStatement,
            NodeData::CatchClause(_) => NodeKind::CatchClause,
            NodeData::ReturnStatement(_) => NodeKind::ReturnStatement,
            NodeData::BreakStatement(_) => NodeKind::BreakStatement,
            NodeData::ContinueStatement(_) => NodeKind::ContinueStatement,
            NodeData::ThrowStatement(_) => NodeKind::ThrowStatement,
            NodeData::WithStatement(_) => NodeKind::WithStatement,
            NodeData::LabeledStatement(_) => NodeKind::LabeledStatement,
            NodeData::DebuggerStatement => NodeKind::DebuggerStatement,
            NodeData::EmptyStatement => NodeKind::EmptyStatement,
        }
    }
}

macro_rules! impl_into_node_data {
    ($($payload:ident),* $(,)?) => {
        $(
            impl From<$payload> for NodeData {
                fn from(payload: $payload) -> Self {
                    NodeData::$payload(payload)
                }
            }
        )*
    };
}

impl_into_node_data!(
    Identifier,
    NumericLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    TypeReference,
    GenericType,
    TypeQuery,
    TypeParameter,
    ObjectType,
    Script,
    ModuleDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    FunctionDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    Parameter,
    PropertyDeclaration,
    EnumMember,
    ImportDeclaration,
    ExportAssignment,
    BinaryExpression,
    UnaryExpression,
    ArrayLiteral,
    ObjectLiteral,
    ConditionalExpression,
    TypeAssertion,
    Block,
    VariableStatement,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForInStatement,
    SwitchStatement,
    CaseClause,
    TryStatement,
    CatchClause,
    ReturnStatement,
    ThrowStatement,
    WithStatement,
    LabeledStatement,
);

#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod tests;
