//! The ES5 printer.
//!
//! One [`Emitter`] is created per file. It walks the tree once, writing text
//! through a [`SourceWriter`] and, when a source map was requested, recording
//! nested mappings for every positioned node it prints.

mod classes;
mod comments;
mod expressions;
mod functions;
mod modules;
mod names;
mod statements;

use crate::error::EmitError;
use crate::options::EmitOptions;
use crate::source_map::SourceMapBuilder;
use crate::source_writer::SourceWriter;
use esdown_ast::{DeclId, FunctionDeclaration, ModuleFlavor, Node, NodeData, NodeId, SymbolId};
use esdown_binder::{SemanticFacts, SymbolKind};
use esdown_common::{LineMap, Span};
use tracing::trace;

/// The kind of scope the printer is currently inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ContainerKind {
    Global,
    Module,
    DynamicModule,
    Class,
    Constructor,
    Function,
    ArgumentList,
}

/// The class whose body is being printed.
#[derive(Clone, Debug)]
pub(crate) struct ClassContext {
    pub name: String,
    pub has_base: bool,
}

/// State of the `var` declaration list being printed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct VariableGroup {
    /// Exported declarators also assign the export target.
    pub writes_exports: bool,
}

/// Leading comments of the first emitted element that form the file header.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CopyrightHeader {
    pub element: NodeId,
    pub count: usize,
}

pub struct Emitter<'a> {
    pub(crate) facts: &'a dyn SemanticFacts,
    pub(crate) options: &'a EmitOptions,
    pub(crate) writer: SourceWriter,
    pub(crate) source_map: Option<SourceMapBuilder>,
    pub(crate) line_map: Option<&'a LineMap>,
    pub(crate) containers: Vec<ContainerKind>,
    pub(crate) decl_stack: Vec<DeclId>,
    /// Names that exported declarations are written onto (`M`, `exports`),
    /// innermost last.
    pub(crate) export_targets: Vec<String>,
    pub(crate) current_class: Option<ClassContext>,
    pub(crate) in_static_member: bool,
    pub(crate) in_arrow_context: bool,
    pub(crate) current_variable_declaration_group: Option<VariableGroup>,
    pub(crate) copyright: Option<CopyrightHeader>,
}

impl<'a> Emitter<'a> {
    pub fn new(
        facts: &'a dyn SemanticFacts,
        options: &'a EmitOptions,
        line_map: Option<&'a LineMap>,
        with_source_map: bool,
    ) -> Self {
        Emitter {
            facts,
            options,
            writer: SourceWriter::new(options.indent_unit(), options.new_line),
            source_map: with_source_map.then(SourceMapBuilder::new),
            line_map,
            containers: vec![ContainerKind::Global],
            decl_stack: Vec::new(),
            export_targets: Vec::new(),
            current_class: None,
            in_static_member: false,
            in_arrow_context: false,
            current_variable_declaration_group: None,
            copyright: None,
        }
    }

    /// Print `root`. A `Script` gets the file prologue; any other node is
    /// printed on its own.
    pub fn emit_root(&mut self, root: &Node) -> Result<(), EmitError> {
        match &root.data {
            NodeData::Script(_) => self.emit_script(root),
            _ => self.emit_node(root),
        }
    }

    pub fn finish(self) -> (String, Option<SourceMapBuilder>) {
        (self.writer.into_output(), self.source_map)
    }

    // =========================================================================
    // Write helpers
    // =========================================================================

    pub(crate) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    pub(crate) fn write_line(&mut self) {
        self.writer.write_line();
    }

    pub(crate) fn ensure_line_start(&mut self) {
        self.writer.ensure_line_start();
    }

    pub(crate) fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    pub(crate) fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }

    /// `{`, newline, indented `body`, `}` on its own line.
    pub(crate) fn write_braced(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<(), EmitError>,
    ) -> Result<(), EmitError> {
        self.write("{");
        self.write_line();
        self.increase_indent();
        let result = body(self);
        self.ensure_line_start();
        self.decrease_indent();
        self.write("}");
        result
    }

    pub(crate) fn this_text(&self) -> &'static str {
        if self.in_arrow_context { "_this" } else { "this" }
    }

    // =========================================================================
    // Scoped state
    // =========================================================================

    pub(crate) fn container(&self) -> ContainerKind {
        self.containers
            .last()
            .copied()
            .unwrap_or(ContainerKind::Global)
    }

    pub(crate) fn with_container<R>(
        &mut self,
        kind: ContainerKind,
        f: impl FnOnce(&mut Self) -> Result<R, EmitError>,
    ) -> Result<R, EmitError> {
        self.containers.push(kind);
        let result = f(self);
        self.containers.pop();
        result
    }

    /// Run `f` with `decl` (if any) on the declaration stack.
    pub(crate) fn with_decl<R>(
        &mut self,
        decl: Option<DeclId>,
        f: impl FnOnce(&mut Self) -> Result<R, EmitError>,
    ) -> Result<R, EmitError> {
        let Some(decl) = decl else {
            return f(self);
        };
        self.decl_stack.push(decl);
        let result = f(self);
        self.decl_stack.pop();
        result
    }

    /// Run `f` with `name` entered in the source-map name table.
    pub(crate) fn with_name<R>(
        &mut self,
        name: Option<&str>,
        f: impl FnOnce(&mut Self) -> Result<R, EmitError>,
    ) -> Result<R, EmitError> {
        let pushed = match (name, self.source_map.as_mut()) {
            (Some(name), Some(map)) if !name.is_empty() => {
                map.push_name(name);
                true
            }
            _ => false,
        };
        let result = f(self);
        if pushed && let Some(map) = self.source_map.as_mut() {
            map.pop_name();
        }
        result
    }

    /// Record a mapping around the text `f` prints for `node`. The mapping is
    /// closed even when `f` fails.
    pub(crate) fn with_mapping<R>(
        &mut self,
        node: &Node,
        f: impl FnOnce(&mut Self) -> Result<R, EmitError>,
    ) -> Result<R, EmitError> {
        self.with_span_mapping(node.span, f)
    }

    pub(crate) fn with_span_mapping<R>(
        &mut self,
        span: Option<Span>,
        f: impl FnOnce(&mut Self) -> Result<R, EmitError>,
    ) -> Result<R, EmitError> {
        let opened = self.start_mapping(span);
        let result = f(self);
        if !opened {
            return result;
        }
        let end = self.writer.end_position();
        let closed = match self.source_map.as_mut() {
            Some(map) => map.end(end),
            None => Ok(()),
        };
        let value = result?;
        closed?;
        Ok(value)
    }

    fn start_mapping(&mut self, span: Option<Span>) -> bool {
        let (Some(span), Some(line_map), Some(map)) =
            (span, self.line_map, self.source_map.as_mut())
        else {
            return false;
        };
        map.start(
            self.writer.position(),
            line_map.line_and_column(span.start),
            line_map.line_and_column(span.end),
        );
        true
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Print one node with its comments and mapping.
    pub(crate) fn emit_node(&mut self, node: &Node) -> Result<(), EmitError> {
        let kind = node.kind();
        if kind.is_type_only() {
            return Err(EmitError::TypeOnlyNode {
                kind,
                span: node.span,
            });
        }
        if !self.emits_code(node) {
            trace!(%kind, "skipping node without runtime code");
            return Ok(());
        }
        self.emit_leading_comments(node)?;
        self.with_mapping(node, |this| this.emit_node_inner(node))?;
        self.emit_trailing_comments(node)
    }

    pub(crate) fn emit_optional(&mut self, node: Option<&Node>) -> Result<(), EmitError> {
        match node {
            Some(node) => self.emit_node(node),
            None => Ok(()),
        }
    }

    fn emit_node_inner(&mut self, node: &Node) -> Result<(), EmitError> {
        match &node.data {
            NodeData::Identifier(ident) => {
                self.emit_identifier_reference(node, ident);
                Ok(())
            }
            NodeData::NumericLiteral(lit) => {
                self.write(&lit.text);
                Ok(())
            }
            NodeData::StringLiteral(lit) => {
                self.write(&lit.text);
                Ok(())
            }
            NodeData::RegularExpressionLiteral(lit) => {
                self.write(&lit.text);
                Ok(())
            }
            NodeData::TrueLiteral => self.write_ok("true"),
            NodeData::FalseLiteral => self.write_ok("false"),
            NodeData::NullLiteral => self.write_ok("null"),
            NodeData::ThisExpression => {
                let text = self.this_text();
                self.write_ok(text)
            }
            NodeData::SuperExpression => self.write_ok("_super"),
            NodeData::OmittedExpression => Ok(()),

            NodeData::TypeReference(_)
            | NodeData::GenericType(_)
            | NodeData::TypeQuery(_)
            | NodeData::TypeParameter(_)
            | NodeData::ObjectType(_) => Err(EmitError::TypeOnlyNode {
                kind: node.kind(),
                span: node.span,
            }),

            NodeData::Script(script) => self.emit_statement_list(&script.statements.nodes),
            NodeData::ModuleDeclaration(module) => match module.flavor {
                ModuleFlavor::Namespace => self.emit_module_declaration(node, module),
                ModuleFlavor::Enum => self.emit_enum_declaration(node, module),
                ModuleFlavor::External => self.emit_dynamic_module(node, module),
            },
            NodeData::ClassDeclaration(class) => self.emit_class_declaration(node, class),
            NodeData::InterfaceDeclaration(_) => Ok(()),
            NodeData::FunctionDeclaration(func) => self.emit_function(node, func),
            NodeData::VariableDeclaration(decl) => self.emit_variable_declaration(decl),
            NodeData::VariableDeclarator(decl) => self.emit_variable_declarator(node, decl),
            NodeData::Parameter(param) => self.write_declaration_name(&param.name),
            // Class properties are lowered by the class printer.
            NodeData::PropertyDeclaration(_) => Ok(()),
            NodeData::EnumMember(member) => self.write_declaration_name(&member.name),
            NodeData::ImportDeclaration(import) => self.emit_import_declaration(node, import),
            NodeData::ExportAssignment(export) => self.emit_export_assignment(export),

            NodeData::BinaryExpression(bin) => self.emit_binary(node, bin),
            NodeData::UnaryExpression(unary) => self.emit_unary(unary),
            NodeData::ArrayLiteral(array) => self.emit_array_literal(array),
            NodeData::ObjectLiteral(object) => self.emit_object_literal(node, object),
            NodeData::CallExpression(call) => self.emit_call(call),
            NodeData::NewExpression(call) => self.emit_new(call),
            NodeData::ConditionalExpression(cond) => self.emit_conditional(cond),
            NodeData::TypeAssertion(assertion) => self.emit_node(&assertion.operand),

            NodeData::Block(block) => self.emit_block(&block.statements.nodes),
            NodeData::VariableStatement(stmt) => self.emit_variable_statement(stmt),
            NodeData::ExpressionStatement(stmt) => {
                self.emit_node(&stmt.expression)?;
                self.write_ok(";")
            }
            NodeData::IfStatement(stmt) => self.emit_if(stmt),
            NodeData::WhileStatement(stmt) => self.emit_while(stmt),
            NodeData::DoStatement(stmt) => self.emit_do(stmt),
            NodeData::ForStatement(stmt) => self.emit_for(stmt),
            NodeData::ForInStatement(stmt) => self.emit_for_in(stmt),
            NodeData::SwitchStatement(stmt) => self.emit_switch(stmt),
            NodeData::CaseClause(clause) => self.emit_case_clause(clause),
            NodeData::TryStatement(stmt) => self.emit_try(stmt),
            NodeData::CatchClause(clause) => self.emit_catch(clause),
            NodeData::ReturnStatement(stmt) => self.emit_return(stmt),
            NodeData::BreakStatement(jump) => self.emit_jump("break", jump),
            NodeData::ContinueStatement(jump) => self.emit_jump("continue", jump),
            NodeData::ThrowStatement(stmt) => {
                self.write("throw ");
                self.emit_node(&stmt.expression)?;
                self.write_ok(";")
            }
            NodeData::WithStatement(stmt) => self.emit_with(stmt),
            NodeData::LabeledStatement(stmt) => self.emit_labeled(stmt),
            NodeData::DebuggerStatement => self.write_ok("debugger;"),
            NodeData::EmptyStatement => self.write_ok(";"),
        }
    }

    fn write_ok(&mut self, text: &str) -> Result<(), EmitError> {
        self.write(text);
        Ok(())
    }

    /// Print statements one per line, skipping the ones that produce nothing.
    pub(crate) fn emit_statement_list(&mut self, statements: &[Node]) -> Result<(), EmitError> {
        for statement in statements {
            let before = self.writer.len();
            self.emit_node(statement)?;
            if self.writer.len() > before {
                self.ensure_line_start();
            }
        }
        Ok(())
    }

    // =========================================================================
    // Runtime presence
    // =========================================================================

    /// False for declarations that exist only in the type space.
    pub(crate) fn emits_code(&self, node: &Node) -> bool {
        match &node.data {
            NodeData::InterfaceDeclaration(_) => false,
            NodeData::FunctionDeclaration(func) => !func.is_ambient && !func.is_signature_only(),
            NodeData::ClassDeclaration(class) => !class.is_ambient,
            NodeData::VariableStatement(stmt) => !stmt.is_ambient,
            NodeData::ModuleDeclaration(module) => {
                if module.is_ambient {
                    return false;
                }
                match module.flavor {
                    ModuleFlavor::Namespace => self.is_instantiated_module(node),
                    ModuleFlavor::Enum | ModuleFlavor::External => true,
                }
            }
            NodeData::ImportDeclaration(import) => {
                if import.is_external && self.options.module.is_amd() {
                    return false;
                }
                self.declared_symbol(node)
                    .is_none_or(|symbol| self.facts.is_instantiated(symbol))
            }
            NodeData::ExportAssignment(_) => {
                self.container() == ContainerKind::DynamicModule && !self.options.module.is_amd()
            }
            _ => true,
        }
    }

    fn is_instantiated_module(&self, node: &Node) -> bool {
        if let Some(symbol) = self.declared_symbol(node)
            && self.facts.is_instantiated(symbol)
        {
            return true;
        }
        match &node.data {
            NodeData::ModuleDeclaration(module) => {
                module.members.iter().any(|member| self.emits_code(member))
            }
            _ => false,
        }
    }

    /// Symbol declared by a declaration node, read from the node or its name.
    pub(crate) fn declared_symbol(&self, node: &Node) -> Option<SymbolId> {
        self.facts.symbol_for(node).or_else(|| {
            declaration_name(node).and_then(|name| self.facts.symbol_for(name))
        })
    }

    pub(crate) fn is_exported_declaration(&self, node: &Node) -> bool {
        self.declared_symbol(node)
            .is_some_and(|symbol| self.facts.is_exported(symbol))
    }

    /// Exported variables that may be reassigned exist only as properties of
    /// the export target, never as locals.
    pub(crate) fn lives_on_export_target(&self, symbol: SymbolId) -> bool {
        self.facts.symbol_kind(symbol) == SymbolKind::Variable
            && self.facts.is_exported(symbol)
            && !self.facts.is_read_only(symbol)
    }

    /// Where exported declarations of the current container are written.
    pub(crate) fn export_target(&self) -> Option<&str> {
        match self.container() {
            ContainerKind::Module | ContainerKind::DynamicModule => {
                self.export_targets.last().map(String::as_str)
            }
            _ => None,
        }
    }

    /// `target.name = name;` for an exported declaration, on its own line.
    pub(crate) fn emit_export_binding(&mut self, node: &Node, name: &str) {
        if !self.is_exported_declaration(node) {
            return;
        }
        let Some(target) = self.export_target().map(str::to_string) else {
            return;
        };
        self.ensure_line_start();
        self.write(&format!("{target}.{name} = {name};"));
    }
}

/// Name node of a declaration.
pub(crate) fn declaration_name(node: &Node) -> Option<&Node> {
    match &node.data {
        NodeData::ModuleDeclaration(module) => Some(&module.name),
        NodeData::ClassDeclaration(class) => Some(&class.name),
        NodeData::InterfaceDeclaration(interface) => Some(&interface.name),
        NodeData::FunctionDeclaration(FunctionDeclaration { name, .. }) => name.as_deref(),
        NodeData::VariableDeclarator(decl) => Some(&decl.name),
        NodeData::Parameter(param) => Some(&param.name),
        NodeData::PropertyDeclaration(prop) => Some(&prop.name),
        NodeData::EnumMember(member) => Some(&member.name),
        NodeData::ImportDeclaration(import) => Some(&import.name),
        _ => None,
    }
}

/// Source text of a declaration name: identifiers keep their spelling,
/// string and numeric literals their literal text.
pub(crate) fn name_text(name: &Node) -> &str {
    match &name.data {
        NodeData::Identifier(ident) => &ident.text,
        NodeData::StringLiteral(lit) => &lit.text,
        NodeData::NumericLiteral(lit) => &lit.text,
        _ => "",
    }
}

/// Like [`name_text`], but a node without name text is an error.
pub(crate) fn declared_name(name: &Node) -> Result<&str, EmitError> {
    match &name.data {
        NodeData::Identifier(_) | NodeData::StringLiteral(_) | NodeData::NumericLiteral(_) => {
            Ok(name_text(name))
        }
        _ => Err(EmitError::UnsupportedName {
            kind: name.kind(),
            span: name.span,
        }),
    }
}

/// `"A"` for an identifier member name; literal names keep their quotes.
pub(crate) fn quoted_member_name(text: &str) -> String {
    if text.starts_with('"') || text.starts_with('\'') {
        text.to_string()
    } else {
        format!("\"{text}\"")
    }
}

/// JavaScript `Number.prototype.toString` for the values enums produce.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
