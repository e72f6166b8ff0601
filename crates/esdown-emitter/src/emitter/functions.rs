use super::{ContainerKind, Emitter, name_text};
use crate::error::EmitError;
use esdown_ast::{AccessorKind, DeclId, FunctionDeclaration, FunctionRole, Node, NodeData, Parameter};
use tracing::debug;

impl<'a> Emitter<'a> {
    // =========================================================================
    // Functions
    // =========================================================================

    pub(crate) fn emit_function(
        &mut self,
        node: &Node,
        func: &FunctionDeclaration,
    ) -> Result<(), EmitError> {
        if func.is_arrow {
            return self.emit_function_value(node, func);
        }
        match func.role {
            FunctionRole::Plain if !func.is_expression => self.emit_function_declaration(node, func),
            FunctionRole::Accessor(_) => self.emit_object_literal_accessor(node, func),
            _ => self.emit_function_value(node, func),
        }
    }

    /// `function f(a) { ... }` as a statement, plus its export binding.
    fn emit_function_declaration(
        &mut self,
        node: &Node,
        func: &FunctionDeclaration,
    ) -> Result<(), EmitError> {
        let name = func.name.as_deref().map(name_text).unwrap_or_default();
        self.write("function ");
        if let Some(name_node) = func.name.as_deref() {
            self.write_declaration_name(name_node)?;
        }
        self.emit_function_rest(node, func, Some(name))?;
        self.emit_export_binding(node, name);
        Ok(())
    }

    /// A function in value position: `function (a) { ... }`. Arrow functions
    /// lower to the same form with `this` rewritten to `_this`.
    pub(crate) fn emit_function_value(
        &mut self,
        node: &Node,
        func: &FunctionDeclaration,
    ) -> Result<(), EmitError> {
        self.write("function ");
        let name = match func.name.as_deref() {
            Some(name_node) if !func.is_arrow && func.role == FunctionRole::Plain => {
                self.write_declaration_name(name_node)?;
                Some(name_text(name_node))
            }
            _ => None,
        };
        self.emit_function_rest(node, func, name)
    }

    /// `get name() { ... }` inside an object literal.
    pub(crate) fn emit_object_literal_accessor(
        &mut self,
        node: &Node,
        func: &FunctionDeclaration,
    ) -> Result<(), EmitError> {
        let Some(kind) = func.role.accessor() else {
            return self.emit_function_value(node, func);
        };
        self.write(match kind {
            AccessorKind::Get => "get ",
            AccessorKind::Set => "set ",
        });
        let name = func.name.as_deref().map(name_text);
        if let Some(name_node) = func.name.as_deref() {
            self.write_declaration_name(name_node)?;
        }
        self.emit_function_rest(node, func, name)
    }

    /// Parameter list and body, with the function's scope entered.
    pub(crate) fn emit_function_rest(
        &mut self,
        node: &Node,
        func: &FunctionDeclaration,
        map_name: Option<&str>,
    ) -> Result<(), EmitError> {
        let decl = self.facts.declaration_for(node);
        let saved_arrow = self.in_arrow_context;
        self.in_arrow_context = func.is_arrow;
        let result = self.with_name(map_name, |this| {
            this.with_decl(decl, |this| {
                this.with_container(ContainerKind::Function, |this| {
                    this.emit_parameter_list(&func.parameters.nodes)?;
                    this.write(" ");
                    this.emit_function_body(func, decl)
                })
            })
        });
        self.in_arrow_context = saved_arrow;
        result
    }

    pub(crate) fn emit_parameter_list(&mut self, parameters: &[Node]) -> Result<(), EmitError> {
        self.write("(");
        let mut first = true;
        for param in parameters {
            if matches!(&param.data, NodeData::Parameter(p) if p.is_rest) {
                continue;
            }
            if !first {
                self.write(", ");
            }
            first = false;
            self.emit_node(param)?;
        }
        self.write(")");
        Ok(())
    }

    fn emit_function_body(
        &mut self,
        func: &FunctionDeclaration,
        decl: Option<DeclId>,
    ) -> Result<(), EmitError> {
        self.write_braced(|this| {
            this.emit_function_prologue(func, decl)?;
            match func.body.as_deref() {
                Some(body) => match &body.data {
                    NodeData::Block(block) => this.emit_statement_list(&block.statements.nodes),
                    // Expression-bodied arrow.
                    _ => {
                        this.write("return ");
                        this.emit_node(body)?;
                        this.write(";");
                        Ok(())
                    }
                },
                None => Ok(()),
            }
        })
    }

    /// Receiver capture, default values and the rest array, in that order.
    pub(crate) fn emit_function_prologue(
        &mut self,
        func: &FunctionDeclaration,
        decl: Option<DeclId>,
    ) -> Result<(), EmitError> {
        if !func.is_arrow {
            self.emit_capture_this(decl);
        }
        self.emit_default_value_assignments(&func.parameters.nodes)?;
        self.emit_rest_parameter(&func.parameters.nodes);
        Ok(())
    }

    pub(crate) fn emit_capture_this(&mut self, decl: Option<DeclId>) {
        if decl.is_some_and(|decl| self.facts.captures_this(decl)) {
            self.write("var _this = this;");
            self.write_line();
        }
    }

    fn emit_default_value_assignments(&mut self, parameters: &[Node]) -> Result<(), EmitError> {
        for param in parameters {
            let NodeData::Parameter(Parameter {
                name,
                initializer: Some(initializer),
                is_rest: false,
                ..
            }) = &param.data
            else {
                continue;
            };
            let name = name_text(name);
            self.write(&format!("if (typeof {name} === \"undefined\") {{ {name} = "));
            self.emit_node(initializer)?;
            self.write("; }");
            self.write_line();
        }
        Ok(())
    }

    fn emit_rest_parameter(&mut self, parameters: &[Node]) {
        let Some((index, name)) = parameters.iter().enumerate().find_map(|(index, param)| {
            match &param.data {
                NodeData::Parameter(p) if p.is_rest => Some((index, name_text(&p.name))),
                _ => None,
            }
        }) else {
            return;
        };
        debug!(name, index, "lowering rest parameter");
        self.write(&format!("var {name} = [];"));
        self.write_line();
        self.write(&format!(
            "for (var _i = 0; _i < (arguments.length - {index}); _i++) {{"
        ));
        self.write_line();
        self.increase_indent();
        self.write(&format!("{name}[_i] = arguments[_i + {index}];"));
        self.write_line();
        self.decrease_indent();
        self.write("}");
        self.write_line();
    }
}
