use super::{Emitter, VariableGroup, name_text};
use crate::error::EmitError;
use esdown_ast::{
    CaseClause, CatchClause, DoStatement, ForInStatement, ForStatement, IfStatement,
    JumpStatement, LabeledStatement, Node, NodeData, ReturnStatement, SwitchStatement,
    TryStatement, VariableDeclaration, VariableDeclarator, VariableStatement, WhileStatement,
    WithStatement,
};

impl<'a> Emitter<'a> {
    // =========================================================================
    // Blocks
    // =========================================================================

    pub(crate) fn emit_block(&mut self, statements: &[Node]) -> Result<(), EmitError> {
        self.write_braced(|this| this.emit_statement_list(statements))
    }

    /// Body of a compound statement: a block stays on the header line, any
    /// other statement is indented on the next line.
    fn emit_embedded_statement(&mut self, body: &Node) -> Result<(), EmitError> {
        if matches!(body.data, NodeData::Block(_)) {
            self.write(" ");
            return self.emit_node(body);
        }
        self.write_line();
        self.increase_indent();
        let result = self.emit_node(body);
        self.decrease_indent();
        result
    }

    // =========================================================================
    // Variables
    // =========================================================================

    pub(crate) fn emit_variable_statement(
        &mut self,
        stmt: &VariableStatement,
    ) -> Result<(), EmitError> {
        let target = self.export_target().map(str::to_string);
        let group = VariableGroup {
            writes_exports: target.is_some(),
        };
        let saved = self.current_variable_declaration_group.replace(group);
        let result = match (&target, &stmt.declaration.data) {
            (Some(target), NodeData::VariableDeclaration(decl))
                if decl
                    .declarators
                    .nodes
                    .iter()
                    .any(|declarator| self.declarator_lives_on_export_target(declarator)) =>
            {
                self.emit_exported_variables(&stmt.declaration, decl, target)
            }
            _ => {
                let result = self.emit_node(&stmt.declaration);
                if result.is_ok() {
                    self.write(";");
                }
                result
            }
        };
        self.current_variable_declaration_group = saved;
        result
    }

    fn declarator_lives_on_export_target(&self, declarator: &Node) -> bool {
        self.declared_symbol(declarator)
            .is_some_and(|symbol| self.lives_on_export_target(symbol))
    }

    /// `export var a = 1, b, c = 2;` inside `M` becomes `M.a = 1;` and
    /// `M.c = 2;`. Declarators without an initializer print nothing; runs of
    /// declarators that keep a local binding stay `var` statements.
    fn emit_exported_variables(
        &mut self,
        declaration: &Node,
        decl: &VariableDeclaration,
        target: &str,
    ) -> Result<(), EmitError> {
        self.with_mapping(declaration, |this| {
            let mut locals: Vec<&Node> = Vec::new();
            for declarator in &decl.declarators.nodes {
                if !this.declarator_lives_on_export_target(declarator) {
                    locals.push(declarator);
                    continue;
                }
                this.flush_local_declarators(&mut locals)?;
                let NodeData::VariableDeclarator(var) = &declarator.data else {
                    continue;
                };
                let Some(initializer) = var.initializer.as_deref() else {
                    continue;
                };
                this.ensure_line_start();
                this.emit_leading_comments(declarator)?;
                this.with_mapping(declarator, |this| {
                    this.write(target);
                    this.write(".");
                    this.write_declaration_name(&var.name)?;
                    this.write(" = ");
                    let saved = this.current_variable_declaration_group.take();
                    let result = this.emit_node(initializer);
                    this.current_variable_declaration_group = saved;
                    result
                })?;
                this.write(";");
                this.emit_trailing_comments(declarator)?;
            }
            this.flush_local_declarators(&mut locals)
        })
    }

    fn flush_local_declarators(&mut self, locals: &mut Vec<&Node>) -> Result<(), EmitError> {
        if locals.is_empty() {
            return Ok(());
        }
        self.ensure_line_start();
        self.write("var ");
        for (index, declarator) in locals.drain(..).enumerate() {
            if index > 0 {
                self.write(", ");
            }
            self.emit_node(declarator)?;
        }
        self.write(";");
        Ok(())
    }

    pub(crate) fn emit_variable_declaration(
        &mut self,
        decl: &VariableDeclaration,
    ) -> Result<(), EmitError> {
        self.write("var ");
        self.emit_comma_separated(&decl.declarators.nodes)
    }

    /// `name = init`. Exported read-only declarators also assign the export
    /// target so the local binding and the export start out equal:
    /// `X = M.X = init`.
    pub(crate) fn emit_variable_declarator(
        &mut self,
        node: &Node,
        decl: &VariableDeclarator,
    ) -> Result<(), EmitError> {
        self.write_declaration_name(&decl.name)?;
        let Some(initializer) = decl.initializer.as_deref() else {
            return Ok(());
        };
        self.write(" = ");
        let writes_exports = self
            .current_variable_declaration_group
            .is_some_and(|group| group.writes_exports);
        if writes_exports
            && self.is_exported_declaration(node)
            && let Some(target) = self.export_target()
        {
            let export = format!("{target}.{} = ", name_text(&decl.name));
            self.write(&export);
        }
        // Nested declarations inside the initializer (function bodies) start
        // their own groups.
        let saved = self.current_variable_declaration_group.take();
        let result = self.emit_node(initializer);
        self.current_variable_declaration_group = saved;
        result
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    pub(crate) fn emit_if(&mut self, stmt: &IfStatement) -> Result<(), EmitError> {
        self.write("if (");
        self.emit_node(&stmt.condition)?;
        self.write(")");
        self.emit_embedded_statement(&stmt.then_branch)?;
        let Some(else_branch) = stmt.else_branch.as_deref() else {
            return Ok(());
        };
        if matches!(stmt.then_branch.data, NodeData::Block(_)) {
            self.write(" ");
        } else {
            self.ensure_line_start();
        }
        self.write("else");
        if matches!(else_branch.data, NodeData::IfStatement(_)) {
            self.write(" ");
            return self.emit_node(else_branch);
        }
        self.emit_embedded_statement(else_branch)
    }

    pub(crate) fn emit_while(&mut self, stmt: &WhileStatement) -> Result<(), EmitError> {
        self.write("while (");
        self.emit_node(&stmt.condition)?;
        self.write(")");
        self.emit_embedded_statement(&stmt.body)
    }

    pub(crate) fn emit_do(&mut self, stmt: &DoStatement) -> Result<(), EmitError> {
        self.write("do");
        self.emit_embedded_statement(&stmt.body)?;
        if matches!(stmt.body.data, NodeData::Block(_)) {
            self.write(" ");
        } else {
            self.ensure_line_start();
        }
        self.write("while (");
        self.emit_node(&stmt.condition)?;
        self.write(");");
        Ok(())
    }

    pub(crate) fn emit_for(&mut self, stmt: &ForStatement) -> Result<(), EmitError> {
        self.write("for (");
        self.emit_optional(stmt.initializer.as_deref())?;
        self.write(";");
        if let Some(condition) = stmt.condition.as_deref() {
            self.write(" ");
            self.emit_node(condition)?;
        }
        self.write(";");
        if let Some(incrementor) = stmt.incrementor.as_deref() {
            self.write(" ");
            self.emit_node(incrementor)?;
        }
        self.write(")");
        self.emit_embedded_statement(&stmt.body)
    }

    pub(crate) fn emit_for_in(&mut self, stmt: &ForInStatement) -> Result<(), EmitError> {
        self.write("for (");
        self.emit_node(&stmt.variable)?;
        self.write(" in ");
        self.emit_node(&stmt.expression)?;
        self.write(")");
        self.emit_embedded_statement(&stmt.body)
    }

    pub(crate) fn emit_switch(&mut self, stmt: &SwitchStatement) -> Result<(), EmitError> {
        self.write("switch (");
        self.emit_node(&stmt.expression)?;
        self.write(") ");
        self.write_braced(|this| this.emit_statement_list(&stmt.cases.nodes))
    }

    pub(crate) fn emit_case_clause(&mut self, clause: &CaseClause) -> Result<(), EmitError> {
        match clause.expression.as_deref() {
            Some(expression) => {
                self.write("case ");
                self.emit_node(expression)?;
                self.write(":");
            }
            None => self.write("default:"),
        }
        if clause.statements.is_empty() {
            return Ok(());
        }
        self.write_line();
        self.increase_indent();
        let result = self.emit_statement_list(&clause.statements.nodes);
        self.decrease_indent();
        result
    }

    pub(crate) fn emit_try(&mut self, stmt: &TryStatement) -> Result<(), EmitError> {
        self.write("try ");
        self.emit_node(&stmt.block)?;
        if let Some(catch_clause) = stmt.catch_clause.as_deref() {
            self.write(" ");
            self.emit_node(catch_clause)?;
        }
        if let Some(finally_block) = stmt.finally_block.as_deref() {
            self.write(" finally ");
            self.emit_node(finally_block)?;
        }
        Ok(())
    }

    pub(crate) fn emit_catch(&mut self, clause: &CatchClause) -> Result<(), EmitError> {
        self.write("catch (");
        self.write_declaration_name(&clause.variable)?;
        self.write(") ");
        self.emit_node(&clause.block)
    }

    pub(crate) fn emit_return(&mut self, stmt: &ReturnStatement) -> Result<(), EmitError> {
        self.write("return");
        if let Some(expression) = stmt.expression.as_deref() {
            self.write(" ");
            self.emit_node(expression)?;
        }
        self.write(";");
        Ok(())
    }

    pub(crate) fn emit_jump(&mut self, keyword: &str, jump: &JumpStatement) -> Result<(), EmitError> {
        self.write(keyword);
        if let Some(label) = jump.label.as_deref() {
            self.write(" ");
            self.write_declaration_name(label)?;
        }
        self.write(";");
        Ok(())
    }

    pub(crate) fn emit_with(&mut self, stmt: &WithStatement) -> Result<(), EmitError> {
        self.write("with (");
        self.emit_node(&stmt.expression)?;
        self.write(")");
        self.emit_embedded_statement(&stmt.body)
    }

    pub(crate) fn emit_labeled(&mut self, stmt: &LabeledStatement) -> Result<(), EmitError> {
        self.write_declaration_name(&stmt.label)?;
        self.write(":");
        self.write_line();
        self.emit_node(&stmt.statement)
    }
}
