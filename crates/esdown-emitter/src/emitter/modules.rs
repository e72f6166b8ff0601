//! Script prologue and the module-shaped declarations: internal modules,
//! enums, external modules and imports.

use super::{
    ContainerKind, Emitter, declared_name, format_number, name_text, quoted_member_name,
};
use crate::error::EmitError;
use esdown_ast::{
    DeclId, ExportAssignment, ImportDeclaration, ModuleDeclaration, Node, NodeData,
    UnaryOperator, walk_pre,
};
use tracing::debug;

/// Inheritance helper shared by every derived class in a file.
const EXTENDS_HELPER: [(usize, &str); 6] = [
    (0, "var __extends = this.__extends || function (d, b) {"),
    (1, "for (var p in b) if (b.hasOwnProperty(p)) d[p] = b[p];"),
    (1, "function __() { this.constructor = d; }"),
    (1, "__.prototype = b.prototype;"),
    (1, "d.prototype = new __();"),
    (0, "};"),
];

/// Value of an enum member without a known constant.
enum AutoValue {
    Next(f64),
    /// The previous member was computed at run time: `E["Prev"] + 1`.
    After(String),
}

impl<'a> Emitter<'a> {
    // =========================================================================
    // Script
    // =========================================================================

    /// Copyright header, the `__extends` helper, receiver capture, then the
    /// statements.
    pub(crate) fn emit_script(&mut self, root: &Node) -> Result<(), EmitError> {
        let NodeData::Script(script) = &root.data else {
            return self.emit_node(root);
        };
        let statements = &script.statements.nodes;
        self.with_mapping(root, |this| {
            this.emit_copyright_header(statements)?;
            if needs_extends_helper(root) {
                debug!(file = %script.file_name, "emitting __extends helper");
                this.emit_extends_helper();
            }
            let decl = this.facts.declaration_for(root);
            this.emit_capture_this(decl);
            this.emit_statement_list(statements)
        })
    }

    fn emit_extends_helper(&mut self) {
        for (depth, line) in EXTENDS_HELPER {
            for _ in 0..depth {
                self.increase_indent();
            }
            self.write(line);
            self.write_line();
            for _ in 0..depth {
                self.decrease_indent();
            }
        }
    }

    // =========================================================================
    // Internal modules and enums
    // =========================================================================

    /// `var M;` and `(function (M) { ... })(M || (M = {}));`. Every
    /// declaration of a re-opened module repeats the pattern, merging into
    /// the same object.
    pub(crate) fn emit_module_declaration(
        &mut self,
        node: &Node,
        module: &ModuleDeclaration,
    ) -> Result<(), EmitError> {
        self.emit_module_wrapper(node, module, |this, decl| {
            this.emit_capture_this(decl);
            this.emit_statement_list(&module.members.nodes)
        })
    }

    pub(crate) fn emit_enum_declaration(
        &mut self,
        node: &Node,
        module: &ModuleDeclaration,
    ) -> Result<(), EmitError> {
        self.emit_module_wrapper(node, module, |this, _| this.emit_enum_members(module))
    }

    fn emit_module_wrapper(
        &mut self,
        node: &Node,
        module: &ModuleDeclaration,
        body: impl FnOnce(&mut Self, Option<DeclId>) -> Result<(), EmitError>,
    ) -> Result<(), EmitError> {
        let name = declared_name(&module.name)?.to_string();
        let parent_target = if self.is_exported_declaration(node) {
            self.export_target().map(str::to_string)
        } else {
            None
        };
        debug!(module = %name, exported = parent_target.is_some(), "lowering module");

        self.write("var ");
        self.write_declaration_name(&module.name)?;
        self.write(";");
        self.write_line();
        self.write(&format!("(function ({name}) "));

        let decl = self.facts.declaration_for(node);
        self.export_targets.push(name.clone());
        let result = self.with_name(Some(&name), |this| {
            this.with_decl(decl, |this| {
                this.with_container(ContainerKind::Module, |this| {
                    this.write_braced(|this| body(this, decl))
                })
            })
        });
        self.export_targets.pop();
        result?;

        match parent_target {
            Some(parent) => self.write(&format!(
                ")({name} = {parent}.{name} || ({parent}.{name} = {{}}));"
            )),
            None => self.write(&format!(")({name} || ({name} = {{}}));")),
        }
        Ok(())
    }

    /// `E[E["A"] = 0] = "A";` for each member.
    fn emit_enum_members(&mut self, module: &ModuleDeclaration) -> Result<(), EmitError> {
        let enum_name = declared_name(&module.name)?.to_string();
        let mut auto = AutoValue::Next(0.0);
        for member in module.members.iter() {
            let NodeData::EnumMember(enum_member) = &member.data else {
                continue;
            };
            let key = quoted_member_name(name_text(&enum_member.name));
            let constant = self
                .declared_symbol(member)
                .and_then(|symbol| self.facts.constant_value(symbol))
                .or_else(|| enum_member.initializer.as_deref().and_then(literal_value));

            self.emit_leading_comments(member)?;
            self.with_mapping(member, |this| {
                this.write(&format!("{enum_name}[{enum_name}["));
                this.with_mapping(&enum_member.name, |this| {
                    this.write(&key);
                    Ok(())
                })?;
                this.write("] = ");
                match (constant, enum_member.initializer.as_deref()) {
                    (Some(value), _) => {
                        this.write(&format_number(value));
                        auto = AutoValue::Next(value + 1.0);
                    }
                    (None, Some(initializer)) => {
                        this.emit_node(initializer)?;
                        auto = AutoValue::After(key.clone());
                    }
                    (None, None) => {
                        let (text, next) = match &auto {
                            AutoValue::Next(value) => {
                                (format_number(*value), AutoValue::Next(value + 1.0))
                            }
                            AutoValue::After(previous) => (
                                format!("{enum_name}[{previous}] + 1"),
                                AutoValue::After(key.clone()),
                            ),
                        };
                        this.write(&text);
                        auto = next;
                    }
                }
                this.write(&format!("] = {key};"));
                Ok(())
            })?;
            self.emit_trailing_comments(member)?;
            self.ensure_line_start();
        }
        Ok(())
    }

    // =========================================================================
    // External modules
    // =========================================================================

    /// The file body of an external module. CommonJS prints the members at
    /// the top level against `exports`; AMD wraps them in a `define` call.
    pub(crate) fn emit_dynamic_module(
        &mut self,
        node: &Node,
        module: &ModuleDeclaration,
    ) -> Result<(), EmitError> {
        let decl = self.facts.declaration_for(node);
        self.export_targets.push("exports".to_string());
        let result = self.with_decl(decl, |this| {
            this.with_container(ContainerKind::DynamicModule, |this| {
                if this.options.module.is_amd() {
                    this.emit_amd_module(module, decl)
                } else {
                    this.emit_capture_this(decl);
                    this.emit_statement_list(&module.members.nodes)
                }
            })
        });
        self.export_targets.pop();
        result
    }

    fn emit_amd_module(
        &mut self,
        module: &ModuleDeclaration,
        decl: Option<DeclId>,
    ) -> Result<(), EmitError> {
        let mut paths = vec!["\"require\"".to_string(), "\"exports\"".to_string()];
        let mut parameters = vec!["require".to_string(), "exports".to_string()];
        for member in module.members.iter() {
            if let NodeData::ImportDeclaration(import) = &member.data
                && import.is_external
                && self
                    .declared_symbol(member)
                    .is_none_or(|symbol| self.facts.is_instantiated(symbol))
            {
                paths.push(name_text(&import.reference).to_string());
                parameters.push(name_text(&import.name).to_string());
            }
        }
        debug!(dependencies = paths.len() - 2, "wrapping module in define");

        self.write(&format!(
            "define([{}], function ({}) ",
            paths.join(", "),
            parameters.join(", ")
        ));
        self.write_braced(|this| {
            this.emit_capture_this(decl);
            this.emit_statement_list(&module.members.nodes)?;
            let export = module.members.iter().find_map(|member| match &member.data {
                NodeData::ExportAssignment(export) => Some(export),
                _ => None,
            });
            if let Some(export) = export {
                this.ensure_line_start();
                this.write("return ");
                this.emit_node(&export.name)?;
                this.write(";");
            }
            Ok(())
        })?;
        self.write(");");
        Ok(())
    }

    // =========================================================================
    // Imports and export assignments
    // =========================================================================

    /// `var x = M.N;`, or `var x = require("m");` for external imports.
    pub(crate) fn emit_import_declaration(
        &mut self,
        node: &Node,
        import: &ImportDeclaration,
    ) -> Result<(), EmitError> {
        self.write("var ");
        self.write_declaration_name(&import.name)?;
        self.write(" = ");
        if import.is_external {
            self.write("require(");
            self.emit_node(&import.reference)?;
            self.write(")");
        } else {
            self.emit_node(&import.reference)?;
        }
        self.write(";");
        self.emit_export_binding(node, name_text(&import.name));
        Ok(())
    }

    /// `export = x` under CommonJS. AMD returns the value from the `define`
    /// callback instead.
    pub(crate) fn emit_export_assignment(
        &mut self,
        export: &ExportAssignment,
    ) -> Result<(), EmitError> {
        self.write("module.exports = ");
        self.emit_node(&export.name)?;
        self.write(";");
        Ok(())
    }
}

/// Whether any class in the tree that produces code has a base class.
fn needs_extends_helper(root: &Node) -> bool {
    let mut found = false;
    walk_pre(root, &mut found, |node, options, found| match &node.data {
        NodeData::ModuleDeclaration(module) if module.is_ambient => options.go_children = false,
        NodeData::InterfaceDeclaration(_) => options.go_children = false,
        NodeData::ClassDeclaration(class) if !class.is_ambient && !class.extends.is_empty() => {
            *found = true;
            options.stop_walk = true;
        }
        _ => {}
    });
    found
}

/// Value of a numeric literal initializer, possibly negated.
fn literal_value(node: &Node) -> Option<f64> {
    match &node.data {
        NodeData::NumericLiteral(lit) => Some(lit.value),
        NodeData::UnaryExpression(unary) => {
            let value = literal_value(&unary.operand)?;
            match unary.operator {
                UnaryOperator::Negate => Some(-value),
                UnaryOperator::Plus | UnaryOperator::Parenthesized => Some(value),
                _ => None,
            }
        }
        _ => None,
    }
}
