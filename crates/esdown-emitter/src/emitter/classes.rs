//! Class lowering.
//!
//! A class becomes an IIFE that receives the base constructor as `_super`
//! and returns the constructor function. Members are attached to the
//! prototype (instance) or the constructor (static).

use super::{
    ClassContext, ContainerKind, Emitter, declared_name, name_text, quoted_member_name,
};
use crate::error::EmitError;
use esdown_ast::{
    AccessorKind, ClassDeclaration, FunctionDeclaration, FunctionRole, Node, NodeData,
    PropertyDeclaration,
};
use rustc_hash::FxHashMap;
use tracing::debug;

/// The get/set halves of one property, in declaration order of the class.
#[derive(Default)]
struct AccessorPair<'n> {
    getter: Option<(&'n Node, &'n FunctionDeclaration)>,
    setter: Option<(&'n Node, &'n FunctionDeclaration)>,
}

impl<'a> Emitter<'a> {
    pub(crate) fn emit_class_declaration(
        &mut self,
        node: &Node,
        class: &ClassDeclaration,
    ) -> Result<(), EmitError> {
        let name = declared_name(&class.name)?.to_string();
        let base = class.extends.nodes.first();
        debug!(class = %name, has_base = base.is_some(), "lowering class");

        self.write("var ");
        self.write_declaration_name(&class.name)?;
        self.write(if base.is_some() {
            " = (function (_super) "
        } else {
            " = (function () "
        });

        let decl = self.facts.declaration_for(node);
        let saved_class = self.current_class.replace(ClassContext {
            name: name.clone(),
            has_base: base.is_some(),
        });
        let result = self.with_name(Some(&name), |this| {
            this.with_decl(decl, |this| {
                this.with_container(ContainerKind::Class, |this| {
                    this.write_braced(|this| this.emit_class_body(class))
                })
            })
        });
        self.current_class = saved_class;
        result?;

        self.write(")(");
        if let Some(base) = base {
            self.emit_heritage(base)?;
        }
        self.write(");");
        self.emit_export_binding(node, &name);
        Ok(())
    }

    /// The base of `extends`: a type reference prints its term, a generic
    /// instantiation its name.
    fn emit_heritage(&mut self, base: &Node) -> Result<(), EmitError> {
        match &base.data {
            NodeData::TypeReference(reference) => self.emit_node(&reference.term),
            NodeData::GenericType(generic) => self.emit_node(&generic.name),
            _ => self.emit_node(base),
        }
    }

    fn class_name(&self) -> String {
        self.current_class
            .as_ref()
            .map(|class| class.name.clone())
            .unwrap_or_default()
    }

    fn emit_class_body(&mut self, class: &ClassDeclaration) -> Result<(), EmitError> {
        let name = self.class_name();
        if self.current_class.as_ref().is_some_and(|class| class.has_base) {
            self.write(&format!("__extends({name}, _super);"));
            self.write_line();
        }

        self.emit_constructor(class)?;
        self.ensure_line_start();

        let mut accessors: FxHashMap<(bool, &str), AccessorPair<'_>> = FxHashMap::default();
        for member in class.members.iter() {
            if let NodeData::FunctionDeclaration(func) = &member.data
                && let Some(kind) = func.role.accessor()
                && self.emits_code(member)
            {
                let key = (func.is_static, func.name.as_deref().map(name_text).unwrap_or(""));
                let pair = accessors.entry(key).or_default();
                match kind {
                    AccessorKind::Get => pair.getter = Some((member, func)),
                    AccessorKind::Set => pair.setter = Some((member, func)),
                }
            }
        }

        for member in class.members.iter() {
            let NodeData::FunctionDeclaration(func) = &member.data else {
                continue;
            };
            if !self.emits_code(member) {
                continue;
            }
            match func.role {
                FunctionRole::Method | FunctionRole::Plain => self.emit_method(member, func)?,
                FunctionRole::Accessor(_) => {
                    let key = (func.is_static, func.name.as_deref().map(name_text).unwrap_or(""));
                    // The pair is printed where its first half appears.
                    if let Some(pair) = accessors.remove(&key) {
                        self.emit_accessor_pair(func.is_static, key.1, pair)?;
                    }
                }
                _ => continue,
            }
            self.ensure_line_start();
        }

        for member in class.members.iter() {
            if let NodeData::PropertyDeclaration(prop) = &member.data
                && prop.is_static
                && prop.initializer.is_some()
            {
                self.emit_property_initializer(member, prop, &name)?;
                self.ensure_line_start();
            }
        }

        self.write(&format!("return {name};"));
        Ok(())
    }

    // =========================================================================
    // Constructor
    // =========================================================================

    fn emit_constructor(&mut self, class: &ClassDeclaration) -> Result<(), EmitError> {
        let name = self.class_name();
        let declared = class.constructor.as_deref().and_then(|node| match &node.data {
            NodeData::FunctionDeclaration(func) if func.body.is_some() => Some((node, func)),
            _ => None,
        });
        let Some((ctor_node, ctor)) = declared else {
            return self.emit_synthesized_constructor(class, &name);
        };

        self.emit_leading_comments(ctor_node)?;
        self.with_mapping(ctor_node, |this| {
            this.write("function ");
            this.write(&name);
            let decl = this.facts.declaration_for(ctor_node);
            let saved_arrow = this.in_arrow_context;
            this.in_arrow_context = false;
            let result = this.with_name(Some("constructor"), |this| {
                this.with_decl(decl, |this| {
                    this.with_container(ContainerKind::Constructor, |this| {
                        this.emit_parameter_list(&ctor.parameters.nodes)?;
                        this.write(" ");
                        this.write_braced(|this| {
                            this.emit_function_prologue(ctor, decl)?;
                            this.emit_constructor_statements(class, ctor)
                        })
                    })
                })
            });
            this.in_arrow_context = saved_arrow;
            result
        })?;
        self.emit_trailing_comments(ctor_node)
    }

    /// A class without a constructor still needs one: it forwards to the base
    /// and runs the instance property initializers.
    fn emit_synthesized_constructor(
        &mut self,
        class: &ClassDeclaration,
        name: &str,
    ) -> Result<(), EmitError> {
        self.write(&format!("function {name}() "));
        self.with_container(ContainerKind::Constructor, |this| {
            this.write_braced(|this| {
                if this.current_class.as_ref().is_some_and(|class| class.has_base) {
                    this.write("_super.apply(this, arguments);");
                    this.write_line();
                }
                this.emit_instance_property_initializers(class)
            })
        })
    }

    /// Body order: a leading `super(...)` call, parameter properties,
    /// property initializers, then the rest of the body.
    fn emit_constructor_statements(
        &mut self,
        class: &ClassDeclaration,
        ctor: &FunctionDeclaration,
    ) -> Result<(), EmitError> {
        let statements: &[Node] = match ctor.body.as_deref().map(|body| &body.data) {
            Some(NodeData::Block(block)) => &block.statements.nodes,
            _ => &[],
        };
        let mut rest = statements;
        if let Some((first, tail)) = statements.split_first()
            && is_super_call_statement(first)
        {
            self.emit_node(first)?;
            self.ensure_line_start();
            rest = tail;
        }

        for param in ctor.parameters.iter() {
            if let NodeData::Parameter(p) = &param.data
                && p.is_property
            {
                let name = name_text(&p.name);
                self.with_mapping(param, |this| {
                    this.write(&format!("this.{name} = {name};"));
                    Ok(())
                })?;
                self.write_line();
            }
        }

        self.emit_instance_property_initializers(class)?;
        self.emit_statement_list(rest)
    }

    fn emit_instance_property_initializers(
        &mut self,
        class: &ClassDeclaration,
    ) -> Result<(), EmitError> {
        for member in class.members.iter() {
            if let NodeData::PropertyDeclaration(prop) = &member.data
                && !prop.is_static
                && prop.initializer.is_some()
            {
                self.emit_property_initializer(member, prop, "this")?;
                self.ensure_line_start();
            }
        }
        Ok(())
    }

    /// `target.name = init;`
    fn emit_property_initializer(
        &mut self,
        node: &Node,
        prop: &PropertyDeclaration,
        target: &str,
    ) -> Result<(), EmitError> {
        let Some(initializer) = prop.initializer.as_deref() else {
            return Ok(());
        };
        self.emit_leading_comments(node)?;
        let saved_static = self.in_static_member;
        self.in_static_member = prop.is_static;
        let result = self.with_mapping(node, |this| {
            this.write(target);
            this.write_member_name(&prop.name)?;
            this.write(" = ");
            this.emit_node(initializer)?;
            this.write(";");
            Ok(())
        });
        self.in_static_member = saved_static;
        result?;
        self.emit_trailing_comments(node)
    }

    // =========================================================================
    // Methods and accessors
    // =========================================================================

    /// `C.prototype.m = function (...) { ... };` or `C.m = ...` for statics.
    fn emit_method(&mut self, node: &Node, func: &FunctionDeclaration) -> Result<(), EmitError> {
        let target = self.member_target(func.is_static);
        let name = func.name.as_deref().map(name_text);
        self.emit_leading_comments(node)?;
        let saved_static = self.in_static_member;
        self.in_static_member = func.is_static;
        let result = self.with_mapping(node, |this| {
            this.write(&target);
            if let Some(name_node) = func.name.as_deref() {
                this.write_member_name(name_node)?;
            }
            this.write(" = function ");
            this.emit_function_rest(node, func, name)?;
            this.write(";");
            Ok(())
        });
        self.in_static_member = saved_static;
        result?;
        self.emit_trailing_comments(node)
    }

    fn emit_accessor_pair(
        &mut self,
        is_static: bool,
        name: &str,
        pair: AccessorPair<'_>,
    ) -> Result<(), EmitError> {
        let target = self.member_target(is_static);
        let key = quoted_member_name(name);
        self.write(&format!("Object.defineProperty({target}, {key}, "));
        let saved_static = self.in_static_member;
        self.in_static_member = is_static;
        let result = self.write_braced(|this| {
            for (label, half) in [("get", pair.getter), ("set", pair.setter)] {
                let Some((node, func)) = half else {
                    continue;
                };
                this.emit_leading_comments(node)?;
                this.with_mapping(node, |this| {
                    this.write(&format!("{label}: function "));
                    this.emit_function_rest(node, func, Some(name))
                })?;
                this.write(",");
                this.emit_trailing_comments(node)?;
                this.ensure_line_start();
            }
            this.write("enumerable: true,");
            this.write_line();
            this.write("configurable: true");
            Ok(())
        });
        self.in_static_member = saved_static;
        result?;
        self.write(");");
        Ok(())
    }

    /// `C.prototype` for instance members, `C` for statics.
    fn member_target(&self, is_static: bool) -> String {
        let name = self.class_name();
        if is_static {
            name
        } else {
            format!("{name}.prototype")
        }
    }

    /// `.name`, or `["name"]` for names that are not identifiers.
    fn write_member_name(&mut self, name: &Node) -> Result<(), EmitError> {
        if matches!(name.data, NodeData::Identifier(_)) {
            self.write(".");
            return self.write_declaration_name(name);
        }
        self.write("[");
        self.write_declaration_name(name)?;
        self.write("]");
        Ok(())
    }
}

fn is_super_call_statement(statement: &Node) -> bool {
    match &statement.data {
        NodeData::ExpressionStatement(stmt) => matches!(
            &stmt.expression.data,
            NodeData::CallExpression(call) if call.target.is_super()
        ),
        _ => false,
    }
}
