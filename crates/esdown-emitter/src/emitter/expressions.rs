use super::names::entity_name_text;
use super::{ContainerKind, Emitter, format_number};
use crate::error::EmitError;
use esdown_ast::{
    ArrayLiteral, BinaryExpression, BinaryOperator, ConditionalExpression, Invocation, Node,
    NodeData, NodeFlags, ObjectLiteral, UnaryExpression, UnaryOperator,
};
use esdown_binder::SymbolKind;
use tracing::trace;

impl<'a> Emitter<'a> {
    // =========================================================================
    // Operators
    // =========================================================================

    pub(crate) fn emit_binary(
        &mut self,
        node: &Node,
        bin: &BinaryExpression,
    ) -> Result<(), EmitError> {
        match bin.operator {
            BinaryOperator::Dot => self.emit_member_access(node, bin),
            BinaryOperator::Index => {
                self.emit_node(&bin.left)?;
                self.write("[");
                self.emit_node(&bin.right)?;
                self.write("]");
                Ok(())
            }
            BinaryOperator::Member => {
                self.write_declaration_name(&bin.left)?;
                self.write(": ");
                self.emit_node(&bin.right)
            }
            BinaryOperator::Comma => {
                self.emit_node(&bin.left)?;
                self.write(", ");
                self.emit_node(&bin.right)
            }
            operator => {
                self.emit_node(&bin.left)?;
                self.write(" ");
                self.write(operator.token());
                self.write(" ");
                self.emit_node(&bin.right)
            }
        }
    }

    fn emit_member_access(&mut self, node: &Node, bin: &BinaryExpression) -> Result<(), EmitError> {
        if let Some(value) = self.propagated_constant(node, bin)
            && let Some(text) = entity_name_text(node)
        {
            trace!(%text, value, "propagating enum constant");
            self.write(&format!("{} /* {text} */", format_number(value)));
            return Ok(());
        }
        if bin.left.is_super() {
            return self.emit_super_member(&bin.left, &bin.right);
        }
        self.emit_node(&bin.left)?;
        self.write(".");
        self.write_declaration_name(&bin.right)
    }

    fn propagated_constant(&self, node: &Node, bin: &BinaryExpression) -> Option<f64> {
        if !self.options.propagate_enum_constants {
            return None;
        }
        let symbol = self
            .facts
            .symbol_for(node)
            .or_else(|| self.facts.symbol_for(&bin.right))?;
        if self.facts.symbol_kind(symbol) != SymbolKind::EnumMember {
            return None;
        }
        self.facts.constant_value(symbol)
    }

    /// `super.m` reads the base prototype, or the base constructor inside a
    /// static member.
    fn emit_super_member(&mut self, target: &Node, name: &Node) -> Result<(), EmitError> {
        self.with_mapping(target, |this| {
            this.write(if this.in_static_member {
                "_super"
            } else {
                "_super.prototype"
            });
            Ok(())
        })?;
        self.write(".");
        self.write_declaration_name(name)
    }

    pub(crate) fn emit_unary(&mut self, unary: &UnaryExpression) -> Result<(), EmitError> {
        let operator = unary.operator;
        if operator == UnaryOperator::Parenthesized {
            self.write("(");
            self.emit_node(&unary.operand)?;
            self.write(")");
            return Ok(());
        }
        if operator.is_postfix() {
            self.emit_node(&unary.operand)?;
            self.write(operator.token());
            return Ok(());
        }
        self.write(operator.token());
        if needs_space_after_prefix(operator, &unary.operand) {
            self.write(" ");
        }
        self.emit_node(&unary.operand)
    }

    pub(crate) fn emit_conditional(&mut self, cond: &ConditionalExpression) -> Result<(), EmitError> {
        self.emit_node(&cond.condition)?;
        self.write(" ? ");
        self.emit_node(&cond.when_true)?;
        self.write(" : ");
        self.emit_node(&cond.when_false)
    }

    // =========================================================================
    // Calls
    // =========================================================================

    pub(crate) fn emit_call(&mut self, call: &Invocation) -> Result<(), EmitError> {
        let target = &*call.target;
        if target.is_super() {
            // super(...) runs the base constructor on this instance.
            self.with_mapping(target, |this| {
                this.write("_super.call");
                Ok(())
            })?;
            return self.emit_receiver_arguments(call);
        }
        if let Some(bin) = target.as_binary()
            && bin.operator == BinaryOperator::Dot
            && bin.left.is_super()
        {
            self.emit_node(target)?;
            self.write(".call");
            return self.emit_receiver_arguments(call);
        }
        self.emit_node(target)?;
        self.emit_arguments(&call.arguments.nodes)
    }

    /// `(this, a, b)` for calls that forward the receiver explicitly.
    fn emit_receiver_arguments(&mut self, call: &Invocation) -> Result<(), EmitError> {
        self.write("(");
        let receiver = self.this_text();
        self.write(receiver);
        if !call.arguments.is_empty() {
            self.write(", ");
            self.with_container(ContainerKind::ArgumentList, |this| {
                this.emit_comma_separated(&call.arguments.nodes)
            })?;
        }
        self.write(")");
        Ok(())
    }

    pub(crate) fn emit_new(&mut self, call: &Invocation) -> Result<(), EmitError> {
        self.write("new ");
        self.emit_node(&call.target)?;
        self.emit_arguments(&call.arguments.nodes)
    }

    fn emit_arguments(&mut self, arguments: &[Node]) -> Result<(), EmitError> {
        self.write("(");
        self.with_container(ContainerKind::ArgumentList, |this| {
            this.emit_comma_separated(arguments)
        })?;
        self.write(")");
        Ok(())
    }

    pub(crate) fn emit_comma_separated(&mut self, nodes: &[Node]) -> Result<(), EmitError> {
        for (index, node) in nodes.iter().enumerate() {
            if index > 0 {
                self.write(", ");
            }
            self.emit_node(node)?;
        }
        Ok(())
    }

    // =========================================================================
    // Literals
    // =========================================================================

    pub(crate) fn emit_array_literal(&mut self, array: &ArrayLiteral) -> Result<(), EmitError> {
        self.write("[");
        self.emit_comma_separated(&array.elements.nodes)?;
        self.write("]");
        Ok(())
    }

    pub(crate) fn emit_object_literal(
        &mut self,
        node: &Node,
        object: &ObjectLiteral,
    ) -> Result<(), EmitError> {
        let members = &object.members.nodes;
        if members.is_empty() {
            self.write("{}");
            return Ok(());
        }
        if node.flags.contains(NodeFlags::SINGLE_LINE) {
            self.write("{ ");
            for (index, member) in members.iter().enumerate() {
                if index > 0 {
                    self.write(", ");
                }
                self.emit_object_member(member)?;
            }
            self.write(" }");
            return Ok(());
        }
        self.write_braced(|this| {
            for (index, member) in members.iter().enumerate() {
                this.emit_object_member(member)?;
                if index + 1 < members.len() {
                    this.write(",");
                    this.write_line();
                }
            }
            Ok(())
        })
    }

    fn emit_object_member(&mut self, member: &Node) -> Result<(), EmitError> {
        match &member.data {
            NodeData::FunctionDeclaration(func) if func.role.accessor().is_some() => {
                self.emit_leading_comments(member)?;
                self.with_mapping(member, |this| this.emit_object_literal_accessor(member, func))
            }
            _ => self.emit_node(member),
        }
    }
}

/// `- -x` and `+ +x` must not fuse into `--x` / `++x`.
fn needs_space_after_prefix(operator: UnaryOperator, operand: &Node) -> bool {
    let NodeData::UnaryExpression(inner) = &operand.data else {
        return matches!(
            (&operand.data, operator),
            (NodeData::NumericLiteral(lit), UnaryOperator::Negate) if lit.text.starts_with('-')
        );
    };
    matches!(
        (operator, inner.operator),
        (
            UnaryOperator::Negate,
            UnaryOperator::Negate | UnaryOperator::PreDecrement
        ) | (UnaryOperator::Plus, UnaryOperator::Plus | UnaryOperator::PreIncrement)
    )
}
