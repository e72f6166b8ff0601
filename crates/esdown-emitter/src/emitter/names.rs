//! Identifier references and their qualification.
//!
//! A bare reference in the source may need a prefix in the output because
//! ES5 has no equivalent of the scope it was declared in: module members are
//! properties of the module object, static members properties of the class
//! and external-module exports properties of `exports`.

use super::{Emitter, declared_name};
use crate::error::EmitError;
use esdown_ast::{BinaryOperator, DeclId, Identifier, Node, NodeData, SymbolId};
use esdown_binder::{DeclKind, SymbolKind};
use tracing::trace;

impl<'a> Emitter<'a> {
    pub(crate) fn emit_identifier_reference(&mut self, node: &Node, ident: &Identifier) {
        let symbol = self
            .facts
            .alias_symbol_for(node)
            .or_else(|| self.facts.symbol_for(node));
        if let Some(symbol) = symbol {
            self.write_qualifier(symbol);
        }
        self.write(&ident.text);
    }

    /// Names in declaring position print verbatim. Only identifiers and
    /// literal names have text; anything else in a name slot is an error.
    pub(crate) fn write_declaration_name(&mut self, name: &Node) -> Result<(), EmitError> {
        let text = declared_name(name)?;
        self.with_mapping(name, |this| {
            this.write(text);
            Ok(())
        })
    }

    fn write_qualifier(&mut self, symbol: SymbolId) {
        let Some(container) = self.facts.symbol_container(symbol) else {
            return;
        };
        let kind = self.facts.symbol_kind(symbol);
        match self.facts.decl_kind(container) {
            DeclKind::Class => {
                if self.facts.is_static(symbol) {
                    self.write_container_path(container);
                } else if kind == SymbolKind::Property {
                    let receiver = self.this_text();
                    self.write(receiver);
                    self.write(".");
                }
            }
            DeclKind::Module | DeclKind::Enum => {
                let member = matches!(kind, SymbolKind::Property | SymbolKind::EnumMember)
                    || self.lives_on_export_target(symbol);
                if member
                    || (self.facts.is_exported(symbol)
                        && !self.is_used_in_own_container(symbol, container, DeclKind::Module))
                {
                    self.write_container_path(container);
                }
            }
            DeclKind::DynamicModule => {
                if kind == SymbolKind::Property
                    || self.lives_on_export_target(symbol)
                    || (self.facts.is_exported(symbol)
                        && !self.is_used_in_own_container(
                            symbol,
                            container,
                            DeclKind::DynamicModule,
                        ))
                {
                    self.write("exports.");
                }
            }
            _ => {}
        }
    }

    /// Whether the reference sits inside the same `kind` container that
    /// declares the symbol. A module symbol declared by an initialized module
    /// body also counts as used in its own container from one level down.
    fn is_used_in_own_container(&self, symbol: SymbolId, container: DeclId, kind: DeclKind) -> bool {
        let Some(&enclosing) = self.decl_stack.last() else {
            return false;
        };
        let declared_in = self.nearest_decl_of_kind(container, kind);
        let used_in = self.nearest_decl_of_kind(enclosing, kind);
        match (declared_in, used_in) {
            (Some(declared_in), Some(used_in)) => {
                declared_in == used_in
                    || (self.facts.is_initialized_module(symbol)
                        && self.facts.parent_decl(used_in) == Some(declared_in))
            }
            _ => false,
        }
    }

    fn nearest_decl_of_kind(&self, start: DeclId, kind: DeclKind) -> Option<DeclId> {
        self.facts
            .decl_path(start)
            .into_iter()
            .rev()
            .find(|&decl| self.facts.decl_kind(decl) == kind)
    }

    /// Dotted path from the first declaration that is not already open on the
    /// declaration stack down to `container`, always including `container`.
    fn write_container_path(&mut self, container: DeclId) {
        let path: Vec<DeclId> = self
            .facts
            .decl_path(container)
            .into_iter()
            .filter(|&decl| self.facts.decl_kind(decl) != DeclKind::Script)
            .collect();
        let Some(last) = path.len().checked_sub(1) else {
            return;
        };
        let shared = path
            .iter()
            .zip(&self.decl_stack)
            .take_while(|(a, b)| a == b)
            .count();
        let mut prefix = String::new();
        for &decl in &path[shared.min(last)..] {
            if self.facts.decl_kind(decl) == DeclKind::DynamicModule {
                prefix.push_str("exports");
            } else {
                prefix.push_str(self.facts.decl_name(decl));
            }
            prefix.push('.');
        }
        trace!(%prefix, "qualified reference");
        self.write(&prefix);
    }
}

/// `a.b.c` for an entity name built from identifiers and dots.
pub(crate) fn entity_name_text(node: &Node) -> Option<String> {
    match &node.data {
        NodeData::Identifier(ident) => Some(ident.text.clone()),
        NodeData::BinaryExpression(bin) if bin.operator == BinaryOperator::Dot => {
            let left = entity_name_text(&bin.left)?;
            let right = entity_name_text(&bin.right)?;
            Some(format!("{left}.{right}"))
        }
        _ => None,
    }
}
