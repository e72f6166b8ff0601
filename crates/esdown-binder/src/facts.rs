//! The query surface the emitter consumes.

use esdown_ast::{DeclId, Node, SymbolId};
use serde::{Deserialize, Serialize};

/// What a declaration introduces.
///
/// `Module` is an internal module (namespace) body, `DynamicModule` the file
/// scope of an external module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclKind {
    #[default]
    Script,
    Module,
    DynamicModule,
    Enum,
    Class,
    Interface,
    Function,
    Method,
    Constructor,
    Variable,
    Parameter,
    Property,
    EnumMember,
    Import,
}

/// What a symbol names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    #[default]
    Variable,
    Parameter,
    Property,
    EnumMember,
    Function,
    Method,
    Accessor,
    Class,
    Interface,
    Module,
    Enum,
    Alias,
    TypeParameter,
}

/// Read-only semantic queries over symbols and declarations.
///
/// Lookups are total: an id the implementation does not know yields the
/// neutral answer (empty name, `false`, `None`) so the emitter degrades to
/// unqualified output instead of failing.
pub trait SemanticFacts {
    // =========================================================================
    // Node handles
    // =========================================================================

    fn symbol_for(&self, node: &Node) -> Option<SymbolId> {
        node.symbol
    }

    fn alias_symbol_for(&self, node: &Node) -> Option<SymbolId> {
        node.alias_symbol
    }

    fn declaration_for(&self, node: &Node) -> Option<DeclId> {
        node.declaration
    }

    // =========================================================================
    // Symbols
    // =========================================================================

    fn symbol_name(&self, symbol: SymbolId) -> &str;
    fn symbol_kind(&self, symbol: SymbolId) -> SymbolKind;
    fn is_exported(&self, symbol: SymbolId) -> bool;
    fn is_static(&self, symbol: SymbolId) -> bool;
    /// A variable that is never assigned after its declaration. Exported
    /// read-only variables keep a local binding next to the export.
    fn is_read_only(&self, symbol: SymbolId) -> bool;
    /// A module symbol whose declaration has a body that produces a value.
    fn is_initialized_module(&self, symbol: SymbolId) -> bool;
    /// False for symbols that only exist in the type space.
    fn is_instantiated(&self, symbol: SymbolId) -> bool;
    /// The declaration that declares `symbol`.
    fn symbol_container(&self, symbol: SymbolId) -> Option<DeclId>;
    fn constant_value(&self, symbol: SymbolId) -> Option<f64>;

    fn container_kind(&self, symbol: SymbolId) -> Option<DeclKind> {
        self.symbol_container(symbol).map(|decl| self.decl_kind(decl))
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn decl_kind(&self, decl: DeclId) -> DeclKind;
    fn decl_name(&self, decl: DeclId) -> &str;
    fn parent_decl(&self, decl: DeclId) -> Option<DeclId>;
    /// Whether the scope opened by `decl` must bind `_this` for nested arrows.
    fn captures_this(&self, decl: DeclId) -> bool;

    /// Root-first chain of declarations ending at `decl`.
    fn decl_path(&self, decl: DeclId) -> Vec<DeclId> {
        let mut path = vec![decl];
        let mut current = decl;
        while let Some(parent) = self.parent_decl(current) {
            // Cyclic parent chains stop at the first repeat.
            if path.contains(&parent) {
                break;
            }
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Dotted name of `decl` through its named ancestors, e.g. `M.C.f`.
    fn qualified_decl_name(&self, decl: DeclId) -> String {
        self.decl_path(decl)
            .into_iter()
            .filter(|&d| !matches!(self.decl_kind(d), DeclKind::Script | DeclKind::DynamicModule))
            .map(|d| self.decl_name(d))
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }
}
