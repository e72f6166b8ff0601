//! A flat, serializable symbol table implementing [`SemanticFacts`].
//!
//! Symbols and declarations live in two vectors indexed by their ids.

use crate::facts::{DeclKind, SemanticFacts, SymbolKind};
use bitflags::bitflags;
use esdown_ast::{DeclId, SymbolId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

bitflags! {
    /// Per-symbol facts the emitter branches on.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SymbolFlags: u8 {
        const EXPORTED = 1 << 0;
        const STATIC = 1 << 1;
        const INITIALIZED_MODULE = 1 << 2;
        const INSTANTIATED = 1 << 3;
        const READ_ONLY = 1 << 4;
    }
}

impl Serialize for SymbolFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for SymbolFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u8::deserialize(deserializer).map(Self::from_bits_truncate)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolData {
    pub name: String,
    pub kind: SymbolKind,
    #[serde(default)]
    pub container: Option<DeclId>,
    #[serde(default)]
    pub flags: SymbolFlags,
    #[serde(default)]
    pub constant_value: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclData {
    pub kind: DeclKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent: Option<DeclId>,
    #[serde(default)]
    pub captures_this: bool,
}

/// Symbols and declarations of one compilation unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolTable {
    #[serde(default)]
    pub symbols: Vec<SymbolData>,
    #[serde(default)]
    pub decls: Vec<DeclData>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, kind: DeclKind, name: &str, parent: Option<DeclId>) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        trace!(?id, ?kind, name, "declare");
        self.decls.push(DeclData {
            kind,
            name: name.to_string(),
            parent,
            captures_this: false,
        });
        id
    }

    pub fn declare_symbol(
        &mut self,
        name: &str,
        kind: SymbolKind,
        container: Option<DeclId>,
        flags: SymbolFlags,
    ) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        trace!(?id, ?kind, name, "declare symbol");
        self.symbols.push(SymbolData {
            name: name.to_string(),
            kind,
            container,
            flags,
            constant_value: None,
        });
        id
    }

    pub fn set_constant_value(&mut self, symbol: SymbolId, value: f64) {
        if let Some(data) = self.symbols.get_mut(symbol.0 as usize) {
            data.constant_value = Some(value);
        }
    }

    pub fn set_captures_this(&mut self, decl: DeclId) {
        if let Some(data) = self.decls.get_mut(decl.0 as usize) {
            data.captures_this = true;
        }
    }

    pub fn symbol(&self, symbol: SymbolId) -> Option<&SymbolData> {
        self.symbols.get(symbol.0 as usize)
    }

    pub fn decl(&self, decl: DeclId) -> Option<&DeclData> {
        self.decls.get(decl.0 as usize)
    }

    /// Symbols declared directly by `decl`, in declaration order.
    pub fn members_of(&self, decl: DeclId) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .filter(move |(_, data)| data.container == Some(decl))
            .map(|(index, _)| SymbolId(index as u32))
    }

    fn flags(&self, symbol: SymbolId) -> SymbolFlags {
        self.symbol(symbol).map(|data| data.flags).unwrap_or_default()
    }
}

impl SemanticFacts for SymbolTable {
    fn symbol_name(&self, symbol: SymbolId) -> &str {
        self.symbol(symbol).map_or("", |data| data.name.as_str())
    }

    fn symbol_kind(&self, symbol: SymbolId) -> SymbolKind {
        self.symbol(symbol).map(|data| data.kind).unwrap_or_default()
    }

    fn is_exported(&self, symbol: SymbolId) -> bool {
        self.flags(symbol).contains(SymbolFlags::EXPORTED)
    }

    fn is_static(&self, symbol: SymbolId) -> bool {
        self.flags(symbol).contains(SymbolFlags::STATIC)
    }

    fn is_read_only(&self, symbol: SymbolId) -> bool {
        self.flags(symbol).contains(SymbolFlags::READ_ONLY)
    }

    fn is_initialized_module(&self, symbol: SymbolId) -> bool {
        self.flags(symbol).contains(SymbolFlags::INITIALIZED_MODULE)
    }

    fn is_instantiated(&self, symbol: SymbolId) -> bool {
        self.flags(symbol).contains(SymbolFlags::INSTANTIATED)
    }

    fn symbol_container(&self, symbol: SymbolId) -> Option<DeclId> {
        self.symbol(symbol).and_then(|data| data.container)
    }

    fn constant_value(&self, symbol: SymbolId) -> Option<f64> {
        self.symbol(symbol).and_then(|data| data.constant_value)
    }

    fn decl_kind(&self, decl: DeclId) -> DeclKind {
        self.decl(decl).map(|data| data.kind).unwrap_or_default()
    }

    fn decl_name(&self, decl: DeclId) -> &str {
        self.decl(decl).map_or("", |data| data.name.as_str())
    }

    fn parent_decl(&self, decl: DeclId) -> Option<DeclId> {
        self.decl(decl).and_then(|data| data.parent)
    }

    fn captures_this(&self, decl: DeclId) -> bool {
        self.decl(decl).is_some_and(|data| data.captures_this)
    }
}
