//! Semantic facts for the esdown emitter.
//!
//! The emitter never resolves names itself. It asks a [`SemanticFacts`]
//! implementation about the symbols and declarations that the binder attached
//! to the tree, and qualifies references from the answers.
//!
//! [`SymbolTable`] is the serializable implementation used by the CLI and the
//! tests; any other binder can plug in by implementing the trait.

pub mod facts;
pub mod table;

pub use esdown_ast::{DeclId, SymbolId};
pub use facts::{DeclKind, SemanticFacts, SymbolKind};
pub use table::{DeclData, SymbolData, SymbolFlags, SymbolTable};
