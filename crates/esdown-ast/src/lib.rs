//! Syntax tree for the esdown backend.
//!
//! This crate provides:
//! - The node model (`Node`, `NodeData`, `NodeKind`) and its payload types
//! - Structural equality (`structurally_equal`)
//! - The kind-indexed tree walker (`walk`)
//! - Walker consumers: ancestry paths, identifier collection, span checks
//! - Doc-comment extraction
//!
//! Semantic information is attached to nodes only as opaque handles
//! (`SymbolId`, `DeclId`); their meaning lives in `esdown-binder`.

pub mod ids;
pub use ids::{DeclId, NodeId, SymbolId};

pub mod flags;
pub use flags::NodeFlags;

pub mod comment;
pub use comment::Comment;

pub mod node;
pub use node::*;

pub mod factory;

pub mod equality;
pub use equality::{lists_equal, structurally_equal};

pub mod walker;
pub use walker::{ChildBuffer, WalkOptions, children_of, walk, walk_pre};

pub mod path;
pub use path::{AstPath, ast_path_at_position};

pub mod collect;
pub mod validate;

pub mod doc_comments;
