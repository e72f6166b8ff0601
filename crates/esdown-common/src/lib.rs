//! Common types and utilities for the esdown lowering backend.
//!
//! This crate provides foundational types used across all esdown crates:
//! - Source spans (`Span`) with a synthesized sentinel
//! - Line/column mapping (`LineMap`, `LineAndColumn`)
//! - Common enums (`ModuleKind`, `NewLineKind`)
//! - Diagnostics reported to the orchestrator
//! - Source map documents and VLQ encoding
//! - Comment text helpers

// Span - Source location tracking (character offsets)
pub mod span;
pub use span::Span;

// Common types - Shared constants to break circular dependencies
pub mod common;
pub use common::{ModuleKind, NewLineKind};

// Position types for line/column source locations
pub mod position;
pub use position::{LineAndColumn, LineMap};

// Diagnostics surfaced by the emitter and the CLI
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Source Map documents
pub mod source_map;

// Comment text utilities
pub mod comments;
