use esdown_ast::NodeKind;
use esdown_common::Span;
use esdown_common::diagnostics::{Diagnostic, diagnostic_codes};
use thiserror::Error;

/// Failures that abort emission of a file.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("Cannot emit type-only node '{kind}'.")]
    TypeOnlyNode { kind: NodeKind, span: Option<Span> },

    #[error("Cannot emit '{kind}' as a name.")]
    UnsupportedName { kind: NodeKind, span: Option<Span> },

    #[error("Unbalanced source map: {detail}.")]
    UnbalancedSourceMap { detail: String },

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize source map: {0}")]
    SourceMapSerialization(#[from] serde_json::Error),
}

impl EmitError {
    pub fn code(&self) -> u32 {
        match self {
            EmitError::TypeOnlyNode { .. } => diagnostic_codes::TYPE_ONLY_NODE_EMITTED,
            EmitError::UnsupportedName { .. } => diagnostic_codes::UNSUPPORTED_NAME,
            EmitError::UnbalancedSourceMap { .. } => diagnostic_codes::UNBALANCED_SOURCE_MAP,
            EmitError::Io(_) | EmitError::SourceMapSerialization(_) => {
                diagnostic_codes::OUTPUT_WRITE_FAILED
            }
        }
    }

    /// One diagnostic per failure, positioned at the offending node when known.
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        let (start, length) = match self {
            EmitError::TypeOnlyNode {
                span: Some(span), ..
            }
            | EmitError::UnsupportedName {
                span: Some(span), ..
            } => (span.start, span.len()),
            _ => (0, 0),
        };
        Diagnostic::error(file, start, length, self.to_string(), self.code())
    }
}
