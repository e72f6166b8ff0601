use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

/// Diagnostic codes produced by the backend.
pub mod diagnostic_codes {
    /// A node kind with no textual form reached the emitter.
    pub const TYPE_ONLY_NODE_EMITTED: u32 = 9001;
    /// Source-map push/pop did not balance.
    pub const UNBALANCED_SOURCE_MAP: u32 = 9002;
    /// Writing the output or source map failed.
    pub const OUTPUT_WRITE_FAILED: u32 = 9003;
    /// A compilation unit could not be loaded.
    pub const UNIT_LOAD_FAILED: u32 = 9004;
    /// Two units would write the same output file.
    pub const OUTPUT_PATH_CONFLICT: u32 = 9005;
    /// A name slot held a node with no name text.
    pub const UNSUPPORTED_NAME: u32 = 9006;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            message_text: message.into(),
            code,
            file: file.into(),
            start,
            length,
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let category = match self.category {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Message => "message",
        };
        write!(
            f,
            "{}({}): {} ES{}: {}",
            self.file, self.start, category, self.code, self.message_text
        )
    }
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
