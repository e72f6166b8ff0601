use colored::Colorize;
use esdown_common::{Diagnostic, DiagnosticCategory, LineMap};

/// Renders diagnostics as `file:line:column - error ES9001: message`.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// One diagnostic per line. `line_map` converts offsets to positions
    /// when the unit was loaded far enough to have one.
    pub fn render(&self, diagnostics: &[Diagnostic], line_map: Option<&LineMap>) -> String {
        diagnostics
            .iter()
            .map(|diagnostic| self.format_diagnostic(diagnostic, line_map))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic, line_map: Option<&LineMap>) -> String {
        let mut output = match self.format_location(diagnostic, line_map) {
            Some(location) => location,
            None if !diagnostic.file.is_empty() => diagnostic.file.clone(),
            None => "<unknown>".to_string(),
        };

        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        let code = self.format_code(diagnostic.code);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        output
    }

    /// Closing line for a run.
    pub fn summary(&self, emitted: usize, failed: usize) -> String {
        let units = |count: usize| if count == 1 { "unit" } else { "units" };
        if failed == 0 {
            let text = format!("Emitted {emitted} {}.", units(emitted));
            return if self.color {
                text.green().to_string()
            } else {
                text
            };
        }
        let text = format!("{failed} of {} {} failed.", emitted + failed, units(emitted + failed));
        if self.color {
            text.red().bold().to_string()
        } else {
            text
        }
    }

    fn format_location(&self, diagnostic: &Diagnostic, line_map: Option<&LineMap>) -> Option<String> {
        if diagnostic.file.is_empty() {
            return None;
        }
        let position = line_map?.line_and_column(diagnostic.start);
        let location = format!(
            "{}:{}:{}",
            diagnostic.file,
            position.line + 1,
            position.column + 1
        );
        Some(if self.color {
            location.cyan().to_string()
        } else {
            location
        })
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }

        let label = format!("ES{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
