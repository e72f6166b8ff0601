//! Output buffer with indentation and line/column tracking.
//!
//! Indentation is written lazily: a new line only receives its indent when
//! the first non-empty text lands on it, so blank lines stay blank and the
//! position reported for a mapping is where the text really starts.

use esdown_common::{LineAndColumn, NewLineKind};

pub struct SourceWriter {
    output: String,
    line: u32,
    /// Column in UTF-16 code units, as source maps count them.
    column: u32,
    indent_level: u32,
    indent_unit: String,
    new_line: &'static str,
    at_line_start: bool,
}

impl SourceWriter {
    pub fn new(indent_unit: String, new_line: NewLineKind) -> Self {
        SourceWriter {
            output: String::with_capacity(4096),
            line: 0,
            column: 0,
            indent_level: 0,
            indent_unit,
            new_line: new_line.as_str(),
            at_line_start: true,
        }
    }

    /// Write `text`. Embedded `\n` (or `\r\n`) start new lines, each indented
    /// at the current level.
    pub fn write(&mut self, text: &str) {
        let mut segments = text.split('\n').peekable();
        while let Some(segment) = segments.next() {
            let segment = match segments.peek() {
                Some(_) => segment.strip_suffix('\r').unwrap_or(segment),
                None => segment,
            };
            self.write_segment(segment);
            if segments.peek().is_some() {
                self.write_line();
            }
        }
    }

    fn write_segment(&mut self, segment: &str) {
        if segment.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent_level {
                self.output.push_str(&self.indent_unit);
            }
            self.column = self.indent_width();
            self.at_line_start = false;
        }
        self.output.push_str(segment);
        self.column += segment.encode_utf16().count() as u32;
    }

    pub fn write_line(&mut self) {
        self.output.push_str(self.new_line);
        self.line += 1;
        self.column = 0;
        self.at_line_start = true;
    }

    /// Start a new line unless already at the start of one.
    pub fn ensure_line_start(&mut self) {
        if !self.at_line_start {
            self.write_line();
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        debug_assert!(self.indent_level > 0, "indent underflow");
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn indent_level(&self) -> u32 {
        self.indent_level
    }

    fn indent_width(&self) -> u32 {
        self.indent_level * self.indent_unit.len() as u32
    }

    /// Position the next written text will occupy, indent included.
    pub fn position(&self) -> LineAndColumn {
        let column = if self.at_line_start {
            self.indent_width()
        } else {
            self.column
        };
        LineAndColumn::new(self.line, column)
    }

    /// Position just past the last written character.
    pub fn end_position(&self) -> LineAndColumn {
        LineAndColumn::new(self.line, self.column)
    }

    pub fn is_at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

#[cfg(test)]
#[path = "../tests/source_writer_tests.rs"]
mod tests;
