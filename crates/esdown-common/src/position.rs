//! Line/column positions.
//!
//! `LineMap` stores the start offset of every line so character offsets can
//! be converted to zero-based `(line, column)` pairs with a binary search.

use memchr::memchr_iter;
use serde::{Deserialize, Serialize};

/// Zero-based line and column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineAndColumn {
    pub line: u32,
    pub column: u32,
}

impl LineAndColumn {
    pub const fn new(line: u32, column: u32) -> Self {
        LineAndColumn { line, column }
    }
}

/// Start offsets of each line of a source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl Default for LineMap {
    fn default() -> Self {
        LineMap {
            line_starts: vec![0],
        }
    }
}

impl LineMap {
    /// Build a line map by scanning `text` for `\n` terminators.
    /// `\r\n` is handled naturally since the line starts after the `\n`.
    pub fn build(text: &str) -> Self {
        let mut line_starts = Vec::with_capacity(text.len() / 32 + 1);
        line_starts.push(0);
        for idx in memchr_iter(b'\n', text.as_bytes()) {
            line_starts.push(idx as u32 + 1);
        }
        LineMap { line_starts }
    }

    /// Build from precomputed line starts. The first entry must be `0`.
    pub fn from_line_starts(line_starts: Vec<u32>) -> Self {
        assert!(
            line_starts.first() == Some(&0),
            "line map must start at offset 0"
        );
        debug_assert!(line_starts.windows(2).all(|w| w[0] <= w[1]));
        LineMap { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_starts(&self) -> &[u32] {
        &self.line_starts
    }

    /// Zero-based line containing `pos`.
    pub fn line_of(&self, pos: u32) -> u32 {
        let idx = self.line_starts.partition_point(|&start| start <= pos);
        idx.saturating_sub(1) as u32
    }

    pub fn line_and_column(&self, pos: u32) -> LineAndColumn {
        let line = self.line_of(pos);
        let column = pos - self.line_starts[line as usize];
        LineAndColumn { line, column }
    }
}
