//! Source spans.
//!
//! A node either carries a fully valid `Span` or none at all. Compiler
//! synthesized nodes use `None`; there is no half-valid state.

use serde::{Deserialize, Serialize};

/// Character range of a node in the original source, plus the width of the
/// trivia that trails it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
    #[serde(default)]
    pub trailing_trivia_width: u32,
}

impl Span {
    /// Create a span. `start` must not exceed `end`.
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        assert!(start <= end, "inverted span {start}..{end}");
        Span {
            start,
            end,
            trailing_trivia_width: 0,
        }
    }

    #[inline]
    pub fn with_trailing_trivia(mut self, width: u32) -> Self {
        self.trailing_trivia_width = width;
        self
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// End position including trailing trivia.
    #[inline]
    pub fn trivia_end(&self) -> u32 {
        self.end + self.trailing_trivia_width
    }

    /// Whether `pos` lies in `[start, end)`, or equals `end` for empty spans.
    #[inline]
    pub fn contains(&self, pos: u32) -> bool {
        (self.start <= pos && pos < self.end) || (self.is_empty() && pos == self.start)
    }

    #[inline]
    pub fn encloses(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest span covering both.
    pub fn cover(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            trailing_trivia_width: if other.end >= self.end {
                other.trailing_trivia_width
            } else {
                self.trailing_trivia_width
            },
        }
    }
}
