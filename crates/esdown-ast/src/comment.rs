//! Comments attached to nodes.

use crate::doc_comments;
use esdown_common::Span;
use esdown_common::comments::is_doc_comment_text;
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

/// A comment from the original source, attached as a leading or trailing
/// comment of a node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    /// Full comment text including its delimiters.
    pub content: String,
    /// `/* ... */` as opposed to `// ...`.
    pub is_block: bool,
    /// The comment was followed by a line break in the source.
    #[serde(default)]
    pub ends_with_newline: bool,
    #[serde(default)]
    pub span: Option<Span>,
    #[serde(skip)]
    doc_text: OnceCell<String>,
}

impl Comment {
    pub fn new(content: impl Into<String>, is_block: bool, ends_with_newline: bool) -> Self {
        Comment {
            content: content.into(),
            is_block,
            ends_with_newline,
            span: None,
            doc_text: OnceCell::new(),
        }
    }

    pub fn line(content: impl Into<String>) -> Self {
        Comment::new(content, false, true)
    }

    pub fn block(content: impl Into<String>) -> Self {
        Comment::new(content, true, false)
    }

    pub fn with_span(mut self, start: u32, end: u32) -> Self {
        self.span = Some(Span::new(start, end));
        self
    }

    pub fn with_newline(mut self, ends_with_newline: bool) -> Self {
        self.ends_with_newline = ends_with_newline;
        self
    }

    pub fn is_doc_comment(&self) -> bool {
        self.is_block && is_doc_comment_text(&self.content)
    }

    /// Cleaned doc-comment text, computed on first use. Empty for comments
    /// that are not doc comments.
    pub fn doc_comment_text(&self) -> &str {
        self.doc_text.get_or_init(|| {
            if self.is_doc_comment() {
                doc_comments::clean_doc_comment(&self.content, None)
            } else {
                String::new()
            }
        })
    }

    /// Content/style/newline equality; spans and caches are ignored.
    pub fn same_content(&self, other: &Comment) -> bool {
        self.content == other.content
            && self.is_block == other.is_block
            && self.ends_with_newline == other.ends_with_newline
    }
}
