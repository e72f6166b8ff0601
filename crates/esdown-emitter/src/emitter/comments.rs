use super::{CopyrightHeader, Emitter};
use crate::error::EmitError;
use esdown_ast::{Comment, ModuleFlavor, Node, NodeData};
use esdown_common::comments::reindent_block_comment;

impl<'a> Emitter<'a> {
    // =========================================================================
    // Node comments
    // =========================================================================

    pub(crate) fn emit_leading_comments(&mut self, node: &Node) -> Result<(), EmitError> {
        if !self.options.emit_comments {
            return Ok(());
        }
        let skip = match self.copyright {
            Some(header) if header.element == node.id => header.count,
            _ => 0,
        };
        for (index, comment) in node.leading_comments.iter().enumerate().skip(skip) {
            self.emit_comment(comment, false, index == skip)?;
        }
        Ok(())
    }

    pub(crate) fn emit_trailing_comments(&mut self, node: &Node) -> Result<(), EmitError> {
        if !self.options.emit_comments {
            return Ok(());
        }
        for (index, comment) in node.trailing_comments.iter().enumerate() {
            self.emit_comment(comment, true, index == 0)?;
        }
        Ok(())
    }

    /// Line comments and block comments that end their source line are
    /// followed by a newline; a one-line block comment followed by code on the
    /// same line keeps that code on its line.
    fn emit_comment(
        &mut self,
        comment: &Comment,
        trailing: bool,
        first: bool,
    ) -> Result<(), EmitError> {
        if trailing && first && !self.writer.is_at_line_start() {
            self.write(" ");
        }
        self.write_comment_text(comment)?;
        let multi_line = comment.is_block && comment.content.contains('\n');
        if !comment.is_block || multi_line || comment.ends_with_newline {
            self.write_line();
        } else if !trailing {
            self.write(" ");
        }
        Ok(())
    }

    fn write_comment_text(&mut self, comment: &Comment) -> Result<(), EmitError> {
        self.with_span_mapping(comment.span, |this| {
            if comment.is_block {
                this.write(&reindent_block_comment(&comment.content, ""));
            } else {
                this.write(comment.content.trim_end());
            }
            Ok(())
        })
    }

    // =========================================================================
    // Copyright header
    // =========================================================================

    /// First top-level element that produces code. An external module's
    /// header belongs to its first member.
    pub(crate) fn first_emitted_element<'n>(&self, statements: &'n [Node]) -> Option<&'n Node> {
        let first = statements.iter().find(|node| self.emits_code(node))?;
        if let NodeData::ModuleDeclaration(module) = &first.data
            && module.flavor == ModuleFlavor::External
            && let Some(member) = module.members.iter().find(|node| self.emits_code(node))
        {
            return Some(member);
        }
        Some(first)
    }

    /// The leading comments of `element` that form a header: the run up to
    /// the first blank line between comments, or the whole list when a blank
    /// line separates it from the element.
    pub(crate) fn copyright_comment_count(&self, element: &Node) -> usize {
        let Some(line_map) = self.line_map else {
            return 0;
        };
        let Some(element_span) = element.span else {
            return 0;
        };
        let comments = &element.leading_comments;
        let mut count = 0;
        let mut last_end_line = None;
        for comment in comments {
            let Some(span) = comment.span else {
                return 0;
            };
            if let Some(last_line) = last_end_line
                && line_map.line_of(span.start) >= last_line + 2
            {
                return count;
            }
            count += 1;
            last_end_line = Some(line_map.line_of(span.end));
        }
        match last_end_line {
            Some(last_line) if line_map.line_of(element_span.start) >= last_line + 2 => count,
            _ => 0,
        }
    }

    /// Print the header once, followed by a blank line.
    pub(crate) fn emit_copyright_header(&mut self, statements: &[Node]) -> Result<(), EmitError> {
        if !self.options.emit_comments {
            return Ok(());
        }
        let Some(element) = self.first_emitted_element(statements) else {
            return Ok(());
        };
        let count = self.copyright_comment_count(element);
        if count == 0 {
            return Ok(());
        }
        for comment in &element.leading_comments[..count] {
            self.write_comment_text(comment)?;
            self.write_line();
        }
        self.write_line();
        self.copyright = Some(CopyrightHeader {
            element: element.id,
            count,
        });
        Ok(())
    }
}
