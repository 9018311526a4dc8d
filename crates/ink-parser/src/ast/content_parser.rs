//! Content parsing: prose, `{...}` interpolation, alternatives, and the
//! text of choice branches.
//!
//! Content is read in whatever context is on top of the stack, and a run of
//! text ends at that context's delimiters or at the end of the line.

use ink_core::ParseError;

use super::context::ContextKind;
use super::node::{NodeKind, SyntaxNode};
use super::parser::{NodeResult, Parser};
use crate::lexer::TokenKind;

impl<'ast> Parser<'ast> {
    /// Consume a maximal run of content tokens.
    ///
    /// Returns the first and last consumed token indices, or `None` if the
    /// cursor is already at a delimiter or the end of the line.
    fn content_run(&mut self) -> Option<(usize, usize)> {
        let token_start = self.position();
        while !self.peek_kind().is_line_end() && !self.at_delimiter() {
            self.advance();
        }
        (self.position() > token_start).then(|| (token_start, self.position() - 1))
    }

    /// Parse a run of content text into a leaf of the given kind.
    pub(super) fn parse_content_string(&mut self, kind: NodeKind) -> Option<&'ast SyntaxNode<'ast>> {
        self.trace_rule("parse_content_string");
        let (token_start, token_end) = self.content_run()?;
        Some(self.leaf(kind, token_start, token_end))
    }

    /// Parse prose interleaved with brace expressions, up to the end of the
    /// line or a delimiter of the current context.
    pub(super) fn parse_content_expr(&mut self) -> NodeResult<'ast> {
        self.trace_rule("parse_content_expr");
        let mark = self.scratch.bookmark();
        let token_start = self.position();

        while !self.peek_kind().is_line_end() {
            let node = if self.check(TokenKind::LeftBrace) {
                self.parse_brace_expr()?
            } else {
                match self.parse_content_string(NodeKind::StringExpr) {
                    Some(node) => node,
                    None => break,
                }
            };
            self.scratch.push(node);
        }

        let token_end = self.last_consumed(token_start);
        Ok(self.sequence(NodeKind::ContentExpr, token_start, token_end, mark))
    }

    /// Parse `{ ... }`.
    pub(super) fn parse_brace_expr(&mut self) -> NodeResult<'ast> {
        self.trace_rule("parse_brace_expr");
        let token_start = self.advance();

        self.push_context(ContextKind::Brace)?;
        let inner = self.parse_sequence_expr()?;
        self.pop_context();

        let token_end = match self.expect(TokenKind::RightBrace) {
            Some(index) => index,
            None => self.last_consumed(token_start),
        };
        Ok(self.unary(NodeKind::BraceExpr, token_start, token_end, Some(inner)))
    }

    /// Parse the body of a brace expression.
    ///
    /// The body is first read as content. If a `|` follows, the body is a
    /// list of alternatives; otherwise the cursor is rewound to the start of
    /// the brace and the body is parsed again as an expression.
    pub(super) fn parse_sequence_expr(&mut self) -> NodeResult<'ast> {
        self.trace_rule("parse_sequence_expr");
        let mark = self.scratch.bookmark();
        let token_start = self.position();
        let first = self.parse_content_expr()?;

        if !self.check(TokenKind::Pipe) {
            self.rewind_context();
            self.push_context(ContextKind::Expression)?;
            let expr = self.parse_expr()?;
            self.pop_context();
            return Ok(expr);
        }

        self.scratch.push(first);
        while !self.peek_kind().is_line_end() && !self.check(TokenKind::RightBrace) {
            self.eat(TokenKind::Pipe);
            let alternative = self.parse_content_expr()?;
            self.scratch.push(alternative);
        }

        let token_end = self.last_consumed(token_start);
        Ok(self.sequence(NodeKind::SequenceExpr, token_start, token_end, mark))
    }

    /// Parse one line of content and its terminating newline.
    pub(super) fn parse_content_stmt(&mut self) -> NodeResult<'ast> {
        self.trace_rule("parse_content_stmt");
        let token_start = self.position();
        let content = self.parse_content_expr()?;

        if !self.peek_kind().is_line_end() {
            let token = self.peek();
            self.error(ParseError::expected_newline(
                token.span(),
                token.kind.description(),
            ));
        }

        let token_end = self.advance();
        Ok(self.unary(NodeKind::ContentStmt, token_start, token_end, Some(content)))
    }

    /// Parse the text of a choice branch: `start [option] inner`.
    ///
    /// Pieces with no text are left out.
    pub(super) fn parse_choice_content(&mut self) -> &'ast SyntaxNode<'ast> {
        self.trace_rule("parse_choice_content");
        let mark = self.scratch.bookmark();
        let token_start = self.position();

        if let Some(start) = self.parse_content_string(NodeKind::ChoiceStartExpr) {
            self.scratch.push(start);
        }

        if self.eat(TokenKind::LeftBracket).is_some() {
            if let Some(option) = self.parse_content_string(NodeKind::ChoiceOptionExpr) {
                self.scratch.push(option);
            }
            self.expect(TokenKind::RightBracket);
        }

        if let Some(inner) = self.parse_content_string(NodeKind::ChoiceInnerExpr) {
            self.scratch.push(inner);
        }

        let token_end = self.last_consumed(token_start);
        self.sequence(NodeKind::ChoiceContentExpr, token_start, token_end, mark)
    }
}
