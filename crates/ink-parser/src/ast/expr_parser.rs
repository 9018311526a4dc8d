//! Expression parsing using Pratt parsing (precedence climbing).
//!
//! Expressions are only ever parsed inside an `Expression` context, where
//! whitespace is invisible. Most tokens reaching this module are still raw
//! text; they are promoted to keywords, identifiers, or numbers here, at the
//! point where their meaning becomes known.

use ink_core::ParseError;

use super::context::ContextKind;
use super::node::{NodeKind, SyntaxNode};
use super::ops::{BinaryOp, Precedence, UnaryOp};
use super::parser::{NodeResult, Parser};
use crate::lexer::{Token, TokenKind, lookup_keyword};

impl<'ast> Parser<'ast> {
    /// Parse a full expression.
    pub(super) fn parse_expr(&mut self) -> NodeResult<'ast> {
        self.trace_rule("parse_expr");
        self.parse_infix(Precedence::None)
    }

    /// Parse a prefix expression, then fold in every binary operator that
    /// binds tighter than `floor`.
    fn parse_infix(&mut self, floor: Precedence) -> NodeResult<'ast> {
        self.trace_rule("parse_infix");
        let mut lhs = self.parse_prefix()?;

        while let Some((op, width)) = self.peek_binary_op() {
            let power = op.binding_power();
            if power <= floor {
                break;
            }

            let token_start = self.advance();
            let token_end = if width == 2 { self.advance() } else { token_start };
            let rhs = self.parse_infix(power)?;
            lhs = self.binary(op.node_kind(), token_start, token_end, Some(lhs), Some(rhs));
        }

        Ok(lhs)
    }

    /// Parse a prefix operator applied to an operand, or a primary expression.
    fn parse_prefix(&mut self) -> NodeResult<'ast> {
        self.trace_rule("parse_prefix");
        self.try_keyword(TokenKind::Not);

        if let Some(op) = UnaryOp::from_token(self.peek_kind()) {
            let token_index = self.advance();
            let operand = self.nested(Self::parse_prefix)?;
            return Ok(self.unary(op.node_kind(), token_index, token_index, Some(operand)));
        }

        self.parse_primary()
    }

    /// Parse a literal, name, or parenthesized expression.
    fn parse_primary(&mut self) -> NodeResult<'ast> {
        self.trace_rule("parse_primary");
        let token = self.peek();
        let index = self.position();

        match token.kind {
            TokenKind::Number => Ok(self.parse_number()),
            TokenKind::True => Ok(self.parse_literal(NodeKind::TrueExpr)),
            TokenKind::False => Ok(self.parse_literal(NodeKind::FalseExpr)),
            TokenKind::Identifier => Ok(self.parse_literal(NodeKind::IdentifierExpr)),

            TokenKind::String => {
                if self.is_digit(token) {
                    Ok(self.parse_number())
                } else if self.try_keyword(TokenKind::True) {
                    Ok(self.parse_literal(NodeKind::TrueExpr))
                } else if self.try_keyword(TokenKind::False) {
                    Ok(self.parse_literal(NodeKind::FalseExpr))
                } else if self.try_identifier() {
                    Ok(self.parse_literal(NodeKind::IdentifierExpr))
                } else {
                    Ok(self.parse_literal(NodeKind::StringExpr))
                }
            }

            TokenKind::DoubleQuote => Ok(self.parse_string_literal()),

            TokenKind::LeftParen => {
                self.advance();
                let inner = self.nested(Self::parse_expr)?;
                self.expect(TokenKind::RightParen);
                Ok(inner)
            }

            _ => {
                self.error(ParseError::expected_expression(
                    token.span(),
                    token.kind.description(),
                ));
                Ok(self.leaf(NodeKind::Invalid, index, index))
            }
        }
    }

    /// Run `rule` inside a fresh expression context.
    ///
    /// Every nested operand occupies a context frame, which bounds how deep
    /// prefix chains and parentheses can recurse.
    fn nested(&mut self, rule: fn(&mut Self) -> NodeResult<'ast>) -> NodeResult<'ast> {
        self.push_context(ContextKind::Expression)?;
        let node = rule(self)?;
        self.pop_context();
        Ok(node)
    }

    /// Consume one token and wrap it in a leaf.
    fn parse_literal(&mut self, kind: NodeKind) -> &'ast SyntaxNode<'ast> {
        let index = self.advance();
        self.leaf(kind, index, index)
    }

    /// Parse a number literal: adjacent digit tokens with an optional
    /// fractional part.
    fn parse_number(&mut self) -> &'ast SyntaxNode<'ast> {
        self.trace_rule("parse_number");
        let token_start = self.position();
        let mut token_end = self.eat_digits();

        let last = self.token_at(token_end);
        let dot = self.token_at(token_end + 1);
        if last.touches(&dot) && self.lexeme(dot) == b"." {
            let fraction = self.token_at(token_end + 2);
            if dot.touches(&fraction) && self.is_digit(fraction) {
                self.reclassify(token_end + 1, TokenKind::Number);
                self.advance();
                token_end = self.eat_digits();
            }
        }

        self.leaf(NodeKind::NumberExpr, token_start, token_end)
    }

    /// Consume a run of adjacent digit tokens, returning the index of the last.
    fn eat_digits(&mut self) -> usize {
        loop {
            let index = self.position();
            let token = self.token_at(index);
            let next = self.token_at(index + 1);
            self.reclassify(index, TokenKind::Number);
            self.advance();
            if !(token.touches(&next) && self.is_digit(next)) {
                return index;
            }
        }
    }

    /// Parse a double-quoted string literal.
    ///
    /// The literal may not span lines; a missing closing quote is reported.
    fn parse_string_literal(&mut self) -> &'ast SyntaxNode<'ast> {
        self.trace_rule("parse_string_literal");
        let token_start = self.advance();
        while !matches!(
            self.peek_kind(),
            TokenKind::DoubleQuote | TokenKind::Newline | TokenKind::Eof
        ) {
            self.advance();
        }
        let token_end = match self.expect(TokenKind::DoubleQuote) {
            Some(index) => index,
            None => self.last_consumed(token_start),
        };
        self.leaf(NodeKind::StringLiteral, token_start, token_end)
    }

    /// Look at the upcoming tokens for a binary operator.
    ///
    /// Word operators are promoted in place; two-byte operators are only
    /// recognized when both halves are adjacent.
    fn peek_binary_op(&mut self) -> Option<(BinaryOp, usize)> {
        let _ = self.try_keyword(TokenKind::And)
            || self.try_keyword(TokenKind::Or)
            || self.try_keyword(TokenKind::Mod);

        let token = self.peek();
        let next = match token.kind {
            TokenKind::Equal
            | TokenKind::Bang
            | TokenKind::Less
            | TokenKind::Greater
            | TokenKind::Amp
            | TokenKind::Pipe => {
                let next = self.token_at(self.position() + 1);
                token.touches(&next).then_some(next.kind)
            }
            _ => None,
        };
        BinaryOp::from_tokens(token.kind, next)
    }

    /// Promote the current token to `keyword` if it spells it.
    pub(super) fn try_keyword(&mut self, keyword: TokenKind) -> bool {
        let token = self.peek();
        if token.kind == keyword {
            return true;
        }
        if token.kind == TokenKind::String && lookup_keyword(self.lexeme(token)) == Some(keyword) {
            self.reclassify(self.position(), keyword);
            return true;
        }
        false
    }

    /// Promote the current token to an identifier if it is all letters.
    fn try_identifier(&mut self) -> bool {
        let token = self.peek();
        let lexeme = self.lexeme(token);
        if token.kind == TokenKind::String
            && !lexeme.is_empty()
            && lexeme.iter().all(u8::is_ascii_alphabetic)
        {
            self.reclassify(self.position(), TokenKind::Identifier);
            return true;
        }
        false
    }

    /// Whether `token` is a single decimal digit.
    fn is_digit(&self, token: Token) -> bool {
        match token.kind {
            TokenKind::Number => self.lexeme(token) != b".",
            TokenKind::String => matches!(self.lexeme(token), [b] if b.is_ascii_digit()),
            _ => false,
        }
    }
}
