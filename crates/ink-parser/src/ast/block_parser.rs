//! Statement, block, and file parsing.
//!
//! A block collects lines until a choice branch at or above the block's own
//! nesting level shows up. Branch nesting is tracked on the level stack:
//!
//! ```text
//! * a          level 1, top-level block
//! ** b         level 2, inside a's body
//! * c          level 1, rewinds out of a's body
//! ```

use ink_core::ParseError;

use super::context::ContextKind;
use super::node::NodeKind;
use super::parser::{NodeResult, Parser};
use crate::lexer::TokenKind;

impl<'ast> Parser<'ast> {
    /// Parse a whole script.
    ///
    /// An empty script yields a `File` node without a block.
    pub(super) fn parse_file(&mut self) -> NodeResult<'ast> {
        self.trace_rule("parse_file");
        let token_start = self.position();

        if self.check(TokenKind::Eof) {
            return Ok(self.unary(NodeKind::File, token_start, token_start, None));
        }

        let block = self.parse_block()?;
        let token_end = self.position();
        Ok(self.unary(NodeKind::File, token_start, token_end, Some(block)))
    }

    /// Parse statements and choice branches nested deeper than the level
    /// active on entry.
    pub(super) fn parse_block(&mut self) -> NodeResult<'ast> {
        self.trace_rule("parse_block");
        let level = self.levels.top();
        let mark = self.scratch.bookmark();
        let token_start = self.position();

        loop {
            self.skip_blank_lines();
            if self.check(TokenKind::Eof) {
                break;
            }

            let line_start = self.position();
            self.skip_whitespace();

            let marker = self.peek();
            let kind = match marker.kind {
                TokenKind::Star => NodeKind::ChoiceStarBranch,
                TokenKind::Plus => NodeKind::ChoicePlusBranch,
                _ => {
                    let stmt = self.parse_stmt()?;
                    self.scratch.push(stmt);
                    continue;
                }
            };

            let marker_index = self.position();
            let branch_level = self.eat_nesting(marker.kind);
            self.levels.unwind_to(branch_level);
            if branch_level > self.levels.top() {
                self.push_level(branch_level, marker.span())?;
            }

            if level >= self.levels.top() {
                self.rewind(line_start);
                break;
            }

            let branch = self.parse_choice_branch(kind, marker_index)?;
            self.scratch.push(branch);
        }

        let token_end = self.last_consumed(token_start);
        Ok(self.sequence(NodeKind::BlockStmt, token_start, token_end, mark))
    }

    /// Parse one content line and any blank lines after it.
    fn parse_stmt(&mut self) -> NodeResult<'ast> {
        self.trace_rule("parse_stmt");
        let stmt = self.parse_content_stmt()?;
        while self.eat(TokenKind::Newline).is_some() {}
        Ok(stmt)
    }

    /// Parse a choice branch whose markers have been consumed.
    ///
    /// The branch body is the block on the following lines, if any.
    fn parse_choice_branch(&mut self, kind: NodeKind, token_start: usize) -> NodeResult<'ast> {
        self.trace_rule("parse_choice_branch");

        self.push_context(ContextKind::Choice)?;
        let content = self.parse_choice_content();
        self.pop_context();

        if !self.peek_kind().is_line_end() {
            let token = self.peek();
            self.error(ParseError::expected_newline(
                token.span(),
                token.kind.description(),
            ));
            self.skip_line();
        }

        let body = match self.eat(TokenKind::Newline) {
            Some(_) => Some(self.parse_block()?),
            None => None,
        };

        let token_end = self.last_consumed(token_start);
        Ok(self.binary(kind, token_start, token_end, Some(content), body))
    }

    /// Consume a run of `marker` tokens, allowing whitespace between them.
    ///
    /// Returns how many markers were consumed.
    fn eat_nesting(&mut self, marker: TokenKind) -> usize {
        let mut level = 0;
        while self.eat(marker).is_some() {
            level += 1;
            self.skip_whitespace();
        }
        level
    }

    /// Consume lines holding nothing but whitespace, along with trailing
    /// whitespace at the end of input.
    fn skip_blank_lines(&mut self) {
        loop {
            let mut index = self.position();
            while self.token_at(index).kind == TokenKind::Whitespace {
                index += 1;
            }
            match self.token_at(index).kind {
                TokenKind::Newline => {
                    while self.position() <= index {
                        self.advance();
                    }
                }
                TokenKind::Eof => {
                    while self.position() < index {
                        self.advance();
                    }
                    return;
                }
                _ => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::node::{NodeKind, SyntaxNode};
    use crate::ast::parser::{ParseOptions, Parser};
    use crate::ast::tree::SyntaxTree;
    use bumpalo::Bump;
    use ink_core::{FatalError, ParseErrorKind};

    fn block<'ast>(tree: &SyntaxTree<'ast>) -> &'ast [&'ast SyntaxNode<'ast>] {
        tree.root().lhs.unwrap().children()
    }

    /// Text of the first choice piece of a branch.
    fn label(tree: &SyntaxTree<'_>, branch: &SyntaxNode<'_>) -> String {
        let content = branch.lhs.unwrap();
        tree.node_text(content.children()[0]).into_owned()
    }

    #[test]
    fn empty_source_has_no_block() {
        let arena = Bump::new();
        let tree = Parser::parse("", &arena).unwrap();
        assert_eq!(tree.root().kind, NodeKind::File);
        assert!(tree.root().lhs.is_none());
        assert!(!tree.has_errors());
    }

    #[test]
    fn nul_byte_ends_input() {
        let arena = Bump::new();
        let tree = Parser::parse("\0ignored", &arena).unwrap();
        assert!(tree.root().lhs.is_none());
    }

    #[test]
    fn statements_in_order() {
        let arena = Bump::new();
        let tree = Parser::parse("one\ntwo\nthree", &arena).unwrap();
        let stmts = block(&tree);
        assert_eq!(stmts.len(), 3);
        for (stmt, text) in stmts.iter().zip(["one", "two", "three"]) {
            assert_eq!(stmt.kind, NodeKind::ContentStmt);
            assert_eq!(tree.node_text(stmt.lhs.unwrap()), text);
        }
    }

    #[test]
    fn blank_and_indented_lines() {
        let arena = Bump::new();
        let tree = Parser::parse("\n\n   one\n  \n\t two\n   ", &arena).unwrap();
        let stmts = block(&tree);
        assert_eq!(stmts.len(), 2);
        assert_eq!(tree.node_text(stmts[0].lhs.unwrap()), "one");
        assert_eq!(tree.node_text(stmts[1].lhs.unwrap()), "two");
    }

    #[test]
    fn branches_nest_by_marker_count() {
        let arena = Bump::new();
        let tree = Parser::parse("* a\n** b\n* c\n", &arena).unwrap();
        let top = block(&tree);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].kind, NodeKind::ChoiceStarBranch);
        assert_eq!(label(&tree, top[0]), "a");
        assert_eq!(label(&tree, top[1]), "c");

        let body = top[0].rhs.unwrap();
        assert_eq!(body.kind, NodeKind::BlockStmt);
        assert_eq!(body.children().len(), 1);
        assert_eq!(label(&tree, body.children()[0]), "b");
        assert!(!tree.has_errors());
    }

    #[test]
    fn spaced_markers_count_as_one_run() {
        let arena = Bump::new();
        let tree = Parser::parse("* a\n * * b\n", &arena).unwrap();
        let top = block(&tree);
        assert_eq!(top.len(), 1);
        let body = top[0].rhs.unwrap();
        assert_eq!(label(&tree, body.children()[0]), "b");
    }

    #[test]
    fn sticky_branches() {
        let arena = Bump::new();
        let tree = Parser::parse("+ again\n* once\n", &arena).unwrap();
        let top = block(&tree);
        assert_eq!(top[0].kind, NodeKind::ChoicePlusBranch);
        assert_eq!(top[1].kind, NodeKind::ChoiceStarBranch);
    }

    #[test]
    fn content_under_a_branch_belongs_to_it() {
        let arena = Bump::new();
        let tree = Parser::parse("* a\nsaid a\n* b\n", &arena).unwrap();
        let top = block(&tree);
        assert_eq!(top.len(), 2);
        let body = top[0].rhs.unwrap();
        assert_eq!(body.children()[0].kind, NodeKind::ContentStmt);
    }

    #[test]
    fn returning_past_a_skipped_level() {
        let arena = Bump::new();
        let tree = Parser::parse("* a\n*** b\n** c\n", &arena).unwrap();
        let top = block(&tree);
        assert_eq!(top.len(), 1);
        let body = top[0].rhs.unwrap();
        assert_eq!(body.children().len(), 2);
        assert_eq!(label(&tree, body.children()[0]), "b");
        assert_eq!(label(&tree, body.children()[1]), "c");
    }

    #[test]
    fn branch_without_newline_has_no_body() {
        let arena = Bump::new();
        let tree = Parser::parse("* last", &arena).unwrap();
        let top = block(&tree);
        assert!(top[0].rhs.is_none());
    }

    #[test]
    fn branch_trailing_junk_is_reported() {
        let arena = Bump::new();
        let tree = Parser::parse("* a ] b\nnext\n", &arena).unwrap();
        assert_eq!(tree.errors().len(), 1);
        assert_eq!(tree.errors().errors()[0].kind, ParseErrorKind::ExpectedNewline);
        let body = block(&tree)[0].rhs.unwrap();
        assert_eq!(body.children()[0].kind, NodeKind::ContentStmt);
    }

    #[test]
    fn unclosed_option_recovers_at_newline() {
        let arena = Bump::new();
        let tree = Parser::parse("* a [b\nnext\n", &arena).unwrap();
        assert_eq!(tree.errors().len(), 1);
        assert_eq!(tree.errors().errors()[0].kind, ParseErrorKind::ExpectedToken);

        let branch = block(&tree)[0];
        let pieces = branch.lhs.unwrap().children();
        assert_eq!(pieces[1].kind, NodeKind::ChoiceOptionExpr);
        assert_eq!(tree.node_text(pieces[1]), "b");

        let body = branch.rhs.unwrap();
        assert_eq!(body.children()[0].kind, NodeKind::ContentStmt);
        assert_eq!(tree.node_text(body.children()[0].lhs.unwrap()), "next");
    }

    #[test]
    fn bad_brace_then_good_line() {
        let arena = Bump::new();
        let tree = Parser::parse("{1 +}\nGood line\n", &arena).unwrap();
        assert!(tree.has_errors());
        let stmts = block(&tree);
        assert_eq!(stmts.len(), 2);
        assert_eq!(tree.node_text(stmts[1].lhs.unwrap()), "Good line");
    }

    #[test]
    fn level_limit_is_fatal() {
        let arena = Bump::new();
        let options = ParseOptions::default().with_max_depth(3);
        let err = Parser::parse_with("* a\n** b\n*** c\n", &arena, &options).unwrap_err();
        assert!(matches!(err, FatalError::LevelTooDeep { limit: 3, .. }));

        let again = Parser::parse_with("* a\n** b\n*** c\n", &arena, &options).unwrap_err();
        assert_eq!(err, again);
    }

    #[test]
    fn file_covers_every_token() {
        let arena = Bump::new();
        let tree = Parser::parse("a\nb\n", &arena).unwrap();
        let root = tree.root();
        assert_eq!(root.token_start, 0);
        assert_eq!(tree.token(root.token_end).unwrap().kind, crate::lexer::TokenKind::Eof);
    }
}
