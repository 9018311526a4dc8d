//! Parser state and the token-level primitives every grammar rule builds on.
//!
//! Grammar rules live in sibling modules:
//! - `expr_parser` for Pratt-parsed expressions
//! - `content_parser` for prose, braces, sequences, and choice text
//! - `block_parser` for statements, choice nesting, and files

use bumpalo::Bump;
use ink_core::{FatalError, ParseError, ParseErrors, Span};

use super::context::{ContextKind, ContextStack, LevelStack};
use super::node::{NodeKind, SyntaxNode};
use super::scratch::{Bookmark, ScratchBuffer};
use super::tree::SyntaxTree;
use crate::lexer::{Lexer, MAX_SOURCE_LEN, Token, TokenKind, TokenLog};

/// Target used for every log record the parser emits.
pub(crate) const LOG_TARGET: &str = "ink_parser";

/// Default ceiling for the context and level stacks.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Result of a grammar rule that builds one node.
pub(super) type NodeResult<'ast> = Result<&'ast SyntaxNode<'ast>, FatalError>;

/// Knobs for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Ceiling for both the context stack and the choice level stack.
    pub max_depth: usize,
    /// Emit `trace` log records for rule entry, context changes, rewinds,
    /// and node creation.
    pub trace: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            trace: false,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// Recursive-descent parser for ink scripts.
///
/// The parser pulls tokens from the lexer lazily and keeps every one of them
/// in a [`TokenLog`], so any rule can save the current index and rewind to it
/// later. Nodes are allocated in the arena handed to the entry points.
pub struct Parser<'ast> {
    /// Arena for nodes and the copy of the source.
    pub(super) arena: &'ast Bump,
    /// The source being parsed, copied into the arena.
    pub(super) source: &'ast [u8],
    lexer: Lexer<'ast>,
    tokens: TokenLog,
    /// Index of the current token in the log.
    position: usize,
    pub(super) contexts: ContextStack,
    pub(super) levels: LevelStack,
    pub(super) scratch: ScratchBuffer<'ast>,
    errors: ParseErrors,
    /// Set once any diagnostic has been raised.
    panic_mode: bool,
    trace: bool,
}

/// Reject sources whose offsets do not fit a token.
fn check_source_len(len: usize) -> Result<(), FatalError> {
    if len > MAX_SOURCE_LEN {
        return Err(FatalError::SourceTooLarge {
            len,
            limit: MAX_SOURCE_LEN,
        });
    }
    Ok(())
}

impl<'ast> Parser<'ast> {
    /// Create a parser over `source`.
    ///
    /// The bytes are copied into `arena`, so the caller's buffer can be
    /// dropped while the resulting tree is still in use.
    pub fn new(source: &[u8], arena: &'ast Bump, options: &ParseOptions) -> Self {
        let source: &'ast [u8] = arena.alloc_slice_copy(source);
        Self {
            arena,
            source,
            lexer: Lexer::new(source),
            tokens: TokenLog::with_capacity(source.len() / 2 + 1),
            position: 0,
            contexts: ContextStack::new(options.max_depth),
            levels: LevelStack::new(options.max_depth),
            scratch: ScratchBuffer::with_capacity(64),
            errors: ParseErrors::new(),
            panic_mode: false,
            trace: options.trace,
        }
    }

    /// Parse a complete script with default options.
    ///
    /// Always produces a tree unless a nesting limit is exceeded; syntax
    /// errors are recovered from and reported through
    /// [`SyntaxTree::errors`].
    pub fn parse(source: impl AsRef<[u8]>, arena: &'ast Bump) -> Result<SyntaxTree<'ast>, FatalError> {
        Self::parse_with(source, arena, &ParseOptions::default())
    }

    /// Parse a complete script.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse_with(
        source: impl AsRef<[u8]>,
        arena: &'ast Bump,
        options: &ParseOptions,
    ) -> Result<SyntaxTree<'ast>, FatalError> {
        let source = source.as_ref();
        check_source_len(source.len())?;
        let mut parser = Parser::new(source, arena, options);
        let root = parser.parse_file().inspect_err(|err| {
            log::debug!(target: LOG_TARGET, "parse aborted: {err}");
        })?;
        Ok(parser.finish(root))
    }

    /// Parse the whole input as a single expression.
    ///
    /// The root of the returned tree is the expression node itself. Tokens
    /// left over after the expression are reported as unexpected.
    pub fn expression(source: impl AsRef<[u8]>, arena: &'ast Bump) -> Result<SyntaxTree<'ast>, FatalError> {
        Self::expression_with(source, arena, &ParseOptions::default())
    }

    /// Parse the whole input as a single expression.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn expression_with(
        source: impl AsRef<[u8]>,
        arena: &'ast Bump,
        options: &ParseOptions,
    ) -> Result<SyntaxTree<'ast>, FatalError> {
        let source = source.as_ref();
        check_source_len(source.len())?;
        let mut parser = Parser::new(source, arena, options);
        parser.push_context(ContextKind::Expression)?;
        let root = parser.parse_expr()?;
        if !parser.check(TokenKind::Eof) {
            let token = parser.peek();
            let text = String::from_utf8_lossy(parser.lexeme(token)).into_owned();
            parser.error(ParseError::unexpected_token(token.span(), &text));
        }
        parser.pop_context();
        Ok(parser.finish(root))
    }

    /// Whether any diagnostic has been raised so far.
    pub fn panic_mode(&self) -> bool {
        self.panic_mode
    }

    /// Diagnostics raised so far.
    pub fn errors(&self) -> &ParseErrors {
        &self.errors
    }

    fn finish(self, root: &'ast SyntaxNode<'ast>) -> SyntaxTree<'ast> {
        log::debug!(
            target: LOG_TARGET,
            "parsed {} bytes into {} tokens with {} diagnostics",
            self.source.len(),
            self.tokens.len(),
            self.errors.len()
        );
        SyntaxTree::new(self.source, self.tokens, root, self.errors)
    }

    // =========================================
    // Token access
    // =========================================

    /// Get the token at `index`, pulling from the lexer if needed.
    ///
    /// Indices past the end of input resolve to the EOF token.
    pub(super) fn token_at(&mut self, index: usize) -> Token {
        self.tokens.fill_to(&mut self.lexer, index);
        match self.tokens.get(index).or_else(|| self.tokens.last()) {
            Some(token) => *token,
            None => Token::new(TokenKind::Eof, self.source.len() as u32, self.source.len() as u32),
        }
    }

    /// Get the current token.
    #[inline]
    pub(super) fn peek(&mut self) -> Token {
        self.token_at(self.position)
    }

    #[inline]
    pub(super) fn peek_kind(&mut self) -> TokenKind {
        self.peek().kind
    }

    /// Index of the current token.
    #[inline]
    pub(super) fn position(&self) -> usize {
        self.position
    }

    /// Index of the last consumed token, or `start` if nothing was consumed
    /// since `start`.
    #[inline]
    pub(super) fn last_consumed(&self, start: usize) -> usize {
        if self.position > start {
            self.position - 1
        } else {
            start
        }
    }

    /// The bytes of `token`.
    #[inline]
    pub(super) fn lexeme(&self, token: Token) -> &'ast [u8] {
        token.lexeme(self.source)
    }

    /// Check if the current token is of the given kind.
    #[inline]
    pub(super) fn check(&mut self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consume the current token and return its index.
    ///
    /// Never moves past EOF. Inside an expression, whitespace after the
    /// consumed token is skipped as well.
    pub(super) fn advance(&mut self) -> usize {
        let index = self.position;
        if !self.check(TokenKind::Eof) {
            self.position += 1;
            if self.contexts.current().kind == ContextKind::Expression {
                self.skip_whitespace();
            }
        }
        index
    }

    /// Consume the current token if it is of the given kind.
    pub(super) fn eat(&mut self, kind: TokenKind) -> Option<usize> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume every whitespace token at the cursor.
    pub(super) fn skip_whitespace(&mut self) {
        while self.check(TokenKind::Whitespace) {
            self.position += 1;
        }
    }

    /// Expect a token of the given kind.
    ///
    /// On mismatch a diagnostic is raised and the parser skips ahead to the
    /// next synchronizing token, consuming it if it is the expected kind.
    pub(super) fn expect(&mut self, kind: TokenKind) -> Option<usize> {
        if let Some(index) = self.eat(kind) {
            return Some(index);
        }

        let token = self.peek();
        self.error(ParseError::expected_token(
            token.span(),
            kind.description(),
            token.kind.description(),
        ));
        self.synchronize();
        self.eat(kind)
    }

    /// Skip tokens until one the parser can recover on.
    pub(super) fn synchronize(&mut self) {
        while !self.peek_kind().is_sync() {
            self.advance();
        }
    }

    /// Skip the rest of the current line, stopping at its newline.
    pub(super) fn skip_line(&mut self) {
        while !self.peek_kind().is_line_end() {
            self.advance();
        }
    }

    /// Rewrite the kind of the token at `index`.
    #[inline]
    pub(super) fn reclassify(&mut self, index: usize, kind: TokenKind) {
        self.tokens.reclassify(index, kind);
    }

    /// Move the cursor back to a previously visited token.
    pub(super) fn rewind(&mut self, index: usize) {
        debug_assert!(index <= self.position);
        if self.trace {
            log::trace!(target: LOG_TARGET, "Rewinding parser to {index}");
        }
        self.position = index;
    }

    /// Rewind to where the current context was entered.
    pub(super) fn rewind_context(&mut self) {
        let index = self.contexts.current().token_index;
        self.rewind(index);
    }

    // =========================================
    // Contexts
    // =========================================

    /// Enter a new parsing context at the current token.
    pub(super) fn push_context(&mut self, kind: ContextKind) -> Result<(), FatalError> {
        let token = self.peek();
        if let Err(exceeded) = self.contexts.push(kind, self.position) {
            return Err(FatalError::ContextTooDeep {
                limit: exceeded.limit,
                span: token.span(),
            });
        }
        if self.trace {
            log::trace!(
                target: LOG_TARGET,
                "Pushing new {kind} context! (TokenType: {}, TokenIndex: {})",
                token.kind,
                self.position
            );
        }
        if kind == ContextKind::Expression {
            self.skip_whitespace();
        }
        Ok(())
    }

    /// Leave the innermost parsing context.
    pub(super) fn pop_context(&mut self) {
        if let Some(context) = self.contexts.pop() {
            if self.trace {
                log::trace!(
                    target: LOG_TARGET,
                    "Popping old {} context! (TokenIndex: {})",
                    context.kind,
                    context.token_index
                );
            }
        }
    }

    /// Whether the current token ends content text in the current context.
    pub(super) fn at_delimiter(&mut self) -> bool {
        let kind = self.peek_kind();
        self.contexts.current().kind.is_delimiter(kind)
    }

    /// Enter a deeper choice level.
    pub(super) fn push_level(&mut self, level: usize, span: Span) -> Result<(), FatalError> {
        self.levels
            .push(level)
            .map_err(|exceeded| FatalError::LevelTooDeep {
                limit: exceeded.limit,
                span,
            })
    }

    // =========================================
    // Diagnostics
    // =========================================

    /// Record a diagnostic and enter panic mode.
    pub(super) fn error(&mut self, error: ParseError) {
        log::debug!(target: LOG_TARGET, "{error}");
        self.panic_mode = true;
        self.errors.push(error);
    }

    /// Trace entry into a grammar rule.
    pub(super) fn trace_rule(&mut self, rule: &str) {
        if !self.trace {
            return;
        }
        let token = self.peek();
        log::trace!(
            target: LOG_TARGET,
            "Entering {rule}(Context={}, TokenType={}, TokenIndex: {}, Level: {})",
            self.contexts.current().kind,
            token.kind,
            self.position,
            self.levels.top()
        );
    }

    // =========================================
    // Node construction
    // =========================================

    fn alloc_node(&self, node: SyntaxNode<'ast>) -> &'ast SyntaxNode<'ast> {
        if self.trace {
            log::trace!(
                target: LOG_TARGET,
                "Creating new node: {}(LeadingToken: {}, EndToken: {})",
                node.kind,
                node.token_start,
                node.token_end
            );
        }
        self.arena.alloc(node)
    }

    /// Build a node with no children.
    pub(super) fn leaf(&self, kind: NodeKind, token_start: usize, token_end: usize) -> &'ast SyntaxNode<'ast> {
        self.alloc_node(SyntaxNode::leaf(kind, token_start, token_end))
    }

    /// Build a node with one child.
    pub(super) fn unary(
        &self,
        kind: NodeKind,
        token_start: usize,
        token_end: usize,
        lhs: Option<&'ast SyntaxNode<'ast>>,
    ) -> &'ast SyntaxNode<'ast> {
        self.alloc_node(SyntaxNode {
            lhs,
            ..SyntaxNode::leaf(kind, token_start, token_end)
        })
    }

    /// Build a node with two children.
    pub(super) fn binary(
        &self,
        kind: NodeKind,
        token_start: usize,
        token_end: usize,
        lhs: Option<&'ast SyntaxNode<'ast>>,
        rhs: Option<&'ast SyntaxNode<'ast>>,
    ) -> &'ast SyntaxNode<'ast> {
        self.alloc_node(SyntaxNode {
            lhs,
            rhs,
            ..SyntaxNode::leaf(kind, token_start, token_end)
        })
    }

    /// Build a sequence node from everything pushed to scratch since `mark`.
    pub(super) fn sequence(
        &mut self,
        kind: NodeKind,
        token_start: usize,
        token_end: usize,
        mark: Bookmark,
    ) -> &'ast SyntaxNode<'ast> {
        let seq = self.scratch.commit(mark, self.arena);
        self.alloc_node(SyntaxNode {
            seq,
            ..SyntaxNode::leaf(kind, token_start, token_end)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser<'ast>(source: &str, arena: &'ast Bump) -> Parser<'ast> {
        Parser::new(source.as_bytes(), arena, &ParseOptions::default())
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_source_is_fatal() {
        assert!(check_source_len(MAX_SOURCE_LEN).is_ok());
        let err = check_source_len(MAX_SOURCE_LEN + 1).unwrap_err();
        assert_eq!(
            err,
            FatalError::SourceTooLarge {
                len: MAX_SOURCE_LEN + 1,
                limit: MAX_SOURCE_LEN,
            }
        );
    }

    #[test]
    fn options_builders() {
        let options = ParseOptions::default();
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!options.trace);

        let options = options.with_max_depth(4).with_trace(true);
        assert_eq!(options.max_depth, 4);
        assert!(options.trace);
    }

    #[test]
    fn tokens_are_pulled_lazily() {
        let arena = Bump::new();
        let mut p = parser("one two three", &arena);
        assert_eq!(p.tokens.len(), 0);
        assert_eq!(p.peek_kind(), TokenKind::String);
        assert_eq!(p.tokens.len(), 1);
        p.advance();
        assert_eq!(p.tokens.len(), 1);
        p.peek();
        assert_eq!(p.tokens.len(), 2);
    }

    #[test]
    fn advance_returns_consumed_index() {
        let arena = Bump::new();
        let mut p = parser("a b", &arena);
        assert_eq!(p.advance(), 0);
        assert_eq!(p.advance(), 1);
        assert_eq!(p.advance(), 2);
        assert_eq!(p.position(), 3);
    }

    #[test]
    fn advance_never_passes_eof() {
        let arena = Bump::new();
        let mut p = parser("x", &arena);
        p.advance();
        assert!(p.check(TokenKind::Eof));
        assert_eq!(p.advance(), 1);
        assert_eq!(p.advance(), 1);
        assert_eq!(p.position(), 1);
        assert_eq!(p.tokens.len(), 2);
    }

    #[test]
    fn whitespace_visible_in_content() {
        let arena = Bump::new();
        let mut p = parser("a b", &arena);
        p.advance();
        assert!(p.check(TokenKind::Whitespace));
    }

    #[test]
    fn whitespace_skipped_in_expression() {
        let arena = Bump::new();
        let mut p = parser("  a   b", &arena);
        p.push_context(ContextKind::Expression).unwrap();
        assert_eq!(p.position(), 2);
        assert_eq!(p.advance(), 2);
        assert_eq!(p.position(), 6);
        p.pop_context();
        assert_eq!(p.contexts.current().kind, ContextKind::Content);
    }

    #[test]
    fn rewind_replays_identical_tokens() {
        let arena = Bump::new();
        let mut p = parser("Hello {x} there\n", &arena);
        let mut first = Vec::new();
        while !p.check(TokenKind::Eof) {
            first.push(p.peek());
            p.advance();
        }
        let logged = p.tokens.len();

        p.rewind(0);
        let mut second = Vec::new();
        while !p.check(TokenKind::Eof) {
            second.push(p.peek());
            p.advance();
        }
        assert_eq!(first, second);
        assert_eq!(p.tokens.len(), logged);
    }

    #[test]
    fn expect_success() {
        let arena = Bump::new();
        let mut p = parser("{", &arena);
        assert_eq!(p.expect(TokenKind::LeftBrace), Some(0));
        assert!(!p.panic_mode());
    }

    #[test]
    fn expect_synchronizes_and_consumes() {
        let arena = Bump::new();
        let mut p = parser("a b } c", &arena);
        assert_eq!(p.expect(TokenKind::RightBrace), Some(4));
        assert!(p.panic_mode());
        assert_eq!(p.errors().len(), 1);
        assert_eq!(p.position(), 5);
    }

    #[test]
    fn expect_stops_at_other_sync_token() {
        let arena = Bump::new();
        let mut p = parser("a b\nc", &arena);
        assert_eq!(p.expect(TokenKind::RightBrace), None);
        assert!(p.check(TokenKind::Newline));
    }

    #[test]
    fn errors_are_not_suppressed_in_panic_mode() {
        let arena = Bump::new();
        let mut p = parser("a\nb\n", &arena);
        p.expect(TokenKind::RightParen);
        p.advance();
        p.expect(TokenKind::RightParen);
        assert_eq!(p.errors().len(), 2);
    }

    #[test]
    fn context_limit_is_fatal() {
        let arena = Bump::new();
        let options = ParseOptions::default().with_max_depth(2);
        let mut p = Parser::new(b"{{", &arena, &options);
        p.push_context(ContextKind::Brace).unwrap();
        let err = p.push_context(ContextKind::Brace).unwrap_err();
        assert_eq!(
            err,
            FatalError::ContextTooDeep {
                limit: 2,
                span: Span::new(0, 1)
            }
        );
    }

    #[test]
    fn delimiters_follow_context() {
        let arena = Bump::new();
        let mut p = parser("|", &arena);
        assert!(!p.at_delimiter());
        p.push_context(ContextKind::Brace).unwrap();
        assert!(p.at_delimiter());
    }

    #[test]
    fn sequence_without_children_is_absent() {
        let arena = Bump::new();
        let mut p = parser("", &arena);
        let mark = p.scratch.bookmark();
        let node = p.sequence(NodeKind::BlockStmt, 0, 0, mark);
        assert!(node.seq.is_none());

        let mark = p.scratch.bookmark();
        let child = p.leaf(NodeKind::StringExpr, 0, 0);
        p.scratch.push(child);
        let node = p.sequence(NodeKind::ContentExpr, 0, 0, mark);
        assert_eq!(node.children().len(), 1);
        assert!(p.scratch.is_empty());
    }
}
