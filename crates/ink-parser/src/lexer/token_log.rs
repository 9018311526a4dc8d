//! Append-only log of every token the parser has pulled from the lexer.
//!
//! Indices into the log never change, so the parser can save an index,
//! run ahead, and later rewind to it without re-lexing anything.

use std::fmt::Write as _;

use super::lexer::Lexer;
use super::token::{Token, TokenKind, promote_byte};

/// Ordered record of retrieved tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLog {
    tokens: Vec<Token>,
}

impl TokenLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Create an empty log with room for `capacity` tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Number of logged tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get the token at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The most recently logged token.
    #[inline]
    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// All logged tokens in order.
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Whether the end of input has been logged.
    ///
    /// Nothing is appended after that point.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.last().is_some_and(|t| t.kind == TokenKind::Eof)
    }

    /// Pull the next token from `lexer` and append it.
    ///
    /// Single-byte text tokens holding blanks or operator characters are
    /// promoted to their specific kinds on the way in. Returns the index of
    /// the logged token, or `None` once the log is complete.
    pub fn pull(&mut self, lexer: &mut Lexer<'_>) -> Option<usize> {
        if self.is_complete() {
            return None;
        }

        let mut token = lexer.next_token();
        if token.kind == TokenKind::String && token.len() == 1 {
            if let Some(kind) = promote_byte(lexer.source()[token.start as usize]) {
                token.kind = kind;
            }
        }

        self.tokens.push(token);
        Some(self.tokens.len() - 1)
    }

    /// Pull tokens until `index` is logged or the input runs out.
    pub fn fill_to(&mut self, lexer: &mut Lexer<'_>, index: usize) {
        while self.tokens.len() <= index && self.pull(lexer).is_some() {}
    }

    /// Rewrite the kind of an already logged token.
    ///
    /// This is the only mutation a logged token ever sees.
    pub fn reclassify(&mut self, index: usize, kind: TokenKind) {
        if let Some(token) = self.tokens.get_mut(index) {
            token.kind = kind;
        }
    }

    /// Render every token with its text, one per line.
    pub fn dump(&self, source: &[u8]) -> String {
        let mut out = String::new();
        for (index, token) in self.tokens.iter().enumerate() {
            let _ = write!(out, "{:>4} {:?} ", index, token);
            match token.kind {
                TokenKind::Eof => out.push_str("`\\0`"),
                TokenKind::Newline => out.push_str("`\\n`"),
                _ => {
                    let _ = write!(out, "`{}`", String::from_utf8_lossy(token.lexeme(source)));
                }
            }
            out.push('\n');
        }
        out
    }
}

impl std::ops::Index<usize> for TokenLog {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenLog {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_all(source: &[u8]) -> TokenLog {
        let mut lexer = Lexer::new(source);
        let mut log = TokenLog::new();
        while log.pull(&mut lexer).is_some() {}
        log
    }

    #[test]
    fn pull_appends_until_eof() {
        let log = log_all(b"a b");
        assert_eq!(log.len(), 4);
        assert!(log.is_complete());
        assert_eq!(log[3].kind, TokenKind::Eof);
    }

    #[test]
    fn pull_after_eof_is_noop() {
        let mut lexer = Lexer::new(b"");
        let mut log = TokenLog::new();
        assert_eq!(log.pull(&mut lexer), Some(0));
        assert_eq!(log.pull(&mut lexer), None);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn blanks_and_operators_are_promoted() {
        let log = log_all(b" *+-/%!=<>&\t\r.");
        let kinds: Vec<_> = log.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Whitespace,
                TokenKind::Star,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Bang,
                TokenKind::Equal,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Amp,
                TokenKind::Whitespace,
                TokenKind::Whitespace,
                TokenKind::String,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn letter_runs_stay_text() {
        let log = log_all(b"not");
        assert_eq!(log[0].kind, TokenKind::String);
    }

    #[test]
    fn fill_to_is_lazy() {
        let mut lexer = Lexer::new(b"one two three");
        let mut log = TokenLog::new();
        log.fill_to(&mut lexer, 1);
        assert_eq!(log.len(), 2);
        log.fill_to(&mut lexer, 1);
        assert_eq!(log.len(), 2);
        log.fill_to(&mut lexer, 100);
        assert_eq!(log.len(), 6);
        assert!(log.is_complete());
    }

    #[test]
    fn spans_cover_source_without_gaps() {
        let source = b"Hello {x + 1}\n* [Yes] sure\n+ No\n";
        let log = log_all(source);
        let mut offset = 0;
        for token in &log {
            assert_eq!(token.start, offset);
            assert!(token.end >= token.start);
            offset = token.end;
        }
        assert_eq!(offset as usize, source.len());
    }

    #[test]
    fn reclassify_changes_only_kind() {
        let mut log = log_all(b"true");
        let before = log[0];
        log.reclassify(0, TokenKind::True);
        assert_eq!(log[0].kind, TokenKind::True);
        assert_eq!(log[0].span(), before.span());
        log.reclassify(99, TokenKind::False);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn dump_shows_text() {
        let source = b"Hi\n";
        let log = log_all(source);
        let dump = log.dump(source);
        assert!(dump.contains("String(0, 2) `Hi`"));
        assert!(dump.contains("Newline(2, 3) `\\n`"));
        assert!(dump.contains("Eof(3, 3) `\\0`"));
    }
}
