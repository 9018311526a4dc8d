//! Raw lexer for ink source.
//!
//! The [`Lexer`] is deliberately coarse. It knows nothing about keywords,
//! numbers, or whitespace; it splits the buffer into structural bytes and
//! runs of letters, and leaves every other byte as its own one-byte token.
//! Deciding what those bytes mean is the parser's job.

use super::token::{Token, TokenKind};

/// Longest source the lexer accepts; token offsets are `u32`.
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// Internal scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between tokens.
    Start,
    /// Inside a run of ASCII letters.
    Content,
}

/// Lexer over a byte buffer.
///
/// Each call to [`next_token`](Self::next_token) returns the token starting
/// at the cursor. Once the end of input is reached, every further call
/// returns the same zero-width EOF token.
pub struct Lexer<'src> {
    /// The source being scanned.
    source: &'src [u8],
    /// Offset of the next unread byte.
    cursor: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer at the start of `source`.
    ///
    /// Token offsets are `u32`, so `source` must not exceed
    /// [`MAX_SOURCE_LEN`] bytes.
    pub fn new(source: &'src [u8]) -> Self {
        debug_assert!(source.len() <= MAX_SOURCE_LEN, "source too large for u32 offsets");
        Self { source, cursor: 0 }
    }

    /// The full source buffer.
    #[inline]
    pub fn source(&self) -> &'src [u8] {
        self.source
    }

    /// Offset of the next unread byte.
    #[inline]
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Token {
        let mut state = State::Start;
        let start = self.cursor;

        loop {
            let Some(&byte) = self.source.get(self.cursor) else {
                // A letter run cut off by the end of input is still text.
                return match state {
                    State::Start => self.make(TokenKind::Eof, start),
                    State::Content => self.make(TokenKind::String, start),
                };
            };

            match state {
                State::Start => {
                    let kind = match byte {
                        // NUL terminates input without being consumed.
                        b'\0' => return self.make(TokenKind::Eof, start),
                        b'\n' => TokenKind::Newline,
                        b'"' => TokenKind::DoubleQuote,
                        b'|' => TokenKind::Pipe,
                        b'{' => TokenKind::LeftBrace,
                        b'}' => TokenKind::RightBrace,
                        b'[' => TokenKind::LeftBracket,
                        b']' => TokenKind::RightBracket,
                        b'(' => TokenKind::LeftParen,
                        b')' => TokenKind::RightParen,
                        b if b.is_ascii_alphabetic() => {
                            state = State::Content;
                            self.cursor += 1;
                            continue;
                        }
                        _ => TokenKind::String,
                    };
                    self.cursor += 1;
                    return self.make(kind, start);
                }
                State::Content => {
                    if !byte.is_ascii_alphabetic() {
                        return self.make(TokenKind::String, start);
                    }
                    self.cursor += 1;
                }
            }
        }
    }

    /// Build a token from `start` to the cursor.
    #[inline]
    fn make(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, start as u32, self.cursor as u32)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to and including the first EOF.
    fn next(&mut self) -> Option<Token> {
        if self.cursor > self.source.len() {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            // Park the cursor past the end so iteration stops.
            self.cursor = self.source.len() + 1;
        }
        Some(token)
    }
}
