//! Token types for the ink lexer.
//!
//! The lexer itself only ever produces the *raw* kinds. Every other kind is
//! assigned later by the parser, which rewrites a token's kind in place once
//! it knows what the token means in its surrounding context.

use ink_core::Span;
use std::fmt;

/// A token in the source buffer.
///
/// Tokens do not own their text; `start..end` is a byte range into the
/// source the token was lexed from.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The type of token.
    pub kind: TokenKind,
    /// Byte offset of the first byte.
    pub start: u32,
    /// Byte offset one past the last byte.
    pub end: u32,
}

impl Token {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self { kind, start, end }
    }

    /// The byte range this token covers.
    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Length of the token in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The bytes this token covers within `source`.
    #[inline]
    pub fn lexeme<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        self.span().slice(source)
    }

    /// Whether `next` begins exactly where this token ends.
    #[inline]
    pub fn touches(&self, next: &Token) -> bool {
        self.end == next.start && !next.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}, {})", self.kind, self.start, self.end)
    }
}

/// All token kinds.
///
/// Grouped by who assigns them: the lexer, the token log on first
/// retrieval, or the expression parser at the point of use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Raw kinds (produced by the lexer)
    // =========================================
    /// End of input
    Eof,
    /// `\n`
    Newline,
    /// `"`
    DoubleQuote,
    /// `|`
    Pipe,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// A run of letters, or any other single byte
    String,

    // =========================================
    // Promoted when logged
    // =========================================
    /// A single space, tab, or carriage return
    Whitespace,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `=`
    Equal,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `&`
    Amp,

    // =========================================
    // Promoted inside expressions
    // =========================================
    /// Part of a number literal
    Number,
    /// An all-alphabetic name
    Identifier,
    /// `true`
    True,
    /// `false`
    False,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `mod`
    Mod,
}

impl TokenKind {
    /// Whether the lexer can produce this kind directly.
    pub fn is_raw(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Eof | Newline
                | DoubleQuote
                | Pipe
                | LeftBrace
                | RightBrace
                | LeftBracket
                | RightBracket
                | LeftParen
                | RightParen
                | String
        )
    }

    /// Whether the parser can resynchronize on this kind after an error.
    pub fn is_sync(&self) -> bool {
        matches!(
            self,
            TokenKind::Eof | TokenKind::Newline | TokenKind::RightBrace | TokenKind::RightParen
        )
    }

    /// Whether this kind ends a line of prose.
    #[inline]
    pub fn is_line_end(&self) -> bool {
        matches!(self, TokenKind::Eof | TokenKind::Newline)
    }

    /// A human-readable description for diagnostics.
    pub fn description(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Eof => "end of file",
            Newline => "new line",
            DoubleQuote => "`\"`",
            Pipe => "`|`",
            LeftBrace => "`{`",
            RightBrace => "`}`",
            LeftBracket => "`[`",
            RightBracket => "`]`",
            LeftParen => "`(`",
            RightParen => "`)`",
            String => "text",
            Whitespace => "whitespace",
            Star => "`*`",
            Plus => "`+`",
            Minus => "`-`",
            Slash => "`/`",
            Percent => "`%`",
            Bang => "`!`",
            Equal => "`=`",
            Less => "`<`",
            Greater => "`>`",
            Amp => "`&`",
            Number => "number",
            Identifier => "identifier",
            True => "`true`",
            False => "`false`",
            And => "`and`",
            Or => "`or`",
            Not => "`not`",
            Mod => "`mod`",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Look up the keyword a lexeme spells, if any.
///
/// Only the exact lowercase spellings are keywords.
pub fn lookup_keyword(lexeme: &[u8]) -> Option<TokenKind> {
    use TokenKind::*;
    match lexeme.len() {
        2 if lexeme == b"or" => Some(Or),
        3 => match lexeme {
            b"and" => Some(And),
            b"mod" => Some(Mod),
            b"not" => Some(Not),
            _ => None,
        },
        4 if lexeme == b"true" => Some(True),
        5 if lexeme == b"false" => Some(False),
        _ => None,
    }
}

/// The kind a single-byte `String` token is promoted to when it is logged.
pub fn promote_byte(byte: u8) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match byte {
        b' ' | b'\t' | b'\r' => Whitespace,
        b'*' => Star,
        b'+' => Plus,
        b'-' => Minus,
        b'/' => Slash,
        b'%' => Percent,
        b'!' => Bang,
        b'=' => Equal,
        b'<' => Less,
        b'>' => Greater,
        b'&' => Amp,
        _ => return None,
    })
}
