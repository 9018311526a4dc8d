//! Unified error types for ink.
//!
//! ## Error Hierarchy
//!
//! ```text
//! InkError (top-level wrapper)
//! ├── SourceError  - loading a script failed; parsing never starts
//! └── FatalError   - a structural limit was exceeded; no tree is produced
//!
//! ParseError / ParseErrors - recoverable diagnostics carried by a finished tree
//! ```
//!
//! Diagnostics never abort a parse. They are accumulated while the parser
//! recovers and are handed back alongside the syntax tree, so they are not
//! part of [`InkError`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::Span;

// ============================================================================
// Parse Diagnostics
// ============================================================================

/// Categories of recoverable parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A specific token was expected but something else was found.
    ExpectedToken,
    /// An expression was expected.
    ExpectedExpression,
    /// A line was expected to end, but more tokens followed.
    ExpectedNewline,
    /// A token that cannot appear here was encountered.
    UnexpectedToken,
}

impl ParseErrorKind {
    /// Returns a human-readable name for this error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::ExpectedToken => "expected token",
            ParseErrorKind::ExpectedExpression => "expected expression",
            ParseErrorKind::ExpectedNewline => "expected new line",
            ParseErrorKind::UnexpectedToken => "unexpected token",
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parse error with location and context.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {span}: {message}")]
pub struct ParseError {
    /// The category of this error.
    pub kind: ParseErrorKind,
    /// The offending token's byte range.
    pub span: Span,
    /// A detailed error message.
    pub message: String,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// Create an "expected token" error.
    pub fn expected_token(span: Span, expected: &str, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedToken,
            span,
            format!("expected {expected}, found {found}"),
        )
    }

    /// Create an "expected expression" error.
    pub fn expected_expression(span: Span, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedExpression,
            span,
            format!("expected expression, found {found}"),
        )
    }

    /// Create an "expected new line" error.
    pub fn expected_newline(span: Span, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedNewline,
            span,
            format!("expected new line, found {found}"),
        )
    }

    /// Create an "unexpected token" error.
    pub fn unexpected_token(span: Span, token: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken,
            span,
            format!("unexpected token: {token}"),
        )
    }

    /// Format the error with source context for display.
    ///
    /// Renders the offending line with a caret under the span, in the
    /// style of compiler diagnostics.
    pub fn display_with_source(&self, source: &[u8]) -> String {
        let mut output = String::new();
        let (line, column) = self.span.line_col(source);

        output.push_str(&format!("Error at {}:{}: {}\n", line, column, self.kind));

        if !self.message.is_empty() {
            output.push_str(&format!("  {}\n", self.message));
        }

        if let Some(line_text) = Self::get_line(source, line) {
            output.push_str("  |\n");
            output.push_str(&format!("{:>3} | {}\n", line, line_text));

            let indent = " ".repeat(column as usize - 1);
            let pointer = if self.span.len() <= 1 {
                "^".to_string()
            } else {
                "^".to_string() + &"~".repeat((self.span.len() - 1) as usize)
            };
            output.push_str(&format!("  | {}{}\n", indent, pointer));
        }

        output
    }

    /// Get the text of a specific line (1-indexed).
    fn get_line(source: &[u8], line_num: u32) -> Option<String> {
        source
            .split(|&b| b == b'\n')
            .nth(line_num as usize - 1)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

/// A collection of parse errors.
///
/// Parsing continues after a diagnostic is raised, so one parse may report
/// many of them at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    /// Create a new empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }

    /// Get all errors.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Convert to a Vec of errors.
    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl From<ParseError> for ParseErrors {
    fn from(error: ParseError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<ParseError> for ParseErrors {
    fn from_iter<T: IntoIterator<Item = ParseError>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "no errors");
        }
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

// ============================================================================
// Fatal Errors
// ============================================================================

/// Structural limits whose violation aborts a parse without a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    /// Too many nested parsing contexts (braces inside braces, ...).
    #[error("context nesting exceeds the limit of {limit} at {span}")]
    ContextTooDeep { limit: usize, span: Span },

    /// Too many choice-branch nesting levels.
    #[error("choice nesting exceeds the limit of {limit} levels at {span}")]
    LevelTooDeep { limit: usize, span: Span },

    /// The source is longer than token offsets can address.
    #[error("source is {len} bytes, more than the limit of {limit}")]
    SourceTooLarge { len: usize, limit: usize },
}

impl FatalError {
    /// Get the span where the limit was exceeded.
    ///
    /// An oversized source reports an empty span at the start.
    pub fn span(&self) -> Span {
        match self {
            FatalError::ContextTooDeep { span, .. } => *span,
            FatalError::LevelTooDeep { span, .. } => *span,
            FatalError::SourceTooLarge { .. } => Span::point(0),
        }
    }

    /// The ceiling that was exceeded.
    pub fn limit(&self) -> usize {
        match self {
            FatalError::ContextTooDeep { limit, .. } => *limit,
            FatalError::LevelTooDeep { limit, .. } => *limit,
            FatalError::SourceTooLarge { limit, .. } => *limit,
        }
    }
}

// ============================================================================
// Source Errors
// ============================================================================

/// Errors raised while loading a script, before parsing begins.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The operating system refused to provide the file's bytes.
    #[error("OS error reading {}", path.display())]
    Os {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The path does not name an ink script.
    #[error("{} is not an ink script", .0.display())]
    NotAScript(PathBuf),
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Top-level error for callers that load and parse in one step.
#[derive(Debug, Error)]
pub enum InkError {
    /// Loading the script failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Parsing hit a structural limit.
    #[error(transparent)]
    Fatal(#[from] FatalError),
}
