//! Lexer and parser for ink narrative scripts.
//!
//! This crate ties together:
//! - `ink-core` for spans, source loading, and the error types
//! - `ink-parser` for the lexer, the token log, and the syntax tree
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use ink::{NodeKind, ParseOptions};
//!
//! let arena = Bump::new();
//! let tree = ink::parse("The {weather|sky} looked grim.\n", &arena, &ParseOptions::default()).unwrap();
//!
//! assert_eq!(tree.root().kind, NodeKind::File);
//! assert!(!tree.has_errors());
//! ```

use std::path::Path;

use bumpalo::Bump;

pub use ink_core::{
    FatalError, InkError, ParseError, ParseErrorKind, ParseErrors, SCRIPT_EXTENSION, Source,
    SourceError, Span, is_script_path,
};
pub use ink_parser::ast::{self, DEFAULT_MAX_DEPTH, NodeKind, ParseOptions, Parser, SyntaxNode, SyntaxTree};
pub use ink_parser::lexer::{self, Lexer, Token, TokenKind, TokenLog};

/// Parse a script held in memory.
///
/// Syntax errors do not fail the parse; they are collected on the returned
/// tree. Only exceeding a nesting limit aborts it.
pub fn parse<'ast>(
    source: impl AsRef<[u8]>,
    arena: &'ast Bump,
    options: &ParseOptions,
) -> Result<SyntaxTree<'ast>, FatalError> {
    Parser::parse_with(source, arena, options)
}

/// Load a `.ink` file from disk and parse it.
pub fn parse_file<'ast>(
    path: impl AsRef<Path>,
    arena: &'ast Bump,
    options: &ParseOptions,
) -> Result<SyntaxTree<'ast>, InkError> {
    let source = Source::load(path)?;
    log::debug!(
        target: "ink",
        "loaded {} ({} bytes)",
        source.path().display(),
        source.len()
    );
    Ok(parse(source.bytes(), arena, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn parse_uses_options() {
        let arena = Bump::new();
        let options = ParseOptions::default().with_max_depth(2);
        let err = parse("{{x}}", &arena, &options).unwrap_err();
        assert_eq!(err.limit(), 2);
    }

    #[test]
    fn parse_file_rejects_other_extensions() {
        let arena = Bump::new();
        let err = parse_file("story.txt", &arena, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, InkError::Source(SourceError::NotAScript(_))));
    }

    #[test]
    fn parse_file_reads_script() {
        let mut file = tempfile::Builder::new().suffix(".ink").tempfile().unwrap();
        file.write_all(b"Hello\n* Bye\n").unwrap();

        let arena = Bump::new();
        let tree = parse_file(file.path(), &arena, &ParseOptions::default()).unwrap();

        assert_eq!(tree.root().lhs.unwrap().children().len(), 2);
        assert!(!tree.has_errors());
    }

    #[test]
    fn parse_file_reports_missing_file() {
        let arena = Bump::new();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist.ink");
        let err = parse_file(&path, &arena, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, InkError::Source(SourceError::Os { .. })));
    }
}
