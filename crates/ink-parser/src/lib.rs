//! ink parser crate.
//!
//! This crate provides the lexer and parser for ink narrative scripts.
//! It includes:
//! - A raw lexer and the token log the parser rewinds through
//! - Syntax node definitions and the arena-backed syntax tree
//! - A recursive-descent parser with Pratt-parsed expressions
//! - Panic-mode error recovery
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use ink_parser::Parser;
//!
//! let arena = Bump::new();
//! let source = "\
//! Hello there. {greeting|salute|nod}
//! * Ask about the weather
//!   ** [Insist] It looks like rain.
//! * Leave
//! ";
//!
//! match Parser::parse(source, &arena) {
//!     Ok(tree) => print!("{}", tree.dump()),
//!     Err(err) => eprintln!("Parse aborted: {}", err),
//! }
//! ```

// Lexer module
pub mod lexer;

// AST module
pub mod ast;

// Re-export commonly used types at crate root
pub use ast::{NodeKind, ParseOptions, Parser, SyntaxNode, SyntaxTree};
pub use ink_core::Span;
pub use lexer::{Lexer, Token, TokenKind, TokenLog};
