//! Syntax tree and parser for ink scripts.
//!
//! This module provides:
//! - Syntax node definitions shared by every construct
//! - The context and level stacks that steer the grammar
//! - The parser and the tree it produces
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use ink_parser::ast::{NodeKind, Parser};
//!
//! let arena = Bump::new();
//! let tree = Parser::parse("Hello {name}!\n* Wave\n* Leave\n", &arena).unwrap();
//!
//! assert_eq!(tree.root().kind, NodeKind::File);
//! assert!(!tree.has_errors());
//! ```

// Core types
pub mod context;
pub mod node;
pub mod ops;
pub mod scratch;
pub mod tree;

mod parser;

mod block_parser;
mod content_parser;
mod expr_parser;

// Re-export error types from core
pub use ink_core::{FatalError, ParseError, ParseErrorKind, ParseErrors};

pub use context::{ContextKind, ContextStack, LevelStack};
pub use node::{NodeKind, SyntaxNode};
pub use ops::{BinaryOp, Precedence, UnaryOp};
pub use parser::{DEFAULT_MAX_DEPTH, ParseOptions, Parser};
pub use tree::SyntaxTree;
