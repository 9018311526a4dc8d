//! Lexical analysis for ink.

#[allow(clippy::module_inception)]
mod lexer;
mod token;
mod token_log;

pub use lexer::{Lexer, MAX_SOURCE_LEN};
pub use token::{Token, TokenKind, lookup_keyword, promote_byte};
pub use token_log::TokenLog;
