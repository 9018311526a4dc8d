//! Shared types for the ink toolchain.
//!
//! This crate holds what every stage needs:
//! - [`Span`] byte ranges for locating tokens and diagnostics
//! - The error hierarchy ([`ParseError`], [`FatalError`], [`SourceError`], [`InkError`])
//! - [`Source`] for loading scripts from disk

mod error;
mod source;
mod span;

pub use error::{FatalError, InkError, ParseError, ParseErrorKind, ParseErrors, SourceError};
pub use source::{SCRIPT_EXTENSION, Source, is_script_path};
pub use span::Span;
