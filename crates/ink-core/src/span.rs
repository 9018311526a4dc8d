//! Source location tracking for diagnostics.
//!
//! Provides [`Span`] to track where tokens and errors occur in source code.

use std::fmt;

/// A half-open byte range `[start, end)` into a source buffer.
///
/// Line and column information is derived on demand with
/// [`line_col`](Self::line_col) rather than tracked during lexing, since the
/// lexer only ever looks at one byte at a time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the first byte.
    pub start: u32,
    /// Byte offset one past the last byte.
    pub end: u32,
}

impl Span {
    /// Create a new span from a start and end offset.
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start {start} is after end {end}");
        Self { start, end }
    }

    /// Create a zero-length span at an offset.
    #[inline]
    pub fn point(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Whether this span is empty (zero length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The length of this span in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// The smallest span covering both `self` and `other`.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Compute the 1-indexed line and byte column of `start` within `source`.
    ///
    /// Offsets past the end of `source` are clamped to its length.
    pub fn line_col(&self, source: &[u8]) -> (u32, u32) {
        let offset = (self.start as usize).min(source.len());
        let prefix = &source[..offset];
        let line = prefix.iter().filter(|&&b| b == b'\n').count() as u32 + 1;
        let line_start = prefix
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |pos| pos + 1);
        (line, (offset - line_start) as u32 + 1)
    }

    /// Slice the bytes covered by this span out of `source`.
    pub fn slice<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        let end = (self.end as usize).min(source.len());
        let start = (self.start as usize).min(end);
        &source[start..end]
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
