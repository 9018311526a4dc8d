//! Parsing contexts and choice nesting levels.
//!
//! The same bytes mean different things depending on where they appear: a
//! `|` is plain prose in a line of content but separates alternatives inside
//! braces. The [`ContextStack`] tracks which grammar is active and where it
//! was entered, and the [`LevelStack`] tracks how deeply choice branches are
//! nested. Both stacks are bounded.

use crate::lexer::TokenKind;
use std::fmt;

/// The grammar currently in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// Plain prose.
    Content,
    /// Arithmetic and logical expressions.
    Expression,
    /// The body of a `{...}` interpolation.
    Brace,
    /// The label text of a choice branch.
    Choice,
}

impl ContextKind {
    /// Token kinds that end a run of content text in this context.
    pub fn delimiters(&self) -> &'static [TokenKind] {
        use TokenKind::*;
        match self {
            ContextKind::Content => &[LeftBrace, RightBrace, Eof],
            ContextKind::Expression => &[Eof],
            ContextKind::Brace => &[LeftBrace, RightBrace, Pipe, Eof],
            ContextKind::Choice => &[LeftBrace, RightBrace, LeftBracket, RightBracket, Eof],
        }
    }

    /// Whether `kind` ends a run of content text in this context.
    #[inline]
    pub fn is_delimiter(&self, kind: TokenKind) -> bool {
        self.delimiters().contains(&kind)
    }

    /// Get the name of this context.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::Content => "Content",
            ContextKind::Expression => "Expression",
            ContextKind::Brace => "Brace",
            ContextKind::Choice => "Choice",
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry on the context stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub kind: ContextKind,
    /// Token index the context was entered at.
    pub token_index: usize,
}

/// A push was refused because the stack is at its ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthExceeded {
    pub limit: usize,
}

/// Stack of active parsing contexts.
///
/// The bottom frame is always `Content` at token 0 and cannot be popped.
#[derive(Debug, Clone)]
pub struct ContextStack {
    frames: Vec<Context>,
    limit: usize,
}

impl ContextStack {
    /// Create a stack holding only the bottom frame.
    ///
    /// `limit` counts every frame, the bottom one included.
    pub fn new(limit: usize) -> Self {
        let mut frames = Vec::with_capacity(limit.min(16));
        frames.push(Context {
            kind: ContextKind::Content,
            token_index: 0,
        });
        Self {
            frames,
            limit: limit.max(1),
        }
    }

    /// The innermost context.
    #[inline]
    pub fn current(&self) -> Context {
        // The bottom frame is never popped.
        self.frames[self.frames.len() - 1]
    }

    /// Number of frames, including the bottom one.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Enter a context at `token_index`.
    pub fn push(&mut self, kind: ContextKind, token_index: usize) -> Result<(), DepthExceeded> {
        if self.frames.len() >= self.limit {
            return Err(DepthExceeded { limit: self.limit });
        }
        self.frames.push(Context { kind, token_index });
        Ok(())
    }

    /// Leave the innermost context, returning it.
    ///
    /// The bottom frame stays put; popping it returns `None`.
    pub fn pop(&mut self) -> Option<Context> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }
}

/// Stack of choice nesting levels.
///
/// The bottom frame is level 0 and cannot be popped.
#[derive(Debug, Clone)]
pub struct LevelStack {
    levels: Vec<usize>,
    limit: usize,
}

impl LevelStack {
    /// Create a stack holding only level 0.
    pub fn new(limit: usize) -> Self {
        let mut levels = Vec::with_capacity(limit.min(16));
        levels.push(0);
        Self {
            levels,
            limit: limit.max(1),
        }
    }

    /// The innermost level.
    #[inline]
    pub fn top(&self) -> usize {
        self.levels[self.levels.len() - 1]
    }

    /// Number of frames, including level 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Enter a deeper level.
    pub fn push(&mut self, level: usize) -> Result<(), DepthExceeded> {
        if self.levels.len() >= self.limit {
            return Err(DepthExceeded { limit: self.limit });
        }
        self.levels.push(level);
        Ok(())
    }

    /// Pop frames while the top is deeper than `level`.
    pub fn unwind_to(&mut self, level: usize) {
        while self.levels.len() > 1 && level < self.top() {
            self.levels.pop();
        }
    }
}
