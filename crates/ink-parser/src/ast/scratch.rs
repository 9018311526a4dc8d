//! Scratch storage for variable-length child lists.
//!
//! Rules that collect an unknown number of children take a bookmark, push
//! children as they are parsed, and commit when done. Committing copies the
//! children pushed since the bookmark into one arena slice and truncates the
//! buffer, so nested rules can share the same buffer without interfering.

use bumpalo::Bump;

use super::node::SyntaxNode;

/// Position in the scratch buffer recorded before collecting children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bookmark(usize);

/// Reusable stack of in-progress child pointers.
#[derive(Debug, Default)]
pub struct ScratchBuffer<'ast> {
    nodes: Vec<&'ast SyntaxNode<'ast>>,
}

impl<'ast> ScratchBuffer<'ast> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Mark the current end of the buffer.
    #[inline]
    pub fn bookmark(&self) -> Bookmark {
        Bookmark(self.nodes.len())
    }

    /// Append a child.
    #[inline]
    pub fn push(&mut self, node: &'ast SyntaxNode<'ast>) {
        self.nodes.push(node);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Move everything pushed since `mark` into the arena.
    ///
    /// Returns `None` when nothing was pushed.
    pub fn commit(
        &mut self,
        mark: Bookmark,
        arena: &'ast Bump,
    ) -> Option<&'ast [&'ast SyntaxNode<'ast>]> {
        let Bookmark(start) = mark;
        if start >= self.nodes.len() {
            self.nodes.truncate(start);
            return None;
        }
        let slice = arena.alloc_slice_copy(&self.nodes[start..]);
        self.nodes.truncate(start);
        Some(slice)
    }
}
