//! The result of a parse.

use std::borrow::Cow;
use std::fmt::Write as _;

use ink_core::{ParseErrors, Span};

use super::node::SyntaxNode;
use crate::lexer::{Token, TokenLog};

/// A parsed script.
///
/// The tree owns the token log and the diagnostics raised while parsing.
/// Nodes and the copy of the source bytes live in the arena passed to the
/// parser and stay valid for as long as it does.
#[derive(Debug)]
pub struct SyntaxTree<'ast> {
    source: &'ast [u8],
    tokens: TokenLog,
    root: &'ast SyntaxNode<'ast>,
    errors: ParseErrors,
}

impl<'ast> SyntaxTree<'ast> {
    pub(crate) fn new(
        source: &'ast [u8],
        tokens: TokenLog,
        root: &'ast SyntaxNode<'ast>,
        errors: ParseErrors,
    ) -> Self {
        Self {
            source,
            tokens,
            root,
            errors,
        }
    }

    /// Get the root node.
    pub fn root(&self) -> &'ast SyntaxNode<'ast> {
        self.root
    }

    /// The parsed bytes.
    pub fn source(&self) -> &'ast [u8] {
        self.source
    }

    /// Every token retrieved during the parse.
    pub fn tokens(&self) -> &TokenLog {
        &self.tokens
    }

    /// Diagnostics raised during the parse.
    pub fn errors(&self) -> &ParseErrors {
        &self.errors
    }

    /// Whether any diagnostic was raised.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Split the tree into its root and diagnostics.
    pub fn into_parts(self) -> (&'ast SyntaxNode<'ast>, ParseErrors) {
        (self.root, self.errors)
    }

    /// Get the token at `index`.
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Byte range covered by `node`.
    pub fn node_span(&self, node: &SyntaxNode<'_>) -> Span {
        let first = self.tokens.get(node.token_start);
        let last = self.tokens.get(node.token_end);
        match (first, last) {
            (Some(first), Some(last)) => first.span().merge(last.span()),
            (Some(first), None) => first.span(),
            _ => Span::point(self.source.len() as u32),
        }
    }

    /// Source text covered by `node`. Invalid UTF-8 is replaced.
    pub fn node_text(&self, node: &SyntaxNode<'_>) -> Cow<'ast, str> {
        String::from_utf8_lossy(self.node_span(node).slice(self.source))
    }

    /// Render the tree with one node per line, children indented.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.root.walk(&mut |node, depth| {
            let _ = write!(
                out,
                "{:indent$}{}({}, {})",
                "",
                node.kind,
                node.token_start,
                node.token_end,
                indent = depth * 2
            );
            if node.kind.is_leaf() {
                let _ = write!(out, " `{}`", self.node_text(node).escape_debug());
            }
            out.push('\n');
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::node::NodeKind;
    use crate::lexer::Lexer;
    use bumpalo::Bump;

    fn log_for(source: &[u8]) -> TokenLog {
        let mut lexer = Lexer::new(source);
        let mut log = TokenLog::new();
        log.fill_to(&mut lexer, usize::MAX - 1);
        log
    }

    #[test]
    fn node_text_spans_tokens() {
        let arena = Bump::new();
        let source: &[u8] = arena.alloc_slice_copy(b"Hello world\n");
        let node: &SyntaxNode = arena.alloc(SyntaxNode::leaf(NodeKind::StringExpr, 0, 2));
        let tree = SyntaxTree::new(source, log_for(source), node, ParseErrors::new());

        assert_eq!(tree.node_span(node), Span::new(0, 11));
        assert_eq!(tree.node_text(node), "Hello world");
        assert!(!tree.has_errors());
    }

    #[test]
    fn dump_indents_children() {
        let arena = Bump::new();
        let source: &[u8] = arena.alloc_slice_copy(b"Hi");
        let text = arena.alloc(SyntaxNode::leaf(NodeKind::StringExpr, 0, 0));
        let children: &[&SyntaxNode] = arena.alloc_slice_copy(&[&*text]);
        let content: &SyntaxNode = arena.alloc(SyntaxNode {
            seq: Some(children),
            ..SyntaxNode::leaf(NodeKind::ContentExpr, 0, 0)
        });
        let tree = SyntaxTree::new(source, log_for(source), content, ParseErrors::new());

        assert_eq!(tree.dump(), "ContentExpr(0, 0)\n  StringExpr(0, 0) `Hi`\n");
    }

    #[test]
    fn out_of_range_span_is_end_of_source() {
        let arena = Bump::new();
        let source: &[u8] = arena.alloc_slice_copy(b"ab");
        let node: &SyntaxNode = arena.alloc(SyntaxNode::leaf(NodeKind::Invalid, 40, 41));
        let tree = SyntaxTree::new(source, log_for(source), node, ParseErrors::new());
        assert_eq!(tree.node_span(node), Span::point(2));
        assert_eq!(tree.node_text(node), "");
    }
}
