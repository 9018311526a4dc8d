//! Syntax tree nodes.
//!
//! Every construct in the tree is a [`SyntaxNode`]: a kind tag, the range of
//! tokens it was built from, and up to two named children plus an ordered
//! child sequence. Nodes live in the parse arena and are never freed on
//! their own.
//!
//! # Shapes
//!
//! | Shape    | Kinds | Children |
//! |----------|-------|----------|
//! | leaf     | literals, strings, identifiers, choice pieces, `Invalid` | none |
//! | unary    | `Not`, `Negate`, `BraceExpr`, `ContentStmt`, `File` | `lhs` |
//! | binary   | arithmetic, comparison, logic, assignment, branches | `lhs`, `rhs` |
//! | sequence | `ContentExpr`, `SequenceExpr`, `ChoiceContentExpr`, `BlockStmt` | `seq` |

use std::fmt;

/// All syntax node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Placeholder for input that could not be parsed
    Invalid,
    /// Root of a parsed script
    File,

    // =========================================
    // Statements
    // =========================================
    /// Ordered statements and choice branches at one nesting level
    BlockStmt,
    /// One line of content
    ContentStmt,

    // =========================================
    // Content
    // =========================================
    /// Prose interleaved with brace expressions
    ContentExpr,
    /// A run of prose, or generic text inside an expression
    StringExpr,
    /// `"..."` inside an expression
    StringLiteral,
    /// `{ ... }`
    BraceExpr,
    /// `{a|b|c}` alternatives
    SequenceExpr,

    // =========================================
    // Choices
    // =========================================
    /// Label, option, and inner pieces of a choice
    ChoiceContentExpr,
    /// Text shown before and after selection
    ChoiceStartExpr,
    /// `[...]` text shown only before selection
    ChoiceOptionExpr,
    /// Text shown only after selection
    ChoiceInnerExpr,
    /// `*` branch, consumed once chosen
    ChoiceStarBranch,
    /// `+` branch, sticky
    ChoicePlusBranch,

    // =========================================
    // Literals
    // =========================================
    NumberExpr,
    TrueExpr,
    FalseExpr,
    IdentifierExpr,

    // =========================================
    // Unary operators
    // =========================================
    /// `not x`, `!x`
    NotExpr,
    /// `-x`
    NegateExpr,

    // =========================================
    // Binary operators
    // =========================================
    /// `a = b`
    AssignExpr,
    /// `a or b`, `a || b`
    OrExpr,
    /// `a and b`, `a && b`
    AndExpr,
    /// `a == b`
    EqualExpr,
    /// `a != b`
    NotEqualExpr,
    /// `a < b`
    LessExpr,
    /// `a <= b`
    LessEqualExpr,
    /// `a > b`
    GreaterExpr,
    /// `a >= b`
    GreaterEqualExpr,
    /// `a + b`
    AddExpr,
    /// `a - b`
    SubExpr,
    /// `a * b`
    MulExpr,
    /// `a / b`
    DivExpr,
    /// `a % b`, `a mod b`
    ModExpr,
}

impl NodeKind {
    /// Get the name of this kind as it appears in tree dumps.
    pub fn as_str(&self) -> &'static str {
        use NodeKind::*;
        match self {
            Invalid => "Invalid",
            File => "File",
            BlockStmt => "BlockStmt",
            ContentStmt => "ContentStmt",
            ContentExpr => "ContentExpr",
            StringExpr => "StringExpr",
            StringLiteral => "StringLiteral",
            BraceExpr => "BraceExpr",
            SequenceExpr => "SequenceExpr",
            ChoiceContentExpr => "ChoiceContentExpr",
            ChoiceStartExpr => "ChoiceStartExpr",
            ChoiceOptionExpr => "ChoiceOptionExpr",
            ChoiceInnerExpr => "ChoiceInnerExpr",
            ChoiceStarBranch => "ChoiceStarBranch",
            ChoicePlusBranch => "ChoicePlusBranch",
            NumberExpr => "NumberExpr",
            TrueExpr => "TrueExpr",
            FalseExpr => "FalseExpr",
            IdentifierExpr => "IdentifierExpr",
            NotExpr => "NotExpr",
            NegateExpr => "NegateExpr",
            AssignExpr => "AssignExpr",
            OrExpr => "OrExpr",
            AndExpr => "AndExpr",
            EqualExpr => "EqualExpr",
            NotEqualExpr => "NotEqualExpr",
            LessExpr => "LessExpr",
            LessEqualExpr => "LessEqualExpr",
            GreaterExpr => "GreaterExpr",
            GreaterEqualExpr => "GreaterEqualExpr",
            AddExpr => "AddExpr",
            SubExpr => "SubExpr",
            MulExpr => "MulExpr",
            DivExpr => "DivExpr",
            ModExpr => "ModExpr",
        }
    }

    /// Whether nodes of this kind never have children.
    pub fn is_leaf(&self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            Invalid
                | StringExpr
                | StringLiteral
                | NumberExpr
                | TrueExpr
                | FalseExpr
                | IdentifierExpr
                | ChoiceStartExpr
                | ChoiceOptionExpr
                | ChoiceInnerExpr
        )
    }

    /// Whether this kind is a binary operator expression.
    pub fn is_binary_op(&self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            AssignExpr
                | OrExpr
                | AndExpr
                | EqualExpr
                | NotEqualExpr
                | LessExpr
                | LessEqualExpr
                | GreaterExpr
                | GreaterEqualExpr
                | AddExpr
                | SubExpr
                | MulExpr
                | DivExpr
                | ModExpr
        )
    }

    /// Whether this kind is a choice branch.
    pub fn is_branch(&self) -> bool {
        matches!(self, NodeKind::ChoiceStarBranch | NodeKind::ChoicePlusBranch)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the syntax tree.
///
/// `token_start` and `token_end` are inclusive indices into the tree's
/// [`TokenLog`](crate::lexer::TokenLog).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntaxNode<'ast> {
    pub kind: NodeKind,
    pub token_start: usize,
    pub token_end: usize,
    pub lhs: Option<&'ast SyntaxNode<'ast>>,
    pub rhs: Option<&'ast SyntaxNode<'ast>>,
    /// Ordered children of a sequence node. Absent when nothing was collected.
    pub seq: Option<&'ast [&'ast SyntaxNode<'ast>]>,
}

impl<'ast> SyntaxNode<'ast> {
    /// Create a node with no children.
    pub fn leaf(kind: NodeKind, token_start: usize, token_end: usize) -> Self {
        Self {
            kind,
            token_start,
            token_end,
            lhs: None,
            rhs: None,
            seq: None,
        }
    }

    /// Get the node kind.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Get the left (or only) child.
    #[inline]
    pub fn lhs(&self) -> Option<&'ast SyntaxNode<'ast>> {
        self.lhs
    }

    /// Get the right child.
    #[inline]
    pub fn rhs(&self) -> Option<&'ast SyntaxNode<'ast>> {
        self.rhs
    }

    /// Get the ordered child sequence, or an empty slice if there is none.
    #[inline]
    pub fn children(&self) -> &'ast [&'ast SyntaxNode<'ast>] {
        self.seq.unwrap_or(&[])
    }

    /// Inclusive token index range.
    #[inline]
    pub fn token_range(&self) -> std::ops::RangeInclusive<usize> {
        self.token_start..=self.token_end
    }

    /// Visit this node and every descendant in depth-first order.
    pub fn walk(&'ast self, visit: &mut impl FnMut(&'ast SyntaxNode<'ast>, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at(&'ast self, depth: usize, visit: &mut impl FnMut(&'ast SyntaxNode<'ast>, usize)) {
        visit(self, depth);
        if let Some(lhs) = self.lhs {
            lhs.walk_at(depth + 1, visit);
        }
        if let Some(rhs) = self.rhs {
            rhs.walk_at(depth + 1, visit);
        }
        for child in self.children() {
            child.walk_at(depth + 1, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    #[test]
    fn leaf_has_no_children() {
        let node = SyntaxNode::leaf(NodeKind::NumberExpr, 2, 3);
        assert_eq!(node.kind(), NodeKind::NumberExpr);
        assert!(node.lhs().is_none());
        assert!(node.rhs().is_none());
        assert!(node.children().is_empty());
        assert_eq!(node.token_range(), 2..=3);
    }

    #[test]
    fn kind_categories() {
        assert!(NodeKind::StringExpr.is_leaf());
        assert!(!NodeKind::BraceExpr.is_leaf());
        assert!(NodeKind::ModExpr.is_binary_op());
        assert!(!NodeKind::NotExpr.is_binary_op());
        assert!(NodeKind::ChoicePlusBranch.is_branch());
        assert!(!NodeKind::ChoiceContentExpr.is_branch());
    }

    #[test]
    fn kind_display() {
        assert_eq!(NodeKind::GreaterEqualExpr.to_string(), "GreaterEqualExpr");
        assert_eq!(NodeKind::File.to_string(), "File");
    }

    #[test]
    fn walk_visits_in_order() {
        let arena = Bump::new();
        let one = arena.alloc(SyntaxNode::leaf(NodeKind::NumberExpr, 0, 0));
        let two = arena.alloc(SyntaxNode::leaf(NodeKind::NumberExpr, 2, 2));
        let add = arena.alloc(SyntaxNode {
            lhs: Some(&*one),
            rhs: Some(&*two),
            ..SyntaxNode::leaf(NodeKind::AddExpr, 1, 1)
        });
        let children: &[&SyntaxNode] = arena.alloc_slice_copy(&[&*add]);
        let content = arena.alloc(SyntaxNode {
            seq: Some(children),
            ..SyntaxNode::leaf(NodeKind::ContentExpr, 0, 2)
        });

        let mut seen = Vec::new();
        content.walk(&mut |node, depth| seen.push((node.kind, depth)));
        assert_eq!(
            seen,
            vec![
                (NodeKind::ContentExpr, 0),
                (NodeKind::AddExpr, 1),
                (NodeKind::NumberExpr, 2),
                (NodeKind::NumberExpr, 2),
            ]
        );
    }
}
