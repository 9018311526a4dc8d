//! Operator definitions for ink expressions.
//!
//! Provides the binary and prefix operators along with the precedence table
//! driving the Pratt parser.

use super::node::NodeKind;
use crate::lexer::TokenKind;
use std::fmt;

/// Operator precedence, lowest to highest.
///
/// An infix operator keeps folding only while its precedence is strictly
/// greater than the current floor, which makes every level left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    None,
    Assign,
    LogicalOr,
    LogicalAnd,
    Comparison,
    Term,
    Factor,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `=`
    Assign,
    /// `or` or `||`
    Or,
    /// `and` or `&&`
    And,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%` or `mod`
    Mod,
}

impl BinaryOp {
    /// Get the binding power of this operator.
    pub fn binding_power(&self) -> Precedence {
        use BinaryOp::*;
        match self {
            Assign => Precedence::Assign,
            Or => Precedence::LogicalOr,
            And => Precedence::LogicalAnd,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => Precedence::Comparison,
            Add | Sub => Precedence::Term,
            Mul | Div | Mod => Precedence::Factor,
        }
    }

    /// The node kind built for this operator.
    pub fn node_kind(&self) -> NodeKind {
        use BinaryOp::*;
        match self {
            Assign => NodeKind::AssignExpr,
            Or => NodeKind::OrExpr,
            And => NodeKind::AndExpr,
            Equal => NodeKind::EqualExpr,
            NotEqual => NodeKind::NotEqualExpr,
            Less => NodeKind::LessExpr,
            LessEqual => NodeKind::LessEqualExpr,
            Greater => NodeKind::GreaterExpr,
            GreaterEqual => NodeKind::GreaterEqualExpr,
            Add => NodeKind::AddExpr,
            Sub => NodeKind::SubExpr,
            Mul => NodeKind::MulExpr,
            Div => NodeKind::DivExpr,
            Mod => NodeKind::ModExpr,
        }
    }

    /// Try to read a binary operator from the upcoming tokens.
    ///
    /// `next` is the kind of the token right after `first`, and must only be
    /// given when the two are adjacent in the source. Returns the operator
    /// and how many tokens it spans.
    pub fn from_tokens(first: TokenKind, next: Option<TokenKind>) -> Option<(Self, usize)> {
        use TokenKind as T;

        let pair = match (first, next) {
            (T::Equal, Some(T::Equal)) => Some(BinaryOp::Equal),
            (T::Bang, Some(T::Equal)) => Some(BinaryOp::NotEqual),
            (T::Less, Some(T::Equal)) => Some(BinaryOp::LessEqual),
            (T::Greater, Some(T::Equal)) => Some(BinaryOp::GreaterEqual),
            (T::Amp, Some(T::Amp)) => Some(BinaryOp::And),
            (T::Pipe, Some(T::Pipe)) => Some(BinaryOp::Or),
            _ => None,
        };
        if let Some(op) = pair {
            return Some((op, 2));
        }

        let op = match first {
            T::Equal => BinaryOp::Assign,
            T::Or => BinaryOp::Or,
            T::And => BinaryOp::And,
            T::Less => BinaryOp::Less,
            T::Greater => BinaryOp::Greater,
            T::Plus => BinaryOp::Add,
            T::Minus => BinaryOp::Sub,
            T::Star => BinaryOp::Mul,
            T::Slash => BinaryOp::Div,
            T::Percent | T::Mod => BinaryOp::Mod,
            _ => return None,
        };
        Some((op, 1))
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOp::*;
        let s = match self {
            Assign => "=",
            Or => "or",
            And => "and",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "mod",
        };
        write!(f, "{}", s)
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `not` or `!`
    Not,
    /// `-`
    Negate,
}

impl UnaryOp {
    /// Try to convert a token kind to a prefix operator.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        match token {
            TokenKind::Not | TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Negate),
            _ => None,
        }
    }

    /// The node kind built for this operator.
    pub fn node_kind(&self) -> NodeKind {
        match self {
            UnaryOp::Not => NodeKind::NotExpr,
            UnaryOp::Negate => NodeKind::NegateExpr,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "not"),
            UnaryOp::Negate => write!(f, "-"),
        }
    }
}
