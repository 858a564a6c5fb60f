//! Statement nodes.

use std::fmt;

use super::{Expr, TypeExpr};
use crate::{Modifiability, Name, Span};

/// Statement node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    pub fn expr(expr: Expr) -> Self {
        let span = expr.span;
        Self::new(StmtKind::Expr(expr), span)
    }

    pub fn ret(expr: Expr) -> Self {
        let span = expr.span;
        Self::new(StmtKind::Return(Some(expr)), span)
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// Expression statement
    Expr(Expr),

    /// `return expr;` or bare `return;`
    Return(Option<Expr>),

    /// Variable declaration: `val mutable x: int = init;`
    Let {
        name: Name,
        modifiability: Option<Modifiability>,
        ty: Option<TypeExpr>,
        init: Expr,
    },

    /// Nested block with its own scope
    Block(Vec<Stmt>),

    /// Lone `;`
    Empty,
}
