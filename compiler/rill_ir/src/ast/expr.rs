//! Expression nodes.

use std::fmt;

use super::TypeExpr;
use crate::{Name, Span};

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn int(value: i64, span: Span) -> Self {
        Self::new(ExprKind::Int(value), span)
    }

    pub fn bool(value: bool, span: Span) -> Self {
        Self::new(ExprKind::Bool(value), span)
    }

    pub fn ident(name: Name, span: Span) -> Self {
        Self::new(ExprKind::Ident(name), span)
    }

    /// A call without template arguments: `callee(args...)`.
    pub fn call(callee: Name, args: Vec<Expr>, span: Span) -> Self {
        Self::new(
            ExprKind::Call(Box::new(CallExpr {
                callee,
                template_args: None,
                args,
            })),
            span,
        )
    }

    /// A call with template arguments: `callee!(T, U)(args...)`.
    pub fn template_call(
        callee: Name,
        template_args: Vec<TypeExpr>,
        args: Vec<Expr>,
        span: Span,
    ) -> Self {
        Self::new(
            ExprKind::Call(Box::new(CallExpr {
                callee,
                template_args: Some(template_args),
                args,
            })),
            span,
        )
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal: `42`
    Int(i64),
    /// Boolean literal: `true`, `false`
    Bool(bool),
    /// Variable reference: `x`
    Ident(Name),
    /// Function call, optionally with template arguments
    Call(Box<CallExpr>),
}

/// Function call: `callee(args...)` or `callee!(T)(args...)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallExpr {
    pub callee: Name,
    /// `None` for an ordinary call; `Some` when template arguments were
    /// written, even if the list is empty.
    pub template_args: Option<Vec<TypeExpr>>,
    pub args: Vec<Expr>,
}
