//! Abstract syntax tree consumed by semantic analysis.
//!
//! The parser produces these nodes; analysis only reads them, except for
//! template instantiation, which deep-clones a template's inner function
//! and hands the copy to the new function symbol.
//!
//! Every node owns its children (`Vec`, `Box`), so the derived `Clone` is a
//! deep copy that shares nothing with the original.

mod expr;
mod items;
mod stmt;

pub use expr::{CallExpr, Expr, ExprKind};
pub use items::{ClassDef, FunctionDef, Item, Module, Param, TemplateDef, TemplateParam};
pub use stmt::{Stmt, StmtKind};

use crate::{Name, Span, TypeAttributesOptional};

/// A type as written in source: a name plus optional attributes.
///
/// Examples: `int`, `mutable int`, `T` (a template parameter).
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct TypeExpr {
    pub name: Name,
    pub attributes: TypeAttributesOptional,
    pub span: Span,
}

impl TypeExpr {
    pub fn new(name: Name, attributes: TypeAttributesOptional, span: Span) -> Self {
        TypeExpr {
            name,
            attributes,
            span,
        }
    }

    /// A bare type name with no attributes.
    pub fn named(name: Name, span: Span) -> Self {
        Self::new(name, TypeAttributesOptional::NONE, span)
    }
}
