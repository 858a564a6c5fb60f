//! Top-level items: classes, functions, templates, and the module.

use super::{Expr, Stmt, TypeExpr};
use crate::{Name, Quality, Span};

/// Runtime parameter of a function.
///
/// The type is either annotated (`ref x: int`) or meant to be inferred from
/// a default initializer (`x = 42`). Analysis supports only the former.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: Name,
    /// Declared quality (`val`/`ref`); overrides the annotated type's quality.
    pub quality: Option<Quality>,
    /// The type annotation. `None` if the parameter was not annotated.
    pub ty: Option<TypeExpr>,
    /// Default initializer expression.
    pub default: Option<Expr>,
    pub span: Span,
}

impl Param {
    /// An annotated parameter with no default.
    pub fn typed(name: Name, quality: Option<Quality>, ty: TypeExpr, span: Span) -> Self {
        Param {
            name,
            quality,
            ty: Some(ty),
            default: None,
            span,
        }
    }
}

/// Function definition.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Param>,
    /// The return type annotation. `None` if omitted.
    pub return_type: Option<TypeExpr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Template parameter: `T` in `template(T) def id(x: T): T`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct TemplateParam {
    pub name: Name,
    pub span: Span,
}

/// Template definition wrapping a function.
///
/// Stored once in the [`TemplateArena`](crate::TemplateArena) and never
/// mutated; each instantiation works on [`TemplateDef::clone_inner`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TemplateDef {
    pub params: Vec<TemplateParam>,
    pub inner: FunctionDef,
    pub span: Span,
}

impl TemplateDef {
    /// Name of the wrapped function.
    pub fn name(&self) -> Name {
        self.inner.name
    }

    /// Number of declared template parameters.
    pub fn parameter_count(&self) -> usize {
        self.params.len()
    }

    /// Independent deep copy of the wrapped function.
    #[must_use]
    pub fn clone_inner(&self) -> FunctionDef {
        self.inner.clone()
    }
}

/// Class declaration. Classes carry no members at this stage; they only
/// introduce a class identity.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct ClassDef {
    pub name: Name,
    pub span: Span,
}

/// Top-level item.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Item {
    Class(ClassDef),
    Function(FunctionDef),
    Template(TemplateDef),
}

/// A parsed module: top-level items in source order.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Module {
    pub items: Vec<Item>,
}

impl Module {
    pub fn new(items: Vec<Item>) -> Self {
        Module { items }
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDef> {
        self.items.iter().filter_map(|item| match item {
            Item::Class(class) => Some(class),
            _ => None,
        })
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(func) => Some(func),
            _ => None,
        })
    }

    pub fn templates(&self) -> impl Iterator<Item = &TemplateDef> {
        self.items.iter().filter_map(|item| match item {
            Item::Template(template) => Some(template),
            _ => None,
        })
    }
}
