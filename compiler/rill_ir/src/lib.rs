//! Rill IR - identifiers, spans and the syntax tree.
//!
//! This crate holds the data structures the semantic core consumes:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Attribute keywords (`val`/`ref`, `mutable`/`const`/`immutable`)
//! - AST nodes for functions, templates, statements and expressions
//! - The template arena holding the read-only template definitions
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers are `Name(u32)`, compared in O(1)
//! - **Own Everything**: AST nodes own their children, so `Clone` is a deep
//!   copy with no shared mutable substructure. Template instantiation relies
//!   on this.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod attribute;
mod interner;
mod name;
mod span;
mod template_arena;

pub use ast::{
    CallExpr, ClassDef, Expr, ExprKind, FunctionDef, Item, Module, Param, Stmt, StmtKind,
    TemplateDef, TemplateParam, TypeExpr,
};
pub use attribute::{Modifiability, Quality, TypeAttributesOptional};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::Span;
pub use template_arena::{TemplateArena, TemplateId};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Name, Span, TypeAttributesOptional};
    static_assert_size!(Name, 4);
    static_assert_size!(Span, 8);
    static_assert_size!(TypeAttributesOptional, 2);
}
