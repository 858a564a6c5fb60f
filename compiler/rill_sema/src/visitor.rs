//! Capabilities the template engine borrows from the statement visitor.

use rill_ir::{FunctionDef, TemplateParam, TypeExpr};
use rill_types::{ResolvedType, TypeId};

use crate::{Environment, ScopeId, SemaError};

/// The parts of statement checking template instantiation depends on.
///
/// Implementations receive the environment explicitly so the engine can
/// keep mutating it between calls.
pub trait SemanticVisitor {
    /// Bind `params` in `scope` to `args`, positionally.
    ///
    /// `args` may be shorter than `params`; the remainder stay unbound.
    fn bind_template_parameters(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        params: &[TemplateParam],
        args: &[TypeId],
    ) -> Result<(), SemaError>;

    /// Resolve a written type to its class and attributes, as seen from
    /// `scope`.
    fn resolve_type(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        ty: &TypeExpr,
    ) -> Result<ResolvedType, SemaError>;

    /// Check a function body whose parameters are already declared in
    /// `scope`.
    fn check_body(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        function: &FunctionDef,
    ) -> Result<(), SemaError>;
}
