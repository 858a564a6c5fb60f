//! Statement checking.

use rill_ir::{Expr, Modifiability, Span, Stmt, StmtKind, TypeExpr};
use rill_types::{can_convert, TypeAttributes, TypeId};

use super::Checker;
use crate::{Environment, InternalError, ResolutionError, ScopeId, SemanticVisitor};

impl Checker {
    /// Check statements in order. `return_type` is `None` when the
    /// function has no return annotation.
    pub(super) fn check_stmts(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        stmts: &[Stmt],
        return_type: Option<TypeId>,
    ) -> Result<(), InternalError> {
        for stmt in stmts {
            self.check_stmt(env, scope, stmt, return_type)?;
        }
        Ok(())
    }

    fn check_stmt(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        stmt: &Stmt,
        return_type: Option<TypeId>,
    ) -> Result<(), InternalError> {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.check_expr(env, scope, expr)?;
            }
            StmtKind::Return(value) => self.check_return(env, scope, value.as_ref(), stmt.span, return_type)?,
            StmtKind::Let {
                name,
                modifiability,
                ty,
                init,
            } => {
                if let Some(declared) = self.check_let(env, scope, *modifiability, ty.as_ref(), init)? {
                    env.declare_variable(scope, *name, declared)?;
                }
            }
            StmtKind::Block(stmts) => {
                let block = env.child_scope(scope)?;
                rill_stack::ensure_sufficient_stack(|| {
                    self.check_stmts(env, block, stmts, return_type)
                })?;
            }
            StmtKind::Empty => {}
        }
        Ok(())
    }

    fn check_return(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        value: Option<&Expr>,
        span: Span,
        return_type: Option<TypeId>,
    ) -> Result<(), InternalError> {
        let found = match value {
            Some(expr) => match self.check_expr(env, scope, expr)? {
                Some(ty) => ty,
                None => return Ok(()),
            },
            None => env.make_type_id(env.builtins().void, TypeAttributes::default())?,
        };
        if let Some(expected) = return_type {
            let span = value.map_or(span, |expr| expr.span);
            self.check_assignable(env, found, expected, span)?;
        }
        Ok(())
    }

    /// Type of the new binding, or `None` if an error was reported.
    ///
    /// Without an annotation the binding takes the initializer's class as a
    /// value, with the written modifiability or the default.
    fn check_let(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        modifiability: Option<Modifiability>,
        annotation: Option<&TypeExpr>,
        init: &Expr,
    ) -> Result<Option<TypeId>, InternalError> {
        let init_ty = self.check_expr(env, scope, init)?;

        let Some(annotation) = annotation else {
            let Some(found) = init_ty else {
                return Ok(None);
            };
            let class = env.dereference(found)?.class;
            let attributes = TypeAttributes::resolve(None, modifiability);
            return Ok(Some(env.make_type_id(class, attributes)?));
        };

        let result = self.resolve_type(env, scope, annotation);
        let Some(resolved) = self.absorb(result, annotation.span)? else {
            return Ok(None);
        };
        let attributes = match modifiability {
            Some(modifiability) => resolved.attributes.with_modifiability(modifiability),
            None => resolved.attributes,
        };
        let declared = env.make_type_id(resolved.class, attributes)?;
        if let Some(found) = init_ty {
            self.check_assignable(env, found, declared, init.span)?;
        }
        Ok(Some(declared))
    }

    /// Report a mismatch unless `found` converts to `expected` under the
    /// same rules as argument passing.
    fn check_assignable(
        &mut self,
        env: &Environment,
        found: TypeId,
        expected: TypeId,
        span: Span,
    ) -> Result<(), InternalError> {
        if found == expected {
            return Ok(());
        }
        let from = env.dereference(found)?;
        let to = env.dereference(expected)?;
        if from.class != to.class || !can_convert(from.attributes, to.attributes).is_admissible() {
            self.report(ResolutionError::TypeMismatch { expected, found }, span);
        }
        Ok(())
    }
}
