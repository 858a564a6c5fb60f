//! Expression checking and call resolution.

use rill_ir::{CallExpr, Expr, ExprKind, Name, Span, TypeExpr};
use rill_types::{TypeAttributes, TypeId};
use smallvec::SmallVec;

use super::{Checker, TypedExpr};
use crate::env::ParamTypes;
use crate::overload::{self, OverloadMatch};
use crate::template::{self, TypedArgument};
use crate::{
    Environment, InternalError, OverloadSetId, ResolutionError, ScopeId, SemaError, ValueBinding,
};

impl Checker {
    /// Type of `expr`, or `None` if an error was reported for it.
    pub(super) fn check_expr(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        expr: &Expr,
    ) -> Result<Option<TypeId>, InternalError> {
        match &expr.kind {
            ExprKind::Int(_) => {
                let int = env.builtins().int;
                Ok(Some(env.make_type_id(int, TypeAttributes::default())?))
            }
            ExprKind::Bool(_) => {
                let bool_class = env.builtins().bool;
                Ok(Some(env.make_type_id(bool_class, TypeAttributes::default())?))
            }
            ExprKind::Ident(name) => match env.lookup_value(scope, *name)? {
                Some(ValueBinding::Variable(ty)) => Ok(Some(ty)),
                _ => {
                    self.report(ResolutionError::UnknownIdentifier { name: *name }, expr.span);
                    Ok(None)
                }
            },
            ExprKind::Call(call) => {
                rill_stack::ensure_sufficient_stack(|| self.check_call(env, scope, call, expr.span))
            }
        }
    }

    fn check_call(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        call: &CallExpr,
        span: Span,
    ) -> Result<Option<TypeId>, InternalError> {
        let mut arguments: SmallVec<[TypedExpr; 4]> = SmallVec::with_capacity(call.args.len());
        for arg in &call.args {
            let Some(ty) = self.check_expr(env, scope, arg)? else {
                return Ok(None);
            };
            arguments.push(TypedExpr { ty, span: arg.span });
        }

        let result = match &call.template_args {
            None => resolve_plain_call(env, scope, call.callee, &arguments),
            Some(template_args) => {
                self.resolve_template_call(env, scope, call.callee, template_args, &arguments)
            }
        };

        let Some(matched) = self.absorb(result, span)? else {
            return Ok(None);
        };
        Ok(Some(env.signature(matched.function)?.return_type))
    }

    /// Resolve `f<T...>(args)` through the template set visible from `scope`.
    fn resolve_template_call(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        callee: Name,
        template_args: &[TypeExpr],
        arguments: &[TypedExpr],
    ) -> Result<OverloadMatch, SemaError> {
        let Some(set) = env.lookup_templates(scope, callee)? else {
            return Err(ResolutionError::UnknownIdentifier { name: callee }.into());
        };

        let mut resolved = ParamTypes::with_capacity(template_args.len());
        for ty in template_args {
            resolved.push(self.resolve_type_id(env, scope, ty)?);
        }

        template::resolve_with_template(env, self, set, &resolved, arguments, scope)
    }
}

/// Resolve `f(args)` against the overload sets visible from `scope`,
/// innermost first.
///
/// Inner scopes are probed with the allow-no-entry form so the search can
/// fall back outward; the outermost set found reports `NoMatchingOverload`.
fn resolve_plain_call(
    env: &mut Environment,
    scope: ScopeId,
    callee: Name,
    arguments: &[TypedExpr],
) -> Result<OverloadMatch, SemaError> {
    let argument_types: ParamTypes = arguments.iter().map(TypedArgument::type_id).collect();

    let mut sets: SmallVec<[OverloadSetId; 4]> = SmallVec::new();
    let mut current = Some(scope);
    while let Some(id) = current {
        if let Some(set) = env.lookup_overloads_in(id, callee)? {
            sets.push(set);
        }
        current = env.parent_of(id)?;
    }

    let Some((&outermost, inner)) = sets.split_last() else {
        return Err(ResolutionError::UnknownIdentifier { name: callee }.into());
    };

    for &set in inner {
        if let Some(found) = overload::resolve_allow_no_entry(env, set, &argument_types)? {
            return Ok(found);
        }
    }
    overload::resolve(env, outermost, &argument_types)
}
