//! Module checker.
//!
//! Drives call resolution over a module and serves as the
//! [`SemanticVisitor`] the template engine calls back into.
//!
//! # Passes
//!
//! ```text
//! Pass 0: classes    declare every class in the root scope
//! Pass 1: templates  register template sets (and their overload sets)
//! Pass 2: signatures build explicit functions (annotations required,
//!                    identical redeclarations rejected)
//! Pass 3: bodies     check statements and resolve calls
//! ```
//!
//! Signatures are collected before any body is checked, so functions may
//! call each other regardless of declaration order.
//!
//! Reportable errors are recorded with a span and checking continues;
//! internal errors abort the pass.

mod expr;
mod items;
mod stmt;

use rill_diagnostic::Diagnostic;
use rill_ir::{Expr, FunctionDef, Module, Span, TemplateParam, TypeExpr};
use rill_types::{ResolvedType, TypeAttributes, TypeId};

use crate::template::TypedArgument;
use crate::{
    Environment, InferenceSite, InternalError, ResolutionError, ScopeId, SemaError,
    SemanticVisitor, ValueBinding,
};

/// A reportable error and where it happened.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ReportedError {
    pub error: ResolutionError,
    pub span: Span,
}

impl ReportedError {
    pub fn to_diagnostic(&self, env: &Environment) -> Diagnostic {
        self.error.to_diagnostic(self.span, env)
    }
}

/// Outcome of checking a module.
#[derive(Clone, Debug, Default)]
pub struct CheckResult {
    pub errors: Vec<ReportedError>,
}

impl CheckResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self, env: &Environment) -> Vec<Diagnostic> {
        self.errors.iter().map(|e| e.to_diagnostic(env)).collect()
    }
}

/// A checked expression: its type and where it was written.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TypedExpr {
    pub ty: TypeId,
    pub span: Span,
}

impl TypedArgument for TypedExpr {
    fn type_id(&self) -> TypeId {
        self.ty
    }
}

/// Check a module against a fresh or pre-populated environment.
#[tracing::instrument(level = "debug", skip_all, fields(items = module.items.len()))]
pub fn check_module(env: &mut Environment, module: &Module) -> Result<CheckResult, InternalError> {
    let mut checker = Checker::new();
    checker.check_module(env, module)?;
    Ok(checker.finish())
}

/// Statement and expression checker.
#[derive(Debug, Default)]
pub struct Checker {
    errors: Vec<ReportedError>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_module(&mut self, env: &mut Environment, module: &Module) -> Result<(), InternalError> {
        let root = env.root_scope();
        self.register_classes(env, root, module)?;
        self.register_templates(env, root, module)?;
        let declared = self.collect_signatures(env, root, module)?;
        self.check_function_bodies(env, &declared)
    }

    /// Check a single expression in `scope`, recording errors like the
    /// module passes do.
    pub fn check_expression(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        expr: &Expr,
    ) -> Result<Option<TypeId>, InternalError> {
        self.check_expr(env, scope, expr)
    }

    pub fn errors(&self) -> &[ReportedError] {
        &self.errors
    }

    pub fn finish(self) -> CheckResult {
        CheckResult {
            errors: self.errors,
        }
    }

    fn report(&mut self, error: ResolutionError, span: Span) {
        tracing::debug!(%error, ?span, "reported");
        self.errors.push(ReportedError { error, span });
    }

    /// Record a reportable error and yield `None`; pass internal errors on.
    fn absorb<T>(
        &mut self,
        result: Result<T, SemaError>,
        span: Span,
    ) -> Result<Option<T>, InternalError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(SemaError::Resolution(error)) => {
                self.report(error, span);
                Ok(None)
            }
            Err(SemaError::Internal(error)) => Err(error),
        }
    }

    /// Resolve a written type straight to a `TypeId`.
    fn resolve_type_id(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        ty: &TypeExpr,
    ) -> Result<TypeId, SemaError> {
        let resolved = self.resolve_type(env, scope, ty)?;
        Ok(env.make_type_id(resolved.class, resolved.attributes)?)
    }
}

impl SemanticVisitor for Checker {
    fn bind_template_parameters(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        params: &[TemplateParam],
        args: &[TypeId],
    ) -> Result<(), SemaError> {
        for (index, param) in params.iter().enumerate() {
            match args.get(index) {
                Some(&arg) => env.bind_template_parameter(scope, param.name, arg)?,
                None => env.declare_unbound_template_parameter(scope, param.name)?,
            }
        }
        Ok(())
    }

    fn resolve_type(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        ty: &TypeExpr,
    ) -> Result<ResolvedType, SemaError> {
        match env.lookup_value(scope, ty.name)? {
            Some(ValueBinding::Class(class)) => Ok(ResolvedType::new(
                class,
                TypeAttributes::from_optional(ty.attributes),
            )),
            Some(ValueBinding::TemplateArgument(arg)) => {
                let bound = env.dereference(arg)?;
                Ok(ResolvedType::new(
                    bound.class,
                    bound.attributes.merge(ty.attributes),
                ))
            }
            Some(ValueBinding::UnboundTemplateParameter) => {
                let function = env.enclosing_function_name(scope)?.unwrap_or(ty.name);
                Err(ResolutionError::TypeInferenceUnsupported {
                    function,
                    site: InferenceSite::TemplateParameter(ty.name),
                }
                .into())
            }
            Some(ValueBinding::Variable(_)) => {
                tracing::error!(name = env.name_str(ty.name), "variable used as a type");
                Err(InternalError::NotAType {
                    name: env.name_str(ty.name).to_string(),
                }
                .into())
            }
            None => {
                tracing::error!(name = env.name_str(ty.name), "unresolvable type name");
                Err(InternalError::UnresolvedType {
                    name: env.name_str(ty.name).to_string(),
                }
                .into())
            }
        }
    }

    fn check_body(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        function: &FunctionDef,
    ) -> Result<(), SemaError> {
        // A missing annotation is reported by the caller after the body.
        let return_type = match &function.return_type {
            Some(annotation) => Some(self.resolve_type_id(env, scope, annotation)?),
            None => None,
        };
        self.check_stmts(env, scope, &function.body, return_type)?;
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
