//! Module-level passes: classes, templates, signatures, bodies.

use rill_ir::{FunctionDef, Module};

use super::Checker;
use crate::{
    Environment, FunctionId, InferenceSite, InternalError, ResolutionError, ScopeId,
    SemanticVisitor,
};

impl Checker {
    #[tracing::instrument(level = "debug", skip_all, fields(classes = module.classes().count()))]
    pub(super) fn register_classes(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        module: &Module,
    ) -> Result<(), InternalError> {
        for class in module.classes() {
            if env.lookup_local(scope, class.name)?.is_some() {
                self.report(ResolutionError::DuplicateClass { name: class.name }, class.span);
                continue;
            }
            env.declare_class(scope, class.name)?;
        }
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(templates = module.templates().count()))]
    pub(super) fn register_templates(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        module: &Module,
    ) -> Result<(), InternalError> {
        for template in module.templates() {
            env.declare_template(scope, template.clone())?;
        }
        Ok(())
    }

    /// Build every explicit function's signature.
    ///
    /// Functions whose signature cannot be built are reported and left
    /// incomplete, so they never take part in resolution.
    #[tracing::instrument(level = "debug", skip_all, fields(functions = module.functions().count()))]
    pub(super) fn collect_signatures<'m>(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        module: &'m Module,
    ) -> Result<Vec<(FunctionId, &'m FunctionDef)>, InternalError> {
        let mut declared = Vec::new();
        for func in module.functions() {
            if let Some(id) = self.declare_function(env, scope, func)? {
                declared.push((id, func));
            }
        }
        Ok(declared)
    }

    fn declare_function(
        &mut self,
        env: &mut Environment,
        scope: ScopeId,
        func: &FunctionDef,
    ) -> Result<Option<FunctionId>, InternalError> {
        let incomplete = env.begin_construct(scope, func.name)?;
        let local = incomplete.local_scope();

        for param in &func.params {
            let Some(ty) = &param.ty else {
                if param.default.is_some() {
                    self.report(
                        ResolutionError::TypeInferenceUnsupported {
                            function: func.name,
                            site: InferenceSite::Parameter(param.name),
                        },
                        param.span,
                    );
                    return Ok(None);
                }
                tracing::error!(function = env.name_str(func.name), "parameter without type or initializer");
                return Err(InternalError::MalformedParameter {
                    function: env.name_str(func.name).to_string(),
                    parameter: env.name_str(param.name).to_string(),
                });
            };

            let result = self.resolve_type(env, local, ty);
            let Some(resolved) = self.absorb(result, ty.span)? else {
                return Ok(None);
            };
            let attributes = match param.quality {
                Some(quality) => resolved.attributes.with_quality(quality),
                None => resolved.attributes,
            };
            env.declare_parameter(&incomplete, param.name, resolved.class, attributes)?;
        }

        let Some(annotation) = &func.return_type else {
            self.report(
                ResolutionError::TypeInferenceUnsupported {
                    function: func.name,
                    site: InferenceSite::ReturnType,
                },
                func.span,
            );
            return Ok(None);
        };
        let result = self.resolve_type_id(env, local, annotation);
        let Some(return_type) = self.absorb(result, annotation.span)? else {
            return Ok(None);
        };

        let parameters = env.declared_parameters(&incomplete)?;
        let set = env.function(incomplete.function())?.overload_set;
        if let Some(existing) = env.find_declared(set, &parameters)? {
            self.report(
                ResolutionError::DuplicateOverload {
                    name: func.name,
                    existing,
                },
                func.span,
            );
            return Ok(None);
        }

        let mangled = env.mangle(scope, func.name, &parameters, None)?;
        Ok(Some(env.complete(incomplete, return_type, mangled)?))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(functions = declared.len()))]
    pub(super) fn check_function_bodies(
        &mut self,
        env: &mut Environment,
        declared: &[(FunctionId, &FunctionDef)],
    ) -> Result<(), InternalError> {
        for &(id, func) in declared {
            let scope = env.function(id)?.local_scope;
            let return_type = env.signature(id)?.return_type;
            self.check_stmts(env, scope, &func.body, Some(return_type))?;
        }
        Ok(())
    }
}
