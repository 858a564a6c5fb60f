//! Template instantiation.
//!
//! A call with template arguments instantiates every candidate of the
//! template set that can take that many template arguments, then resolves
//! the call once against the grown overload set.
//!
//! # Per candidate
//!
//! ```text
//! clone inner function ─► begin_instance (Incomplete)
//!   ─► bind template parameters ─► declare parameters
//!   ─► check cloned body ─► resolve return type
//!   ─► complete (appended to the overload set) ─► link cloned body
//! ```
//!
//! Instances are never memoized: instantiating twice with the same
//! arguments yields two signatures, and the next resolution is ambiguous.

use rill_ir::{FunctionDef, Name};
use rill_types::TypeId;

use crate::env::ParamTypes;
use crate::overload::{self, OverloadMatch};
use crate::{
    Environment, FunctionId, InferenceSite, InternalError, ResolutionError, ScopeId, SemaError,
    SemanticVisitor, TemplateCandidate, TemplateSet, TemplateSetId,
};

/// Anything that carries the type of a call argument.
pub trait TypedArgument {
    fn type_id(&self) -> TypeId;
}

impl TypedArgument for TypeId {
    fn type_id(&self) -> TypeId {
        *self
    }
}

/// Instantiate the candidates of `template_set` and resolve the call.
///
/// `enclosing_scope` is the call site; instantiated bodies see the names
/// visible there.
#[tracing::instrument(level = "debug", skip_all, fields(
    set = ?template_set,
    template_args = template_args.len(),
    args = arguments.len(),
))]
pub fn resolve_with_template<A, V>(
    env: &mut Environment,
    visitor: &mut V,
    template_set: TemplateSetId,
    template_args: &[TypeId],
    arguments: &[A],
    enclosing_scope: ScopeId,
) -> Result<OverloadMatch, SemaError>
where
    A: TypedArgument,
    V: SemanticVisitor + ?Sized,
{
    let set = env.template_set(template_set)?.clone();
    let argument_types: ParamTypes = arguments.iter().map(TypedArgument::type_id).collect();

    let mut instantiated = 0usize;
    for &candidate in &set.candidates {
        if candidate.parameter_count < template_args.len() {
            tracing::debug!(
                template = ?candidate.template,
                parameters = candidate.parameter_count,
                "skipped: too many template arguments"
            );
            continue;
        }
        instantiate(env, visitor, &set, candidate, template_args, enclosing_scope)?;
        instantiated += 1;
    }

    if instantiated == 0 {
        return Err(ResolutionError::NoMatchingOverload {
            name: set.name,
            arguments: argument_types.to_vec(),
            rejections: Vec::new(),
        }
        .into());
    }

    overload::resolve(env, set.overload_set, &argument_types)
}

/// Like [`resolve_with_template`], but `Ok(None)` when nothing matches.
pub fn resolve_with_template_allow_no_entry<A, V>(
    env: &mut Environment,
    visitor: &mut V,
    template_set: TemplateSetId,
    template_args: &[TypeId],
    arguments: &[A],
    enclosing_scope: ScopeId,
) -> Result<Option<OverloadMatch>, SemaError>
where
    A: TypedArgument,
    V: SemanticVisitor + ?Sized,
{
    overload::allow_no_entry(resolve_with_template(
        env,
        visitor,
        template_set,
        template_args,
        arguments,
        enclosing_scope,
    ))
}

/// Instantiate one candidate under the depth limit.
fn instantiate<V>(
    env: &mut Environment,
    visitor: &mut V,
    set: &TemplateSet,
    candidate: TemplateCandidate,
    template_args: &[TypeId],
    enclosing_scope: ScopeId,
) -> Result<FunctionId, SemaError>
where
    V: SemanticVisitor + ?Sized,
{
    if !env.enter_instantiation() {
        let limit = env.options().max_instantiation_depth;
        tracing::debug!(limit, "instantiation depth exceeded");
        return Err(ResolutionError::InstantiationDepthExceeded {
            name: set.name,
            limit,
        }
        .into());
    }

    let result = rill_stack::ensure_sufficient_stack(|| {
        instantiate_candidate(env, visitor, set, candidate, template_args, enclosing_scope)
    });
    env.exit_instantiation();
    result
}

fn instantiate_candidate<V>(
    env: &mut Environment,
    visitor: &mut V,
    set: &TemplateSet,
    candidate: TemplateCandidate,
    template_args: &[TypeId],
    enclosing_scope: ScopeId,
) -> Result<FunctionId, SemaError>
where
    V: SemanticVisitor + ?Sized,
{
    let template = env.template(candidate.template)?;
    let template_params = template.params.clone();
    let function = template.clone_inner();
    let name = function.name;

    let incomplete =
        env.begin_instance(set.parent_scope, name, enclosing_scope, candidate.template)?;
    let scope = incomplete.local_scope();

    visitor.bind_template_parameters(env, scope, &template_params, template_args)?;

    for param in &function.params {
        match (&param.ty, &param.default) {
            (Some(ty), _) => {
                let resolved = visitor.resolve_type(env, scope, ty)?;
                let attributes = match param.quality {
                    Some(quality) => resolved.attributes.with_quality(quality),
                    None => resolved.attributes,
                };
                env.declare_parameter(&incomplete, param.name, resolved.class, attributes)?;
            }
            (None, Some(_)) => {
                return Err(ResolutionError::TypeInferenceUnsupported {
                    function: name,
                    site: InferenceSite::Parameter(param.name),
                }
                .into());
            }
            (None, None) => {
                tracing::error!(?name, parameter = ?param.name, "parameter without type or initializer");
                return Err(malformed_parameter(env, &function, param.name).into());
            }
        }
    }

    visitor.check_body(env, scope, &function)?;

    let Some(return_annotation) = function.return_type else {
        return Err(ResolutionError::TypeInferenceUnsupported {
            function: name,
            site: InferenceSite::ReturnType,
        }
        .into());
    };
    let resolved = visitor.resolve_type(env, scope, &return_annotation)?;
    let return_type = env.make_type_id(resolved.class, resolved.attributes)?;

    let parameters = env.declared_parameters(&incomplete)?;
    let serial = env.next_instance_serial();
    let mangled = env.mangle(set.parent_scope, name, &parameters, Some(serial))?;
    let id = env.complete(incomplete, return_type, mangled)?;
    env.link_body(id, function)?;

    tracing::debug!(function = ?id, template = ?candidate.template, "instantiated");
    Ok(id)
}

fn malformed_parameter(env: &Environment, function: &FunctionDef, parameter: Name) -> InternalError {
    InternalError::MalformedParameter {
        function: env.name_str(function.name).to_string(),
        parameter: env.name_str(parameter).to_string(),
    }
}
