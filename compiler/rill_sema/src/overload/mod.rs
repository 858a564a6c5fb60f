//! Overload resolution.
//!
//! Filters an overload set down to the candidates that accept the call's
//! argument types and picks the single winner.
//!
//! # Per candidate, in declaration order
//!
//! 1. Arity must equal the argument count.
//! 2. Each position: identical `TypeId`s pass as-is; otherwise the argument's
//!    attributes must convert to the parameter's (see
//!    [`rill_types::can_convert`]) and the classes must be equal.
//! 3. Passing candidates are kept with their effective argument types.
//!
//! # Selection
//!
//! ```text
//! 0 accepted  → NoMatchingOverload (or None from the allow-no-entry form)
//! 1 accepted  → that candidate
//! 2+ accepted → AmbiguousOverload
//! ```
//!
//! There is no ranking; two admissible candidates are always ambiguous.

use rill_types::{can_convert, ConversionOutcome, TypeId};
use smallvec::SmallVec;

use crate::env::ParamTypes;
use crate::{
    CandidateRejection, Environment, FunctionId, FunctionSignature, InternalError, OverloadSetId,
    RejectionKind, ResolutionError, SemaError,
};

/// The winning candidate of a resolution.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OverloadMatch {
    pub function: FunctionId,
    /// Effective type of each argument after attribute conversion.
    pub argument_types: ParamTypes,
}

/// Resolve a call against `set`, failing with `NoMatchingOverload` when no
/// candidate accepts `arguments`.
#[tracing::instrument(level = "debug", skip_all, fields(set = ?set, args = arguments.len()))]
pub fn resolve(
    env: &mut Environment,
    set: OverloadSetId,
    arguments: &[TypeId],
) -> Result<OverloadMatch, SemaError> {
    let candidates = collect_candidates(env, set, arguments)?;
    select(env, set, arguments, candidates)
}

/// Like [`resolve`], but `Ok(None)` when no candidate accepts `arguments`.
///
/// Used when probing an inner scope before falling back to an outer one.
/// Ambiguity and internal errors still fail.
pub fn resolve_allow_no_entry(
    env: &mut Environment,
    set: OverloadSetId,
    arguments: &[TypeId],
) -> Result<Option<OverloadMatch>, SemaError> {
    allow_no_entry(resolve(env, set, arguments))
}

/// Turn `NoMatchingOverload` into `None`; pass everything else through.
pub(crate) fn allow_no_entry(
    result: Result<OverloadMatch, SemaError>,
) -> Result<Option<OverloadMatch>, SemaError> {
    match result {
        Ok(found) => Ok(Some(found)),
        Err(SemaError::Resolution(ResolutionError::NoMatchingOverload { .. })) => Ok(None),
        Err(err) => Err(err),
    }
}

struct Candidates {
    accepted: SmallVec<[OverloadMatch; 2]>,
    rejections: Vec<CandidateRejection>,
}

fn collect_candidates(
    env: &mut Environment,
    set: OverloadSetId,
    arguments: &[TypeId],
) -> Result<Candidates, InternalError> {
    // Copied out: matching allocates type ids, which needs `&mut env`.
    let functions: SmallVec<[FunctionId; 8]> =
        env.overload_set(set)?.functions().iter().copied().collect();

    let mut candidates = Candidates {
        accepted: SmallVec::new(),
        rejections: Vec::new(),
    };

    for function in functions {
        let signature = env.signature(function)?.clone();
        match match_candidate(env, &signature, arguments)? {
            Ok(argument_types) => {
                tracing::debug!(?function, "candidate accepted");
                candidates.accepted.push(OverloadMatch {
                    function,
                    argument_types,
                });
            }
            Err(kind) => {
                tracing::debug!(?function, ?kind, "candidate rejected");
                candidates
                    .rejections
                    .push(CandidateRejection { function, kind });
            }
        }
    }

    Ok(candidates)
}

/// Match one candidate's parameters against the arguments.
///
/// The outer `Result` carries internal errors; the inner one says whether
/// the candidate was accepted.
fn match_candidate(
    env: &mut Environment,
    signature: &FunctionSignature,
    arguments: &[TypeId],
) -> Result<Result<ParamTypes, RejectionKind>, InternalError> {
    if signature.arity() != arguments.len() {
        return Ok(Err(RejectionKind::ArityMismatch {
            expected: signature.arity(),
            found: arguments.len(),
        }));
    }

    let mut effective = ParamTypes::with_capacity(arguments.len());
    let parameters = &signature.parameter_type_ids;
    for (position, (&parameter, &argument)) in parameters.iter().zip(arguments).enumerate() {
        if parameter == argument {
            effective.push(argument);
            continue;
        }

        let param = env.dereference(parameter)?;
        let arg = env.dereference(argument)?;

        let outcome = can_convert(arg.attributes, param.attributes);
        tracing::trace!(position, ?outcome, "attribute conversion");
        let resulting = match outcome {
            ConversionOutcome::Identical => arg.attributes,
            ConversionOutcome::Convertible(resulting) => resulting,
            ConversionOutcome::Rejected(reason) => {
                return Ok(Err(RejectionKind::AttributeConversionRejected {
                    position,
                    reason,
                }));
            }
        };

        if arg.class != param.class {
            return Ok(Err(RejectionKind::ClassMismatch { position }));
        }

        effective.push(env.make_type_id(param.class, resulting)?);
    }

    Ok(Ok(effective))
}

fn select(
    env: &Environment,
    set: OverloadSetId,
    arguments: &[TypeId],
    candidates: Candidates,
) -> Result<OverloadMatch, SemaError> {
    let name = env.overload_set(set)?.name;
    let Candidates {
        mut accepted,
        rejections,
    } = candidates;

    if accepted.len() > 1 {
        tracing::debug!(count = accepted.len(), "ambiguous call");
        return Err(ResolutionError::AmbiguousOverload {
            name,
            candidates: accepted.iter().map(|found| found.function).collect(),
        }
        .into());
    }

    match accepted.pop() {
        Some(winner) => Ok(winner),
        None => Err(ResolutionError::NoMatchingOverload {
            name,
            arguments: arguments.to_vec(),
            rejections,
        }
        .into()),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
