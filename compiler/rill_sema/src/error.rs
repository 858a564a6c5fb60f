//! Errors produced by call resolution and template instantiation.
//!
//! Two families, kept apart on purpose at the type level:
//!
//! - [`ResolutionError`]: something wrong with the program being checked.
//!   The checker records these with a span and keeps going.
//! - [`InternalError`]: a broken invariant inside the compiler (foreign id,
//!   malformed AST, collaborator contract violation). Never swallowed.
//!
//! Per-candidate rejections ([`CandidateRejection`]) are not errors on their
//! own; they ride inside `NoMatchingOverload` for diagnostics.

use std::fmt;

use rill_diagnostic::{Diagnostic, ErrorCode};
use rill_ir::{Name, Span, TemplateId};
use rill_types::{ClassId, RejectReason, TypeId, TypeTableError};

use crate::env::{Environment, FunctionId, OverloadSetId, ScopeId, TemplateSetId};

/// Why one overload candidate did not accept a call.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RejectionKind {
    ArityMismatch { expected: usize, found: usize },
    AttributeConversionRejected { position: usize, reason: RejectReason },
    /// Attributes converted but the classes differ; there is no implicit
    /// class conversion.
    ClassMismatch { position: usize },
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionKind::ArityMismatch { expected, found } => {
                let plural = if *expected == 1 { "" } else { "s" };
                write!(f, "expects {expected} argument{plural}, found {found}")
            }
            RejectionKind::AttributeConversionRejected { position, reason } => {
                write!(f, "argument {}: {}", position + 1, reason.describe())
            }
            RejectionKind::ClassMismatch { position } => {
                write!(f, "argument {}: class mismatch", position + 1)
            }
        }
    }
}

/// A rejected candidate and the reason.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CandidateRejection {
    pub function: FunctionId,
    pub kind: RejectionKind,
}

/// What could not be inferred.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InferenceSite {
    /// A parameter with a default initializer but no annotation.
    Parameter(Name),
    /// A function without a return annotation.
    ReturnType,
    /// A template parameter with no template argument supplied.
    TemplateParameter(Name),
}

impl fmt::Display for InferenceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceSite::Parameter(_) => f.write_str("a parameter"),
            InferenceSite::ReturnType => f.write_str("the return type"),
            InferenceSite::TemplateParameter(_) => f.write_str("a template parameter"),
        }
    }
}

/// Reportable semantic error.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("no overload accepts the arguments ({} candidates rejected)", .rejections.len())]
    NoMatchingOverload {
        name: Name,
        arguments: Vec<TypeId>,
        rejections: Vec<CandidateRejection>,
    },

    #[error("call is ambiguous between {} overloads", .candidates.len())]
    AmbiguousOverload {
        name: Name,
        candidates: Vec<FunctionId>,
    },

    #[error("cannot infer {site}; an explicit annotation is required")]
    TypeInferenceUnsupported { function: Name, site: InferenceSite },

    #[error("unknown identifier")]
    UnknownIdentifier { name: Name },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: TypeId, found: TypeId },

    #[error("overload redeclared with an identical parameter list")]
    DuplicateOverload { name: Name, existing: FunctionId },

    #[error("class declared twice in the same scope")]
    DuplicateClass { name: Name },

    #[error("template instantiation nested deeper than {limit}")]
    InstantiationDepthExceeded { name: Name, limit: u32 },
}

impl ResolutionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolutionError::NoMatchingOverload { .. } => ErrorCode::E2001,
            ResolutionError::AmbiguousOverload { .. } => ErrorCode::E2002,
            ResolutionError::UnknownIdentifier { .. } => ErrorCode::E2003,
            ResolutionError::TypeMismatch { .. } => ErrorCode::E2004,
            ResolutionError::TypeInferenceUnsupported { .. } => ErrorCode::E2005,
            ResolutionError::DuplicateOverload { .. } | ResolutionError::DuplicateClass { .. } => {
                ErrorCode::E2006
            }
            ResolutionError::InstantiationDepthExceeded { .. } => ErrorCode::E2007,
        }
    }

    /// Convert to a diagnostic, rendering names and types through `env`.
    pub fn to_diagnostic(&self, span: Span, env: &Environment) -> Diagnostic {
        let diag = Diagnostic::error(self.code());
        match self {
            ResolutionError::NoMatchingOverload {
                name,
                arguments,
                rejections,
            } => {
                let args: Vec<String> = arguments.iter().map(|&t| env.describe_type(t)).collect();
                let mut diag = diag
                    .with_message(format!(
                        "no overload of `{}` accepts ({})",
                        env.name_str(*name),
                        args.join(", ")
                    ))
                    .with_label(span, "no matching overload");
                for rejection in rejections {
                    diag = diag.with_note(format!(
                        "candidate `{}` rejected: {}",
                        env.describe_function(rejection.function),
                        rejection.kind
                    ));
                }
                diag.with_suggestion("check the argument types and their `ref`/`val` qualifiers")
            }

            ResolutionError::AmbiguousOverload { name, candidates } => {
                let mut diag = diag
                    .with_message(format!("call to `{}` is ambiguous", env.name_str(*name)))
                    .with_label(span, format!("{} candidates match", candidates.len()));
                for &candidate in candidates {
                    diag = diag.with_note(format!(
                        "candidate `{}` accepts the arguments",
                        env.describe_function(candidate)
                    ));
                }
                diag
            }

            ResolutionError::TypeInferenceUnsupported { function, site } => {
                let what = match site {
                    InferenceSite::Parameter(param) => {
                        format!("parameter `{}`", env.name_str(*param))
                    }
                    InferenceSite::ReturnType => "return type".to_string(),
                    InferenceSite::TemplateParameter(param) => {
                        format!("template parameter `{}`", env.name_str(*param))
                    }
                };
                diag.with_message(format!(
                    "cannot infer the {what} of `{}`",
                    env.name_str(*function)
                ))
                .with_label(span, "type annotation required")
                .with_suggestion("add an explicit type annotation")
            }

            ResolutionError::UnknownIdentifier { name } => diag
                .with_message(format!("unknown identifier `{}`", env.name_str(*name)))
                .with_label(span, "not found in this scope"),

            ResolutionError::TypeMismatch { expected, found } => diag
                .with_message(format!(
                    "expected `{}`, found `{}`",
                    env.describe_type(*expected),
                    env.describe_type(*found)
                ))
                .with_label(span, "type mismatch"),

            ResolutionError::DuplicateOverload { name, existing } => diag
                .with_message(format!(
                    "`{}` is already declared with these parameter types",
                    env.name_str(*name)
                ))
                .with_label(span, "duplicate declaration")
                .with_note(format!(
                    "previous declaration is `{}`",
                    env.describe_function(*existing)
                )),

            ResolutionError::DuplicateClass { name } => diag
                .with_message(format!(
                    "class `{}` is already declared in this scope",
                    env.name_str(*name)
                ))
                .with_label(span, "duplicate declaration"),

            ResolutionError::InstantiationDepthExceeded { name, limit } => diag
                .with_message(format!(
                    "instantiating `{}` exceeds the nesting limit of {limit}",
                    env.name_str(*name)
                ))
                .with_label(span, "instantiated here")
                .with_note("the template probably instantiates itself without bound")
                .with_suggestion("raise `max_instantiation_depth` if the nesting is intended"),
        }
    }
}

/// Broken compiler invariant. Aborts the analysis pass.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum InternalError {
    #[error("unknown type id {0}")]
    UnknownTypeId(TypeId),

    #[error("unknown class {0:?}")]
    UnknownClass(ClassId),

    #[error("unknown scope {0:?}")]
    UnknownScope(ScopeId),

    #[error("unknown function {0:?}")]
    UnknownFunction(FunctionId),

    #[error("unknown overload set {0:?}")]
    UnknownOverloadSet(OverloadSetId),

    #[error("unknown template set {0:?}")]
    UnknownTemplateSet(TemplateSetId),

    #[error("unknown template {0:?}")]
    UnknownTemplate(TemplateId),

    #[error("parameter `{parameter}` of `{function}` has neither a type nor an initializer")]
    MalformedParameter { function: String, parameter: String },

    #[error("cannot resolve type `{name}`")]
    UnresolvedType { name: String },

    #[error("`{name}` does not name a type")]
    NotAType { name: String },

    #[error("function {0:?} completed twice")]
    AlreadyComplete(FunctionId),

    #[error("function {0:?} has no signature yet")]
    StillIncomplete(FunctionId),

    #[error("type table exceeded capacity")]
    TypeTableOverflow,

    #[error("class table exceeded capacity")]
    ClassTableOverflow,
}

impl From<TypeTableError> for InternalError {
    fn from(err: TypeTableError) -> Self {
        match err {
            TypeTableError::UnknownTypeId(id) => InternalError::UnknownTypeId(id),
            TypeTableError::Overflow => InternalError::TypeTableOverflow,
        }
    }
}

impl InternalError {
    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        Diagnostic::error(ErrorCode::E9001)
            .with_message(format!("internal compiler error: {self}"))
            .with_label(span, "while analyzing this")
            .with_note("this is a bug in the compiler, not in your program")
    }
}

/// Any failure from the resolution or instantiation engines.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum SemaError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl SemaError {
    pub fn is_internal(&self) -> bool {
        matches!(self, SemaError::Internal(_))
    }

    pub fn to_diagnostic(&self, span: Span, env: &Environment) -> Diagnostic {
        match self {
            SemaError::Resolution(err) => err.to_diagnostic(span, env),
            SemaError::Internal(err) => err.to_diagnostic(span),
        }
    }
}

impl From<TypeTableError> for SemaError {
    fn from(err: TypeTableError) -> Self {
        SemaError::Internal(err.into())
    }
}
