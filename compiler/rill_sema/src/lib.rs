//! Semantic analysis for Rill: call resolution over overload sets and
//! on-demand template instantiation.
//!
//! # Architecture
//!
//! ```text
//! Checker (statement / expression visitor)
//!     │
//!     ├── call f(args)      → overload::resolve[_allow_no_entry]
//!     │                           └── rill_types::can_convert per argument
//!     │
//!     └── call f<T>(args)   → template::resolve_with_template
//!                                 ├── clone template body
//!                                 ├── Environment::begin_instance (Incomplete)
//!                                 ├── SemanticVisitor::{bind, resolve_type, check_body}
//!                                 ├── Environment::complete (Complete, appended)
//!                                 └── overload::resolve
//! ```
//!
//! All session state (interner, type table, scopes, symbols) lives in
//! [`Environment`]. Analysis is single-threaded and depth-first.
//!
//! # Errors
//!
//! - [`ResolutionError`]: reportable, converted to diagnostics by the checker
//! - [`InternalError`]: a broken invariant; aborts the pass
//! - [`SemaError`]: either of the above, as returned by the engines

pub mod check;
pub mod env;
mod error;
mod options;
pub mod overload;
pub mod template;
mod visitor;

pub use check::{check_module, CheckResult, Checker, ReportedError, TypedExpr};
pub use env::{
    Builtins, ConstructionState, Environment, FunctionId, FunctionOrigin, FunctionSignature,
    FunctionSymbol, IncompleteFunction, OverloadSet, OverloadSetId, ScopeId, TemplateCandidate,
    TemplateSet, TemplateSetId, ValueBinding,
};
pub use error::{
    CandidateRejection, InferenceSite, InternalError, RejectionKind, ResolutionError, SemaError,
};
pub use options::SessionOptions;
pub use overload::OverloadMatch;
pub use template::TypedArgument;
pub use visitor::SemanticVisitor;

/// Initialize the tracing subscriber for debug output.
///
/// Only activates when `RUST_LOG` is set, so there is zero overhead by
/// default. Safe to call multiple times; only the first call has effect.
///
/// ```bash
/// RUST_LOG=rill_sema=debug cargo test -p rill_sema
/// RUST_LOG=rill_sema::overload=trace cargo test -p rill_sema
/// ```
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            use tracing_subscriber::prelude::*;
            use tracing_subscriber::{fmt, EnvFilter};

            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{FunctionId, OverloadSetId, ScopeId, TemplateSetId};
    rill_ir::static_assert_size!(ScopeId, 4);
    rill_ir::static_assert_size!(FunctionId, 4);
    rill_ir::static_assert_size!(OverloadSetId, 4);
    rill_ir::static_assert_size!(TemplateSetId, 4);
}
