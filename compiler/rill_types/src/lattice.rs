//! Attribute conversion lattice.
//!
//! Decides whether an argument with attributes `from` may be passed to a
//! parameter with attributes `to`, and what the argument's effective
//! attributes become. Class identity is never consulted here.
//!
//! # Rules
//!
//! ```text
//! from == to                  -> Identical
//! to = val  (any from)        -> Convertible(to)
//! to = ref  (from val or ref) -> modifiability check:
//!     to.mod == from.mod      -> ok
//!     mutable   <- const      -> ok
//!     mutable   <- immutable  -> rejected
//!     const     <- other      -> rejected
//!     immutable <- any        -> ok
//!   ok => Convertible(from quality, to modifiability)
//! ```

use rill_ir::{Modifiability, Quality};

use crate::TypeAttributes;

/// Why the lattice refused a conversion.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RejectReason {
    /// The value/reference axis cannot be reconciled.
    QualityMismatch,
    /// The mutability axis cannot be reconciled.
    ModifiabilityMismatch,
}

impl RejectReason {
    pub const fn describe(self) -> &'static str {
        match self {
            RejectReason::QualityMismatch => "quality mismatch",
            RejectReason::ModifiabilityMismatch => "modifiability mismatch",
        }
    }
}

/// Result of checking one (argument, parameter) attribute pair.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConversionOutcome {
    /// Both axes already equal.
    Identical,
    /// Admissible; the argument's effective attributes at the call site.
    Convertible(TypeAttributes),
    Rejected(RejectReason),
}

impl ConversionOutcome {
    /// True for `Identical` and `Convertible`.
    pub const fn is_admissible(self) -> bool {
        !matches!(self, ConversionOutcome::Rejected(_))
    }

    /// Effective attributes after conversion, given the original `from`.
    pub const fn resulting(self, from: TypeAttributes) -> Option<TypeAttributes> {
        match self {
            ConversionOutcome::Identical => Some(from),
            ConversionOutcome::Convertible(resulting) => Some(resulting),
            ConversionOutcome::Rejected(_) => None,
        }
    }
}

/// Check whether `from` converts to `to`.
pub fn can_convert(from: TypeAttributes, to: TypeAttributes) -> ConversionOutcome {
    let outcome = convert(from, to);
    tracing::trace!(?from, ?to, ?outcome, "attribute conversion");
    outcome
}

fn convert(from: TypeAttributes, to: TypeAttributes) -> ConversionOutcome {
    if from == to {
        return ConversionOutcome::Identical;
    }

    match (to.quality, from.quality) {
        // Value semantics discard the source's reference-ness and modifiability.
        (Quality::Val, _) => ConversionOutcome::Convertible(to),
        (Quality::Ref, Quality::Val | Quality::Ref) => {
            if ref_binding_admits(from.modifiability, to.modifiability) {
                ConversionOutcome::Convertible(from.with_modifiability(to.modifiability))
            } else {
                ConversionOutcome::Rejected(RejectReason::ModifiabilityMismatch)
            }
        }
    }
}

/// Modifiability sub-check for binding to a `ref` parameter.
fn ref_binding_admits(from: Modifiability, to: Modifiability) -> bool {
    match (to, from) {
        // const -> mutable stays permissive until an audited rule exists.
        (Modifiability::Mutable, Modifiability::Mutable | Modifiability::Const)
        | (Modifiability::Const, Modifiability::Const)
        | (Modifiability::Immutable, _) => true,
        (Modifiability::Mutable, Modifiability::Immutable)
        | (Modifiability::Const, Modifiability::Mutable | Modifiability::Immutable) => false,
    }
}
