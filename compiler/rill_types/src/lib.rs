//! Type identities and attribute rules for Rill.
//!
//! - [`ClassId`] / [`TypeId`]: 32-bit handles, compared in O(1)
//! - [`TypeAttributes`]: the fully-resolved (quality, modifiability) pair,
//!   plus the resolver that applies the `val`/`immutable` defaults
//! - [`can_convert`]: the attribute conversion lattice used by overload
//!   resolution
//! - [`TypeTable`]: memoized `(class, attributes) <-> TypeId` mapping
//!
//! Nothing here knows about scopes or functions; `rill_sema` builds on it.

mod attributes;
mod ids;
mod lattice;
mod table;

pub use attributes::TypeAttributes;
pub use ids::{ClassId, TypeId};
pub use lattice::{can_convert, ConversionOutcome, RejectReason};
pub use rill_ir::{Modifiability, Quality, TypeAttributesOptional};
pub use table::{ResolvedType, TypeTable, TypeTableError};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ClassId, ResolvedType, TypeAttributes, TypeId};
    rill_ir::static_assert_size!(ClassId, 4);
    rill_ir::static_assert_size!(TypeId, 4);
    rill_ir::static_assert_size!(TypeAttributes, 2);
    rill_ir::static_assert_size!(ResolvedType, 8);
}
