//! Memoized type table.
//!
//! Maps `(class, attributes)` pairs to [`TypeId`]s and back. Interning the
//! same pair twice returns the same id, so overload resolution can compare
//! parameter and argument types by index before falling back to the
//! attribute lattice.

use rustc_hash::FxHashMap;

use crate::{ClassId, TypeAttributes, TypeId};

/// The dereferenced form of a [`TypeId`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedType {
    pub class: ClassId,
    pub attributes: TypeAttributes,
}

impl ResolvedType {
    pub const fn new(class: ClassId, attributes: TypeAttributes) -> Self {
        ResolvedType { class, attributes }
    }
}

/// Error from a type table lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeTableError {
    /// The id was not produced by this table.
    #[error("unknown type id {}", .0.raw())]
    UnknownTypeId(TypeId),
    /// More than `u32::MAX` distinct types.
    #[error("type table exceeded u32::MAX entries")]
    Overflow,
}

/// Append-only table of attributed types.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    /// Storage indexed by `TypeId`.
    types: Vec<ResolvedType>,
    /// Deduplication map.
    index: FxHashMap<ResolvedType, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a resolved type, returning the existing id if already present.
    pub fn intern(&mut self, ty: ResolvedType) -> Result<TypeId, TypeTableError> {
        if let Some(&id) = self.index.get(&ty) {
            return Ok(id);
        }

        let raw = u32::try_from(self.types.len()).map_err(|_| TypeTableError::Overflow)?;
        let id = TypeId::from_raw(raw);
        self.types.push(ty);
        self.index.insert(ty, id);
        Ok(id)
    }

    /// Id for `class` with `attributes`, allocating on first use.
    pub fn make_type_id(
        &mut self,
        class: ClassId,
        attributes: TypeAttributes,
    ) -> Result<TypeId, TypeTableError> {
        self.intern(ResolvedType::new(class, attributes))
    }

    /// Dereference an id to its class and attributes.
    pub fn dereference(&self, id: TypeId) -> Result<ResolvedType, TypeTableError> {
        self.types
            .get(id.index())
            .copied()
            .ok_or(TypeTableError::UnknownTypeId(id))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
