//! Fully-resolved type attributes and the defaulting resolver.

use std::fmt;

use rill_ir::{Modifiability, Quality, TypeAttributesOptional};

/// The resolved (quality, modifiability) pair every `TypeId` carries.
///
/// Defaults: `val` quality, `immutable` modifiability.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeAttributes {
    pub quality: Quality,
    pub modifiability: Modifiability,
}

impl TypeAttributes {
    /// Quality used when none was written.
    pub const DEFAULT_QUALITY: Quality = Quality::Val;

    /// Modifiability used when none was written.
    pub const DEFAULT_MODIFIABILITY: Modifiability = Modifiability::Immutable;

    pub const fn new(quality: Quality, modifiability: Modifiability) -> Self {
        TypeAttributes {
            quality,
            modifiability,
        }
    }

    /// Resolve a partially-specified request, filling missing axes with the
    /// defaults.
    pub fn resolve(quality: Option<Quality>, modifiability: Option<Modifiability>) -> Self {
        Self::new(
            quality.unwrap_or(Self::DEFAULT_QUALITY),
            modifiability.unwrap_or(Self::DEFAULT_MODIFIABILITY),
        )
    }

    /// Resolve attributes as written on a type expression.
    pub fn from_optional(attributes: TypeAttributesOptional) -> Self {
        Self::resolve(attributes.quality, attributes.modifiability)
    }

    /// Replace the quality axis.
    #[must_use]
    pub const fn with_quality(self, quality: Quality) -> Self {
        Self::new(quality, self.modifiability)
    }

    /// Replace the modifiability axis.
    #[must_use]
    pub const fn with_modifiability(self, modifiability: Modifiability) -> Self {
        Self::new(self.quality, modifiability)
    }

    /// Override only the axes present in `written`.
    #[must_use]
    pub fn merge(self, written: TypeAttributesOptional) -> Self {
        Self::new(
            written.quality.unwrap_or(self.quality),
            written.modifiability.unwrap_or(self.modifiability),
        )
    }
}

impl Default for TypeAttributes {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUALITY, Self::DEFAULT_MODIFIABILITY)
    }
}

impl fmt::Display for TypeAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quality, self.modifiability)
    }
}

#[cfg(test)]
mod tests;
