//! Attribute keywords written on types and parameters.
//!
//! The parser records exactly what the programmer wrote: each axis is
//! optional. Defaulting to a fully-resolved pair happens in `rill_types`.

use std::fmt;

/// Whether a type denotes a value or a reference (alias).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Quality {
    /// `val`: the parameter owns a copy.
    Val,
    /// `ref`: the parameter aliases the argument.
    Ref,
}

impl Quality {
    /// Source keyword for this quality.
    pub const fn keyword(self) -> &'static str {
        match self {
            Quality::Val => "val",
            Quality::Ref => "ref",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Whether a value may be mutated through a given view.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Modifiability {
    /// May be mutated through this view.
    Mutable,
    /// Not mutated through this view; others may still mutate it.
    Const,
    /// Never mutated anywhere.
    Immutable,
}

impl Modifiability {
    /// Source keyword for this modifiability.
    pub const fn keyword(self) -> &'static str {
        match self {
            Modifiability::Mutable => "mutable",
            Modifiability::Const => "const",
            Modifiability::Immutable => "immutable",
        }
    }
}

impl fmt::Display for Modifiability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Attributes as written in source, each axis optional.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeAttributesOptional {
    pub quality: Option<Quality>,
    pub modifiability: Option<Modifiability>,
}

impl TypeAttributesOptional {
    /// No attribute written.
    pub const NONE: Self = TypeAttributesOptional {
        quality: None,
        modifiability: None,
    };

    pub const fn new(quality: Option<Quality>, modifiability: Option<Modifiability>) -> Self {
        TypeAttributesOptional {
            quality,
            modifiability,
        }
    }

    /// Only the modifiability axis written, e.g. `mutable int`.
    pub const fn modifiability(modifiability: Modifiability) -> Self {
        Self::new(None, Some(modifiability))
    }

    /// True if neither axis was written.
    pub const fn is_empty(&self) -> bool {
        self.quality.is_none() && self.modifiability.is_none()
    }
}
