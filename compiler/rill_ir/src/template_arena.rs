//! Arena of template definitions.
//!
//! Templates are stored once, read-only, and addressed by [`TemplateId`].
//! Instantiation never borrows a template mutably: it clones the inner
//! function and works on the copy.

use crate::TemplateDef;

/// Index of a template in the [`TemplateArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TemplateId(u32);

impl TemplateId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TemplateId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Append-only storage for template definitions.
#[derive(Clone, Debug, Default)]
pub struct TemplateArena {
    templates: Vec<TemplateDef>,
}

impl TemplateArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a template definition.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` templates are allocated.
    pub fn alloc(&mut self, template: TemplateDef) -> TemplateId {
        let id = u32::try_from(self.templates.len())
            .unwrap_or_else(|_| panic!("template arena exceeded u32::MAX entries"));
        self.templates.push(template);
        TemplateId(id)
    }

    /// Get a template by id, or `None` for an id from another arena.
    pub fn get(&self, id: TemplateId) -> Option<&TemplateDef> {
        self.templates.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
