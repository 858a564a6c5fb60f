//! Mangled names.
//!
//! ```text
//! _R <len><segment>... <len><name> P (<type id>_)* [I<serial>]
//! _R3addP3_3_        add(int, int) in the root scope
//! _R2idP5_I0         first instance of template `id`
//! ```
//!
//! Declared overloads are unique by parameter list; instances additionally
//! carry a session-wide serial because identical instantiations coexist.

use rill_ir::Name;
use rill_types::TypeId;

use super::{Environment, ScopeId};
use crate::InternalError;

impl Environment {
    pub fn mangle(
        &self,
        scope: ScopeId,
        name: Name,
        params: &[TypeId],
        instance: Option<u32>,
    ) -> Result<String, InternalError> {
        let mut segments = Vec::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id)?;
            if let Some(label) = scope.label {
                segments.push(label);
            }
            current = scope.parent;
        }

        let mut mangled = String::from("_R");
        for &segment in segments.iter().rev().chain(std::iter::once(&name)) {
            let text = self.name_str(segment);
            mangled.push_str(&text.len().to_string());
            mangled.push_str(text);
        }
        mangled.push('P');
        for param in params {
            mangled.push_str(&param.raw().to_string());
            mangled.push('_');
        }
        if let Some(serial) = instance {
            mangled.push('I');
            mangled.push_str(&serial.to_string());
        }
        Ok(mangled)
    }
}
