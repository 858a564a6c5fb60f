//! Function symbols and the two-phase construction protocol.
//!
//! ```text
//! begin_construct ──► Incomplete { parameters }  (invisible to resolution)
//!                        │ declare_parameter*
//!                        ▼
//!                     complete ──► Complete(FunctionSignature), appended to its set
//! ```
//!
//! The [`IncompleteFunction`] token is neither `Clone` nor `Copy`; handing it
//! to `complete` consumes it, so a function cannot be completed twice
//! through the public API.

use rill_ir::{FunctionDef, Name, TemplateId};
use rill_types::TypeId;
use smallvec::SmallVec;

use super::{FunctionId, OverloadSetId, ScopeId};

/// Parameter type list; most functions take few parameters.
pub type ParamTypes = SmallVec<[TypeId; 4]>;

/// Immutable signature of a complete function.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionSignature {
    pub parameter_type_ids: ParamTypes,
    pub return_type: TypeId,
    pub mangled_name: String,
    pub owning_overload_set: OverloadSetId,
}

impl FunctionSignature {
    pub fn arity(&self) -> usize {
        self.parameter_type_ids.len()
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ConstructionState {
    /// Parameters are still being declared.
    Incomplete { parameters: ParamTypes },
    Complete(FunctionSignature),
}

impl ConstructionState {
    pub fn is_complete(&self) -> bool {
        matches!(self, ConstructionState::Complete(_))
    }
}

/// Where a function came from.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FunctionOrigin {
    Declared,
    Instantiated(TemplateId),
}

#[derive(Clone, Debug)]
pub struct FunctionSymbol {
    pub name: Name,
    pub overload_set: OverloadSetId,
    /// Scope the function is declared in.
    pub owner_scope: ScopeId,
    /// Scope holding parameters and template bindings.
    pub local_scope: ScopeId,
    pub origin: FunctionOrigin,
    pub state: ConstructionState,
    /// Cloned template body, owned by an instantiated function.
    pub body: Option<FunctionDef>,
}

impl FunctionSymbol {
    pub fn signature(&self) -> Option<&FunctionSignature> {
        match &self.state {
            ConstructionState::Complete(sig) => Some(sig),
            ConstructionState::Incomplete { .. } => None,
        }
    }
}

/// Move-only proof that a function is under construction.
#[derive(Debug)]
#[must_use = "an incomplete function stays invisible until passed to `Environment::complete`"]
pub struct IncompleteFunction {
    pub(crate) function: FunctionId,
    pub(crate) local_scope: ScopeId,
}

impl IncompleteFunction {
    pub fn function(&self) -> FunctionId {
        self.function
    }

    pub fn local_scope(&self) -> ScopeId {
        self.local_scope
    }
}
