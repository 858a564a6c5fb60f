//! Scopes, classes, overload sets and template sets.

use rill_ir::{Name, TemplateId};
use rill_types::{ClassId, TypeId};
use rustc_hash::FxHashMap;

use super::{FunctionId, OverloadSetId, ScopeId, TemplateSetId};

/// What a name denotes in the value/type namespace of a scope.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ValueBinding {
    Class(ClassId),
    /// A template parameter bound to a template argument.
    TemplateArgument(TypeId),
    /// A template parameter for which no argument was supplied.
    UnboundTemplateParameter,
    /// A parameter or `let` binding.
    Variable(TypeId),
}

#[derive(Clone, Debug)]
pub(crate) struct Scope {
    pub(crate) parent: Option<ScopeId>,
    /// Path segment for mangled names; blocks have none.
    pub(crate) label: Option<Name>,
    pub(crate) values: FxHashMap<Name, ValueBinding>,
    pub(crate) overloads: FxHashMap<Name, OverloadSetId>,
    pub(crate) templates: FxHashMap<Name, TemplateSetId>,
}

impl Scope {
    pub(crate) fn new(parent: Option<ScopeId>, label: Option<Name>) -> Self {
        Scope {
            parent,
            label,
            values: FxHashMap::default(),
            overloads: FxHashMap::default(),
            templates: FxHashMap::default(),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct ClassSymbol {
    pub(crate) name: Name,
}

/// Complete functions sharing one name in one scope, in declaration order.
///
/// Only appended to, and only by [`Environment::complete`](super::Environment::complete).
#[derive(Clone, Debug)]
pub struct OverloadSet {
    pub name: Name,
    pub scope: ScopeId,
    pub(crate) functions: Vec<FunctionId>,
}

impl OverloadSet {
    pub fn functions(&self) -> &[FunctionId] {
        &self.functions
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// One template that may be instantiated for a call.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TemplateCandidate {
    pub parameter_count: usize,
    pub template: TemplateId,
}

/// Templates sharing one name in one scope.
#[derive(Clone, Debug)]
pub struct TemplateSet {
    pub name: Name,
    /// Scope new instances are declared in.
    pub parent_scope: ScopeId,
    /// Where instances are appended once complete.
    pub overload_set: OverloadSetId,
    pub candidates: Vec<TemplateCandidate>,
}
