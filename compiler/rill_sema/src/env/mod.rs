//! Symbol environment for one analysis session.
//!
//! Owns every arena the engines touch: the string interner, the type
//! table, template definitions, scopes, classes, overload sets, template
//! sets and function symbols. Everything is addressed by 32-bit handles,
//! so engines pass ids around and borrow the environment only briefly.

mod function;
mod ids;
mod mangle;
mod symbols;

use rill_ir::{FunctionDef, Name, StringInterner, TemplateArena, TemplateDef, TemplateId};
use rill_types::{ClassId, ResolvedType, TypeAttributes, TypeId, TypeTable};

pub use function::{
    ConstructionState, FunctionOrigin, FunctionSignature, FunctionSymbol, IncompleteFunction,
    ParamTypes,
};
pub use ids::{FunctionId, OverloadSetId, ScopeId, TemplateSetId};
pub use symbols::{OverloadSet, TemplateCandidate, TemplateSet, ValueBinding};

use symbols::{ClassSymbol, Scope};

use crate::{InternalError, SessionOptions};

/// Classes every session starts with.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Builtins {
    pub int: ClassId,
    pub bool: ClassId,
    pub void: ClassId,
}

/// Session state for semantic analysis.
#[derive(Debug)]
pub struct Environment {
    interner: StringInterner,
    types: TypeTable,
    templates: TemplateArena,
    scopes: Vec<Scope>,
    classes: Vec<ClassSymbol>,
    overload_sets: Vec<OverloadSet>,
    template_sets: Vec<TemplateSet>,
    functions: Vec<FunctionSymbol>,
    builtins: Builtins,
    options: SessionOptions,
    /// Serial for the next template instance's mangled name.
    next_instance: u32,
    /// Template instantiations currently on the stack.
    instantiation_depth: u32,
}

impl Environment {
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    pub fn with_options(options: SessionOptions) -> Self {
        let interner = StringInterner::new();
        let builtins = Builtins {
            int: ClassId::from_raw(0),
            bool: ClassId::from_raw(1),
            void: ClassId::from_raw(2),
        };
        let mut root = Scope::new(None, None);
        let mut classes = Vec::with_capacity(3);
        for (class, text) in [
            (builtins.int, "int"),
            (builtins.bool, "bool"),
            (builtins.void, "void"),
        ] {
            let name = interner.intern(text);
            classes.push(ClassSymbol { name });
            root.values.insert(name, ValueBinding::Class(class));
        }

        Environment {
            interner,
            types: TypeTable::new(),
            templates: TemplateArena::new(),
            scopes: vec![root],
            classes,
            overload_sets: Vec::new(),
            template_sets: Vec::new(),
            functions: Vec::new(),
            builtins,
            options,
            next_instance: 0,
            instantiation_depth: 0,
        }
    }

    /// Declare `int`, `bool` and `void` in the root scope.
    ///
    /// The constructor already seeds them; later calls return the same
    /// classes, or redeclare any the root scope has lost.
    pub fn register_builtins(&mut self) -> Result<Builtins, InternalError> {
        Ok(Builtins {
            int: self.builtin_class("int")?,
            bool: self.builtin_class("bool")?,
            void: self.builtin_class("void")?,
        })
    }

    fn builtin_class(&mut self, text: &str) -> Result<ClassId, InternalError> {
        let root = self.root_scope();
        let name = self.intern(text);
        match self.scope(root)?.values.get(&name) {
            Some(&ValueBinding::Class(class)) => Ok(class),
            _ => self.insert_class(root, name),
        }
    }

    pub fn builtins(&self) -> Builtins {
        self.builtins
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    // Names

    pub fn intern(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    pub fn name_str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    // Scopes

    pub fn root_scope(&self) -> ScopeId {
        ScopeId::from_raw(0)
    }

    /// New anonymous scope nested in `parent`.
    pub fn child_scope(&mut self, parent: ScopeId) -> Result<ScopeId, InternalError> {
        self.push_scope(parent, None)
    }

    fn push_scope(&mut self, parent: ScopeId, label: Option<Name>) -> Result<ScopeId, InternalError> {
        self.scope(parent)?;
        let id = ScopeId::next(self.scopes.len());
        self.scopes.push(Scope::new(Some(parent), label));
        Ok(id)
    }

    pub fn parent_of(&self, scope: ScopeId) -> Result<Option<ScopeId>, InternalError> {
        Ok(self.scope(scope)?.parent)
    }

    /// Name of the innermost function whose scope encloses `scope`.
    pub fn enclosing_function_name(&self, scope: ScopeId) -> Result<Option<Name>, InternalError> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id)?;
            if scope.label.is_some() {
                return Ok(scope.label);
            }
            current = scope.parent;
        }
        Ok(None)
    }

    fn scope(&self, id: ScopeId) -> Result<&Scope, InternalError> {
        self.scopes
            .get(id.index())
            .ok_or(InternalError::UnknownScope(id))
    }

    fn scope_mut(&mut self, id: ScopeId) -> Result<&mut Scope, InternalError> {
        self.scopes
            .get_mut(id.index())
            .ok_or(InternalError::UnknownScope(id))
    }

    // Classes and types

    /// Declare a class in `scope`, shadowing any outer binding of the name.
    ///
    /// Redeclaration within one scope is the caller's to reject; see
    /// [`Environment::lookup_local`].
    pub fn declare_class(&mut self, scope: ScopeId, name: Name) -> Result<ClassId, InternalError> {
        self.insert_class(scope, name)
    }

    fn insert_class(&mut self, scope: ScopeId, name: Name) -> Result<ClassId, InternalError> {
        self.scope(scope)?;
        let Ok(raw) = u32::try_from(self.classes.len()) else {
            tracing::error!("class table exceeded u32::MAX entries");
            return Err(InternalError::ClassTableOverflow);
        };
        let class = ClassId::from_raw(raw);
        self.classes.push(ClassSymbol { name });
        self.scope_mut(scope)?
            .values
            .insert(name, ValueBinding::Class(class));
        Ok(class)
    }

    pub fn class_name(&self, class: ClassId) -> Result<Name, InternalError> {
        self.classes
            .get(class.index())
            .map(|symbol| symbol.name)
            .ok_or(InternalError::UnknownClass(class))
    }

    pub fn dereference(&self, ty: TypeId) -> Result<ResolvedType, InternalError> {
        self.types.dereference(ty).map_err(|err| {
            tracing::error!(?ty, "dereferenced a type id not owned by this session");
            InternalError::from(err)
        })
    }

    /// Memoized id for `(class, attributes)`.
    pub fn make_type_id(
        &mut self,
        class: ClassId,
        attributes: TypeAttributes,
    ) -> Result<TypeId, InternalError> {
        self.class_name(class)?;
        Ok(self.types.make_type_id(class, attributes)?)
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// Render a type for diagnostics, e.g. `ref mutable int`.
    pub fn type_name(&self, ty: TypeId) -> Result<String, InternalError> {
        let resolved = self.dereference(ty)?;
        let class = self.class_name(resolved.class)?;
        Ok(format!("{} {}", resolved.attributes, self.name_str(class)))
    }

    /// Like [`type_name`](Self::type_name), falling back to the raw id.
    pub fn describe_type(&self, ty: TypeId) -> String {
        self.type_name(ty).unwrap_or_else(|_| ty.to_string())
    }

    // Values

    pub fn declare_variable(
        &mut self,
        scope: ScopeId,
        name: Name,
        ty: TypeId,
    ) -> Result<(), InternalError> {
        self.dereference(ty)?;
        self.scope_mut(scope)?
            .values
            .insert(name, ValueBinding::Variable(ty));
        Ok(())
    }

    /// Bind a template parameter to its argument in `scope`.
    pub fn bind_template_parameter(
        &mut self,
        scope: ScopeId,
        name: Name,
        ty: TypeId,
    ) -> Result<(), InternalError> {
        self.dereference(ty)?;
        self.scope_mut(scope)?
            .values
            .insert(name, ValueBinding::TemplateArgument(ty));
        Ok(())
    }

    /// Mark a template parameter as present but without an argument.
    pub fn declare_unbound_template_parameter(
        &mut self,
        scope: ScopeId,
        name: Name,
    ) -> Result<(), InternalError> {
        self.scope_mut(scope)?
            .values
            .insert(name, ValueBinding::UnboundTemplateParameter);
        Ok(())
    }

    /// Binding of `name` in `scope` only, without walking parents.
    pub fn lookup_local(
        &self,
        scope: ScopeId,
        name: Name,
    ) -> Result<Option<ValueBinding>, InternalError> {
        Ok(self.scope(scope)?.values.get(&name).copied())
    }

    /// Innermost binding of `name` visible from `scope`.
    pub fn lookup_value(
        &self,
        scope: ScopeId,
        name: Name,
    ) -> Result<Option<ValueBinding>, InternalError> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id)?;
            if let Some(&binding) = scope.values.get(&name) {
                return Ok(Some(binding));
            }
            current = scope.parent;
        }
        Ok(None)
    }

    // Overload sets and functions

    /// Overload set declared for `name` directly in `scope`.
    pub fn lookup_overloads_in(
        &self,
        scope: ScopeId,
        name: Name,
    ) -> Result<Option<OverloadSetId>, InternalError> {
        Ok(self.scope(scope)?.overloads.get(&name).copied())
    }

    fn overload_set_for(&mut self, scope: ScopeId, name: Name) -> Result<OverloadSetId, InternalError> {
        if let Some(id) = self.lookup_overloads_in(scope, name)? {
            return Ok(id);
        }
        let id = OverloadSetId::next(self.overload_sets.len());
        self.overload_sets.push(OverloadSet {
            name,
            scope,
            functions: Vec::new(),
        });
        self.scope_mut(scope)?.overloads.insert(name, id);
        Ok(id)
    }

    pub fn overload_set(&self, id: OverloadSetId) -> Result<&OverloadSet, InternalError> {
        self.overload_sets
            .get(id.index())
            .ok_or(InternalError::UnknownOverloadSet(id))
    }

    pub fn function(&self, id: FunctionId) -> Result<&FunctionSymbol, InternalError> {
        self.functions
            .get(id.index())
            .ok_or(InternalError::UnknownFunction(id))
    }

    fn function_mut(&mut self, id: FunctionId) -> Result<&mut FunctionSymbol, InternalError> {
        self.functions
            .get_mut(id.index())
            .ok_or(InternalError::UnknownFunction(id))
    }

    /// Signature of a complete function.
    pub fn signature(&self, id: FunctionId) -> Result<&FunctionSignature, InternalError> {
        self.function(id)?
            .signature()
            .ok_or(InternalError::StillIncomplete(id))
    }

    /// Mangled name of a function, or its plain name while incomplete.
    pub fn describe_function(&self, id: FunctionId) -> String {
        match self.function(id) {
            Ok(symbol) => match symbol.signature() {
                Some(sig) => sig.mangled_name.clone(),
                None => self.name_str(symbol.name).to_string(),
            },
            Err(_) => format!("{id:?}"),
        }
    }

    /// Start constructing `identifier` in `scope`. Its parameters live in a
    /// fresh child of `scope`.
    pub fn begin_construct(
        &mut self,
        scope: ScopeId,
        identifier: Name,
    ) -> Result<IncompleteFunction, InternalError> {
        self.begin(scope, identifier, scope, FunctionOrigin::Declared)
    }

    /// Start constructing an instance of `template`.
    ///
    /// The instance belongs to `scope` (the template set's parent) but its
    /// local scope nests in `call_site`, so the instantiated body sees the
    /// names visible where it was requested.
    pub fn begin_instance(
        &mut self,
        scope: ScopeId,
        identifier: Name,
        call_site: ScopeId,
        template: TemplateId,
    ) -> Result<IncompleteFunction, InternalError> {
        self.begin(
            scope,
            identifier,
            call_site,
            FunctionOrigin::Instantiated(template),
        )
    }

    fn begin(
        &mut self,
        scope: ScopeId,
        identifier: Name,
        body_parent: ScopeId,
        origin: FunctionOrigin,
    ) -> Result<IncompleteFunction, InternalError> {
        let overload_set = self.overload_set_for(scope, identifier)?;
        let local_scope = self.push_scope(body_parent, Some(identifier))?;
        let function = FunctionId::next(self.functions.len());
        self.functions.push(FunctionSymbol {
            name: identifier,
            overload_set,
            owner_scope: scope,
            local_scope,
            origin,
            state: ConstructionState::Incomplete {
                parameters: ParamTypes::new(),
            },
            body: None,
        });
        tracing::trace!(?function, ?overload_set, "begin construction");
        Ok(IncompleteFunction {
            function,
            local_scope,
        })
    }

    /// Declare the next parameter of an incomplete function.
    pub fn declare_parameter(
        &mut self,
        incomplete: &IncompleteFunction,
        name: Name,
        class: ClassId,
        attributes: TypeAttributes,
    ) -> Result<TypeId, InternalError> {
        let ty = self.make_type_id(class, attributes)?;
        match &mut self.function_mut(incomplete.function)?.state {
            ConstructionState::Incomplete { parameters } => parameters.push(ty),
            ConstructionState::Complete(_) => {
                tracing::error!(function = ?incomplete.function, "parameter declared after completion");
                return Err(InternalError::AlreadyComplete(incomplete.function));
            }
        }
        self.declare_variable(incomplete.local_scope, name, ty)?;
        Ok(ty)
    }

    /// Parameter types declared so far.
    pub fn declared_parameters(
        &self,
        incomplete: &IncompleteFunction,
    ) -> Result<ParamTypes, InternalError> {
        match &self.function(incomplete.function)?.state {
            ConstructionState::Incomplete { parameters } => Ok(parameters.clone()),
            ConstructionState::Complete(_) => Err(InternalError::AlreadyComplete(incomplete.function)),
        }
    }

    /// Finish construction and append the function to its overload set.
    pub fn complete(
        &mut self,
        incomplete: IncompleteFunction,
        return_type: TypeId,
        mangled_name: String,
    ) -> Result<FunctionId, InternalError> {
        self.dereference(return_type)?;
        let id = incomplete.function;
        let symbol = self.function_mut(id)?;
        let overload_set = symbol.overload_set;
        let parameters = match &mut symbol.state {
            ConstructionState::Incomplete { parameters } => std::mem::take(parameters),
            ConstructionState::Complete(_) => {
                tracing::error!(function = ?id, "function completed twice");
                return Err(InternalError::AlreadyComplete(id));
            }
        };
        symbol.state = ConstructionState::Complete(FunctionSignature {
            parameter_type_ids: parameters,
            return_type,
            mangled_name,
            owning_overload_set: overload_set,
        });
        self.overload_sets
            .get_mut(overload_set.index())
            .ok_or(InternalError::UnknownOverloadSet(overload_set))?
            .functions
            .push(id);
        tracing::debug!(function = ?id, ?overload_set, "function complete");
        Ok(id)
    }

    /// Give an instantiated function ownership of its cloned body.
    pub fn link_body(&mut self, function: FunctionId, body: FunctionDef) -> Result<(), InternalError> {
        self.function_mut(function)?.body = Some(body);
        Ok(())
    }

    /// An explicitly declared function in `set` with exactly `parameters`.
    pub fn find_declared(
        &self,
        set: OverloadSetId,
        parameters: &[TypeId],
    ) -> Result<Option<FunctionId>, InternalError> {
        for &candidate in self.overload_set(set)?.functions() {
            let symbol = self.function(candidate)?;
            if symbol.origin != FunctionOrigin::Declared {
                continue;
            }
            if symbol
                .signature()
                .is_some_and(|sig| sig.parameter_type_ids.as_slice() == parameters)
            {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    // Templates

    /// Register a template under its name in `scope`, creating the template
    /// set and the overload set instances will join.
    pub fn declare_template(
        &mut self,
        scope: ScopeId,
        template: TemplateDef,
    ) -> Result<TemplateSetId, InternalError> {
        let name = template.name();
        let parameter_count = template.parameter_count();
        let overload_set = self.overload_set_for(scope, name)?;
        let set = match self.scope(scope)?.templates.get(&name) {
            Some(&id) => id,
            None => {
                let id = TemplateSetId::next(self.template_sets.len());
                self.template_sets.push(TemplateSet {
                    name,
                    parent_scope: scope,
                    overload_set,
                    candidates: Vec::new(),
                });
                self.scope_mut(scope)?.templates.insert(name, id);
                id
            }
        };
        let template = self.templates.alloc(template);
        self.template_sets
            .get_mut(set.index())
            .ok_or(InternalError::UnknownTemplateSet(set))?
            .candidates
            .push(TemplateCandidate {
                parameter_count,
                template,
            });
        Ok(set)
    }

    /// Innermost template set for `name` visible from `scope`.
    pub fn lookup_templates(
        &self,
        scope: ScopeId,
        name: Name,
    ) -> Result<Option<TemplateSetId>, InternalError> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id)?;
            if let Some(&set) = scope.templates.get(&name) {
                return Ok(Some(set));
            }
            current = scope.parent;
        }
        Ok(None)
    }

    pub fn template_set(&self, id: TemplateSetId) -> Result<&TemplateSet, InternalError> {
        self.template_sets
            .get(id.index())
            .ok_or(InternalError::UnknownTemplateSet(id))
    }

    pub fn template(&self, id: TemplateId) -> Result<&TemplateDef, InternalError> {
        self.templates
            .get(id)
            .ok_or(InternalError::UnknownTemplate(id))
    }

    /// Reserve the serial for the next template instance.
    pub fn next_instance_serial(&mut self) -> u32 {
        let serial = self.next_instance;
        self.next_instance += 1;
        serial
    }

    /// Record entry into a template instantiation.
    ///
    /// Returns `false` when the configured depth limit is already reached;
    /// the depth is unchanged in that case.
    pub(crate) fn enter_instantiation(&mut self) -> bool {
        if self.instantiation_depth >= self.options.max_instantiation_depth {
            return false;
        }
        self.instantiation_depth += 1;
        true
    }

    pub(crate) fn exit_instantiation(&mut self) {
        self.instantiation_depth = self.instantiation_depth.saturating_sub(1);
    }

    pub fn instantiation_depth(&self) -> u32 {
        self.instantiation_depth
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
