//! The loaded module graph that cross-reference queries run against.
//!
//! A [`Workspace`] owns every loaded [`Module`] in load order, together with token-ordered
//! definition tables keyed by [`DefId`] and a name index that maps `(assembly, full name)` to
//! a type definition. The graph is immutable once built; queries share it through an `Arc`
//! and resolve member references against it on demand.
//!
//! # Architecture
//!
//! - Primary storage is lock-free (`SkipMap`), ordered by module then token
//! - Secondary indices are concurrent hash maps (`DashMap`)
//! - References are resolved lazily; a failed lookup returns `None` and never panics
//!
//! Workspaces are assembled with [`WorkspaceBuilder`], the way a loader or a test fixture
//! describes modules, types and members without dealing with tokens.
//!
//! # Examples
//!
//! ```rust
//! use dotscope_xref::metadata::identity::{AssemblyIdentity, AssemblyVersion};
//! use dotscope_xref::metadata::signatures::TypeSig;
//! use dotscope_xref::metadata::workspace::{
//!     MethodBuilder, ModuleBuilder, TypeBuilder, WorkspaceBuilder,
//! };
//!
//! let workspace = WorkspaceBuilder::new()
//!     .module(
//!         ModuleBuilder::new("Shapes.dll", AssemblyIdentity::new("Shapes", AssemblyVersion::new(1, 0, 0, 0)))
//!             .ty(TypeBuilder::interface("Shapes", "IShape")
//!                 .method(MethodBuilder::new("Area").abstract_method().returns(TypeSig::R8))),
//!     )
//!     .build()?;
//!
//! let area = workspace.find_method("Shapes", "Shapes.IShape", "Area")?;
//! assert!(area.is_abstract());
//! # Ok::<(), dotscope_xref::Error>(())
//! ```

mod builder;
mod resolver;

pub use builder::{
    FieldBuilder, MethodBuilder, ModuleBuilder, PropertyBuilder, TypeBuilder, WorkspaceBuilder,
};

use std::sync::Arc;

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::{
    metadata::{
        customattributes::CustomAttributeList,
        identity::AssemblyIdentity,
        method::MethodRc,
        token::{DefId, ModuleId, Token},
        typesystem::{CilTypeRc, FieldRc, PropertyRc},
    },
    Error, Result,
};

/// A reference-counted pointer to a `Module`
pub type ModuleRc = Arc<Module>;

/// Upper bound for base-type walks performed during reference resolution
pub const MAX_RESOLUTION_DEPTH: usize = 64;

/// A unit of compiled types belonging to exactly one assembly.
pub struct Module {
    /// Position of the module in the workspace load order
    pub id: ModuleId,
    /// File name of the module, e.g. `Shapes.dll`
    pub name: String,
    /// The assembly this module belongs to
    pub assembly: AssemblyIdentity,
    /// Simple names of the assemblies this module references (its visibility scope)
    pub references: Vec<String>,
    /// Type definitions in declaration order
    pub types: Vec<CilTypeRc>,
    /// Custom attributes applied to the module
    pub custom_attributes: CustomAttributeList,
    /// Custom attributes applied to the owning assembly, shared by all of its modules
    pub assembly_attributes: CustomAttributeList,
}

impl Module {
    /// Returns `true` if code in this module can observe definitions of `assembly`.
    ///
    /// A module always sees its own assembly, whether or not it lists it as a reference.
    #[must_use]
    pub fn can_see(&self, assembly: &str) -> bool {
        self.assembly.name == assembly || self.references.iter().any(|r| r == assembly)
    }

    /// Identity under which module-level attributes are reported
    #[must_use]
    pub fn module_def(&self) -> DefId {
        DefId::new(self.id, Token::MODULE)
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("assembly", &self.assembly.display_name())
            .field("types", &self.types.len())
            .finish_non_exhaustive()
    }
}

/// The read-only metadata graph of all loaded modules.
pub struct Workspace {
    modules: Vec<ModuleRc>,
    types: SkipMap<DefId, CilTypeRc>,
    methods: SkipMap<DefId, MethodRc>,
    fields: SkipMap<DefId, FieldRc>,
    properties: SkipMap<DefId, PropertyRc>,
    /// accessor method -> owning property
    accessors: DashMap<DefId, DefId>,
    /// (assembly, full name) -> type definition
    types_by_name: DashMap<(String, String), DefId>,
    /// assembly simple name -> modules in load order
    assemblies: DashMap<String, Vec<ModuleId>>,
}

impl Workspace {
    fn new(modules: Vec<ModuleRc>) -> Self {
        let workspace = Workspace {
            modules,
            types: SkipMap::new(),
            methods: SkipMap::new(),
            fields: SkipMap::new(),
            properties: SkipMap::new(),
            accessors: DashMap::new(),
            types_by_name: DashMap::new(),
            assemblies: DashMap::new(),
        };
        workspace.index();
        workspace
    }

    fn index(&self) {
        for module in &self.modules {
            self.assemblies
                .entry(module.assembly.name.clone())
                .or_default()
                .push(module.id);

            for ty in &module.types {
                self.types.insert(ty.id, ty.clone());
                let key = (ty.assembly.clone(), ty.fullname());
                if self.types_by_name.contains_key(&key) {
                    log::warn!(
                        "duplicate type definition {} in {}, keeping the first",
                        ty.type_name(),
                        module.name
                    );
                } else {
                    self.types_by_name.insert(key, ty.id);
                }

                for method in &ty.methods {
                    self.methods.insert(method.id, method.clone());
                }
                for field in &ty.fields {
                    self.fields.insert(field.id, field.clone());
                }
                for property in &ty.properties {
                    self.properties.insert(property.id, property.clone());
                    for accessor in property.accessors() {
                        self.accessors.insert(accessor.id, property.id);
                    }
                }
            }
        }
    }

    /// Returns all modules in load order
    #[must_use]
    pub fn modules(&self) -> &[ModuleRc] {
        &self.modules
    }

    /// Returns the module with the given id
    #[must_use]
    pub fn module(&self, id: ModuleId) -> Option<ModuleRc> {
        self.modules.get(id.0 as usize).cloned()
    }

    /// Returns the modules of an assembly in load order; the first is its manifest module
    #[must_use]
    pub fn assembly_modules(&self, assembly: &str) -> Vec<ModuleId> {
        self.assemblies
            .get(assembly)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Returns the type definition with the given identity
    #[must_use]
    pub fn type_def(&self, id: DefId) -> Option<CilTypeRc> {
        self.types.get(&id).map(|entry| entry.value().clone())
    }

    /// Returns the method definition with the given identity
    #[must_use]
    pub fn method(&self, id: DefId) -> Option<MethodRc> {
        self.methods.get(&id).map(|entry| entry.value().clone())
    }

    /// Returns the field definition with the given identity
    #[must_use]
    pub fn field(&self, id: DefId) -> Option<FieldRc> {
        self.fields.get(&id).map(|entry| entry.value().clone())
    }

    /// Returns the property definition with the given identity
    #[must_use]
    pub fn property(&self, id: DefId) -> Option<PropertyRc> {
        self.properties.get(&id).map(|entry| entry.value().clone())
    }

    /// Returns the property that owns `accessor` as getter or setter
    #[must_use]
    pub fn property_of(&self, accessor: DefId) -> Option<PropertyRc> {
        let property = *self.accessors.get(&accessor)?.value();
        self.property(property)
    }

    /// Returns the type definition for a full name within an assembly
    #[must_use]
    pub fn type_by_name(&self, assembly: &str, fullname: &str) -> Option<CilTypeRc> {
        let id = *self
            .types_by_name
            .get(&(assembly.to_string(), fullname.to_string()))?
            .value();
        self.type_def(id)
    }

    /// Looks up a type definition by assembly and full name.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if no loaded module of `assembly` defines the type.
    pub fn find_type(&self, assembly: &str, fullname: &str) -> Result<CilTypeRc> {
        self.type_by_name(assembly, fullname)
            .ok_or_else(|| Error::TypeNotFound(format!("[{assembly}]{fullname}")))
    }

    /// Looks up the first method named `name` declared by a type.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] or [`Error::MemberNotFound`] if the lookup fails.
    pub fn find_method(&self, assembly: &str, type_name: &str, name: &str) -> Result<MethodRc> {
        self.find_type(assembly, type_name)?
            .method(name)
            .ok_or_else(|| Error::MemberNotFound(format!("[{assembly}]{type_name}::{name}")))
    }

    /// Looks up a field declared by a type.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] or [`Error::MemberNotFound`] if the lookup fails.
    pub fn find_field(&self, assembly: &str, type_name: &str, name: &str) -> Result<FieldRc> {
        self.find_type(assembly, type_name)?
            .field(name)
            .ok_or_else(|| Error::MemberNotFound(format!("[{assembly}]{type_name}::{name}")))
    }

    /// Looks up a property declared by a type.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] or [`Error::MemberNotFound`] if the lookup fails.
    pub fn find_property(
        &self,
        assembly: &str,
        type_name: &str,
        name: &str,
    ) -> Result<PropertyRc> {
        self.find_type(assembly, type_name)?
            .property(name)
            .ok_or_else(|| Error::MemberNotFound(format!("[{assembly}]{type_name}::{name}")))
    }

    /// Total number of type definitions across all modules
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("modules", &self.modules.len())
            .field("types", &self.types.len())
            .field("methods", &self.methods.len())
            .finish_non_exhaustive()
    }
}
