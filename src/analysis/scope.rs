//! Module scope resolution.
//!
//! Before a query scans anything it decides which modules could possibly reference the
//! target. By default these are the declaring module and every module that can observe the
//! declaring assembly, in workspace load order. Pseudo-custom attributes are the exception:
//! compilers fold them into metadata flags, so an attribute application naming one of their
//! properties may appear in modules that never reference the declaring assembly, and such
//! queries scan every loaded module.

use std::collections::HashSet;

use crate::{
    analysis::{config::SearchConfig, symbol::Symbol},
    metadata::{
        customattributes::CustomAttributeList,
        signatures::TypeName,
        token::ModuleId,
        typesystem::{CilType, TypeAttributes},
        workspace::{ModuleRc, Workspace},
    },
    Result,
};

/// Full names of the attribute types the runtime treats as pseudo-custom attributes
pub const PSEUDO_CUSTOM_ATTRIBUTES: &[&str] = &[
    "System.SerializableAttribute",
    "System.NonSerializedAttribute",
    "System.Runtime.InteropServices.ComImportAttribute",
    "System.Runtime.InteropServices.DllImportAttribute",
    "System.Runtime.InteropServices.FieldOffsetAttribute",
    "System.Runtime.InteropServices.InAttribute",
    "System.Runtime.InteropServices.MarshalAsAttribute",
    "System.Runtime.InteropServices.OptionalAttribute",
    "System.Runtime.InteropServices.OutAttribute",
    "System.Runtime.InteropServices.PreserveSigAttribute",
    "System.Runtime.InteropServices.StructLayoutAttribute",
    "System.Runtime.CompilerServices.MethodImplAttribute",
    "System.Runtime.CompilerServices.SpecialNameAttribute",
    "System.Runtime.CompilerServices.TypeForwardedToAttribute",
    "System.Security.SuppressUnmanagedCodeSecurityAttribute",
];

/// Attribute naming friend assemblies that may see internal members
const INTERNALS_VISIBLE_TO: &str = "System.Runtime.CompilerServices.InternalsVisibleToAttribute";

/// Computes the ordered set of modules a query has to scan.
pub struct ScopeResolver<'a> {
    workspace: &'a Workspace,
    config: &'a SearchConfig,
}

impl<'a> ScopeResolver<'a> {
    /// Creates a resolver over `workspace`
    #[must_use]
    pub fn new(workspace: &'a Workspace, config: &'a SearchConfig) -> Self {
        Self { workspace, config }
    }

    /// Returns `true` if `name` is a pseudo-custom-attribute type, built-in or configured
    #[must_use]
    pub fn is_pseudo_attribute(&self, name: &TypeName) -> bool {
        let fullname = name.full_name();
        PSEUDO_CUSTOM_ATTRIBUTES.contains(&fullname.as_str())
            || self.config.extra_pseudo_attributes.contains(&fullname)
    }

    /// Returns `true` if the target may be written through a pseudo-custom attribute, which
    /// means it is a property (or an accessor of one) declared by a pseudo-attribute type.
    #[must_use]
    pub fn requires_all_modules(&self, symbol: &Symbol) -> bool {
        let property = match symbol {
            Symbol::Property(property) => Some(property.clone()),
            Symbol::Method(method) => self.workspace.property_of(method.id),
            Symbol::Field(_) => None,
        };

        property
            .and_then(|property| self.workspace.type_def(property.declaring_type))
            .is_some_and(|declaring| self.is_pseudo_attribute(&declaring.type_name()))
    }

    /// Resolves the scope for `symbol`, widening it automatically for pseudo-attribute
    /// properties.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the declaring type of the symbol is not loaded.
    pub fn scope_for(&self, symbol: &Symbol) -> Result<Vec<ModuleRc>> {
        self.resolve_scope(symbol, self.requires_all_modules(symbol))
    }

    /// Resolves the ordered, duplicate-free module scope for `symbol`.
    ///
    /// # Arguments
    /// * `symbol` - The query target
    /// * `include_all_modules` - Scan every loaded module instead of the visibility scope
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the declaring type of the symbol is not loaded.
    pub fn resolve_scope(&self, symbol: &Symbol, include_all_modules: bool) -> Result<Vec<ModuleRc>> {
        let declaring = self
            .workspace
            .type_def(symbol.declaring_type())
            .ok_or_else(|| malformed_error!("declaring type of {} is not loaded", symbol))?;
        let declaring_module = self
            .workspace
            .module(declaring.id.module)
            .ok_or_else(|| malformed_error!("module of {} is not loaded", declaring.id))?;

        let mut visited: HashSet<ModuleId> = HashSet::new();
        let mut scope = Vec::new();
        visited.insert(declaring_module.id);
        scope.push(declaring_module.clone());

        if include_all_modules {
            for module in self.workspace.modules() {
                if visited.insert(module.id) {
                    scope.push(module.clone());
                }
            }
            return Ok(scope);
        }

        let assembly = declaring.assembly.as_str();
        let friends = if self.config.accessibility_scoping && self.is_assembly_bound(symbol, &declaring) {
            Some(Self::friend_assemblies(&declaring_module.assembly_attributes))
        } else {
            None
        };

        for module in self.workspace.modules() {
            if !module.can_see(assembly) {
                continue;
            }
            if let Some(friends) = &friends {
                let name = &module.assembly.name;
                if name != assembly && !friends.contains(name) {
                    continue;
                }
            }
            if visited.insert(module.id) {
                scope.push(module.clone());
            }
        }

        Ok(scope)
    }

    fn is_assembly_bound(&self, symbol: &Symbol, declaring: &CilType) -> bool {
        symbol.is_assembly_bound() || !declaring.flags.contains(TypeAttributes::PUBLIC)
    }

    /// Simple names of the assemblies granted access through `InternalsVisibleToAttribute`.
    ///
    /// The attribute argument may be a full display name with a public key; only the simple
    /// name before the first comma is kept.
    fn friend_assemblies(attributes: &CustomAttributeList) -> HashSet<String> {
        attributes
            .iter()
            .filter(|(_, attribute)| {
                attribute
                    .attribute_type
                    .type_name()
                    .is_some_and(|name| name.full_name() == INTERNALS_VISIBLE_TO)
            })
            .filter_map(|(_, attribute)| attribute.first_string_arg())
            .map(|friend| friend.split(',').next().unwrap_or(friend).trim().to_string())
            .collect()
    }
}
