//! .NET type definitions for cross-reference analysis.
//!
//! This module provides the definition side of the type system: [`CilType`] with its declared
//! methods, fields and properties, its base type reference and its declared interface
//! references. References to other types are kept as structural [`TypeSig`]s and resolved on
//! demand through the workspace, so that a broken link in one module never prevents analysis
//! of the rest.
//!
//! # Key Components
//!
//! - [`CilType`]: A type definition and its members
//! - [`Field`], [`Property`]: Member definitions besides methods
//! - [`TypeAttributes`]: Semantic flags of a type definition

mod members;

pub use members::{Field, FieldRc, Property, PropertyRc};

use std::{fmt, sync::Arc};

use bitflags::bitflags;

use crate::metadata::{
    customattributes::CustomAttributeList,
    method::MethodRc,
    signatures::{TypeName, TypeSig},
    token::DefId,
};

/// Reference to a `CilType`
pub type CilTypeRc = Arc<CilType>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Flags of a type definition (§II.23.1.15), reduced to the semantic bits
    pub struct TypeAttributes: u32 {
        /// Type is visible outside its assembly
        const PUBLIC = 0x0000_0001;
        /// Type is an interface
        const INTERFACE = 0x0000_0020;
        /// Type is abstract
        const ABSTRACT = 0x0000_0080;
        /// Type cannot be derived from
        const SEALED = 0x0000_0100;
        /// Name is special, e.g. compiler-generated
        const SPECIAL_NAME = 0x0000_0400;
    }
}

/// A type definition
pub struct CilType {
    /// Workspace-wide identity of this type
    pub id: DefId,
    /// Simple name of the declaring assembly
    pub assembly: String,
    /// `TypeNamespace` (empty for the global namespace and for nested types)
    pub namespace: String,
    /// `TypeName`, with the generic arity suffix for generic types
    pub name: String,
    /// Semantic flags
    pub flags: TypeAttributes,
    /// This types base aka 'extends', possibly a generic instantiation
    pub base: Option<TypeSig>,
    /// Declared interface references, possibly generic instantiations
    pub interfaces: Vec<TypeSig>,
    /// Names of the generic parameters
    pub generic_params: Vec<String>,
    /// All methods this type declares, in declaration order
    pub methods: Vec<MethodRc>,
    /// All fields this type declares, in declaration order
    pub fields: Vec<FieldRc>,
    /// All properties this type declares, in declaration order
    pub properties: Vec<PropertyRc>,
    /// All custom attributes applied to this type
    pub custom_attributes: CustomAttributeList,
}

impl CilType {
    /// Returns `true` if this type is an interface
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags.contains(TypeAttributes::INTERFACE)
    }

    /// Returns the name under which type references address this definition
    #[must_use]
    pub fn type_name(&self) -> TypeName {
        TypeName::new(&self.assembly, &self.namespace, &self.name)
    }

    /// Returns `true` if `name` addresses this definition
    #[must_use]
    pub fn is_named(&self, name: &TypeName) -> bool {
        name.assembly == self.assembly && name.namespace == self.namespace && name.name == self.name
    }

    /// Returns the full name (Namespace.Name) of the entity
    #[must_use]
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{0}.{1}", self.namespace, self.name)
        }
    }

    /// Returns the open self-reference, e.g. ``List`1<!0>`` for a generic definition
    #[must_use]
    pub fn self_reference(&self) -> TypeSig {
        if self.generic_params.is_empty() {
            TypeSig::Class(self.type_name())
        } else {
            let args = (0..self.generic_params.len())
                .map(|index| TypeSig::GenericParamType(index as u32))
                .collect();
            TypeSig::GenericInst(self.type_name(), args)
        }
    }

    /// Finds a declared method by name (first in declaration order)
    #[must_use]
    pub fn method(&self, name: &str) -> Option<MethodRc> {
        self.methods.iter().find(|m| m.name == name).cloned()
    }

    /// Finds a declared field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<FieldRc> {
        self.fields.iter().find(|f| f.name == name).cloned()
    }

    /// Finds a declared property by name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<PropertyRc> {
        self.properties.iter().find(|p| p.name == name).cloned()
    }
}

impl fmt::Debug for CilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CilType")
            .field("id", &self.id)
            .field("name", &self.type_name().to_string())
            .field("flags", &self.flags)
            .field("methods", &self.methods.len())
            .finish_non_exhaustive()
    }
}
