//! Unresolved member references.
//!
//! A [`MemberReference`] is what an instruction operand or an explicit override entry holds:
//! the member's name, the type reference it was declared through, and its signature. It is
//! resolved to a definition on demand by [`crate::metadata::workspace::Workspace`].

use std::{fmt, sync::Arc};

use crate::metadata::signatures::{MethodSig, TypeSig};

/// A reference-counted pointer to a `MemberReference`
pub type MemberReferenceRc = Arc<MemberReference>;

/// Signature part of a member reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberSignature {
    /// Reference to a method
    Method(MethodSig),
    /// Reference to a field, with the field's type
    Field(TypeSig),
}

/// A reference to a method or field through a (possibly generic) parent type.
///
/// The signature is expressed in terms of the parent's generic type definition, as in
/// `MemberRef` rows: a call to `List<int>.Add` carries the parent `List<int>` and the
/// signature `void (!0)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberReference {
    /// Member name
    pub name: String,
    /// The type the member is referenced through
    pub parent: TypeSig,
    /// Method or field signature
    pub signature: MemberSignature,
    /// Generic method arguments, for instantiated generic method calls
    pub method_generic_args: Vec<TypeSig>,
}

impl MemberReference {
    /// Creates a reference to a method
    #[must_use]
    pub fn method(parent: TypeSig, name: &str, signature: MethodSig) -> Self {
        Self {
            name: name.to_string(),
            parent,
            signature: MemberSignature::Method(signature),
            method_generic_args: Vec::new(),
        }
    }

    /// Creates a reference to a field
    #[must_use]
    pub fn field(parent: TypeSig, name: &str, field_type: TypeSig) -> Self {
        Self {
            name: name.to_string(),
            parent,
            signature: MemberSignature::Field(field_type),
            method_generic_args: Vec::new(),
        }
    }

    /// Instantiates a generic method reference
    #[must_use]
    pub fn with_method_args(mut self, args: Vec<TypeSig>) -> Self {
        self.method_generic_args = args;
        self
    }

    /// Returns `true` if this references a field
    #[must_use]
    pub fn is_field(&self) -> bool {
        matches!(self.signature, MemberSignature::Field(_))
    }

    /// Returns the method signature, if this references a method
    #[must_use]
    pub fn method_signature(&self) -> Option<&MethodSig> {
        match &self.signature {
            MemberSignature::Method(sig) => Some(sig),
            MemberSignature::Field(_) => None,
        }
    }
}

impl fmt::Display for MemberReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.signature {
            MemberSignature::Method(sig) => write!(f, "{}::{} {}", self.parent, self.name, sig),
            MemberSignature::Field(ty) => write!(f, "{} {}::{}", ty, self.parent, self.name),
        }
    }
}
