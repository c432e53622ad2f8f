//! Method definitions and their bodies.
//!
//! A [`Method`] belongs to exactly one type definition. It may carry a decoded body, an
//! explicit override table (the `MethodImpl` rows naming interface methods it implements) and,
//! for compiler-generated state machine methods, a reference back to the kickoff method whose
//! source the body was generated from.

mod types;

pub use types::*;

use std::{fmt, sync::Arc};

use crate::{
    assembly::Instruction,
    metadata::{
        customattributes::CustomAttributeList, member::MemberReference, signatures::MethodSig,
        token::DefId,
    },
};

/// A reference-counted pointer to a `Method`
pub type MethodRc = Arc<Method>;

/// A decoded method body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodBody {
    /// Instructions in offset order
    pub instructions: Vec<Instruction>,
}

impl MethodBody {
    /// Creates a body from decoded instructions
    #[must_use]
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }
}

/// A method definition.
pub struct Method {
    /// Workspace-wide identity of this method
    pub id: DefId,
    /// Identity of the declaring type
    pub declaring_type: DefId,
    /// Method name
    pub name: String,
    /// Access flags
    pub flags_access: MethodAccessFlags,
    /// Modifiers (static, virtual, abstract, ...)
    pub flags_modifiers: MethodModifiers,
    /// Method signature, expressed in terms of the declaring type's generic parameters
    pub signature: MethodSig,
    /// Names of the method's own generic parameters
    pub generic_params: Vec<String>,
    /// Decoded body; abstract, runtime-implemented and P/Invoke methods have none
    pub body: Option<MethodBody>,
    /// Explicit override table: the interface or base methods this method implements
    pub overrides: Vec<MemberReference>,
    /// For a compiler-generated state machine `MoveNext`, the user method it was generated from
    pub state_machine_kickoff: Option<MemberReference>,
    /// All custom attributes applied to this method
    pub custom_attributes: CustomAttributeList,
}

impl Method {
    /// Returns `true` if the method is virtual
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.flags_modifiers.contains(MethodModifiers::VIRTUAL)
    }

    /// Returns `true` if the method has no implementation
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags_modifiers.contains(MethodModifiers::ABSTRACT)
    }

    /// Returns `true` if the method is static
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags_modifiers.contains(MethodModifiers::STATIC)
    }

    /// Returns `true` if the method can be the runtime implementation of a virtual slot
    #[must_use]
    pub fn is_concrete_virtual(&self) -> bool {
        self.is_virtual() && !self.is_abstract()
    }

    /// Returns the instructions of the body, or an empty slice
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        self.body
            .as_ref()
            .map_or(&[], |body| body.instructions.as_slice())
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("signature", &self.signature.to_string())
            .field("flags_modifiers", &self.flags_modifiers)
            .field("has_body", &self.body.is_some())
            .finish_non_exhaustive()
    }
}
