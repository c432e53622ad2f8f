use std::fmt;

use strum::{Display, IntoStaticStr};

use crate::metadata::{
    method::Method,
    token::{DefId, ModuleId},
};

/// How a result location uses the analyzed symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum UsageKind {
    /// A call-like instruction targets the symbol
    Call,
    /// A custom attribute application writes the symbol through a named argument
    AttributeApplication,
    /// The method implements the analyzed interface method
    Implementation,
    /// An instruction loads the field or its address
    FieldRead,
    /// An instruction stores to the field
    FieldWrite,
}

/// A code location reported by a query.
///
/// `owner` is the identity the location is deduplicated on: the method for code locations,
/// or the definition, module ([`crate::metadata::token::Token::MODULE`]) or assembly
/// ([`crate::metadata::token::Token::ASSEMBLY`]) carrying an attribute application.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultLocation {
    /// Module containing the location
    pub module: ModuleId,
    /// Type containing the location, if it is inside a type
    pub declaring_type: Option<DefId>,
    /// Member containing the location, if it is inside a member
    pub member: Option<DefId>,
    /// Identity of the location
    pub owner: DefId,
    /// Offset of the matching instruction; absent for attribute applications and for
    /// locations mapped back from compiler-generated code
    pub offset: Option<u32>,
    /// The kind of usage
    pub kind: UsageKind,
}

impl ResultLocation {
    /// A location inside a method
    #[must_use]
    pub fn in_method(method: &Method, offset: Option<u32>, kind: UsageKind) -> Self {
        Self {
            module: method.id.module,
            declaring_type: Some(method.declaring_type),
            member: Some(method.id),
            owner: method.id,
            offset,
            kind,
        }
    }
}

impl fmt::Display for ResultLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.owner)?;
        if let Some(offset) = self.offset {
            write!(f, " @IL_{offset:04x}")?;
        }
        Ok(())
    }
}
