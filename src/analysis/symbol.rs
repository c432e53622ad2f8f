//! Analysis targets.

use std::fmt;

use strum::{Display, IntoStaticStr};

use crate::metadata::{
    method::MethodRc,
    token::DefId,
    typesystem::{FieldRc, PropertyRc},
};

/// Kind of an analysis target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SymbolKind {
    /// A method
    Method,
    /// A property
    Property,
    /// A field
    Field,
}

/// The target of a query.
///
/// Holds the definition itself, so the declaring type and signature stay fixed for as long as
/// the query runs.
#[derive(Debug, Clone)]
pub enum Symbol {
    /// A method definition
    Method(MethodRc),
    /// A property definition
    Property(PropertyRc),
    /// A field definition
    Field(FieldRc),
}

impl Symbol {
    /// Identity of the target definition
    #[must_use]
    pub fn id(&self) -> DefId {
        match self {
            Symbol::Method(method) => method.id,
            Symbol::Property(property) => property.id,
            Symbol::Field(field) => field.id,
        }
    }

    /// Identity of the declaring type
    #[must_use]
    pub fn declaring_type(&self) -> DefId {
        match self {
            Symbol::Method(method) => method.declaring_type,
            Symbol::Property(property) => property.declaring_type,
            Symbol::Field(field) => field.declaring_type,
        }
    }

    /// Name of the target
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Symbol::Method(method) => &method.name,
            Symbol::Property(property) => &property.name,
            Symbol::Field(field) => &field.name,
        }
    }

    /// Kind of the target
    #[must_use]
    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Method(_) => SymbolKind::Method,
            Symbol::Property(_) => SymbolKind::Property,
            Symbol::Field(_) => SymbolKind::Field,
        }
    }

    /// Returns `true` if only the declaring assembly (and its friends) can reference the target.
    ///
    /// A property is assembly-bound when all of its accessors are.
    #[must_use]
    pub fn is_assembly_bound(&self) -> bool {
        match self {
            Symbol::Method(method) => method.flags_access.is_assembly_bound(),
            Symbol::Property(property) => {
                let accessors = property.accessors();
                !accessors.is_empty()
                    && accessors
                        .iter()
                        .all(|accessor| accessor.flags_access.is_assembly_bound())
            }
            Symbol::Field(field) => field.is_assembly_bound,
        }
    }
}

impl From<MethodRc> for Symbol {
    fn from(method: MethodRc) -> Self {
        Symbol::Method(method)
    }
}

impl From<PropertyRc> for Symbol {
    fn from(property: PropertyRc) -> Self {
        Symbol::Property(property)
    }
}

impl From<FieldRc> for Symbol {
    fn from(field: FieldRc) -> Self {
        Symbol::Field(field)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.kind(), self.name(), self.id())
    }
}
