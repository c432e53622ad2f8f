//! CustomAttribute-specific types and data structures.
//!
//! This module contains the types used for representing custom attribute applications,
//! including argument values, named arguments, and the attribute type the application
//! constructs. Named arguments are what compilers emit for `[Attr(Prop = value)]`
//! syntax, which is the only place a pseudo-custom-attribute property is ever written.

use std::sync::Arc;

use crate::metadata::signatures::TypeSig;

/// A reference-counted pointer to a `CustomAttribute`
pub type CustomAttributeRc = Arc<CustomAttribute>;
/// A vector that holds a list of `CustomAttribute` instances for storage on parent objects
pub type CustomAttributeList = Arc<boxcar::Vec<CustomAttributeRc>>;

/// A custom attribute application on an assembly, module, type or member
#[derive(Debug, Clone)]
pub struct CustomAttribute {
    /// The attribute type, i.e. the declaring type of the constructor being invoked
    pub attribute_type: TypeSig,
    /// Fixed arguments from the constructor signature
    pub fixed_args: Vec<CustomAttributeArgument>,
    /// Named arguments (fields and properties)
    pub named_args: Vec<CustomAttributeNamedArgument>,
}

impl CustomAttribute {
    /// Creates an application of `attribute_type` without arguments
    #[must_use]
    pub fn new(attribute_type: TypeSig) -> Self {
        Self {
            attribute_type,
            fixed_args: Vec::new(),
            named_args: Vec::new(),
        }
    }

    /// Adds a fixed constructor argument
    #[must_use]
    pub fn with_fixed(mut self, value: CustomAttributeArgument) -> Self {
        self.fixed_args.push(value);
        self
    }

    /// Adds a named property assignment
    #[must_use]
    pub fn with_property(mut self, name: &str, value: CustomAttributeArgument) -> Self {
        self.named_args.push(CustomAttributeNamedArgument {
            is_field: false,
            name: name.to_string(),
            value,
        });
        self
    }

    /// Adds a named field assignment
    #[must_use]
    pub fn with_field(mut self, name: &str, value: CustomAttributeArgument) -> Self {
        self.named_args.push(CustomAttributeNamedArgument {
            is_field: true,
            name: name.to_string(),
            value,
        });
        self
    }

    /// Returns `true` if the application assigns the named property
    #[must_use]
    pub fn writes_property(&self, name: &str) -> bool {
        self.named_args
            .iter()
            .any(|arg| !arg.is_field && arg.name == name)
    }

    /// Returns `true` if the application assigns the named field
    #[must_use]
    pub fn writes_field(&self, name: &str) -> bool {
        self.named_args
            .iter()
            .any(|arg| arg.is_field && arg.name == name)
    }

    /// Returns the first fixed argument if it is a string
    #[must_use]
    pub fn first_string_arg(&self) -> Option<&str> {
        match self.fixed_args.first() {
            Some(CustomAttributeArgument::String(value)) => Some(value),
            _ => None,
        }
    }
}

/// Represents a single custom attribute argument value
#[derive(Debug, Clone, PartialEq)]
pub enum CustomAttributeArgument {
    /// Boolean value
    Bool(bool),
    /// Character value (16-bit Unicode)
    Char(char),
    /// Signed 32-bit integer
    I4(i32),
    /// Signed 64-bit integer
    I8(i64),
    /// 64-bit floating point
    R8(f64),
    /// UTF-8 string
    String(String),
    /// Type reference (as string)
    Type(String),
    /// Array of arguments
    Array(Vec<CustomAttributeArgument>),
    /// Enum value (base type + value)
    Enum(String, Box<CustomAttributeArgument>),
}

/// Represents a named argument (field or property) in a custom attribute
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttributeNamedArgument {
    /// Whether this is a field (true) or property (false)
    pub is_field: bool,
    /// Name of the field or property
    pub name: String,
    /// Value of the argument
    pub value: CustomAttributeArgument,
}
