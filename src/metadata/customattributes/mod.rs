//! Custom attribute applications in the metadata graph.
//!
//! Custom attributes matter to cross-reference analysis because compilers lower
//! `[Attr(Prop = value)]` into a named argument of the attribute blob rather than into a call to
//! the property setter. A setter can therefore be "used" without any instruction referencing
//! it, and attribute applications have to be scanned alongside method bodies.
//!
//! # Examples
//!
//! ```rust
//! use dotscope_xref::metadata::customattributes::{CustomAttribute, CustomAttributeArgument};
//! use dotscope_xref::metadata::signatures::TypeSig;
//!
//! let attribute = CustomAttribute::new(TypeSig::class("Lib", "Lib", "CustomAttribute"))
//!     .with_property("Name", CustomAttributeArgument::String("v".to_string()));
//!
//! assert!(attribute.writes_property("Name"));
//! assert!(!attribute.writes_field("Name"));
//! ```
//!
//! # References
//!
//! - ECMA-335 6th Edition, Partition II, Section 23.3 - Custom Attributes

mod types;

pub use types::*;

use std::sync::Arc;

/// Creates an empty, shareable attribute list
#[must_use]
pub fn empty_list() -> CustomAttributeList {
    Arc::new(boxcar::Vec::new())
}

/// Creates a shareable attribute list from applications
#[must_use]
pub fn list_from(attributes: Vec<CustomAttribute>) -> CustomAttributeList {
    let list = boxcar::Vec::new();
    for attribute in attributes {
        list.push(Arc::new(attribute));
    }
    Arc::new(list)
}
