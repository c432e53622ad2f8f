//! Workspace fixtures shared by the unit tests.
//!
//! Each factory builds a small, self-contained module graph through the public builders.
//! The type and method order inside a module is significant: tests compare result sequences
//! against it.

mod attributes;
mod generics;
mod scoping;
mod shapes;
mod statemachines;

pub use attributes::attribute_workspace;
pub use generics::{comparer_workspace, generic_collection_workspace};
pub use scoping::{layered_workspace, many_types_workspace, pseudo_attribute_workspace};
pub use shapes::shapes_workspace;
pub use statemachines::{async_workspace, cyclic_workspace};
