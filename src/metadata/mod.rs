//! Metadata graph consumed by the cross-reference analysis.
//!
//! This module contains the in-memory representation of loaded .NET modules: identities,
//! type and method signatures, member references, custom attributes, and the definitions
//! that make up a [`workspace::Workspace`]. Loading PE files is outside the crate; a loader
//! (or a test fixture) populates the graph through [`workspace::WorkspaceBuilder`].
//!
//! # Key Components
//!
//! - [`token`] - Metadata tokens and workspace-wide definition identities
//! - [`signatures`] - Structural type and method signatures with generic substitution
//! - [`member`] - Unresolved member references as found in operands
//! - [`typesystem`] - Type, field and property definitions
//! - [`method`] - Method definitions, flags and bodies
//! - [`workspace`] - The module graph with reference resolution
//!
//! # Examples
//!
//! ```rust
//! use dotscope_xref::metadata::signatures::{TypeName, TypeSig};
//!
//! let comparer = TypeSig::generic("System.Runtime", "System.Collections.Generic", "IComparer`1", vec![TypeSig::String]);
//! let name: &TypeName = comparer.type_name().unwrap();
//! assert_eq!(name.arity(), 1);
//! ```

/// Implementation of custom attribute applications
pub mod customattributes;
/// Implementation of the identity of an `Assembly`
pub mod identity;
/// Unresolved method and field references
pub mod member;
/// Method definitions and their bodies
pub mod method;
/// Implementation of method and type signatures
pub mod signatures;
/// Commonly used metadata token type
pub mod token;
/// Implementation of the .NET type system
pub mod typesystem;
/// The loaded module graph
pub mod workspace;
