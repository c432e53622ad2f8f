//! # dotscope-xref Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the dotscope-xref library. Import this module to get quick access to the essential
//! types for building a workspace and running queries against it.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotscope-xref operations
pub use crate::Error;

/// The result type used throughout dotscope-xref
pub use crate::Result;

// ================================================================================================
// Queries
// ================================================================================================

/// Main entry point and query configuration
pub use crate::analysis::{Analyzer, SearchConfig};

/// Cancellation
pub use crate::analysis::{Cancellable, CancellationToken};

/// Query targets and results
pub use crate::analysis::{
    FieldAccess, ResultLocation, SearchResults, Symbol, SymbolKind, UsageKind,
};

/// Extension points
pub use crate::analysis::{OriginalLocation, StateMachineLocator, TypeVisitor};

// ================================================================================================
// Metadata Graph
// ================================================================================================

/// Identities
pub use crate::metadata::{
    identity::{AssemblyIdentity, AssemblyVersion},
    token::{DefId, ModuleId, Token},
};

/// Signatures and references
pub use crate::metadata::{
    member::MemberReference,
    signatures::{GenericContext, MethodSig, TypeName, TypeSig},
};

/// Custom attributes
pub use crate::metadata::customattributes::{CustomAttribute, CustomAttributeArgument};

/// Definitions
pub use crate::metadata::{
    method::{Method, MethodAccessFlags, MethodModifiers, MethodRc},
    typesystem::{CilType, CilTypeRc, Field, FieldRc, Property, PropertyRc, TypeAttributes},
};

/// The module graph and its builders
pub use crate::metadata::workspace::{
    FieldBuilder, MethodBuilder, Module, ModuleBuilder, ModuleRc, PropertyBuilder, TypeBuilder,
    Workspace, WorkspaceBuilder,
};

// ================================================================================================
// Instructions
// ================================================================================================

/// Decoded instructions
pub use crate::assembly::{Instruction, OpCode, Operand};
