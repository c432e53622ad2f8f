// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # dotscope-xref
//!
//! A cross-reference ("where-used") analysis engine for .NET metadata. Given a declared
//! method, property or field, `dotscope-xref` finds the code locations elsewhere in a set of
//! loaded modules that reference it, accounting for virtual overrides, explicit interface
//! implementation, generic substitution and compiler-synthesized attribute property writes.
//!
//! ## Features
//!
//! - **🔍 Used-by** - Call sites of a method, with state machine bodies mapped back to the
//!   method the user wrote
//! - **🧩 Implemented-by** - Concrete implementations of an interface method, explicit and
//!   implicit, through generic base chains
//! - **🏷️ Attribute writes** - `[Attr(Prop = value)]` applications found as setter usages
//! - **📦 Scoped** - Only modules that can observe the declaring assembly are scanned
//! - **⚡ Lazy and parallel** - Results stream out of a bounded channel fed by rayon workers
//! - **🛑 Cancellable** - Searches stop before the next type once cancelled
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use dotscope_xref::prelude::*;
//!
//! let describe = MemberReference::method(
//!     TypeSig::class("Shapes", "Shapes", "Shape"),
//!     "Describe",
//!     MethodSig::instance(TypeSig::String, vec![]),
//! );
//! let workspace = WorkspaceBuilder::new()
//!     .module(
//!         ModuleBuilder::new("Shapes.dll", AssemblyIdentity::new("Shapes", AssemblyVersion::new(1, 0, 0, 0)))
//!             .ty(TypeBuilder::class("Shapes", "Shape")
//!                 .method(MethodBuilder::new("Describe").returns(TypeSig::String).ret()))
//!             .ty(TypeBuilder::class("Shapes", "Printer")
//!                 .method(MethodBuilder::new("Print")
//!                     .call(OpCode::Callvirt, describe)
//!                     .ret())),
//!     )
//!     .build()?;
//!
//! let analyzer = Analyzer::new(Arc::new(workspace));
//! let target = analyzer.workspace().find_method("Shapes", "Shapes.Shape", "Describe")?;
//! for location in analyzer.used_by(&target, false, &CancellationToken::new())? {
//!     println!("{}", location?);
//! }
//! # Ok::<(), dotscope_xref::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - The read-only module graph: identities, signatures, definitions and the
//!   [`metadata::workspace::Workspace`] with on-demand reference resolution
//! - [`assembly`] - The decoded instruction model the visitors scan
//! - [`analysis`] - Scope resolution, the search engine and the query visitors
//! - [`Error`] and [`Result`] - Error handling
//!
//! Loading PE files is not part of this crate. A loader populates the graph through
//! [`metadata::workspace::WorkspaceBuilder`].
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: query start and end at `debug`, every visited
//! type at `trace`, and locally recovered graph damage (unresolvable base types, inheritance
//! or kickoff cycles) at `warn`. No logger is installed by the library.
#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use dotscope_xref::prelude::*;
///
/// let config = SearchConfig::sequential();
/// assert!(!config.parallel);
/// ```
pub mod prelude;

/// Decoded CIL instructions as consumed by the analysis
pub mod assembly;

/// The metadata graph of loaded modules.
///
/// # Key Components
///
/// - [`metadata::workspace`] - The module graph, its builders and reference resolution
/// - [`metadata::typesystem`] - Type, field and property definitions
/// - [`metadata::method`] - Method definitions and bodies
/// - [`metadata::signatures`] - Structural signatures and generic substitution
/// - [`metadata::token`] - Metadata tokens and workspace-wide identities
pub mod metadata;

/// Cross-reference queries: used-by, implemented-by and field access
pub mod analysis;

/// `dotscope-xref` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `dotscope-xref` Error type
///
/// The main error type for all operations in this crate. Empty results and cancellation are
/// not errors.
///
/// # Examples
///
/// ```rust,ignore
/// use dotscope_xref::Error;
///
/// match analyzer.implemented_by(&method, &CancellationToken::new()) {
///     Ok(results) => println!("{} implementations", results.count()),
///     Err(Error::InvalidQuery(reason)) => println!("Rejected: {}", reason),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Main entry point for cross-reference queries.
///
/// See [`analysis::Analyzer`].
pub use analysis::{Analyzer, CancellationToken, SearchConfig};
