//! Cross-reference ("where-used") analysis.
//!
//! Given a declared member, the analysis finds the code locations elsewhere in the workspace
//! that reference it. Three pieces compose, leaves first:
//!
//! - [`ScopeResolver`] decides which modules could reference the target at all
//! - [`SearchEngine`] walks the types of those modules and merges per-type results into one
//!   lazy, cancellable [`SearchResults`] sequence, optionally fanned out over rayon
//! - Query visitors implement [`TypeVisitor`] and own the matching logic and the per-query
//!   deduplication state: [`UsedByVisitor`], [`ImplementedByVisitor`] and
//!   [`FieldAccessVisitor`]
//!
//! [`Analyzer`] ties them together behind one entry point per query kind.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use dotscope_xref::prelude::*;
//!
//! let shapes = AssemblyIdentity::new("Shapes", AssemblyVersion::new(1, 0, 0, 0));
//! let area = MemberReference::method(
//!     TypeSig::class("Shapes", "Shapes", "IShape"),
//!     "Area",
//!     MethodSig::instance(TypeSig::R8, vec![]),
//! );
//! let workspace = WorkspaceBuilder::new()
//!     .module(
//!         ModuleBuilder::new("Shapes.dll", shapes)
//!             .ty(TypeBuilder::interface("Shapes", "IShape")
//!                 .method(MethodBuilder::new("Area").abstract_method().returns(TypeSig::R8)))
//!             .ty(TypeBuilder::class("Shapes", "Circle")
//!                 .implements(TypeSig::class("Shapes", "Shapes", "IShape"))
//!                 .method(MethodBuilder::new("ComputeArea")
//!                     .virtual_method()
//!                     .returns(TypeSig::R8)
//!                     .overrides(area))),
//!     )
//!     .build()?;
//!
//! let analyzer = Analyzer::with_config(Arc::new(workspace), SearchConfig::sequential());
//! let target = analyzer.workspace().find_method("Shapes", "Shapes.IShape", "Area")?;
//! let found = analyzer.implemented_by(&target, &CancellationToken::new())?.locations()?;
//!
//! let circle_area = analyzer.workspace().find_method("Shapes", "Shapes.Circle", "ComputeArea")?;
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].member, Some(circle_area.id));
//! # Ok::<(), dotscope_xref::Error>(())
//! ```

mod analyzer;
mod attributes;
mod cancel;
mod config;
mod fieldaccess;
mod implementedby;
mod locator;
mod result;
mod scope;
mod search;
mod symbol;
mod usedby;
mod visited;

pub use analyzer::Analyzer;
pub use attributes::AttributeScanner;
pub use cancel::{Cancellable, CancellationToken};
pub use config::SearchConfig;
pub use fieldaccess::{FieldAccess, FieldAccessVisitor};
pub use implementedby::ImplementedByVisitor;
pub use locator::{IdentityLocator, OriginalLocation, StateMachineLocator};
pub use result::{ResultLocation, UsageKind};
pub use scope::{ScopeResolver, PSEUDO_CUSTOM_ATTRIBUTES};
pub use search::{QueryKind, SearchEngine, SearchResults, TypeVisitor, VisitorChain};
pub use symbol::{Symbol, SymbolKind};
pub use usedby::UsedByVisitor;
pub use visited::VisitedSet;
