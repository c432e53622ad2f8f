//! Structural signatures of types and methods.
//!
//! Signatures are the currency of cross-reference matching: instruction operands, explicit
//! override entries and interface references all name their targets through a [`TypeSig`] or
//! [`MethodSig`]. Matching across generic instantiations is done by substituting generic
//! parameters with an explicit [`GenericContext`] and then comparing shapes structurally.
//!
//! # Examples
//!
//! ```rust
//! use dotscope_xref::metadata::signatures::{GenericContext, MethodSig, TypeSig};
//!
//! // int Compare(T x, T y) as declared on IComparer<T>
//! let open = MethodSig::instance(
//!     TypeSig::I4,
//!     vec![TypeSig::GenericParamType(0), TypeSig::GenericParamType(0)],
//! );
//!
//! // ... seen through IComparer<string>
//! let closed = open.substitute(&GenericContext::for_type(vec![TypeSig::String]));
//! assert!(closed.matches(&MethodSig::instance(
//!     TypeSig::I4,
//!     vec![TypeSig::String, TypeSig::String],
//! )));
//! ```

mod types;

pub use types::{GenericContext, MethodSig, TypeName, TypeSig};
