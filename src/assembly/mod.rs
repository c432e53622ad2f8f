//! CIL instruction model consumed by the cross-reference visitors.
//!
//! Method bodies are handed to the analysis already decoded. Only the offset, the opcode class
//! and the operand matter here: the visitors look for call-like instructions and field
//! accesses whose member operand resolves to the analyzed definition.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use dotscope_xref::assembly::{Instruction, OpCode, Operand};
//! use dotscope_xref::metadata::member::MemberReference;
//! use dotscope_xref::metadata::signatures::{MethodSig, TypeSig};
//!
//! let target = MemberReference::method(
//!     TypeSig::class("Shapes", "Shapes", "Circle"),
//!     "ComputeArea",
//!     MethodSig::instance(TypeSig::R8, vec![]),
//! );
//! let call = Instruction::new(0x10, OpCode::Callvirt, Operand::Member(Arc::new(target)));
//!
//! assert!(call.call_target().is_some());
//! assert_eq!(call.opcode.to_string(), "callvirt");
//! ```

mod instruction;

pub use instruction::{FieldAccessKind, Instruction, OpCode, Operand};
