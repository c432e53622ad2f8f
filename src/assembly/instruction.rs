use std::fmt;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::metadata::{member::MemberReferenceRc, signatures::TypeSig};

/// CIL opcodes the cross-reference analysis distinguishes.
///
/// Opcodes that never carry a member operand are folded into [`OpCode::Other`]; the analysis
/// only needs to know whether an instruction is call-like, or reads or writes a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum OpCode {
    /// Direct call instruction (`call`)
    Call,
    /// Virtual call instruction (`callvirt`)
    Callvirt,
    /// Object construction (`newobj`)
    Newobj,
    /// Load function pointer (`ldftn`)
    Ldftn,
    /// Load virtual function pointer (`ldvirtftn`)
    Ldvirtftn,
    /// Jump to method (`jmp`)
    Jmp,
    /// Load instance field (`ldfld`)
    Ldfld,
    /// Load instance field address (`ldflda`)
    Ldflda,
    /// Store instance field (`stfld`)
    Stfld,
    /// Load static field (`ldsfld`)
    Ldsfld,
    /// Load static field address (`ldsflda`)
    Ldsflda,
    /// Store static field (`stsfld`)
    Stsfld,
    /// Load metadata token (`ldtoken`)
    Ldtoken,
    /// Load string literal (`ldstr`)
    Ldstr,
    /// Return from method (`ret`)
    Ret,
    /// Any other instruction
    Other,
}

/// How an instruction touches a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldAccessKind {
    /// The field value or address is loaded
    Read,
    /// The field is assigned
    Write,
}

impl OpCode {
    /// Returns `true` for instructions whose member operand names a method to invoke or
    /// whose address is taken.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(
            self,
            Self::Call | Self::Callvirt | Self::Newobj | Self::Ldftn | Self::Ldvirtftn | Self::Jmp
        )
    }

    /// Returns how the instruction accesses its field operand, if it is a field instruction
    #[must_use]
    pub const fn field_access(&self) -> Option<FieldAccessKind> {
        match self {
            Self::Ldfld | Self::Ldflda | Self::Ldsfld | Self::Ldsflda => {
                Some(FieldAccessKind::Read)
            }
            Self::Stfld | Self::Stsfld => Some(FieldAccessKind::Write),
            _ => None,
        }
    }
}

/// The operand of an instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No operand present
    None,
    /// Immediate integer value
    Immediate(i64),
    /// Branch target offset
    Target(u32),
    /// String literal
    String(String),
    /// Type reference (e.g. `box`, `castclass`, `ldtoken`)
    Type(TypeSig),
    /// Method or field reference, unresolved until matched
    Member(MemberReferenceRc),
}

/// A decoded CIL instruction, reduced to what cross-reference analysis needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Offset of the instruction within the method body
    pub offset: u32,
    /// The opcode
    pub opcode: OpCode,
    /// The operand data for this instruction
    pub operand: Operand,
}

impl Instruction {
    /// Creates a new instruction
    #[must_use]
    pub fn new(offset: u32, opcode: OpCode, operand: Operand) -> Self {
        Self {
            offset,
            opcode,
            operand,
        }
    }

    /// Returns the member operand, if present
    #[must_use]
    pub fn member(&self) -> Option<&MemberReferenceRc> {
        match &self.operand {
            Operand::Member(member) => Some(member),
            _ => None,
        }
    }

    /// Returns the member operand of a call-like instruction
    #[must_use]
    pub fn call_target(&self) -> Option<&MemberReferenceRc> {
        if self.opcode.is_call() {
            self.member()
        } else {
            None
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IL_{:04x}: {}", self.offset, self.opcode)?;
        match &self.operand {
            Operand::None => Ok(()),
            Operand::Immediate(value) => write!(f, " {value}"),
            Operand::Target(target) => write!(f, " IL_{target:04x}"),
            Operand::String(value) => write!(f, " \"{value}\""),
            Operand::Type(ty) => write!(f, " {ty}"),
            Operand::Member(member) => write!(f, " {member}"),
        }
    }
}
