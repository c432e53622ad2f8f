//! Metadata tokens and workspace-wide definition identities.
//!
//! A [`Token`] addresses a row within one module; [`DefId`] pairs it with the [`ModuleId`] so
//! that definitions from different modules never collide.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A metadata token representing a reference to a metadata table entry.
///
/// Tokens in .NET metadata consist of a 32-bit value where:
/// - The high byte (bits 24-31) indicates the table type
/// - The low 24 bits (bits 0-23) indicate the row index within that table
///
/// Tokens are only unique within a single module. Use [`DefId`] to identify a
/// definition across the whole workspace.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token(pub u32);

impl Token {
    /// Table id of the `Module` table
    pub const TABLE_MODULE: u8 = 0x00;
    /// Table id of the `TypeDef` table
    pub const TABLE_TYPEDEF: u8 = 0x02;
    /// Table id of the `Field` table
    pub const TABLE_FIELD: u8 = 0x04;
    /// Table id of the `MethodDef` table
    pub const TABLE_METHODDEF: u8 = 0x06;
    /// Table id of the `Property` table
    pub const TABLE_PROPERTY: u8 = 0x17;
    /// Table id of the `Assembly` table
    pub const TABLE_ASSEMBLY: u8 = 0x20;

    /// The token of the single row in the `Module` table
    pub const MODULE: Token = Token(0x0000_0001);
    /// The token of the single row in the `Assembly` table
    pub const ASSEMBLY: Token = Token(0x2000_0001);

    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a token from a table id and a 1-based row index
    #[must_use]
    pub const fn from_parts(table: u8, row: u32) -> Self {
        Token(((table as u32) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table type from the token (high byte)
    #[must_use]
    pub const fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if this token points into the `MethodDef` table
    #[must_use]
    pub const fn is_method(&self) -> bool {
        self.table() == Self::TABLE_METHODDEF
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Index of a module inside a [`crate::metadata::workspace::Workspace`], in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(pub u32);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module#{}", self.0)
    }
}

/// Workspace-wide identity of a definition: the owning module plus the definition's token.
///
/// Every type, method, field and property definition has exactly one `DefId`. Modules and
/// assemblies are addressed with [`Token::MODULE`] and [`Token::ASSEMBLY`], which lets
/// attribute owners of every kind share one identity space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DefId {
    /// The module that declares the definition
    pub module: ModuleId,
    /// The definition's token within that module
    pub token: Token,
}

impl DefId {
    /// Creates a new definition identity
    #[must_use]
    pub const fn new(module: ModuleId, token: Token) -> Self {
        DefId { module, token }
    }
}

impl fmt::Display for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.token)
    }
}
