use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::metadata::token::{ScopeId, Token};

/// A vector that holds a list of `Field`
pub type FieldList = Arc<boxcar::Vec<FieldRc>>;
/// A reference to a field
pub type FieldRc = Arc<Field>;

#[allow(non_snake_case)]
/// The subset of `FieldAttributes` the handle model understands
pub mod FieldAttributes {
    /// These 3 bits contain one of the following values:
    pub const FIELD_ACCESS_MASK: u32 = 0x0007;
    /// Accessible only by the parent type
    pub const PRIVATE: u32 = 0x0001;
    /// Accessibly by anyone in the Assembly
    pub const ASSEMBLY: u32 = 0x0003;
    /// Accessible only by type and sub-types
    pub const FAMILY: u32 = 0x0004;
    /// Accessibly by anyone who has visibility to this scope
    pub const PUBLIC: u32 = 0x0006;
    /// Defined on type, else per instance
    pub const STATIC: u32 = 0x0010;
    /// Field can only be initialized, not written to after init
    pub const INIT_ONLY: u32 = 0x0020;
    /// Value is compile time constant
    pub const LITERAL: u32 = 0x0040;
}

/// A field declared by a type.
pub struct Field {
    /// The token space `token` was allocated in
    pub scope: ScopeId,
    /// Token
    pub token: Token,
    /// a 2-byte bitmask of type `FieldAttributes`, §II.23.1.5
    pub flags: u32,
    /// The name of the field
    pub name: String,
}

impl Field {
    /// Create a new `Field`
    ///
    /// ## Arguments
    /// * 'scope' - The token space of the owning assembly
    /// * 'token' - The `Field` table token
    /// * 'name'  - The field name
    /// * 'flags' - Raw `FieldAttributes`
    pub fn new(scope: ScopeId, token: Token, name: impl Into<String>, flags: u32) -> Self {
        Field {
            scope,
            token,
            flags,
            name: name.into(),
        }
    }

    /// Returns true if the field is declared `static`
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags & FieldAttributes::STATIC != 0
    }

    /// Returns true if the field is visible outside of its assembly
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags & FieldAttributes::FIELD_ACCESS_MASK == FieldAttributes::PUBLIC
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.token == other.token
    }
}

impl Eq for Field {}

impl Hash for Field {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scope.hash(state);
        self.token.hash(state);
    }
}
