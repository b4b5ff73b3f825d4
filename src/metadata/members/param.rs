use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::metadata::token::{ScopeId, Token};

/// A vector that holds a list of `Param`
pub type ParamList = Arc<boxcar::Vec<ParamRc>>;
/// A reference to a `Param`
pub type ParamRc = Arc<Param>;

#[allow(non_snake_case)]
/// All possible flags for `ParamAttributes`
pub mod ParamAttributes {
    /// Param is `In`
    pub const IN: u32 = 0x0001;
    /// Param is `out`
    pub const OUT: u32 = 0x0002;
    /// Param is optional
    pub const OPTIONAL: u32 = 0x0010;
    /// Param has default value
    pub const HAS_DEFAULT: u32 = 0x1000;
}

/// A parameter of a method or constructor.
pub struct Param {
    /// The token space `token` was allocated in
    pub scope: ScopeId,
    /// Token
    pub token: Token,
    /// bitmask of `ParamAttributes`, §II.23.1.13
    pub flags: u32,
    /// The sequence number (0 for return value)
    pub sequence: u32,
    /// The parameter name
    pub name: Option<String>,
}

impl Param {
    /// Create a new `Param`
    ///
    /// ## Arguments
    /// * 'scope'    - The token space of the owning assembly
    /// * 'token'    - The `Param` table token
    /// * 'sequence' - Position in the signature, 0 being the return value
    /// * 'name'     - Optional parameter name
    /// * 'flags'    - Raw `ParamAttributes`
    pub fn new(
        scope: ScopeId,
        token: Token,
        sequence: u32,
        name: Option<String>,
        flags: u32,
    ) -> Self {
        Param {
            scope,
            token,
            flags,
            sequence,
            name,
        }
    }

    /// Returns true if this row describes the return value rather than a declared parameter
    #[must_use]
    pub fn is_return(&self) -> bool {
        self.sequence == 0
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.token == other.token
    }
}

impl Eq for Param {}

impl Hash for Param {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scope.hash(state);
        self.token.hash(state);
    }
}
