//! Method attribute flags and the local variable handle.
//!
//! # Key Types
//! - [`MethodAccessFlags`], [`MethodModifiers`]: Attribute flags split out of the raw `MethodAttributes`
//! - [`LocalVariable`]: A slot of a method body's local variable signature

use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use bitflags::bitflags;

use crate::metadata::token::{ScopeId, Token};

/// Bitmask for `ACCESS` state extraction
pub const METHOD_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    /// Method access flags
    pub struct MethodAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessibly by anyone in the Assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MethodAccessFlags {
    /// Extract access flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & METHOD_ACCESS_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, depending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !METHOD_ACCESS_MASK)
    }
}

/// A vector that holds a list of `LocalVariable`
pub type LocalVariableList = Arc<boxcar::Vec<LocalVariableRc>>;
/// A reference to a `LocalVariable`
pub type LocalVariableRc = Arc<LocalVariable>;

/// Represents a local variable in a method body.
///
/// Local variables have no token of their own; they are identified by the method that declares
/// them (scope and token) and their slot in the local variable signature.
pub struct LocalVariable {
    /// The token space of the declaring method
    pub scope: ScopeId,
    /// Token of the declaring method
    pub method: Token,
    /// Slot within the local variable signature
    pub index: u16,
    /// Is passed by reference
    pub is_byref: bool,
    /// This variable is pinned
    pub is_pinned: bool,
}

impl LocalVariable {
    /// Create a new, plain (non-pinned, by-value) local variable
    ///
    /// ## Arguments
    /// * 'scope'  - The token space of the declaring method
    /// * 'method' - Token of the declaring method
    /// * 'index'  - Slot within the local variable signature
    pub fn new(scope: ScopeId, method: Token, index: u16) -> Self {
        LocalVariable {
            scope,
            method,
            index,
            is_byref: false,
            is_pinned: false,
        }
    }
}

impl PartialEq for LocalVariable {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.method == other.method && self.index == other.index
    }
}

impl Eq for LocalVariable {}

impl Hash for LocalVariable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scope.hash(state);
        self.method.hash(state);
        self.index.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_flags_ignore_modifier_bits() {
        let raw = 0x0006 | 0x0010 | 0x0800;
        assert_eq!(
            MethodAccessFlags::from_method_flags(raw),
            MethodAccessFlags::PUBLIC
        );
        assert_eq!(
            MethodModifiers::from_method_flags(raw),
            MethodModifiers::STATIC | MethodModifiers::SPECIAL_NAME
        );
    }

    #[test]
    fn local_identity_is_owner_and_slot() {
        let scope = ScopeId::next();
        let owner = Token::new(0x0600_0001);
        let other = Token::new(0x0600_0002);

        assert!(LocalVariable::new(scope, owner, 0) == LocalVariable::new(scope, owner, 0));
        assert!(LocalVariable::new(scope, owner, 0) != LocalVariable::new(scope, owner, 1));
        assert!(LocalVariable::new(scope, owner, 0) != LocalVariable::new(scope, other, 0));
    }

    #[test]
    fn locals_of_equal_slots_differ_across_scopes() {
        let owner = Token::new(0x0600_0001);
        let a = LocalVariable::new(ScopeId::next(), owner, 0);
        let b = LocalVariable::new(ScopeId::next(), owner, 0);

        assert!(a != b);
    }
}
