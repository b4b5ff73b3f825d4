use std::{
    hash::{Hash, Hasher},
    sync::{Arc, OnceLock},
};

use crate::metadata::{
    method::{Method, MethodRef},
    token::{ScopeId, Token},
};

/// A vector that holds a list of `Property`
pub type PropertyList = Arc<boxcar::Vec<PropertyRc>>;
/// A reference to a `Property`
pub type PropertyRc = Arc<Property>;

#[allow(non_snake_case)]
/// All possible flags for `PropertyAttributes`
pub mod PropertyAttributes {
    /// Property is special
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// Runtime (metadata internal APIs) should check name encoding
    pub const RT_SPECIAL_NAME: u32 = 0x0400;
    /// Property has default
    pub const HAS_DEFAULT: u32 = 0x1000;
}

/// A property declared by a type, together with its accessor methods.
///
/// Accessors are weak references into the owning type's method list; a property can have a
/// getter, a setter, both, or (in hand-crafted metadata) neither.
pub struct Property {
    /// The token space `token` was allocated in
    pub scope: ScopeId,
    /// Token
    pub token: Token,
    /// a 2-byte bitmask of type `PropertyAttributes`, §II.23.1.14
    pub flags: u32,
    /// The name of this property
    pub name: String,
    /// The `Method` that sets this property
    pub fn_setter: OnceLock<MethodRef>,
    /// The `Method` that retrieves this property
    pub fn_getter: OnceLock<MethodRef>,
}

impl Property {
    /// Create a new `Property` without accessors
    ///
    /// ## Arguments
    /// * 'scope' - The token space of the owning assembly
    /// * 'token' - The `Property` table token
    /// * 'name'  - The property name
    /// * 'flags' - Raw `PropertyAttributes`
    pub fn new(scope: ScopeId, token: Token, name: impl Into<String>, flags: u32) -> Self {
        Property {
            scope,
            token,
            flags,
            name: name.into(),
            fn_setter: OnceLock::new(),
            fn_getter: OnceLock::new(),
        }
    }

    /// The get-accessor, if the property has one
    #[must_use]
    pub fn getter(&self) -> Option<&MethodRef> {
        self.fn_getter.get()
    }

    /// The set-accessor, if the property has one
    #[must_use]
    pub fn setter(&self) -> Option<&MethodRef> {
        self.fn_setter.get()
    }

    /// Returns true if `method` is one of this property's accessors
    #[must_use]
    pub fn is_accessor(&self, method: &Method) -> bool {
        self.getter().is_some_and(|m| m.points_to(method))
            || self.setter().is_some_and(|m| m.points_to(method))
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.token == other.token
    }
}

impl Eq for Property {}

impl Hash for Property {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scope.hash(state);
        self.token.hash(state);
    }
}
