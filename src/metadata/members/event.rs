use std::{
    hash::{Hash, Hasher},
    sync::{Arc, OnceLock},
};

use crate::metadata::{
    method::MethodRef,
    token::{ScopeId, Token},
};

/// A vector that holds a list of `Event`
pub type EventList = Arc<boxcar::Vec<EventRc>>;
/// A reference to an `Event`
pub type EventRc = Arc<Event>;

#[allow(non_snake_case)]
/// All possible flags for `EventAttributes`
pub mod EventAttributes {
    /// Event is special
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// CLI provides 'special' behavior, depending upon the name of the event
    pub const RTSPECIAL_NAME: u32 = 0x0400;
}

/// Represents an Event that a Type can have.
///
/// Events are leaves of the traversal; their add/remove methods are ordinary members of the
/// declaring type and are reached through the type's method list.
pub struct Event {
    /// The token space `token` was allocated in
    pub scope: ScopeId,
    /// Token
    pub token: Token,
    /// a 2-byte bitmask of type `EventAttributes`, §II.23.1.4
    pub flags: u32,
    /// The name of the event
    pub name: String,
    /// The `Method` that triggers '`OnAdd`'
    pub fn_on_add: OnceLock<MethodRef>,
    /// The `Method` that triggers '`OnRemove`'
    pub fn_on_remove: OnceLock<MethodRef>,
}

impl Event {
    /// Create a new `Event`
    pub fn new(scope: ScopeId, token: Token, name: impl Into<String>, flags: u32) -> Self {
        Event {
            scope,
            token,
            flags,
            name: name.into(),
            fn_on_add: OnceLock::new(),
            fn_on_remove: OnceLock::new(),
        }
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.token == other.token
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scope.hash(state);
        self.token.hash(state);
    }
}
