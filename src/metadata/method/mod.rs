//! Method handles: methods, constructors and their bodies.
//!
//! Constructors are not a separate table in .NET metadata; they are `MethodDef` rows named
//! `.ctor` (instance) or `.cctor` (type initializer) carrying `RTSPECIAL_NAME`. Both kinds share
//! the [`Method`] handle here and are told apart by [`Method::is_constructor`].
//!
//! # Key Types
//! - [`Method`]: A method definition with parameters and an optional body
//! - [`MethodRef`]: Weak reference used by properties and events to point at their accessors
//! - [`MethodBody`]: The part of a body the traversal needs, namely its local variables

mod types;

use std::{
    hash::{Hash, Hasher},
    sync::{Arc, OnceLock, Weak},
};

pub use types::*;

use crate::metadata::{
    members::{ParamList, ParamRc},
    token::{ScopeId, Token},
};

/// A vector that holds a list of `Method`
pub type MethodList = Arc<boxcar::Vec<MethodRc>>;
/// A reference to a `Method`
pub type MethodRc = Arc<Method>;

/// Name of instance constructors
pub const CTOR_NAME: &str = ".ctor";
/// Name of type initializers
pub const CCTOR_NAME: &str = ".cctor";

/// A smart reference to a `Method` that handles weak references to prevent circular
/// reference memory leaks between properties/events and the methods of their declaring type
#[derive(Clone, Debug)]
pub struct MethodRef {
    weak_ref: Weak<Method>,
}

impl MethodRef {
    /// Create a new `MethodRef` from a strong reference
    pub fn new(strong_ref: &MethodRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the method, returning None if the method has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<MethodRc> {
        self.weak_ref.upgrade()
    }

    /// Check if the referenced method is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }

    /// Get the token of the referenced method (if still alive)
    ///
    /// Tokens are unique only within one [`ScopeId`], see [`MethodRef::points_to`] for an
    /// identity check.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.upgrade().map(|m| m.token)
    }

    /// Returns true if this reference resolves to `method`
    #[must_use]
    pub fn points_to(&self, method: &Method) -> bool {
        self.upgrade().is_some_and(|m| *m == *method)
    }
}

impl From<MethodRc> for MethodRef {
    fn from(strong_ref: MethodRc) -> Self {
        Self::new(&strong_ref)
    }
}

/// The parsed part of a method body
pub struct MethodBody {
    /// Maximum evaluation stack depth
    pub max_stack: usize,
    /// Locals are zero-initialized on entry
    pub init_locals: bool,
    /// The local variables, in signature order
    pub local_vars: LocalVariableList,
}

impl MethodBody {
    /// Create a body declaring `count` plain local variables for `method` of `scope`
    #[must_use]
    pub fn with_locals(scope: ScopeId, method: Token, count: u16) -> Self {
        let local_vars = boxcar::Vec::new();
        for index in 0..count {
            local_vars.push(Arc::new(LocalVariable::new(scope, method, index)));
        }

        MethodBody {
            max_stack: 8,
            init_locals: count > 0,
            local_vars: Arc::new(local_vars),
        }
    }
}

/// A method (or constructor) definition.
pub struct Method {
    /// The token space `token` was allocated in
    pub scope: ScopeId,
    /// Token
    pub token: Token,
    /// The method name
    pub name: String,
    /// Access flags
    pub flags_access: MethodAccessFlags,
    /// Modifier flags
    pub flags_modifiers: MethodModifiers,
    /// All `Param` rows, including the optional return value row (sequence 0)
    pub params: ParamList,
    /// The method body; never set for abstract, extern or runtime-implemented methods
    pub body: OnceLock<MethodBody>,
}

impl Method {
    /// Create a new `Method` without parameters or body
    ///
    /// ## Arguments
    /// * 'scope' - The token space of the owning assembly
    /// * 'token' - The `MethodDef` token
    /// * 'name'  - The method name
    /// * 'flags' - Raw `MethodAttributes`
    pub fn new(scope: ScopeId, token: Token, name: impl Into<String>, flags: u32) -> Self {
        Method {
            scope,
            token,
            name: name.into(),
            flags_access: MethodAccessFlags::from_method_flags(flags),
            flags_modifiers: MethodModifiers::from_method_flags(flags),
            params: Arc::new(boxcar::Vec::new()),
            body: OnceLock::new(),
        }
    }

    /// Returns true for instance constructors and type initializers
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.flags_modifiers
            .contains(MethodModifiers::RTSPECIAL_NAME)
            && (self.name == CTOR_NAME || self.name == CCTOR_NAME)
    }

    /// Returns true if the method does not provide an implementation
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags_modifiers.contains(MethodModifiers::ABSTRACT)
    }

    /// Returns true if the method is visible outside of its assembly
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags_access == MethodAccessFlags::PUBLIC
    }

    /// The declared parameters ordered by sequence, without the return value row
    #[must_use]
    pub fn parameters(&self) -> Vec<ParamRc> {
        let mut params: Vec<ParamRc> = self
            .params
            .iter()
            .filter(|(_, param)| !param.is_return())
            .map(|(_, param)| param.clone())
            .collect();
        params.sort_by_key(|param| param.sequence);
        params
    }

    /// The local variables of the body, or `None` if the method has no body to inspect
    #[must_use]
    pub fn local_variables(&self) -> Option<Vec<LocalVariableRc>> {
        self.body.get().map(|body| {
            body.local_vars
                .iter()
                .map(|(_, local)| local.clone())
                .collect()
        })
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.token == other.token
    }
}

impl Eq for Method {}

impl Hash for Method {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scope.hash(state);
        self.token.hash(state);
    }
}
