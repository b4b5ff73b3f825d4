//! Type handles.
//!
//! A [`CilType`] is the hub of the handle model: it owns the member lists the traversal descends
//! into. Member lists are append-only (`boxcar`) so that a type can be shared across threads while
//! it is still being populated by a loader or the [`TypeBuilder`].
//!
//! # Key Components
//!
//! - [`CilType`]: A type definition with its fields, methods, properties and events
//! - [`CilTypeRef`]: Weak reference to a type
//! - [`TypeBuilder`]: Fluent construction of a type and its members

mod builder;

use std::{
    collections::HashSet,
    hash::{Hash, Hasher},
    sync::{Arc, Weak},
};

pub use builder::{MethodBuilder, RowAllocator, TypeBuilder};

use crate::metadata::{
    members::{EventList, EventRc, FieldList, FieldRc, PropertyList, PropertyRc},
    method::{MethodList, MethodRc},
    token::{ScopeId, Token},
};

/// A vector that holds a list of `CilType`
pub type CilTypeList = Arc<boxcar::Vec<CilTypeRc>>;
/// Reference to a `CilType`
pub type CilTypeRc = Arc<CilType>;

/// A smart reference to a `CilType` that automatically handles weak references
/// to prevent circular reference memory leaks while providing a clean API
#[derive(Clone, Debug)]
pub struct CilTypeRef {
    weak_ref: Weak<CilType>,
}

impl CilTypeRef {
    /// Create a new `CilTypeRef` from a strong reference
    pub fn new(strong_ref: &CilTypeRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the type, returning None if the type has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<CilTypeRc> {
        self.weak_ref.upgrade()
    }

    /// Check if the referenced type is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }
}

impl From<CilTypeRc> for CilTypeRef {
    fn from(strong_ref: CilTypeRc) -> Self {
        Self::new(&strong_ref)
    }
}

/// A type definition, the unit an assembly is made of.
pub struct CilType {
    /// The token space `token` was allocated in
    pub scope: ScopeId,
    /// Token
    pub token: Token,
    /// `TypeNamespace` (can be empty, e.g. for artificial `<module>` (globals) )
    pub namespace: String,
    /// `TypeName`
    pub name: String,
    /// Flags (a 4-byte bitmask of type `TypeAttributes`, §II.23.1.15)
    pub flags: u32,
    /// All fields this type has
    pub fields: FieldList,
    /// All methods this type has, constructors and accessors included
    pub methods: MethodList,
    /// All properties this type has
    pub properties: PropertyList,
    /// All events this type has
    pub events: EventList,
}

impl CilType {
    /// Create a new instance of a `CilType` with empty member lists
    pub fn new(scope: ScopeId, token: Token, namespace: String, name: String, flags: u32) -> Self {
        CilType {
            scope,
            token,
            namespace,
            name,
            flags,
            fields: Arc::new(boxcar::Vec::new()),
            methods: Arc::new(boxcar::Vec::new()),
            properties: Arc::new(boxcar::Vec::new()),
            events: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Returns the full name (Namespace.Name) of the entity
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{0}.{1}", self.namespace, self.name)
        }
    }

    /// The declared fields, in declaration order
    #[must_use]
    pub fn declared_fields(&self) -> Vec<FieldRc> {
        self.fields.iter().map(|(_, f)| f.clone()).collect()
    }

    /// The declared properties, in declaration order
    #[must_use]
    pub fn declared_properties(&self) -> Vec<PropertyRc> {
        self.properties.iter().map(|(_, p)| p.clone()).collect()
    }

    /// The declared events, in declaration order
    #[must_use]
    pub fn declared_events(&self) -> Vec<EventRc> {
        self.events.iter().map(|(_, e)| e.clone()).collect()
    }

    /// The instance constructors and type initializer, in declaration order
    #[must_use]
    pub fn constructors(&self) -> Vec<MethodRc> {
        self.methods
            .iter()
            .filter(|(_, m)| m.is_constructor())
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// The tokens of every get/set accessor of this type's properties
    ///
    /// Accessors are methods of this type, so they share its [`ScopeId`].
    #[must_use]
    pub fn property_accessors(&self) -> HashSet<Token> {
        let mut accessors = HashSet::new();
        for (_, property) in self.properties.iter() {
            if let Some(token) = property.getter().and_then(|m| m.token()) {
                accessors.insert(token);
            }
            if let Some(token) = property.setter().and_then(|m| m.token()) {
                accessors.insert(token);
            }
        }
        accessors
    }

    /// The ordinary methods, in declaration order
    ///
    /// Constructors and property accessors are excluded: the former are reported by
    /// [`CilType::constructors`], the latter are reached through their property.
    #[must_use]
    pub fn plain_methods(&self) -> Vec<MethodRc> {
        let accessors = self.property_accessors();
        self.methods
            .iter()
            .filter(|(_, m)| !m.is_constructor() && !accessors.contains(&m.token))
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl PartialEq for CilType {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.token == other.token
    }
}

impl Eq for CilType {}

impl Hash for CilType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scope.hash(state);
        self.token.hash(state);
    }
}
