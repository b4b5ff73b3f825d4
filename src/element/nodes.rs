use std::{
    fmt,
    hash::{Hash, Hasher},
};

use crate::{
    element::{Accept, Node},
    metadata::{
        assembly::AssemblyRc,
        members::{EventRc, FieldRc, ParamRc, PropertyRc},
        method::{LocalVariableRc, MethodRc, MethodRef},
        typesystem::{CilTypeRc, CilTypeRef},
    },
    visitor::Visitor,
    Result,
};

/// Generates a node type wrapping one handle.
///
/// Equality and hashing delegate to the handle, `accept` dispatches to `$visit`, and the node
/// converts into the matching [`Node`] variant.
macro_rules! node {
    (
        $(#[$meta:meta])*
        $name:ident($handle:ty) => $variant:ident, $visit:ident, |$h:ident| $describe:expr
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            handle: $handle,
        }

        impl $name {
            /// Wrap a handle
            #[must_use]
            pub fn new(handle: $handle) -> Self {
                Self { handle }
            }

            /// The wrapped handle
            #[must_use]
            pub fn handle(&self) -> &$handle {
                &self.handle
            }

            /// Unwrap into the handle
            #[must_use]
            pub fn into_handle(self) -> $handle {
                self.handle
            }
        }

        impl Accept for $name {
            fn accept<V: Visitor>(&self, visitor: V) -> Result<V> {
                visitor.$visit(self)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.handle == other.handle
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.handle.hash(state);
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let $h = &self.handle;
                write!(f, "{}({})", stringify!($variant), $describe)
            }
        }

        impl From<$handle> for $name {
            fn from(handle: $handle) -> Self {
                Self::new(handle)
            }
        }

        impl From<$name> for Node {
            fn from(node: $name) -> Self {
                Node::$variant(node)
            }
        }
    };
}

node! {
    /// An assembly; the default traversal descends into its types.
    AssemblyNode(AssemblyRc) => Assembly, visit_assembly, |h| format!("{} {}", h.name, h.version())
}

node! {
    /// A type; the default traversal descends into fields, constructors, properties, methods
    /// and events, in that order.
    TypeNode(CilTypeRc) => Type, visit_type, |h| h.fullname()
}

node! {
    /// A constructor or type initializer; the default traversal descends into parameters and
    /// local variables.
    ConstructorNode(MethodRc) => Constructor, visit_constructor, |h| format!("{} {}", h.token, h.name)
}

node! {
    /// A method; the default traversal descends into parameters and local variables.
    MethodNode(MethodRc) => Method, visit_method, |h| format!("{} {}", h.token, h.name)
}

node! {
    /// A property; the default traversal visits its getter, then its setter.
    PropertyNode(PropertyRc) => Property, visit_property, |h| format!("{} {}", h.token, h.name)
}

node! {
    /// A field (leaf)
    FieldNode(FieldRc) => Field, visit_field, |h| format!("{} {}", h.token, h.name)
}

node! {
    /// An event (leaf)
    EventNode(EventRc) => Event, visit_event, |h| format!("{} {}", h.token, h.name)
}

node! {
    /// A parameter (leaf)
    ParameterNode(ParamRc) => Parameter, visit_parameter, |h| format!("{} #{}", h.token, h.sequence)
}

node! {
    /// A local variable (leaf)
    LocalVariableNode(LocalVariableRc) => LocalVariable, visit_local_variable, |h| format!("{} [{}]", h.method, h.index)
}

impl TypeNode {
    /// Wrap the type behind a weak reference
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the referenced type has been dropped.
    pub fn from_ref(reference: &CilTypeRef) -> Result<Self> {
        reference
            .upgrade()
            .map(Self::new)
            .ok_or_else(|| invalid_argument!("handle", "type reference no longer resolves"))
    }
}

impl ConstructorNode {
    /// Wrap the constructor behind a weak reference
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the referenced method has been dropped.
    pub fn from_ref(reference: &MethodRef) -> Result<Self> {
        reference
            .upgrade()
            .map(Self::new)
            .ok_or_else(|| invalid_argument!("handle", "constructor reference no longer resolves"))
    }
}

impl MethodNode {
    /// Wrap the method behind a weak reference
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the referenced method has been dropped.
    pub fn from_ref(reference: &MethodRef) -> Result<Self> {
        reference
            .upgrade()
            .map(Self::new)
            .ok_or_else(|| invalid_argument!("handle", "method reference no longer resolves"))
    }
}
