//! Nodes: typed, immutable wrappers around metadata handles.
//!
//! Every kind of metadata handle has a node type wrapping exactly one handle, e.g. [`TypeNode`]
//! around a [`CilTypeRc`](crate::metadata::typesystem::CilTypeRc). The closed [`Node`] enum unites
//! them with two structural variants: [`Node::Composite`], an ordered group of nodes acting as one,
//! and [`Node::Null`], the explicit "no node" value returned by tolerant classification.
//!
//! Nodes carry no behaviour beyond dispatch. [`Accept::accept`] hands the node to the one
//! [`Visitor`] operation matching its kind and returns whatever that operation returns; all
//! traversal logic lives in the visitor.
//!
//! # Identity
//!
//! A node is equal to another node of the same kind iff their handles are equal, and its hash is
//! the hash of its handle. Nodes are never mutated and hold no reference to a parent; children are
//! recomputed from the handle whenever a traversal asks for them.
//!
//! # Examples
//!
//! ```rust
//! use dotwalk::prelude::*;
//!
//! let assembly = AssemblyBuilder::new("Sample")
//!     .class("Sample", "Point", |t| t.field("x").field("y"))
//!     .build()?;
//!
//! let counter = AssemblyNode::new(assembly).accept(MemberCounter::new())?;
//! assert_eq!(counter.value().count(NodeKind::Field), 2);
//! # Ok::<(), dotwalk::Error>(())
//! ```

mod composite;
mod nodes;

use std::{
    any::Any,
    fmt,
    hash::{Hash, Hasher},
};

use strum::{Display, EnumCount, EnumIter};

pub use composite::Composite;
pub use nodes::{
    AssemblyNode, ConstructorNode, EventNode, FieldNode, LocalVariableNode, MethodNode,
    ParameterNode, PropertyNode, TypeNode,
};

use crate::{metadata::token::Token, visitor::Visitor, Result};

/// The kind of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumCount)]
pub enum NodeKind {
    /// An assembly
    Assembly,
    /// A type definition
    Type,
    /// An instance constructor or type initializer
    Constructor,
    /// A method, including property accessors
    Method,
    /// A property
    Property,
    /// A field
    Field,
    /// An event
    Event,
    /// A method or constructor parameter
    Parameter,
    /// A local variable of a method body
    LocalVariable,
    /// An ordered group of nodes
    Composite,
    /// The absence of a node
    Null,
}

impl NodeKind {
    /// Every kind that wraps a metadata handle, in classification priority order
    pub const HANDLES: [NodeKind; 9] = [
        NodeKind::Assembly,
        NodeKind::Type,
        NodeKind::Constructor,
        NodeKind::Method,
        NodeKind::Property,
        NodeKind::Field,
        NodeKind::Event,
        NodeKind::Parameter,
        NodeKind::LocalVariable,
    ];

    /// Returns true for the kinds that wrap a metadata handle
    #[must_use]
    pub fn wraps_handle(self) -> bool {
        !matches!(self, NodeKind::Composite | NodeKind::Null)
    }
}

/// Double dispatch entry point: hand `self` to the matching operation of a [`Visitor`].
pub trait Accept {
    /// Dispatch to the visitor and return its successor
    ///
    /// # Errors
    ///
    /// Returns whatever error the visitor (or the default traversal it falls back to) raises;
    /// the fold stops at the first error.
    fn accept<V: Visitor>(&self, visitor: V) -> Result<V>;
}

/// Any node.
#[derive(Clone)]
pub enum Node {
    /// See [`AssemblyNode`]
    Assembly(AssemblyNode),
    /// See [`TypeNode`]
    Type(TypeNode),
    /// See [`ConstructorNode`]
    Constructor(ConstructorNode),
    /// See [`MethodNode`]
    Method(MethodNode),
    /// See [`PropertyNode`]
    Property(PropertyNode),
    /// See [`FieldNode`]
    Field(FieldNode),
    /// See [`EventNode`]
    Event(EventNode),
    /// See [`ParameterNode`]
    Parameter(ParameterNode),
    /// See [`LocalVariableNode`]
    LocalVariable(LocalVariableNode),
    /// An ordered group of nodes, accepted one after the other
    Composite(Composite),
    /// No node; accepting it leaves the visitor untouched
    Null,
}

impl Node {
    /// The kind of this node
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Assembly(_) => NodeKind::Assembly,
            Node::Type(_) => NodeKind::Type,
            Node::Constructor(_) => NodeKind::Constructor,
            Node::Method(_) => NodeKind::Method,
            Node::Property(_) => NodeKind::Property,
            Node::Field(_) => NodeKind::Field,
            Node::Event(_) => NodeKind::Event,
            Node::Parameter(_) => NodeKind::Parameter,
            Node::LocalVariable(_) => NodeKind::LocalVariable,
            Node::Composite(_) => NodeKind::Composite,
            Node::Null => NodeKind::Null,
        }
    }

    /// Returns true for [`Node::Null`]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// The metadata token of the wrapped handle
    ///
    /// Local variables have no token of their own, structural nodes have no handle.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        match self {
            Node::Assembly(n) => Some(n.handle().token),
            Node::Type(n) => Some(n.handle().token),
            Node::Constructor(n) => Some(n.handle().token),
            Node::Method(n) => Some(n.handle().token),
            Node::Property(n) => Some(n.handle().token),
            Node::Field(n) => Some(n.handle().token),
            Node::Event(n) => Some(n.handle().token),
            Node::Parameter(n) => Some(n.handle().token),
            Node::LocalVariable(_) | Node::Composite(_) | Node::Null => None,
        }
    }

    /// The wrapped handle as a source object, suitable for refraction
    ///
    /// Feeding the returned values back into a refraction reproduces an equal node.
    #[must_use]
    pub fn as_source(&self) -> Option<&dyn Any> {
        match self {
            Node::Assembly(n) => Some(n.handle() as &dyn Any),
            Node::Type(n) => Some(n.handle() as &dyn Any),
            Node::Constructor(n) => Some(n.handle() as &dyn Any),
            Node::Method(n) => Some(n.handle() as &dyn Any),
            Node::Property(n) => Some(n.handle() as &dyn Any),
            Node::Field(n) => Some(n.handle() as &dyn Any),
            Node::Event(n) => Some(n.handle() as &dyn Any),
            Node::Parameter(n) => Some(n.handle() as &dyn Any),
            Node::LocalVariable(n) => Some(n.handle() as &dyn Any),
            Node::Composite(_) | Node::Null => None,
        }
    }
}

impl Accept for Node {
    fn accept<V: Visitor>(&self, visitor: V) -> Result<V> {
        match self {
            Node::Assembly(n) => visitor.visit_assembly(n),
            Node::Type(n) => visitor.visit_type(n),
            Node::Constructor(n) => visitor.visit_constructor(n),
            Node::Method(n) => visitor.visit_method(n),
            Node::Property(n) => visitor.visit_property(n),
            Node::Field(n) => visitor.visit_field(n),
            Node::Event(n) => visitor.visit_event(n),
            Node::Parameter(n) => visitor.visit_parameter(n),
            Node::LocalVariable(n) => visitor.visit_local_variable(n),
            Node::Composite(c) => c.accept(visitor),
            Node::Null => Ok(visitor),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Assembly(a), Node::Assembly(b)) => a == b,
            (Node::Type(a), Node::Type(b)) => a == b,
            (Node::Constructor(a), Node::Constructor(b)) => a == b,
            (Node::Method(a), Node::Method(b)) => a == b,
            (Node::Property(a), Node::Property(b)) => a == b,
            (Node::Field(a), Node::Field(b)) => a == b,
            (Node::Event(a), Node::Event(b)) => a == b,
            (Node::Parameter(a), Node::Parameter(b)) => a == b,
            (Node::LocalVariable(a), Node::LocalVariable(b)) => a == b,
            (Node::Composite(a), Node::Composite(b)) => a.ptr_eq(b),
            (Node::Null, Node::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Node::Assembly(n) => n.hash(state),
            Node::Type(n) => n.hash(state),
            Node::Constructor(n) => n.hash(state),
            Node::Method(n) => n.hash(state),
            Node::Property(n) => n.hash(state),
            Node::Field(n) => n.hash(state),
            Node::Event(n) => n.hash(state),
            Node::Parameter(n) => n.hash(state),
            Node::LocalVariable(n) => n.hash(state),
            Node::Composite(c) => c.hash(state),
            Node::Null => 0u8.hash(state),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Assembly(n) => n.fmt(f),
            Node::Type(n) => n.fmt(f),
            Node::Constructor(n) => n.fmt(f),
            Node::Method(n) => n.fmt(f),
            Node::Property(n) => n.fmt(f),
            Node::Field(n) => n.fmt(f),
            Node::Event(n) => n.fmt(f),
            Node::Parameter(n) => n.fmt(f),
            Node::LocalVariable(n) => n.fmt(f),
            Node::Composite(c) => c.fmt(f),
            Node::Null => f.write_str("Null"),
        }
    }
}

impl From<Composite> for Node {
    fn from(composite: Composite) -> Self {
        Node::Composite(composite)
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Node::Composite(Composite::new(nodes))
    }
}
