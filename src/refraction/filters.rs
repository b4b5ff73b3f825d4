use std::any::Any;

use crate::{
    element::{
        AssemblyNode, ConstructorNode, EventNode, FieldNode, LocalVariableNode, MethodNode, Node,
        NodeKind, ParameterNode, PropertyNode, TypeNode,
    },
    metadata::{
        assembly::AssemblyRc,
        members::{EventRc, FieldRc, ParamRc, PropertyRc},
        method::{LocalVariableRc, MethodRc, MethodRef},
        typesystem::{CilTypeRc, CilTypeRef},
    },
    refraction::Refraction,
};

/// Generates a unit struct implementing [`Refraction`] for one node kind.
macro_rules! refraction {
    (
        $(#[$meta:meta])*
        $name:ident => $kind:ident, |$source:ident| $body:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Refraction for $name {
            fn kind(&self) -> NodeKind {
                NodeKind::$kind
            }

            fn refract(&self, $source: &dyn Any) -> Option<Node> {
                $body
            }
        }
    };
}

fn type_handle(source: &dyn Any) -> Option<CilTypeRc> {
    if let Some(handle) = source.downcast_ref::<CilTypeRc>() {
        return Some(handle.clone());
    }
    source.downcast_ref::<CilTypeRef>().and_then(CilTypeRef::upgrade)
}

fn method_handle(source: &dyn Any) -> Option<MethodRc> {
    if let Some(handle) = source.downcast_ref::<MethodRc>() {
        return Some(handle.clone());
    }
    source.downcast_ref::<MethodRef>().and_then(MethodRef::upgrade)
}

refraction! {
    /// Matches [`AssemblyRc`] handles
    AssemblyRefraction => Assembly, |source| {
        source
            .downcast_ref::<AssemblyRc>()
            .map(|h| AssemblyNode::new(h.clone()).into())
    }
}

refraction! {
    /// Matches [`CilTypeRc`] handles and live [`CilTypeRef`]s
    TypeRefraction => Type, |source| {
        type_handle(source).map(|h| TypeNode::new(h).into())
    }
}

refraction! {
    /// Matches [`MethodRc`] handles and live [`MethodRef`]s of constructors
    ConstructorRefraction => Constructor, |source| {
        method_handle(source)
            .filter(|h| h.is_constructor())
            .map(|h| ConstructorNode::new(h).into())
    }
}

refraction! {
    /// Matches [`MethodRc`] handles and live [`MethodRef`]s of everything but constructors
    MethodRefraction => Method, |source| {
        method_handle(source)
            .filter(|h| !h.is_constructor())
            .map(|h| MethodNode::new(h).into())
    }
}

refraction! {
    /// Matches [`PropertyRc`] handles
    PropertyRefraction => Property, |source| {
        source
            .downcast_ref::<PropertyRc>()
            .map(|h| PropertyNode::new(h.clone()).into())
    }
}

refraction! {
    /// Matches [`FieldRc`] handles
    FieldRefraction => Field, |source| {
        source
            .downcast_ref::<FieldRc>()
            .map(|h| FieldNode::new(h.clone()).into())
    }
}

refraction! {
    /// Matches [`EventRc`] handles
    EventRefraction => Event, |source| {
        source
            .downcast_ref::<EventRc>()
            .map(|h| EventNode::new(h.clone()).into())
    }
}

refraction! {
    /// Matches [`ParamRc`] handles
    ParameterRefraction => Parameter, |source| {
        source
            .downcast_ref::<ParamRc>()
            .map(|h| ParameterNode::new(h.clone()).into())
    }
}

refraction! {
    /// Matches [`LocalVariableRc`] handles
    LocalVariableRefraction => LocalVariable, |source| {
        source
            .downcast_ref::<LocalVariableRc>()
            .map(|h| LocalVariableNode::new(h.clone()).into())
    }
}

/// The typed refraction for `kind`, `None` for the structural kinds
#[must_use]
pub fn refraction_for(kind: NodeKind) -> Option<Box<dyn Refraction>> {
    match kind {
        NodeKind::Assembly => Some(Box::new(AssemblyRefraction)),
        NodeKind::Type => Some(Box::new(TypeRefraction)),
        NodeKind::Constructor => Some(Box::new(ConstructorRefraction)),
        NodeKind::Method => Some(Box::new(MethodRefraction)),
        NodeKind::Property => Some(Box::new(PropertyRefraction)),
        NodeKind::Field => Some(Box::new(FieldRefraction)),
        NodeKind::Event => Some(Box::new(EventRefraction)),
        NodeKind::Parameter => Some(Box::new(ParameterRefraction)),
        NodeKind::LocalVariable => Some(Box::new(LocalVariableRefraction)),
        NodeKind::Composite | NodeKind::Null => None,
    }
}

/// An already materialized node, whether passed as [`Node`] or as one of the node types
pub(crate) fn existing_node(source: &dyn Any) -> Option<Node> {
    if let Some(node) = source.downcast_ref::<Node>() {
        return Some(node.clone());
    }
    if let Some(composite) = source.downcast_ref::<crate::element::Composite>() {
        return Some(composite.clone().into());
    }

    macro_rules! wrapped {
        ($($node:ty),*) => {
            $(
                if let Some(node) = source.downcast_ref::<$node>() {
                    return Some(node.clone().into());
                }
            )*
        };
    }
    wrapped!(
        AssemblyNode,
        TypeNode,
        ConstructorNode,
        MethodNode,
        PropertyNode,
        FieldNode,
        EventNode,
        ParameterNode,
        LocalVariableNode
    );

    None
}
