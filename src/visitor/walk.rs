//! The default descent, one function per node kind with children.
//!
//! Children are re-wrapped from the handle on every call; nothing is cached between
//! traversals.

use tracing::trace;

use crate::{
    element::{
        AssemblyNode, ConstructorNode, EventNode, FieldNode, LocalVariableNode, MethodNode,
        ParameterNode, PropertyNode, TypeNode,
    },
    metadata::method::{Method, MethodRef},
    visitor::Visitor,
    Result,
};

/// Visit every type of the assembly, in declaration order
///
/// # Errors
///
/// Returns the first error raised while visiting a type.
pub fn walk_assembly<V: Visitor>(visitor: V, assembly: &AssemblyNode) -> Result<V> {
    let handle = assembly.handle();
    let types: Vec<TypeNode> = handle.types().into_iter().map(TypeNode::new).collect();

    trace!(assembly = %handle.name, types = types.len(), "walking assembly");
    visitor.visit_types(&types)
}

/// Visit fields, constructors, properties, methods and events of the type, in that order
///
/// Methods that serve as get/set accessors of one of the type's properties are left out of the
/// method step; [`walk_property`] visits them.
///
/// # Errors
///
/// Returns the first error raised while visiting a member.
pub fn walk_type<V: Visitor>(visitor: V, ty: &TypeNode) -> Result<V> {
    let handle = ty.handle();

    let fields: Vec<FieldNode> = handle
        .declared_fields()
        .into_iter()
        .map(FieldNode::new)
        .collect();
    let constructors: Vec<ConstructorNode> = handle
        .constructors()
        .into_iter()
        .map(ConstructorNode::new)
        .collect();
    let properties: Vec<PropertyNode> = handle
        .declared_properties()
        .into_iter()
        .map(PropertyNode::new)
        .collect();
    let methods: Vec<MethodNode> = handle
        .plain_methods()
        .into_iter()
        .map(MethodNode::new)
        .collect();
    let events: Vec<EventNode> = handle
        .declared_events()
        .into_iter()
        .map(EventNode::new)
        .collect();

    trace!(
        token = %handle.token,
        name = %handle.name,
        fields = fields.len(),
        constructors = constructors.len(),
        properties = properties.len(),
        methods = methods.len(),
        events = events.len(),
        "walking type"
    );

    visitor
        .visit_fields(&fields)?
        .visit_constructors(&constructors)?
        .visit_properties(&properties)?
        .visit_methods(&methods)?
        .visit_events(&events)
}

/// Visit the parameters, then the local variables of the constructor
///
/// # Errors
///
/// Returns the first error raised while visiting a parameter or local.
pub fn walk_constructor<V: Visitor>(visitor: V, constructor: &ConstructorNode) -> Result<V> {
    walk_body(visitor, constructor.handle())
}

/// Visit the parameters, then the local variables of the method
///
/// # Errors
///
/// Returns the first error raised while visiting a parameter or local.
pub fn walk_method<V: Visitor>(visitor: V, method: &MethodNode) -> Result<V> {
    walk_body(visitor, method.handle())
}

/// Visit the getter, then the setter of the property, whichever exist
///
/// # Errors
///
/// Returns [`crate::Error::InvalidArgument`] if an accessor reference no longer resolves, or the
/// first error raised while visiting an accessor.
pub fn walk_property<V: Visitor>(visitor: V, property: &PropertyNode) -> Result<V> {
    let handle = property.handle();
    let mut visitor = visitor;

    if let Some(getter) = handle.getter() {
        let getter = accessor(getter, "getter", &handle.name)?;
        visitor = visitor.visit_method(&getter)?;
    }
    if let Some(setter) = handle.setter() {
        let setter = accessor(setter, "setter", &handle.name)?;
        visitor = visitor.visit_method(&setter)?;
    }

    Ok(visitor)
}

fn accessor(reference: &MethodRef, parameter: &'static str, property: &str) -> Result<MethodNode> {
    reference.upgrade().map(MethodNode::new).ok_or_else(|| {
        invalid_argument!(
            parameter,
            "accessor of property '{}' no longer resolves",
            property
        )
    })
}

fn walk_body<V: Visitor>(visitor: V, method: &Method) -> Result<V> {
    let parameters: Vec<ParameterNode> = method
        .parameters()
        .into_iter()
        .map(ParameterNode::new)
        .collect();
    let locals: Vec<LocalVariableNode> = match method.local_variables() {
        Some(locals) => locals.into_iter().map(LocalVariableNode::new).collect(),
        None => {
            trace!(token = %method.token, name = %method.name, "no body, no local variables");
            Vec::new()
        }
    };

    visitor
        .visit_parameters(&parameters)?
        .visit_local_variables(&locals)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        element::{Accept, Node, NodeKind},
        metadata::{
            members::Property,
            method::Method,
            token::{ScopeId, TableId, Token},
        },
        test::{sample_assembly, shape_type},
        visitor::{MemberCounter, NodeCollector},
        Error,
    };

    fn kinds(nodes: &[Node]) -> Vec<NodeKind> {
        nodes.iter().map(Node::kind).collect()
    }

    #[test]
    fn type_members_follow_fixed_order() {
        let ty = shape_type();
        let collector = TypeNode::new(ty).accept(NodeCollector::new()).unwrap();
        let seen = kinds(collector.value());

        let position = |kind: NodeKind| seen.iter().position(|k| *k == kind).unwrap();
        let last = |kind: NodeKind| seen.iter().rposition(|k| *k == kind).unwrap();

        assert_eq!(seen[0], NodeKind::Type);
        assert!(last(NodeKind::Field) < position(NodeKind::Constructor));
        assert!(last(NodeKind::Constructor) < position(NodeKind::Property));
        assert!(last(NodeKind::Property) < position(NodeKind::Event));
        assert_eq!(*seen.last().unwrap(), NodeKind::Event);
    }

    #[test]
    fn accessors_are_visited_once_through_their_property() {
        let ty = shape_type();
        let collector = TypeNode::new(ty.clone())
            .accept(NodeCollector::new())
            .unwrap();
        let accessors = ty.property_accessors();

        for token in &accessors {
            let hits = collector
                .value()
                .iter()
                .filter(|n| n.kind() == NodeKind::Method && n.token() == Some(*token))
                .count();
            assert_eq!(hits, 1, "accessor {} visited {} times", token, hits);
        }

        // the property step completes before the first ordinary method is visited
        let plain: Vec<_> = ty.plain_methods().iter().map(|m| m.token).collect();
        let first_plain = collector
            .value()
            .iter()
            .position(|n| n.kind() == NodeKind::Method && plain.contains(&n.token().unwrap()))
            .unwrap();
        let last_accessor = collector
            .value()
            .iter()
            .rposition(|n| n.token().is_some_and(|t| accessors.contains(&t)))
            .unwrap();
        assert!(last_accessor < first_plain);
    }

    #[test]
    fn shape_counts() {
        let counter = TypeNode::new(shape_type())
            .accept(MemberCounter::new())
            .unwrap();
        let counts = counter.value();

        assert_eq!(counts.count(NodeKind::Field), 4);
        assert_eq!(counts.count(NodeKind::Constructor), 3);
        assert_eq!(counts.count(NodeKind::Property), 10);
        assert_eq!(counts.count(NodeKind::Event), 3);
        // 9 ordinary methods plus 9 getters and 9 setters over the 10 properties
        assert_eq!(counts.count(NodeKind::Method), 9 + 9 + 9);
    }

    #[test]
    fn property_without_accessors_is_a_leaf() {
        let property = Arc::new(Property::new(
            ScopeId::next(),
            Token::from_parts(TableId::PROPERTY, 1).unwrap(),
            "Bare",
            0,
        ));
        let collector = PropertyNode::new(property)
            .accept(NodeCollector::new())
            .unwrap();
        assert_eq!(kinds(collector.value()), vec![NodeKind::Property]);
    }

    #[test]
    fn dangling_accessor_aborts_with_invalid_argument() {
        let scope = ScopeId::next();
        let property = Arc::new(Property::new(
            scope,
            Token::from_parts(TableId::PROPERTY, 1).unwrap(),
            "Orphan",
            0,
        ));
        let setter = Arc::new(Method::new(
            scope,
            Token::from_parts(TableId::METHOD_DEF, 1).unwrap(),
            "set_Orphan",
            0,
        ));
        let _ = property.fn_setter.set(MethodRef::new(&setter));
        drop(setter);

        match PropertyNode::new(property).accept(NodeCollector::new()) {
            Err(Error::InvalidArgument { parameter, message }) => {
                assert_eq!(parameter, "setter");
                assert!(message.contains("Orphan"));
            }
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("dangling accessor was visited"),
        }
    }

    #[test]
    fn bodyless_methods_have_no_locals() {
        let assembly = sample_assembly();
        let ty = assembly.type_by_fullname("Sample.Shape").unwrap();
        let area = ty
            .plain_methods()
            .into_iter()
            .find(|m| m.name == "Area")
            .unwrap();
        assert!(area.is_abstract());

        let collector = MethodNode::new(area).accept(NodeCollector::new()).unwrap();
        assert!(!kinds(collector.value()).contains(&NodeKind::LocalVariable));
    }

    #[test]
    fn parameters_precede_locals() {
        let assembly = sample_assembly();
        let ty = assembly.type_by_fullname("Sample.Circle").unwrap();
        let ctor = ty.constructors()[0].clone();

        let collector = ConstructorNode::new(ctor)
            .accept(NodeCollector::new())
            .unwrap();
        assert_eq!(
            kinds(collector.value()),
            vec![
                NodeKind::Constructor,
                NodeKind::Parameter,
                NodeKind::LocalVariable,
                NodeKind::LocalVariable
            ]
        );
    }

    #[test]
    fn assembly_walks_types_in_declaration_order() {
        let assembly = sample_assembly();
        let collector = AssemblyNode::new(assembly.clone())
            .accept(NodeCollector::new())
            .unwrap();

        let types: Vec<_> = collector
            .value()
            .iter()
            .filter_map(|n| match n {
                Node::Type(t) => Some(t.handle().fullname()),
                _ => None,
            })
            .collect();
        let declared: Vec<_> = assembly.types().iter().map(|t| t.fullname()).collect();
        assert_eq!(types, declared);
    }
}
