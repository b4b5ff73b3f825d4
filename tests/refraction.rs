//! Integration tests for classification and materialization of untyped objects.

use std::any::{Any, TypeId};

use dotwalk::{
    prelude::*,
    refraction::{FieldRefraction, MethodRefraction, TypeRefraction},
};
use proptest::prelude::*;

fn inventory() -> AssemblyRc {
    AssemblyBuilder::new("Inventory")
        .version(1, 0, 0, 0)
        .class("Inventory", "Item", |t| {
            t.field("sku")
                .field("quantity")
                .constructor(|c| c.param("sku").locals(1))
                .auto_property("Quantity")
                .method("Restock", |m| m.param("amount"))
                .event("Depleted")
        })
        .class("Inventory", "Warehouse", |t| {
            t.field("items")
                .field("location")
                .field("capacity")
                .method("Lookup", |m| m.returns().param("sku").locals(1))
        })
        .build()
        .unwrap()
}

#[test]
fn foreign_objects_are_skipped() {
    let assembly = inventory();
    let a = assembly.types()[0].clone();
    let b = assembly.types()[1].clone();

    let sources: [&dyn Any; 3] = [&a, &"x", &b];
    let nodes = TypeRefraction.materialize(&sources);

    assert_eq!(
        nodes,
        vec![Node::from(TypeNode::new(a)), Node::from(TypeNode::new(b))]
    );
}

#[test]
fn tolerant_strict_and_identity() {
    let assembly = inventory();
    let item = assembly.type_by_fullname("Inventory.Item").unwrap();

    assert_eq!(classify(&"x"), Node::Null);
    match try_classify(&"x") {
        Err(Error::UnsupportedConversion { type_id }) => {
            assert_eq!(type_id, TypeId::of::<&str>());
        }
        other => panic!("unexpected result {:?}", other),
    }

    let node = TypeNode::new(item.clone());
    assert_eq!(classify(&node), Node::from(node.clone()));
    assert_eq!(classify(&item), Node::from(node));
}

#[test]
fn every_walked_node_round_trips() -> Result<()> {
    let assembly = inventory();
    let collector = AssemblyNode::new(assembly).accept(NodeCollector::new())?;

    for node in collector.value() {
        let source = node.as_source().unwrap();
        assert_eq!(&classify(source), node);
        assert_eq!(&try_classify(source)?, node);
    }
    Ok(())
}

#[test]
fn configured_order_drives_materialization() {
    let assembly = inventory();
    let item = assembly.types()[0].clone();
    let methods: Vec<MethodRc> = item.methods.iter().map(|(_, m)| m.clone()).collect();
    let field = item.declared_fields()[0].clone();

    let mut sources: Vec<&dyn Any> = methods.iter().map(|m| m as &dyn Any).collect();
    sources.push(&field);
    sources.push(&item);

    let kinds: Vec<NodeKind> = Refractor::new(RefractionConfig::members_only())
        .materialize(&sources)
        .iter()
        .map(Node::kind)
        .collect();

    // constructor first, then the remaining methods, then the field; the type is not a member
    assert_eq!(kinds[0], NodeKind::Constructor);
    assert_eq!(*kinds.last().unwrap(), NodeKind::Field);
    assert_eq!(kinds.len(), methods.len() + 1);
    assert!(!kinds.contains(&NodeKind::Type));
}

#[test]
fn composite_refraction_concatenates() {
    let assembly = inventory();
    let item = assembly.types()[0].clone();
    let field = item.declared_fields()[0].clone();

    let composite = CompositeRefraction::new()
        .with(FieldRefraction)
        .with(TypeRefraction)
        .with(MethodRefraction);

    let sources: [&dyn Any; 3] = [&item, &1u8, &field];
    let kinds: Vec<NodeKind> = composite
        .materialize(&sources)
        .iter()
        .map(Node::kind)
        .collect();
    assert_eq!(kinds, vec![NodeKind::Field, NodeKind::Type]);
}

proptest! {
    /// Materialization keeps the relative order of the accepted objects
    #[test]
    fn materialize_preserves_order(picks in prop::collection::vec(0usize..8, 0..40)) {
        let assembly = inventory();
        let fields: Vec<FieldRc> = assembly
            .types()
            .iter()
            .flat_map(|t| t.declared_fields())
            .collect();
        let junk: [u64; 3] = [1, 2, 3];

        // indices below the field count pick a field, the rest pick junk
        let sources: Vec<&dyn Any> = picks
            .iter()
            .map(|&i| match fields.get(i) {
                Some(field) => field as &dyn Any,
                None => &junk[i % junk.len()] as &dyn Any,
            })
            .collect();

        let expected: Vec<Node> = picks
            .iter()
            .filter_map(|&i| fields.get(i))
            .map(|f| Node::from(FieldNode::new(f.clone())))
            .collect();

        prop_assert_eq!(FieldRefraction.materialize(&sources), expected.clone());
        prop_assert_eq!(Refractor::default().materialize(&sources), expected);
    }
}
