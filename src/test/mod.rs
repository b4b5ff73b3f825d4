//! Shared fixtures for unit tests
//!
//! Handles are built through the public builders, the way a host would populate them.

use std::sync::Arc;

use crate::metadata::{
    assembly::{AssemblyBuilder, AssemblyRc},
    members::FieldAttributes,
    typesystem::{CilTypeRc, RowAllocator, TypeBuilder},
};

/// A small assembly with an abstract base, a concrete type and a static holder
///
/// - `Sample.Shape`: abstract `Area`, read-only `Name`, one event
/// - `Sample.Circle`: constructor with one parameter and two locals, auto property `Radius`
/// - `Sample.Registry`: type initializer and a static method
pub fn sample_assembly() -> AssemblyRc {
    AssemblyBuilder::new("Sample")
        .version(1, 0, 0, 0)
        .class("Sample", "Shape", |t| {
            t.field("name")
                .constructor(|c| c.param("name"))
                .read_only_property("Name")
                .method("Area", |m| m.returns().make_abstract())
                .event("Changed")
        })
        .class("Sample", "Circle", |t| {
            t.field("radius")
                .constructor(|c| c.param("radius").locals(2))
                .auto_property("Radius")
                .method("Area", |m| m.returns().locals(1))
                .method("Scale", |m| m.param("factor"))
        })
        .class("Sample", "Registry", |t| {
            t.type_initializer()
                .field_with(
                    "instances",
                    FieldAttributes::STATIC | FieldAttributes::PRIVATE,
                )
                .method("Register", |m| m.static_().param("item").locals(1))
        })
        .build()
        .unwrap()
}

/// A type with 4 fields, 3 constructors, 10 properties, 9 ordinary methods and 3 events
///
/// Of the properties, 7 have getter and setter, one is read-only, one write-only and one has
/// private accessors.
pub fn shape_type() -> CilTypeRc {
    let rows = Arc::new(RowAllocator::new());
    TypeBuilder::new(rows, "Fixture", "Shape")
        .field("x")
        .field("y")
        .field("width")
        .field("height")
        .constructor(|c| c)
        .constructor(|c| c.param("size"))
        .constructor(|c| c.param("width").param("height").locals(1))
        .auto_property("X")
        .auto_property("Y")
        .auto_property("Width")
        .auto_property("Height")
        .auto_property("Left")
        .auto_property("Top")
        .auto_property("Label")
        .read_only_property("Area")
        .write_only_property("Seed")
        .private_property("Cache")
        .method("Move", |m| m.param("dx").param("dy"))
        .method("Resize", |m| m.param("w").param("h").locals(2))
        .method("Contains", |m| m.returns().param("x").param("y").locals(1))
        .method("Intersects", |m| m.returns().param("other"))
        .method("Clone", |m| m.returns().locals(1))
        .method("Draw", |m| m.make_abstract())
        .method("Invalidate", |m| m)
        .method("Create", |m| m.static_().returns().locals(1))
        .method("ToString", |m| m.returns().without_body())
        .event("Moved")
        .event("Resized")
        .event("Invalidated")
        .build()
        .unwrap()
}
