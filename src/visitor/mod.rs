//! The visitor contract and the default traversal engine.
//!
//! A [`Visitor`] has one operation per node kind. Each operation consumes the visitor and
//! returns its successor, so a traversal is a fold: the visitor returned by one step is the
//! receiver of the next, and whatever a visitor accumulates is read back through
//! [`Visitor::value`] once the fold is complete. An implementation may return a brand new value
//! or the receiver itself; callers never rely on either.
//!
//! # Default traversal
//!
//! Every operation has a default, so an implementation only overrides the kinds it cares about.
//! The defaults reproduce one fixed descent:
//!
//! | Node          | Default                                                                   |
//! |---------------|---------------------------------------------------------------------------|
//! | assembly      | its types, in declaration order                                           |
//! | type          | fields, then constructors, then properties, then methods, then events     |
//! | constructor   | parameters, then local variables                                          |
//! | method        | parameters, then local variables                                          |
//! | property      | getter (if any), then setter (if any), both as methods                    |
//! | field, event, parameter, local variable | nothing, the receiver is returned              |
//!
//! The method list of a type excludes property accessors; they are reached exactly once, through
//! their property. A method without a body contributes no local variables.
//!
//! Overrides that want to keep descending call the matching `walk_*` function:
//!
//! ```rust
//! use dotwalk::prelude::*;
//! use dotwalk::visitor::walk_type;
//!
//! /// Collects the full names of all types that declare at least one event
//! struct EventSources(Vec<String>);
//!
//! impl Visitor for EventSources {
//!     type Value = Vec<String>;
//!
//!     fn value(&self) -> &Vec<String> {
//!         &self.0
//!     }
//!
//!     fn visit_type(mut self, ty: &TypeNode) -> dotwalk::Result<Self> {
//!         if ty.handle().events.count() > 0 {
//!             self.0.push(ty.handle().fullname());
//!         }
//!         walk_type(self, ty)
//!     }
//! }
//!
//! let assembly = AssemblyBuilder::new("Sample")
//!     .class("Sample", "Quiet", |t| t.field("x"))
//!     .class("Sample", "Loud", |t| t.event("Changed"))
//!     .build()?;
//!
//! let sources = AssemblyNode::new(assembly).accept(EventSources(Vec::new()))?;
//! assert_eq!(sources.value(), &vec!["Sample.Loud".to_string()]);
//! # Ok::<(), dotwalk::Error>(())
//! ```

mod collector;
mod counter;
mod walk;

pub use collector::NodeCollector;
pub use counter::{MemberCounter, MemberCounts};
pub use walk::{
    walk_assembly, walk_constructor, walk_method, walk_property, walk_type,
};

use crate::{
    element::{
        AssemblyNode, ConstructorNode, EventNode, FieldNode, LocalVariableNode, MethodNode,
        ParameterNode, PropertyNode, TypeNode,
    },
    Result,
};

/// Fold `step` over `nodes` from left to right, seeded with `visitor`
///
/// An empty slice returns `visitor` unchanged; the first error ends the fold.
///
/// # Errors
///
/// Returns the first error raised by `step`.
pub fn fold<V, N, F>(visitor: V, nodes: &[N], step: F) -> Result<V>
where
    F: FnMut(V, &N) -> Result<V>,
{
    nodes.iter().try_fold(visitor, step)
}

/// An accumulating observer with one operation per node kind.
///
/// See the [module documentation](self) for the default traversal.
pub trait Visitor: Sized {
    /// What the visitor accumulates
    type Value;

    /// The value accumulated so far
    fn value(&self) -> &Self::Value;

    /// Visit an assembly; defaults to [`walk_assembly`]
    ///
    /// # Errors
    ///
    /// Propagates any error of the descent.
    fn visit_assembly(self, assembly: &AssemblyNode) -> Result<Self> {
        walk_assembly(self, assembly)
    }

    /// Visit a type; defaults to [`walk_type`]
    ///
    /// # Errors
    ///
    /// Propagates any error of the descent.
    fn visit_type(self, ty: &TypeNode) -> Result<Self> {
        walk_type(self, ty)
    }

    /// Visit a constructor; defaults to [`walk_constructor`]
    ///
    /// # Errors
    ///
    /// Propagates any error of the descent.
    fn visit_constructor(self, constructor: &ConstructorNode) -> Result<Self> {
        walk_constructor(self, constructor)
    }

    /// Visit a method; defaults to [`walk_method`]
    ///
    /// # Errors
    ///
    /// Propagates any error of the descent.
    fn visit_method(self, method: &MethodNode) -> Result<Self> {
        walk_method(self, method)
    }

    /// Visit a property; defaults to [`walk_property`]
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if an accessor no longer resolves, and
    /// propagates any error of the descent.
    fn visit_property(self, property: &PropertyNode) -> Result<Self> {
        walk_property(self, property)
    }

    /// Visit a field (leaf)
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn visit_field(self, _field: &FieldNode) -> Result<Self> {
        Ok(self)
    }

    /// Visit an event (leaf)
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn visit_event(self, _event: &EventNode) -> Result<Self> {
        Ok(self)
    }

    /// Visit a parameter (leaf)
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn visit_parameter(self, _parameter: &ParameterNode) -> Result<Self> {
        Ok(self)
    }

    /// Visit a local variable (leaf)
    ///
    /// # Errors
    ///
    /// The default never fails.
    fn visit_local_variable(self, _local: &LocalVariableNode) -> Result<Self> {
        Ok(self)
    }

    /// Fold [`Visitor::visit_assembly`] over `assemblies`
    ///
    /// # Errors
    ///
    /// Returns the first error of the fold.
    fn visit_assemblies(self, assemblies: &[AssemblyNode]) -> Result<Self> {
        fold(self, assemblies, Self::visit_assembly)
    }

    /// Fold [`Visitor::visit_type`] over `types`
    ///
    /// # Errors
    ///
    /// Returns the first error of the fold.
    fn visit_types(self, types: &[TypeNode]) -> Result<Self> {
        fold(self, types, Self::visit_type)
    }

    /// Fold [`Visitor::visit_constructor`] over `constructors`
    ///
    /// # Errors
    ///
    /// Returns the first error of the fold.
    fn visit_constructors(self, constructors: &[ConstructorNode]) -> Result<Self> {
        fold(self, constructors, Self::visit_constructor)
    }

    /// Fold [`Visitor::visit_method`] over `methods`
    ///
    /// # Errors
    ///
    /// Returns the first error of the fold.
    fn visit_methods(self, methods: &[MethodNode]) -> Result<Self> {
        fold(self, methods, Self::visit_method)
    }

    /// Fold [`Visitor::visit_property`] over `properties`
    ///
    /// # Errors
    ///
    /// Returns the first error of the fold.
    fn visit_properties(self, properties: &[PropertyNode]) -> Result<Self> {
        fold(self, properties, Self::visit_property)
    }

    /// Fold [`Visitor::visit_field`] over `fields`
    ///
    /// # Errors
    ///
    /// Returns the first error of the fold.
    fn visit_fields(self, fields: &[FieldNode]) -> Result<Self> {
        fold(self, fields, Self::visit_field)
    }

    /// Fold [`Visitor::visit_event`] over `events`
    ///
    /// # Errors
    ///
    /// Returns the first error of the fold.
    fn visit_events(self, events: &[EventNode]) -> Result<Self> {
        fold(self, events, Self::visit_event)
    }

    /// Fold [`Visitor::visit_parameter`] over `parameters`
    ///
    /// # Errors
    ///
    /// Returns the first error of the fold.
    fn visit_parameters(self, parameters: &[ParameterNode]) -> Result<Self> {
        fold(self, parameters, Self::visit_parameter)
    }

    /// Fold [`Visitor::visit_local_variable`] over `locals`
    ///
    /// # Errors
    ///
    /// Returns the first error of the fold.
    fn visit_local_variables(self, locals: &[LocalVariableNode]) -> Result<Self> {
        fold(self, locals, Self::visit_local_variable)
    }
}
