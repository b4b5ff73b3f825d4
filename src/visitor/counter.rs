use std::collections::HashMap;

use crate::{
    element::{
        AssemblyNode, ConstructorNode, EventNode, FieldNode, LocalVariableNode, MethodNode,
        NodeKind, ParameterNode, PropertyNode, TypeNode,
    },
    visitor::{walk_assembly, walk_constructor, walk_method, walk_property, walk_type, Visitor},
    Result,
};

/// Per-kind visit tallies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberCounts {
    counts: HashMap<NodeKind, usize>,
}

impl MemberCounts {
    /// How often nodes of `kind` were visited
    #[must_use]
    pub fn count(&self, kind: NodeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Total number of visits
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    fn bump(&mut self, kind: NodeKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }
}

/// Counts the nodes the default traversal reaches, by kind.
///
/// Accessor methods count as methods: a property with getter and setter adds one property and
/// two methods.
#[derive(Debug, Clone, Default)]
pub struct MemberCounter {
    counts: MemberCounts,
}

impl MemberCounter {
    /// Create a counter with all tallies at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(mut self, kind: NodeKind) -> Self {
        self.counts.bump(kind);
        self
    }
}

impl Visitor for MemberCounter {
    type Value = MemberCounts;

    fn value(&self) -> &MemberCounts {
        &self.counts
    }

    fn visit_assembly(self, assembly: &AssemblyNode) -> Result<Self> {
        walk_assembly(self.bump(NodeKind::Assembly), assembly)
    }

    fn visit_type(self, ty: &TypeNode) -> Result<Self> {
        walk_type(self.bump(NodeKind::Type), ty)
    }

    fn visit_constructor(self, constructor: &ConstructorNode) -> Result<Self> {
        walk_constructor(self.bump(NodeKind::Constructor), constructor)
    }

    fn visit_method(self, method: &MethodNode) -> Result<Self> {
        walk_method(self.bump(NodeKind::Method), method)
    }

    fn visit_property(self, property: &PropertyNode) -> Result<Self> {
        walk_property(self.bump(NodeKind::Property), property)
    }

    fn visit_field(self, _field: &FieldNode) -> Result<Self> {
        Ok(self.bump(NodeKind::Field))
    }

    fn visit_event(self, _event: &EventNode) -> Result<Self> {
        Ok(self.bump(NodeKind::Event))
    }

    fn visit_parameter(self, _parameter: &ParameterNode) -> Result<Self> {
        Ok(self.bump(NodeKind::Parameter))
    }

    fn visit_local_variable(self, _local: &LocalVariableNode) -> Result<Self> {
        Ok(self.bump(NodeKind::LocalVariable))
    }
}
