use crate::{
    element::{
        AssemblyNode, ConstructorNode, EventNode, FieldNode, LocalVariableNode, MethodNode, Node,
        ParameterNode, PropertyNode, TypeNode,
    },
    visitor::{walk_assembly, walk_constructor, walk_method, walk_property, walk_type, Visitor},
    Result,
};

/// Records every node the default traversal reaches, in visit order.
///
/// Each node is recorded before the traversal descends into its children, so the value is a
/// pre-order listing of the walked tree.
#[derive(Debug, Clone, Default)]
pub struct NodeCollector {
    nodes: Vec<Node>,
}

impl NodeCollector {
    /// Create an empty collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the collector, returning the recorded nodes
    #[must_use]
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    fn record(mut self, node: impl Into<Node>) -> Self {
        self.nodes.push(node.into());
        self
    }
}

impl Visitor for NodeCollector {
    type Value = Vec<Node>;

    fn value(&self) -> &Vec<Node> {
        &self.nodes
    }

    fn visit_assembly(self, assembly: &AssemblyNode) -> Result<Self> {
        walk_assembly(self.record(assembly.clone()), assembly)
    }

    fn visit_type(self, ty: &TypeNode) -> Result<Self> {
        walk_type(self.record(ty.clone()), ty)
    }

    fn visit_constructor(self, constructor: &ConstructorNode) -> Result<Self> {
        walk_constructor(self.record(constructor.clone()), constructor)
    }

    fn visit_method(self, method: &MethodNode) -> Result<Self> {
        walk_method(self.record(method.clone()), method)
    }

    fn visit_property(self, property: &PropertyNode) -> Result<Self> {
        walk_property(self.record(property.clone()), property)
    }

    fn visit_field(self, field: &FieldNode) -> Result<Self> {
        Ok(self.record(field.clone()))
    }

    fn visit_event(self, event: &EventNode) -> Result<Self> {
        Ok(self.record(event.clone()))
    }

    fn visit_parameter(self, parameter: &ParameterNode) -> Result<Self> {
        Ok(self.record(parameter.clone()))
    }

    fn visit_local_variable(self, local: &LocalVariableNode) -> Result<Self> {
        Ok(self.record(local.clone()))
    }
}
