use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use rayon::prelude::*;

use crate::{
    element::{Accept, Node},
    visitor::{fold, Visitor},
    Result,
};

/// An ordered, immutable group of nodes.
///
/// As a node (`Node::Composite`) it is accepted by folding the visitor over its members from
/// left to right; as a container it iterates its members in their original order. Members may be
/// of any kind, other composites included.
///
/// Composites have no value identity: two composites are only equal if they are clones of the
/// same group.
///
/// # Examples
///
/// ```rust
/// use dotwalk::prelude::*;
///
/// let assembly = AssemblyBuilder::new("Sample")
///     .class("Sample", "A", |t| t.field("x"))
///     .class("Sample", "B", |t| t.field("y").field("z"))
///     .build()?;
///
/// let group: Composite = assembly.types().into_iter().map(|t| Node::from(TypeNode::new(t))).collect();
/// let counter = group.accept(MemberCounter::new())?;
/// assert_eq!(counter.value().count(NodeKind::Field), 3);
/// # Ok::<(), dotwalk::Error>(())
/// ```
#[derive(Clone)]
pub struct Composite {
    nodes: Arc<[Node]>,
}

impl Composite {
    /// Group `nodes`, keeping their order
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Self {
        Composite {
            nodes: nodes.into(),
        }
    }

    /// The members, in order
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// The members as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of members (nested composites count as one)
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the composite has no members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if both values are clones of the same group
    #[must_use]
    pub fn ptr_eq(&self, other: &Composite) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes)
    }

    /// Run one independent traversal per member on the rayon pool
    ///
    /// Every member is accepted by its own clone of `seed`; the successors are returned in member
    /// order. Unlike [`Accept::accept`] nothing is threaded from one member to the next.
    ///
    /// # Errors
    ///
    /// Returns the first error any of the traversals raises.
    pub fn par_accept<V>(&self, seed: &V) -> Result<Vec<V>>
    where
        V: Visitor + Clone + Send + Sync,
    {
        self.nodes
            .par_iter()
            .map(|node| node.accept(seed.clone()))
            .collect()
    }
}

impl Accept for Composite {
    fn accept<V: Visitor>(&self, visitor: V) -> Result<V> {
        self.nodes.accept(visitor)
    }
}

impl Accept for [Node] {
    fn accept<V: Visitor>(&self, visitor: V) -> Result<V> {
        fold(visitor, self, |visitor, node| node.accept(visitor))
    }
}

impl Accept for Vec<Node> {
    fn accept<V: Visitor>(&self, visitor: V) -> Result<V> {
        self.as_slice().accept(visitor)
    }
}

impl Hash for Composite {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.nodes), state);
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Composite").field(&&*self.nodes).finish()
    }
}

impl From<Vec<Node>> for Composite {
    fn from(nodes: Vec<Node>) -> Self {
        Composite::new(nodes)
    }
}

impl FromIterator<Node> for Composite {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Composite::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Composite {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        element::{FieldNode, NodeKind, TypeNode},
        test::sample_assembly,
        visitor::{MemberCounter, NodeCollector},
        Error,
    };

    fn type_nodes() -> Vec<Node> {
        sample_assembly()
            .types()
            .into_iter()
            .map(|t| Node::from(TypeNode::new(t)))
            .collect()
    }

    #[test]
    fn iteration_keeps_order() {
        let nodes = type_nodes();
        let composite = Composite::new(nodes.clone());

        assert_eq!(composite.len(), nodes.len());
        assert!(composite.iter().eq(nodes.iter()));
        assert!((&composite).into_iter().eq(nodes.iter()));
    }

    #[test]
    fn accept_equals_chained_accepts() {
        let nodes = type_nodes();
        let composite = Composite::new(nodes.clone());

        let folded = composite.accept(NodeCollector::new()).unwrap();

        let mut chained = NodeCollector::new();
        for node in &nodes {
            chained = node.accept(chained).unwrap();
        }
        assert_eq!(folded.value(), chained.value());
    }

    #[test]
    fn nested_composites_flatten_in_order() {
        let nodes = type_nodes();
        let inner = Node::from(Composite::new(nodes[1..].to_vec()));
        let outer = Composite::new(vec![nodes[0].clone(), inner, Node::Null]);

        let flat = Composite::new(nodes).accept(NodeCollector::new()).unwrap();
        let nested = outer.accept(NodeCollector::new()).unwrap();
        assert_eq!(flat.value(), nested.value());
    }

    #[test]
    fn empty_composite_returns_visitor() {
        let collector = Composite::new(Vec::new())
            .accept(NodeCollector::new())
            .unwrap();
        assert!(collector.value().is_empty());
    }

    #[test]
    fn par_accept_runs_independent_traversals() {
        let nodes = type_nodes();
        let composite = Composite::new(nodes.clone());

        let results = composite.par_accept(&MemberCounter::new()).unwrap();
        assert_eq!(results.len(), nodes.len());
        for (node, counter) in nodes.iter().zip(&results) {
            let expected = node.accept(MemberCounter::new()).unwrap();
            assert_eq!(counter.value(), expected.value());
            assert_eq!(counter.value().count(NodeKind::Type), 1);
        }
    }

    #[test]
    fn failing_member_aborts_fold() {
        #[derive(Debug)]
        struct FailOnField {
            seen: usize,
        }

        impl Visitor for FailOnField {
            type Value = usize;

            fn value(&self) -> &usize {
                &self.seen
            }

            fn visit_type(mut self, ty: &TypeNode) -> Result<Self> {
                self.seen += 1;
                crate::visitor::walk_type(self, ty)
            }

            fn visit_field(self, field: &FieldNode) -> Result<Self> {
                Err(Error::Error(format!("refusing {}", field.handle().name)))
            }
        }

        let result = Composite::new(type_nodes()).accept(FailOnField { seen: 0 });
        assert!(matches!(result, Err(Error::Error(_))));
    }
}
