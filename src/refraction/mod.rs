//! Refraction: turning untyped objects into typed nodes.
//!
//! A host that collects metadata handles through some untyped channel (a `Vec<Box<dyn Any>>`,
//! a plugin boundary, a reflection-style query) needs to get back to [`Node`]s before it can
//! traverse them. Each [`Refraction`] recognizes one node kind by runtime type inspection:
//! [`TypeRefraction`] turns a [`CilTypeRc`](crate::metadata::typesystem::CilTypeRc) into a
//! [`Node::Type`] and ignores everything else.
//!
//! [`CompositeRefraction`] chains several filters, and [`Refractor`] adds classification of a
//! single object on top of it, configured through [`RefractionConfig`].
//!
//! # Examples
//!
//! ```rust
//! use std::any::Any;
//! use dotwalk::prelude::*;
//!
//! let assembly = AssemblyBuilder::new("Sample")
//!     .class("Sample", "Point", |t| t.field("x"))
//!     .build()?;
//! let ty = assembly.types()[0].clone();
//! let field = ty.declared_fields()[0].clone();
//!
//! let sources: [&dyn Any; 3] = [&field, &"unrelated", &ty];
//! let nodes = Refractor::default().materialize(&sources);
//! assert_eq!(nodes.len(), 2);
//! assert_eq!(nodes[0].kind(), NodeKind::Type);
//! assert_eq!(nodes[1].kind(), NodeKind::Field);
//!
//! assert_eq!(classify(&42u32), Node::Null);
//! assert!(try_classify(&42u32).is_err());
//! # Ok::<(), dotwalk::Error>(())
//! ```

mod config;
mod filters;

use std::{any::Any, fmt, sync::OnceLock};

use tracing::debug;

pub use config::{Fallback, RefractionConfig};
pub use filters::{
    refraction_for, AssemblyRefraction, ConstructorRefraction, EventRefraction, FieldRefraction,
    LocalVariableRefraction, MethodRefraction, ParameterRefraction, PropertyRefraction,
    TypeRefraction,
};

use crate::{
    element::{Node, NodeKind},
    Error, Result,
};

/// Materializes objects of one node kind out of untyped sources
pub trait Refraction: Send + Sync {
    /// The kind of node this refraction produces
    fn kind(&self) -> NodeKind;

    /// Wrap `source` into a node if it is of a type this refraction recognizes
    fn refract(&self, source: &dyn Any) -> Option<Node>;

    /// Wrap every recognized object of `sources`, in input order
    ///
    /// Objects that are not recognized are skipped without error.
    fn materialize(&self, sources: &[&dyn Any]) -> Vec<Node> {
        sources
            .iter()
            .filter_map(|source| self.refract(*source))
            .collect()
    }
}

/// An ordered list of refractions acting as one
///
/// [`Refraction::materialize`] concatenates the results of the members in list order, so an object
/// recognized by two members appears twice. [`Refraction::refract`] returns the first member's
/// match.
#[derive(Default)]
pub struct CompositeRefraction {
    filters: Vec<Box<dyn Refraction>>,
}

impl CompositeRefraction {
    /// Create an empty composite, recognizing nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a refraction
    #[must_use]
    pub fn with(mut self, filter: impl Refraction + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Append an already boxed refraction
    pub fn push(&mut self, filter: Box<dyn Refraction>) {
        self.filters.push(filter);
    }

    /// The kinds of the member refractions, in order
    #[must_use]
    pub fn kinds(&self) -> Vec<NodeKind> {
        self.filters.iter().map(|f| f.kind()).collect()
    }

    /// Number of member refractions
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns true if there are no member refractions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Refraction for CompositeRefraction {
    fn kind(&self) -> NodeKind {
        NodeKind::Composite
    }

    fn refract(&self, source: &dyn Any) -> Option<Node> {
        self.filters.iter().find_map(|f| f.refract(source))
    }

    fn materialize(&self, sources: &[&dyn Any]) -> Vec<Node> {
        self.filters
            .iter()
            .flat_map(|f| f.materialize(sources))
            .collect()
    }
}

impl fmt::Debug for CompositeRefraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeRefraction")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl FromIterator<Box<dyn Refraction>> for CompositeRefraction {
    fn from_iter<I: IntoIterator<Item = Box<dyn Refraction>>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

/// Classifies and materializes untyped objects according to a [`RefractionConfig`]
#[derive(Debug)]
pub struct Refractor {
    config: RefractionConfig,
    filters: CompositeRefraction,
}

impl Default for Refractor {
    fn default() -> Self {
        Self::new(RefractionConfig::default())
    }
}

impl Refractor {
    /// Build the refraction chain described by `config`
    #[must_use]
    pub fn new(config: RefractionConfig) -> Self {
        let filters = config
            .effective_order()
            .into_iter()
            .filter_map(refraction_for)
            .collect();

        Refractor { config, filters }
    }

    /// The configuration this refractor was built from
    #[must_use]
    pub fn config(&self) -> &RefractionConfig {
        &self.config
    }

    /// Materialize `sources` through every configured refraction, one after the other
    ///
    /// The result holds first all matches of the first configured kind, in input order, then
    /// those of the second kind, and so on.
    #[must_use]
    pub fn materialize(&self, sources: &[&dyn Any]) -> Vec<Node> {
        self.filters.materialize(sources)
    }

    /// Classify one object, yielding [`Node::Null`] when nothing matches
    ///
    /// Nodes, including the per-kind node types, are returned unchanged.
    #[must_use]
    pub fn classify(&self, source: &dyn Any) -> Node {
        self.lookup(source).unwrap_or_else(|| {
            debug!(type_id = ?Any::type_id(source), "no refraction matched, classified as null");
            Node::Null
        })
    }

    /// Classify one object, failing when nothing matches
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedConversion`] if no configured refraction recognizes `source`.
    pub fn try_classify(&self, source: &dyn Any) -> Result<Node> {
        self.lookup(source).ok_or_else(|| Error::UnsupportedConversion {
            type_id: Any::type_id(source),
        })
    }

    /// Classify one object, applying the configured [`Fallback`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedConversion`] if nothing matches and the fallback is
    /// [`Fallback::Reject`].
    pub fn convert(&self, source: &dyn Any) -> Result<Node> {
        match self.config.fallback {
            Fallback::Null => Ok(self.classify(source)),
            Fallback::Reject => self.try_classify(source),
        }
    }

    /// Returns true if `source` is a node or is recognized by a configured refraction
    #[must_use]
    pub fn supports(&self, source: &dyn Any) -> bool {
        self.lookup(source).is_some()
    }

    fn lookup(&self, source: &dyn Any) -> Option<Node> {
        filters::existing_node(source).or_else(|| self.filters.refract(source))
    }
}

fn default_refractor() -> &'static Refractor {
    static DEFAULT: OnceLock<Refractor> = OnceLock::new();
    DEFAULT.get_or_init(Refractor::default)
}

/// Classify one object with the default configuration, yielding [`Node::Null`] when nothing
/// matches
#[must_use]
pub fn classify(source: &dyn Any) -> Node {
    default_refractor().classify(source)
}

/// Classify one object with the default configuration
///
/// # Errors
///
/// Returns [`Error::UnsupportedConversion`] if `source` is neither a node nor a metadata handle.
pub fn try_classify(source: &dyn Any) -> Result<Node> {
    default_refractor().try_classify(source)
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use super::*;
    use crate::{
        element::{ConstructorNode, FieldNode, TypeNode},
        metadata::typesystem::CilTypeRef,
        test::sample_assembly,
    };

    #[test]
    fn classify_prefers_priority_order() {
        let assembly = sample_assembly();
        let circle = assembly.type_by_fullname("Sample.Circle").unwrap();
        let ctor = circle.constructors()[0].clone();

        assert_eq!(classify(&assembly).kind(), NodeKind::Assembly);
        assert_eq!(classify(&circle), Node::from(TypeNode::new(circle.clone())));
        assert_eq!(classify(&ctor), Node::from(ConstructorNode::new(ctor.clone())));
        assert_eq!(classify(&CilTypeRef::new(&circle)).kind(), NodeKind::Type);
    }

    #[test]
    fn nodes_classify_as_themselves() {
        let assembly = sample_assembly();
        let node = Node::from(FieldNode::new(
            assembly.types()[0].declared_fields()[0].clone(),
        ));

        assert_eq!(classify(&node), node);
        assert_eq!(try_classify(&node).unwrap(), node);
        assert_eq!(classify(&Node::Null), Node::Null);
    }

    #[test]
    fn strict_classification_reports_the_source_type() {
        match try_classify(&"text") {
            Err(Error::UnsupportedConversion { type_id }) => {
                assert_eq!(type_id, TypeId::of::<&str>());
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn convert_follows_fallback() {
        let tolerant = Refractor::new(RefractionConfig::tolerant());
        let strict = Refractor::new(RefractionConfig::strict());

        assert_eq!(tolerant.convert(&1.5f64).unwrap(), Node::Null);
        assert!(matches!(
            strict.convert(&1.5f64),
            Err(Error::UnsupportedConversion { .. })
        ));
    }

    #[test]
    fn members_only_ignores_types() {
        let assembly = sample_assembly();
        let ty = assembly.types()[0].clone();
        let refractor = Refractor::new(RefractionConfig::members_only());

        assert!(!refractor.supports(&ty));
        assert!(refractor.supports(&ty.declared_fields()[0]));
        assert_eq!(refractor.classify(&ty), Node::Null);
    }

    #[test]
    fn composite_concatenates_without_dedup() {
        let assembly = sample_assembly();
        let ty = assembly.types()[0].clone();
        let composite = CompositeRefraction::new()
            .with(TypeRefraction)
            .with(TypeRefraction);

        let sources: [&dyn Any; 1] = [&ty];
        let nodes = composite.materialize(&sources);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0], nodes[1]);
        assert_eq!(composite.kind(), NodeKind::Composite);
        assert_eq!(composite.kinds(), vec![NodeKind::Type, NodeKind::Type]);
    }

    #[test]
    fn empty_composite_matches_nothing() {
        let composite = CompositeRefraction::new();
        let assembly = sample_assembly();

        assert!(composite.is_empty());
        assert!(composite.refract(&assembly).is_none());
        assert!(composite.materialize(&[&assembly as &dyn Any]).is_empty());
    }

    #[test]
    fn refractor_groups_by_configured_kind() {
        let assembly = sample_assembly();
        let ty = assembly.types()[1].clone();
        let field = ty.declared_fields()[0].clone();
        let refractor = Refractor::new(
            RefractionConfig::default().with_order([NodeKind::Field, NodeKind::Type]),
        );

        let sources: [&dyn Any; 2] = [&ty, &field];
        let kinds: Vec<_> = refractor
            .materialize(&sources)
            .iter()
            .map(Node::kind)
            .collect();
        assert_eq!(kinds, vec![NodeKind::Field, NodeKind::Type]);
    }
}
