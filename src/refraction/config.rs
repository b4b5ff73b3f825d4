//! Configuration for classification and materialization

use crate::element::NodeKind;

/// What classification yields when no refraction matches the source object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// Return [`crate::element::Node::Null`]
    #[default]
    Null,
    /// Fail with [`crate::Error::UnsupportedConversion`]
    Reject,
}

/// Configuration of a [`crate::refraction::Refractor`]
///
/// `order` lists the node kinds to try, first match wins. Kinds that do not wrap a handle
/// ([`NodeKind::Composite`], [`NodeKind::Null`]) and repeated kinds are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefractionConfig {
    /// Node kinds to try, in priority order
    pub order: Vec<NodeKind>,

    /// Result when nothing in `order` matches
    pub fallback: Fallback,
}

impl Default for RefractionConfig {
    fn default() -> Self {
        Self {
            order: NodeKind::HANDLES.to_vec(),
            fallback: Fallback::Null,
        }
    }
}

impl RefractionConfig {
    /// All handle kinds in priority order, unmatched objects become [`crate::element::Node::Null`]
    #[must_use]
    pub fn tolerant() -> Self {
        Self::default()
    }

    /// All handle kinds in priority order, unmatched objects are an error
    #[must_use]
    pub fn strict() -> Self {
        Self {
            fallback: Fallback::Reject,
            ..Self::default()
        }
    }

    /// Only the members of a type: constructors, methods, properties, fields and events
    #[must_use]
    pub fn members_only() -> Self {
        Self {
            order: vec![
                NodeKind::Constructor,
                NodeKind::Method,
                NodeKind::Property,
                NodeKind::Field,
                NodeKind::Event,
            ],
            fallback: Fallback::Null,
        }
    }

    /// Replace the kind order, keeping the fallback
    #[must_use]
    pub fn with_order(mut self, order: impl IntoIterator<Item = NodeKind>) -> Self {
        self.order = order.into_iter().collect();
        self
    }

    /// Replace the fallback, keeping the kind order
    #[must_use]
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// The effective order: handle kinds only, each at its first position
    #[must_use]
    pub fn effective_order(&self) -> Vec<NodeKind> {
        let mut order: Vec<NodeKind> = Vec::with_capacity(self.order.len());
        for kind in &self.order {
            if kind.wraps_handle() && !order.contains(kind) {
                order.push(*kind);
            }
        }
        order
    }
}
