// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # dotwalk
//!
//! A double-dispatch traversal engine over .NET assembly metadata.
//!
//! `dotwalk` wraps metadata handles (assemblies, types, constructors, methods, properties,
//! fields, events, parameters and local variables) into immutable, typed nodes and walks them
//! with visitors. A visitor implements one operation per node kind; each operation consumes the
//! visitor and returns its successor, so an analysis is a fold over the metadata tree. Every
//! operation has a default that continues the traversal in a fixed order, so a visitor only
//! overrides what it is interested in.
//!
//! ## Architecture
//!
//! - [`metadata`] - The handles: tokens, assemblies, types and their members, plus builders
//! - [`element`] - Nodes wrapping one handle each, the closed [`element::Node`] enum and
//!   [`element::Composite`] groups
//! - [`visitor`] - The [`visitor::Visitor`] contract, the default traversal and stock visitors
//! - [`refraction`] - Materializing nodes out of untyped (`dyn Any`) objects
//!
//! ## Quick Start
//!
//! ```rust
//! use dotwalk::prelude::*;
//!
//! let assembly = AssemblyBuilder::new("Geometry")
//!     .version(1, 2, 0, 0)
//!     .class("Geometry", "Circle", |t| {
//!         t.field("radius")
//!             .constructor(|c| c.param("radius"))
//!             .auto_property("Radius")
//!             .method("Area", |m| m.returns().locals(1))
//!     })
//!     .build()?;
//!
//! let counter = AssemblyNode::new(assembly).accept(MemberCounter::new())?;
//! let counts = counter.value();
//!
//! assert_eq!(counts.count(NodeKind::Type), 1);
//! assert_eq!(counts.count(NodeKind::Constructor), 1);
//! // `Area`, plus getter and setter of `Radius`
//! assert_eq!(counts.count(NodeKind::Method), 3);
//! # Ok::<(), dotwalk::Error>(())
//! ```
//!
//! ## Logging
//!
//! The traversal and the classification emit [`tracing`] events at `trace` and `debug` level.
//! No subscriber is installed by this crate.
#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use dotwalk::prelude::*;
///
/// let assembly = AssemblyBuilder::new("Empty").build()?;
/// let collector = AssemblyNode::new(assembly).accept(NodeCollector::new())?;
/// assert_eq!(collector.value().len(), 1);
/// # Ok::<(), dotwalk::Error>(())
/// ```
pub mod prelude;

/// Metadata handles and the builders that populate them
pub mod metadata;

/// Nodes: typed wrappers around metadata handles
pub mod element;

/// The visitor contract, the default traversal engine and stock visitors
pub mod visitor;

/// Classification and materialization of untyped objects into nodes
pub mod refraction;

/// `dotwalk` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `dotwalk` Error type
///
/// # Examples
///
/// ```rust
/// use dotwalk::{Error, refraction::try_classify};
///
/// match try_classify(&"not metadata") {
///     Ok(node) => println!("classified as {}", node.kind()),
///     Err(Error::UnsupportedConversion { type_id }) => println!("unsupported: {:?}", type_id),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;
