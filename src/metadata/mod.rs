//! Metadata handles for .NET assemblies.
//!
//! This module contains the handle model the traversal engine walks over. A handle is the
//! resolved, owned representation of one metadata row (an assembly, a type, a method, ...),
//! shared through `Arc`. Parent/child relationships live on the handles themselves: a type owns
//! its member lists, a method owns its parameters and optional body, a property points at its
//! accessors through weak references.
//!
//! # Key Components
//!
//! - [`assembly`] - The assembly handle and its builder
//! - [`typesystem`] - Type handles and the fluent [`typesystem::TypeBuilder`]
//! - [`method`] - Methods, constructors, bodies and local variables
//! - [`members`] - Fields, properties, events and parameters
//! - [`token`] - Metadata table row references and the scopes they are unique in
//!
//! # Examples
//!
//! ```rust
//! use dotwalk::metadata::assembly::AssemblyBuilder;
//!
//! let assembly = AssemblyBuilder::new("Sample")
//!     .class("Sample", "Point", |t| t.field("x").field("y").auto_property("Length"))
//!     .build()?;
//!
//! let point = assembly.type_by_fullname("Sample.Point").unwrap();
//! println!("Fields: {}", point.declared_fields().len());
//! # Ok::<(), dotwalk::Error>(())
//! ```

/// Implementation of the assembly handle
pub mod assembly;
/// Implementation of field, property, event and parameter handles
pub mod members;
/// Implementation of method handles and bodies
pub mod method;
/// Commonly used metadata token type
pub mod token;
/// Implementation of type handles
pub mod typesystem;
