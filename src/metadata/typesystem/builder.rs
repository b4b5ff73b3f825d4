//! Builders for type and method handles.
//!
//! This module provides the [`TypeBuilder`] struct, which offers a fluent API for assembling a
//! [`CilType`] together with its fields, constructors, methods, properties and events. Tokens
//! are handed out by a shared [`RowAllocator`], so every handle built through the same allocator
//! has a distinct identity. Each allocator also opens its own [`ScopeId`], which keeps handles of
//! separately built assemblies apart even though their row numbers repeat. Property accessors are created as methods of the type and wired to
//! the property through weak [`MethodRef`]s, the same shape a metadata loader produces.
//!
//! # Example
//!
//! ```rust
//! use dotwalk::metadata::typesystem::{RowAllocator, TypeBuilder};
//! use std::sync::Arc;
//!
//! let rows = Arc::new(RowAllocator::new());
//! let person = TypeBuilder::new(rows, "Sample", "Person")
//!     .field("name")
//!     .constructor(|ctor| ctor.param("name"))
//!     .auto_property("Name")
//!     .method("Greet", |m| m.param("other").locals(1))
//!     .event("Renamed")
//!     .build()?;
//!
//! assert_eq!(person.fullname(), "Sample.Person");
//! assert_eq!(person.plain_methods().len(), 1);
//! # Ok::<(), dotwalk::Error>(())
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crate::{
    metadata::{
        members::{Event, Field, FieldAttributes, Param, Property},
        method::{
            Method, MethodAccessFlags, MethodBody, MethodModifiers, MethodRc, MethodRef,
            CCTOR_NAME, CTOR_NAME,
        },
        token::{ScopeId, TableId, Token},
        typesystem::{CilType, CilTypeRc},
    },
    Error, Result,
};

/// Hands out consecutive row numbers per metadata table, within a scope of its own
pub struct RowAllocator {
    scope: ScopeId,
    rows: [AtomicU32; 256],
}

impl RowAllocator {
    /// Create an allocator with a fresh [`ScopeId`] where every table starts at row 1
    #[must_use]
    pub fn new() -> Self {
        RowAllocator {
            scope: ScopeId::next(),
            rows: std::array::from_fn(|_| AtomicU32::new(0)),
        }
    }

    /// The scope every token of this allocator belongs to
    #[must_use]
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Allocate the next row of `table`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] once all [`Token::MAX_ROW`] rows of `table` are taken.
    /// An exhausted table stays exhausted; rows are never reused.
    pub fn next(&self, table: u8) -> Result<Token> {
        let exhausted = || {
            invalid_argument!(
                "table",
                "table 0x{:02x} of {} has no rows left",
                table,
                self.scope
            )
        };

        let previous = self.rows[usize::from(table)]
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |row| {
                row.checked_add(1).filter(|next| *next <= Token::MAX_ROW)
            })
            .map_err(|_| exhausted())?;

        Token::from_parts(table, previous + 1).ok_or_else(exhausted)
    }

    #[cfg(test)]
    pub(crate) fn exhaust(&self, table: u8) {
        self.rows[usize::from(table)].store(Token::MAX_ROW, Ordering::Relaxed);
    }
}

impl Default for RowAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides a fluent API for describing a method before it is materialized
pub struct MethodBuilder {
    name: String,
    flags: u32,
    returns: bool,
    params: Vec<String>,
    locals: Option<u16>,
}

impl MethodBuilder {
    /// Start a public instance method with an empty body
    ///
    /// ## Arguments
    /// * 'name' - The method name
    pub fn new(name: impl Into<String>) -> Self {
        MethodBuilder {
            name: name.into(),
            flags: MethodAccessFlags::PUBLIC.bits() | MethodModifiers::HIDE_BY_SIG.bits(),
            returns: false,
            params: Vec::new(),
            locals: Some(0),
        }
    }

    /// Replace the raw `MethodAttributes`
    #[must_use]
    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Restrict access to the declaring type
    #[must_use]
    pub fn private(mut self) -> Self {
        self.flags = (self.flags & !crate::metadata::method::METHOD_ACCESS_MASK)
            | MethodAccessFlags::PRIVATE.bits();
        self
    }

    /// Mark the method `static`
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.flags |= MethodModifiers::STATIC.bits();
        self
    }

    /// Emit a return value row (sequence 0)
    #[must_use]
    pub fn returns(mut self) -> Self {
        self.returns = true;
        self
    }

    /// Append a declared parameter
    #[must_use]
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    /// Give the body `count` local variables
    #[must_use]
    pub fn locals(mut self, count: u16) -> Self {
        self.locals = Some(count);
        self
    }

    /// Declare the method abstract; abstract methods have no body
    #[must_use]
    pub fn make_abstract(mut self) -> Self {
        self.flags |= MethodModifiers::ABSTRACT.bits() | MethodModifiers::VIRTUAL.bits();
        self.locals = None;
        self
    }

    /// Drop the body without marking the method abstract (extern / runtime implemented)
    #[must_use]
    pub fn without_body(mut self) -> Self {
        self.locals = None;
        self
    }

    /// Materialize the method, allocating tokens for it and its parameters
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `rows` runs out of `MethodDef` or `Param` rows.
    pub fn build(self, rows: &RowAllocator) -> Result<MethodRc> {
        let scope = rows.scope();
        let token = rows.next(TableId::METHOD_DEF)?;
        let method = Method::new(scope, token, self.name, self.flags);

        if self.returns {
            let param = Param::new(scope, rows.next(TableId::PARAM)?, 0, None, 0);
            method.params.push(Arc::new(param));
        }
        for (sequence, name) in (1u32..).zip(self.params) {
            let param = Param::new(scope, rows.next(TableId::PARAM)?, sequence, Some(name), 0);
            method.params.push(Arc::new(param));
        }
        if let Some(count) = self.locals {
            // Freshly created, the lock cannot be occupied yet
            let _ = method.body.set(MethodBody::with_locals(scope, token, count));
        }

        Ok(Arc::new(method))
    }
}

/// Provides a fluent API for building a type and its members
///
/// The first failed token allocation is kept and reported by [`TypeBuilder::build`]; members
/// requested after it are dropped.
pub struct TypeBuilder {
    rows: Arc<RowAllocator>,
    ty: CilType,
    error: Option<Error>,
}

impl TypeBuilder {
    /// Start a public class
    ///
    /// ## Arguments
    /// * 'rows'      - The allocator shared by every handle of the assembly
    /// * 'namespace' - The type namespace, may be empty
    /// * 'name'      - The type name
    pub fn new(rows: Arc<RowAllocator>, namespace: &str, name: &str) -> Self {
        let (token, error) = match rows.next(TableId::TYPE_DEF) {
            Ok(token) => (token, None),
            Err(error) => (Token::new(0), Some(error)),
        };
        let ty = CilType::new(
            rows.scope(),
            token,
            namespace.to_string(),
            name.to_string(),
            0x0000_0001,
        );

        TypeBuilder { rows, ty, error }
    }

    fn allocate(&mut self, table: u8) -> Option<Token> {
        if self.error.is_some() {
            return None;
        }
        match self.rows.next(table) {
            Ok(token) => Some(token),
            Err(error) => {
                self.error = Some(error);
                None
            }
        }
    }

    fn add_method(&mut self, builder: MethodBuilder) -> Option<MethodRc> {
        if self.error.is_some() {
            return None;
        }
        match builder.build(&self.rows) {
            Ok(method) => {
                self.ty.methods.push(method.clone());
                Some(method)
            }
            Err(error) => {
                self.error = Some(error);
                None
            }
        }
    }

    /// Replace the raw `TypeAttributes`
    #[must_use]
    pub fn flags(mut self, flags: u32) -> Self {
        self.ty.flags = flags;
        self
    }

    /// Add a private instance field
    #[must_use]
    pub fn field(self, name: &str) -> Self {
        self.field_with(name, FieldAttributes::PRIVATE)
    }

    /// Add a field with explicit `FieldAttributes`
    #[must_use]
    pub fn field_with(mut self, name: &str, flags: u32) -> Self {
        if let Some(token) = self.allocate(TableId::FIELD) {
            let field = Field::new(self.ty.scope, token, name, flags);
            self.ty.fields.push(Arc::new(field));
        }
        self
    }

    /// Add an instance constructor
    #[must_use]
    pub fn constructor<F>(mut self, f: F) -> Self
    where
        F: FnOnce(MethodBuilder) -> MethodBuilder,
    {
        let builder = MethodBuilder::new(CTOR_NAME).flags(
            MethodAccessFlags::PUBLIC.bits()
                | MethodModifiers::HIDE_BY_SIG.bits()
                | MethodModifiers::SPECIAL_NAME.bits()
                | MethodModifiers::RTSPECIAL_NAME.bits(),
        );
        self.add_method(f(builder));
        self
    }

    /// Add the static type initializer
    #[must_use]
    pub fn type_initializer(mut self) -> Self {
        self.add_method(MethodBuilder::new(CCTOR_NAME).flags(
            MethodAccessFlags::PRIVATE.bits()
                | MethodModifiers::STATIC.bits()
                | MethodModifiers::HIDE_BY_SIG.bits()
                | MethodModifiers::SPECIAL_NAME.bits()
                | MethodModifiers::RTSPECIAL_NAME.bits(),
        ));
        self
    }

    /// Add an ordinary method
    #[must_use]
    pub fn method<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(MethodBuilder) -> MethodBuilder,
    {
        self.add_method(f(MethodBuilder::new(name)));
        self
    }

    /// Add a public property with getter and setter
    #[must_use]
    pub fn auto_property(self, name: &str) -> Self {
        self.property(name, MethodAccessFlags::PUBLIC, true, true)
    }

    /// Add a public property with only a getter
    #[must_use]
    pub fn read_only_property(self, name: &str) -> Self {
        self.property(name, MethodAccessFlags::PUBLIC, true, false)
    }

    /// Add a public property with only a setter
    #[must_use]
    pub fn write_only_property(self, name: &str) -> Self {
        self.property(name, MethodAccessFlags::PUBLIC, false, true)
    }

    /// Add a property whose getter and setter are private
    #[must_use]
    pub fn private_property(self, name: &str) -> Self {
        self.property(name, MethodAccessFlags::PRIVATE, true, true)
    }

    /// Add a property with any combination of accessors
    ///
    /// ## Arguments
    /// * 'name'   - The property name, accessors are named `get_{name}` / `set_{name}`
    /// * 'access' - Access of the generated accessor methods
    /// * 'getter' - Generate a get-accessor
    /// * 'setter' - Generate a set-accessor
    #[must_use]
    pub fn property(
        mut self,
        name: &str,
        access: MethodAccessFlags,
        getter: bool,
        setter: bool,
    ) -> Self {
        let accessor_flags =
            access.bits() | MethodModifiers::HIDE_BY_SIG.bits() | MethodModifiers::SPECIAL_NAME.bits();
        let Some(token) = self.allocate(TableId::PROPERTY) else {
            return self;
        };
        let property = Property::new(self.ty.scope, token, name, 0);

        if getter {
            let builder = MethodBuilder::new(format!("get_{name}"))
                .flags(accessor_flags)
                .returns();
            if let Some(method) = self.add_method(builder) {
                let _ = property.fn_getter.set(MethodRef::new(&method));
            }
        }
        if setter {
            let builder = MethodBuilder::new(format!("set_{name}"))
                .flags(accessor_flags)
                .param("value");
            if let Some(method) = self.add_method(builder) {
                let _ = property.fn_setter.set(MethodRef::new(&method));
            }
        }

        self.ty.properties.push(Arc::new(property));
        self
    }

    /// Add an event
    #[must_use]
    pub fn event(mut self, name: &str) -> Self {
        if let Some(token) = self.allocate(TableId::EVENT) {
            let event = Event::new(self.ty.scope, token, name, 0);
            self.ty.events.push(Arc::new(event));
        }
        self
    }

    /// Finish the type
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::InvalidArgument`] raised while allocating tokens for the type
    /// or one of its members.
    pub fn build(self) -> Result<CilTypeRc> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(Arc::new(self.ty)),
        }
    }
}
