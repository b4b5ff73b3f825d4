//! The assembly handle, root of every traversal.

use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use crossbeam_skiplist::SkipMap;

use crate::{
    metadata::{
        token::{TableId, Token},
        typesystem::{CilTypeList, CilTypeRc, RowAllocator, TypeBuilder},
    },
    Error, Result,
};

/// A reference to an `Assembly`
pub type AssemblyRc = Arc<Assembly>;

/// An assembly and the types it declares.
///
/// Types are kept twice: in declaration order, which is the order the traversal walks them in,
/// and in a token-ordered map for lookups. Assemblies are identified by name and version.
pub struct Assembly {
    /// Token (always row 1 of the `Assembly` table)
    pub token: Token,
    /// The simple name of the assembly
    pub name: String,
    /// Major version number
    pub major_version: u16,
    /// Minor version number
    pub minor_version: u16,
    /// Build number
    pub build_number: u16,
    /// Revision number
    pub revision_number: u16,
    types: CilTypeList,
    index: SkipMap<Token, CilTypeRc>,
}

impl Assembly {
    /// Create an empty assembly with version 0.0.0.0
    pub fn new(name: impl Into<String>) -> Self {
        Assembly {
            token: Token::new((u32::from(TableId::ASSEMBLY) << 24) | 1),
            name: name.into(),
            major_version: 0,
            minor_version: 0,
            build_number: 0,
            revision_number: 0,
            types: Arc::new(boxcar::Vec::new()),
            index: SkipMap::new(),
        }
    }

    /// Register a type declared by this assembly
    pub fn add_type(&self, ty: CilTypeRc) {
        self.index.insert(ty.token, ty.clone());
        self.types.push(ty);
    }

    /// The declared types, in declaration order
    #[must_use]
    pub fn types(&self) -> Vec<CilTypeRc> {
        self.types.iter().map(|(_, ty)| ty.clone()).collect()
    }

    /// Number of declared types
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.count()
    }

    /// Look up a declared type by its token
    #[must_use]
    pub fn type_by_token(&self, token: Token) -> Option<CilTypeRc> {
        self.index.get(&token).map(|entry| entry.value().clone())
    }

    /// Look up a declared type by `Namespace.Name`
    #[must_use]
    pub fn type_by_fullname(&self, fullname: &str) -> Option<CilTypeRc> {
        self.index
            .iter()
            .find(|entry| entry.value().fullname() == fullname)
            .map(|entry| entry.value().clone())
    }

    /// The version formatted as `major.minor.build.revision`
    #[must_use]
    pub fn version(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.major_version, self.minor_version, self.build_number, self.revision_number
        )
    }
}

impl PartialEq for Assembly {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.major_version == other.major_version
            && self.minor_version == other.minor_version
            && self.build_number == other.build_number
            && self.revision_number == other.revision_number
    }
}

impl Eq for Assembly {}

impl Hash for Assembly {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.major_version.hash(state);
        self.minor_version.hash(state);
        self.build_number.hash(state);
        self.revision_number.hash(state);
    }
}

/// Provides a fluent API for building an assembly out of [`TypeBuilder`]s
///
/// # Example
///
/// ```rust
/// use dotwalk::metadata::assembly::AssemblyBuilder;
///
/// let assembly = AssemblyBuilder::new("Sample")
///     .version(1, 2, 0, 0)
///     .class("Sample", "First", |t| t.field("a"))
///     .class("Sample", "Second", |t| t.event("Changed"))
///     .build()?;
///
/// assert_eq!(assembly.type_count(), 2);
/// assert!(assembly.type_by_fullname("Sample.Second").is_some());
/// # Ok::<(), dotwalk::Error>(())
/// ```
pub struct AssemblyBuilder {
    rows: Arc<RowAllocator>,
    assembly: Assembly,
    error: Option<Error>,
}

impl AssemblyBuilder {
    /// Start a new assembly with its own token space
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rows(Arc::new(RowAllocator::new()), name)
    }

    /// Start a new assembly allocating tokens from `rows`
    pub fn with_rows(rows: Arc<RowAllocator>, name: impl Into<String>) -> Self {
        AssemblyBuilder {
            rows,
            assembly: Assembly::new(name),
            error: None,
        }
    }

    /// Set the assembly version
    #[must_use]
    pub fn version(mut self, major: u16, minor: u16, build: u16, revision: u16) -> Self {
        self.assembly.major_version = major;
        self.assembly.minor_version = minor;
        self.assembly.build_number = build;
        self.assembly.revision_number = revision;
        self
    }

    /// Declare a type, populated by `f`
    #[must_use]
    pub fn class<F>(mut self, namespace: &str, name: &str, f: F) -> Self
    where
        F: FnOnce(TypeBuilder) -> TypeBuilder,
    {
        if self.error.is_some() {
            return self;
        }
        match f(TypeBuilder::new(self.rows.clone(), namespace, name)).build() {
            Ok(ty) => self.assembly.add_type(ty),
            Err(error) => self.error = Some(error),
        }
        self
    }

    /// Finish the assembly
    ///
    /// # Errors
    ///
    /// Returns the first error raised by one of the declared types, see [`TypeBuilder::build`].
    pub fn build(self) -> Result<AssemblyRc> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(Arc::new(self.assembly)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_keep_declaration_order() {
        let assembly = AssemblyBuilder::new("Order")
            .class("B", "Second", |t| t)
            .class("A", "First", |t| t)
            .build()
            .unwrap();

        let names: Vec<_> = assembly.types().iter().map(|t| t.fullname()).collect();
        assert_eq!(names, vec!["B.Second", "A.First"]);
    }

    #[test]
    fn lookup_by_token() {
        let assembly = AssemblyBuilder::new("Lookup")
            .class("N", "One", |t| t)
            .class("N", "Two", |t| t)
            .build()
            .unwrap();

        let two = assembly.type_by_fullname("N.Two").unwrap();
        let found = assembly.type_by_token(two.token).unwrap();
        assert!(Arc::ptr_eq(&two, &found));
        assert!(assembly
            .type_by_token(Token::from_parts(TableId::TYPE_DEF, 99).unwrap())
            .is_none());
    }

    #[test]
    fn identity_is_name_and_version() {
        let a = AssemblyBuilder::new("Same").version(1, 0, 0, 0).build().unwrap();
        let b = AssemblyBuilder::new("Same").version(1, 0, 0, 0).build().unwrap();
        let c = AssemblyBuilder::new("Same").version(2, 0, 0, 0).build().unwrap();

        assert!(a == b);
        assert!(a != c);
        assert_eq!(a.version(), "1.0.0.0");
        assert_eq!(a.token.table(), TableId::ASSEMBLY);
        assert_eq!(a.token.row(), 1);
    }

    #[test]
    fn separately_built_assemblies_do_not_share_handles() {
        let a = AssemblyBuilder::new("A")
            .class("A", "Alpha", |t| t.field("x"))
            .build()
            .unwrap();
        let b = AssemblyBuilder::new("B")
            .class("B", "Beta", |t| t.field("y"))
            .build()
            .unwrap();

        let alpha = &a.types()[0];
        let beta = &b.types()[0];
        assert_eq!(alpha.token, beta.token);
        assert!(**alpha != **beta);
        assert!(*alpha.declared_fields()[0] != *beta.declared_fields()[0]);
    }

    #[test]
    fn shared_allocator_keeps_one_scope() {
        let rows = Arc::new(RowAllocator::new());
        let a = AssemblyBuilder::with_rows(rows.clone(), "A")
            .class("N", "T", |t| t)
            .build()
            .unwrap();
        let b = AssemblyBuilder::with_rows(rows.clone(), "B")
            .class("N", "T", |t| t)
            .build()
            .unwrap();

        assert_eq!(a.types()[0].scope, b.types()[0].scope);
        assert_ne!(a.types()[0].token, b.types()[0].token);
    }

    #[test]
    fn failed_type_fails_the_assembly() {
        let rows = Arc::new(RowAllocator::new());
        rows.exhaust(TableId::EVENT);

        let result = AssemblyBuilder::with_rows(rows, "Full")
            .class("N", "Ok", |t| t.field("a"))
            .class("N", "Broken", |t| t.event("E"))
            .class("N", "Skipped", |t| t)
            .build();
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }
}
