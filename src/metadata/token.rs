use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Table identifiers (high byte of a [`Token`]) for the metadata tables a handle can originate from.
#[allow(non_snake_case)]
pub mod TableId {
    /// `TypeDef` table
    pub const TYPE_DEF: u8 = 0x02;
    /// `Field` table
    pub const FIELD: u8 = 0x04;
    /// `MethodDef` table
    pub const METHOD_DEF: u8 = 0x06;
    /// `Param` table
    pub const PARAM: u8 = 0x08;
    /// `StandAloneSig` table, the home of local variable signatures
    pub const STAND_ALONE_SIG: u8 = 0x11;
    /// `Event` table
    pub const EVENT: u8 = 0x14;
    /// `Property` table
    pub const PROPERTY: u8 = 0x17;
    /// `Assembly` table
    pub const ASSEMBLY: u8 = 0x20;
}

/// The token space a handle was allocated in.
///
/// Every [`RowAllocator`](crate::metadata::typesystem::RowAllocator) opens a fresh scope, and
/// two assemblies built from separate allocators reuse the same row numbers. A token is only
/// unique together with its scope, so handle equality compares both.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ScopeId(pub u64);

impl ScopeId {
    /// Open a new scope, distinct from every scope handed out before in this process
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ScopeId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// A metadata token identifying one row of a metadata table.
///
/// Within one [`ScopeId`] a token identifies one metadata entity. Handles compare by
/// (scope, token), which is what node equality is built upon.
///
/// - The high byte (bits 24-31) indicates the table
/// - The low 24 bits (bits 0-23) indicate the row index within that table
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token(pub u32);

impl Token {
    /// The largest row index the low 24 bits of a token can hold
    pub const MAX_ROW: u32 = 0x00FF_FFFF;

    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a token from a table id and a row index
    ///
    /// Returns `None` if `row` does not fit into 24 bits.
    ///
    /// ## Arguments
    /// * 'table' - The table id, see [`TableId`]
    /// * 'row'   - The 1-based row, at most [`Token::MAX_ROW`]
    #[must_use]
    pub fn from_parts(table: u8, row: u32) -> Option<Self> {
        if row > Self::MAX_ROW {
            return None;
        }
        Some(Token((u32::from(table) << 24) | row))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table type from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & Self::MAX_ROW
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_places_table_in_high_byte() {
        let token = Token::from_parts(TableId::METHOD_DEF, 7).unwrap();
        assert_eq!(token.value(), 0x0600_0007);
        assert_eq!(token.table(), TableId::METHOD_DEF);
        assert_eq!(token.row(), 7);
    }

    #[test]
    fn from_parts_rejects_rows_beyond_24_bits() {
        let last = Token::from_parts(TableId::FIELD, Token::MAX_ROW).unwrap();
        assert_eq!(last.table(), TableId::FIELD);
        assert_eq!(last.row(), 0x00FF_FFFF);

        assert_eq!(Token::from_parts(TableId::FIELD, 0x0100_0000), None);
        assert_eq!(Token::from_parts(TableId::FIELD, 0x0100_0001), None);
        assert_eq!(Token::from_parts(TableId::FIELD, u32::MAX), None);
    }

    #[test]
    fn scopes_are_distinct() {
        let a = ScopeId::next();
        let b = ScopeId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn null_token() {
        assert!(Token::new(0).is_null());
        assert!(!Token::from_parts(TableId::TYPE_DEF, 1).unwrap().is_null());
    }

    #[test]
    fn formatting() {
        let token = Token(0x1700_0003);
        assert_eq!(format!("{}", token), "0x17000003");

        let debug_str = format!("{:?}", token);
        assert!(debug_str.contains("table: 0x17"));
        assert!(debug_str.contains("row: 3"));
    }

    #[test]
    fn ordering_follows_table_then_row() {
        let field = Token::from_parts(TableId::FIELD, 9).unwrap();
        let method = Token::from_parts(TableId::METHOD_DEF, 1).unwrap();
        assert!(field < method);
        assert!(Token::from_parts(TableId::FIELD, 1).unwrap() < field);
    }

    #[test]
    fn u32_conversions() {
        let token: Token = 0x0200_0001u32.into();
        let raw: u32 = token.into();
        assert_eq!(raw, 0x0200_0001);
    }
}
