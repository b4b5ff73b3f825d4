//! Member handles declared by a type: fields, properties, events and parameters.
//!
//! Each handle carries its metadata [`Token`](crate::metadata::token::Token) and the
//! [`ScopeId`](crate::metadata::token::ScopeId) the token was allocated in. The pair is its
//! identity: equality and hashing of handles (and therefore of the nodes wrapping them) only look
//! at scope and token.

mod event;
mod field;
mod param;
mod property;

pub use event::*;
pub use field::*;
pub use param::*;
pub use property::*;
