use std::any::TypeId;

use thiserror::Error;

macro_rules! invalid_argument {
    // Single string version
    ($param:expr, $msg:expr) => {
        crate::Error::InvalidArgument {
            parameter: $param,
            message: $msg.to_string(),
        }
    };

    // Format string with arguments version
    ($param:expr, $fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidArgument {
            parameter: $param,
            message: format!($fmt, $($arg)*),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Traversal is a pure, synchronous fold: any error aborts the fold it occurs in and is handed
/// back to the caller unchanged. Nothing in this crate retries or swallows an error, and no
/// partially folded visitor is returned alongside one.
///
/// # Error Categories
///
/// - [`Error::InvalidArgument`] - A required handle could not be obtained at a boundary
/// - [`Error::UnsupportedConversion`] - Strict classification found no matching refraction
/// - [`Error::Error`] - Failure raised by a visitor implementation
///
/// Limitations of the metadata itself, such as a method without a body (and therefore without
/// local variables), are not errors; the traversal treats them as empty.
///
/// # Examples
///
/// ```rust
/// use dotwalk::{refraction::try_classify, Error};
///
/// match try_classify(&"not a handle") {
///     Ok(node) => println!("classified as {}", node.kind()),
///     Err(Error::UnsupportedConversion { .. }) => println!("no refraction applies"),
///     Err(e) => println!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was absent.
    ///
    /// Raised when a node is built from a weak handle reference whose target has been dropped,
    /// including the property accessors followed during traversal. Always detected before any
    /// visitor operation for that argument runs.
    ///
    /// # Fields
    ///
    /// * `parameter` - Name of the argument that was absent
    /// * `message` - Detailed description of what was missing
    #[error("Invalid argument '{parameter}': {message}")]
    InvalidArgument {
        /// The name of the offending parameter
        parameter: &'static str,
        /// The message to be printed for the `InvalidArgument` error
        message: String,
    },

    /// No refraction could turn the source object into a node.
    ///
    /// Only raised by strict classification; tolerant classification returns
    /// [`crate::element::Node::Null`] for the same input.
    #[error("No refraction supports the source object ({type_id:?})")]
    UnsupportedConversion {
        /// Runtime type of the source object that could not be converted
        type_id: TypeId,
    },

    /// Generic error for miscellaneous failures.
    ///
    /// Visitor implementations use this to abort a traversal with their own message.
    #[error("{0}")]
    Error(String),
}
