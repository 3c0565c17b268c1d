//! Error types for the serializer.

use thiserror::Error;

/// Result type alias for serializer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serializing or loading documents.
///
/// A failed lookup while reading (`child` or `next_sibling` finding nothing)
/// is not an error: it yields a cursor whose [`is_valid`] is false.
///
/// [`is_valid`]: crate::Cursor::is_valid
#[derive(Error, Debug)]
pub enum Error {
    /// An operation was called on a cursor that does not point at a node.
    #[error("invalid cursor: `{operation}` called on a missing node")]
    InvalidCursor {
        /// The cursor method that was called.
        operation: &'static str,
    },

    /// Text could not be converted to the requested scalar type.
    ///
    /// Only produced under [`ConversionPolicy::Strict`].
    ///
    /// [`ConversionPolicy::Strict`]: crate::ConversionPolicy::Strict
    #[error("cannot convert {value:?} to {kind}")]
    Conversion {
        /// The raw text that failed to parse.
        value: String,
        /// Name of the target type.
        kind: &'static str,
    },

    /// The node provider refused a mutation.
    #[error("Node error: {0}")]
    Node(String),

    /// XML parsing error.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML error from quick-xml.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}
