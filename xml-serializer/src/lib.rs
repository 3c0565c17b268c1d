//! Direction-polymorphic XML serialization.
//!
//! Code that maps a data structure onto an XML tree is usually written
//! twice: once to read the tree into memory and once to write it back.
//! This crate lets the same traversal do both. A [`Session`] is created for
//! either [`Direction::Reading`] or [`Direction::Writing`]; its [`Cursor`]s
//! then navigate and transfer values identically in both directions.
//!
//! # Overview
//!
//! - [`Cursor::child`] and [`Cursor::next_sibling`] find existing nodes when
//!   reading and create them when writing. A failed lookup produces a cursor
//!   whose [`Cursor::is_valid`] is false; using it is an
//!   [`Error::InvalidCursor`].
//! - [`Cursor::scalar`] and [`Cursor::attribute`] move any [`Scalar`]
//!   (strings, 32/64-bit integers, booleans, floats) through a node's text or
//!   one of its attributes. The `_or` variants take a default: it is omitted
//!   from the tree on write and filled back in on read.
//! - Any tree engine can be used by implementing [`NodeHandle`]. The crate
//!   includes an in-memory XML tree, [`Document`] / [`XmlNode`], with a
//!   quick-xml based parser and a printer.
//!
//! # Example
//!
//! ```
//! use xml_serializer::{Document, Session};
//!
//! let doc = Document::new();
//! {
//!     let session = Session::write_document(&doc, "doc");
//!     let root = session.cursor();
//!     root.attribute("version", &mut 2u32)?;
//!     root.child("name")?.scalar(&mut String::from("demo"))?;
//!     // Optional children vanish when they hold their default
//!     root.field_or("count", &mut 5, 0)?;
//!     root.field_or("retries", &mut 0, 0)?;
//! }
//! assert_eq!(
//!     doc.to_xml_string(),
//!     r#"<doc version="2"><name>demo</name><count>5</count></doc>"#
//! );
//! # Ok::<(), xml_serializer::Error>(())
//! ```

pub mod cursor;
pub mod direction;
pub mod error;
pub mod node;
pub mod provider;
pub mod scalar;
pub mod session;
pub mod strategy;
pub mod traverse;
pub mod xml;

pub use cursor::Cursor;
pub use direction::{ConversionPolicy, Direction, SerializerOptions};
pub use error::{Error, Result};
pub use node::{
    Document, NodeInner, NodeRef, XmlComment, XmlContent, XmlElement, XmlNode, XmlText,
};
pub use provider::NodeHandle;
pub use scalar::{Scalar, ScalarSlot, Slot};
pub use session::Session;
pub use strategy::{Field, ReadStrategy, Strategy, WriteStrategy};
pub use traverse::Serializable;
pub use xml::{parse_file, parse_str, XmlParser, XmlPrinter, XmlPrinterOptions};
