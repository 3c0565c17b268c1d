//! The serialization cursor.
//!
//! A [`Cursor`] pairs a node handle with the session's strategy. Calling code
//! navigates and transfers values through it without knowing whether the
//! session reads or writes:
//!
//! ```
//! use xml_serializer::{Cursor, Document, Result, Session, XmlNode};
//!
//! #[derive(Default, PartialEq, Debug)]
//! struct Window {
//!     title: String,
//!     width: u32,
//!     maximized: bool,
//! }
//!
//! fn serialize(window: &mut Window, cursor: &Cursor<'_, XmlNode>) -> Result<()> {
//!     cursor.attribute_or("maximized", &mut window.maximized, false)?;
//!     cursor.child("title")?.scalar(&mut window.title)?;
//!     cursor.child("width")?.scalar_or(&mut window.width, 800)?;
//!     Ok(())
//! }
//!
//! let doc = Document::new();
//! let mut saved = Window { title: "main".into(), width: 800, maximized: false };
//! serialize(&mut saved, &Session::write_document(&doc, "window").cursor())?;
//! assert_eq!(doc.to_xml_string(), "<window><title>main</title><width /></window>");
//!
//! let mut loaded = Window::default();
//! serialize(&mut loaded, &Session::read_document(&doc).cursor())?;
//! assert_eq!(loaded, saved);
//! # Ok::<(), xml_serializer::Error>(())
//! ```

use std::fmt;

use tracing::debug;

use crate::direction::Direction;
use crate::error::{Error, Result};
use crate::provider::NodeHandle;
use crate::scalar::{Scalar, ScalarSlot, Slot};
use crate::strategy::{Field, Strategy};

/// A position in a tree bound to a session's direction.
///
/// Cursors borrow the session's strategy, so they cannot outlive the session.
/// Cloning a cursor clones the node handle only.
pub struct Cursor<'s, N: NodeHandle> {
    node: N,
    strategy: &'s dyn Strategy<N>,
}

impl<'s, N: NodeHandle> Cursor<'s, N> {
    /// Binds `node` to `strategy`.
    pub fn new(node: N, strategy: &'s dyn Strategy<N>) -> Self {
        Cursor { node, strategy }
    }

    /// The session's direction.
    pub fn direction(&self) -> Direction {
        self.strategy.direction()
    }

    /// Returns true if the session copies values out of the tree.
    pub fn is_reading(&self) -> bool {
        self.direction().is_reading()
    }

    /// Returns true if the session copies values into the tree.
    pub fn is_writing(&self) -> bool {
        self.direction().is_writing()
    }

    /// Returns false if a read-side lookup found nothing here.
    ///
    /// Every other method fails with [`Error::InvalidCursor`] on an invalid
    /// cursor.
    pub fn is_valid(&self) -> bool {
        !self.node.is_null()
    }

    /// The node this cursor points at.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Reads the node name into `name`, or renames the node from it.
    pub fn node_name(&self, name: &mut String) -> Result<()> {
        self.ensure_valid("node_name")?;
        self.strategy.node_name(&self.node, name)
    }

    /// Moves to the child called `name`.
    ///
    /// When reading and no such child exists, the returned cursor is invalid.
    pub fn child(&self, name: &str) -> Result<Cursor<'s, N>> {
        self.ensure_valid("child")?;
        Ok(self.at(self.strategy.child(&self.node, name)))
    }

    /// Moves to the next sibling called `name`.
    ///
    /// When writing, the sibling is inserted directly after this node.
    pub fn next_sibling(&self, name: &str) -> Result<Cursor<'s, N>> {
        self.ensure_valid("next_sibling")?;
        Ok(self.at(self.strategy.next_sibling(&self.node, name)))
    }

    /// Transfers `value` through the node's text.
    pub fn scalar<T: Scalar>(&self, value: &mut T) -> Result<()> {
        self.transfer("scalar", Field::Text, &mut ScalarSlot::new(value))
    }

    /// Transfers `value` through the node's text, omitting it when it equals
    /// `default` and back-filling `default` when the text is absent.
    pub fn scalar_or<T: Scalar>(&self, value: &mut T, default: T) -> Result<()> {
        self.transfer("scalar_or", Field::Text, &mut ScalarSlot::with_default(value, default))
    }

    /// Transfers `value` through the attribute `name`.
    pub fn attribute<T: Scalar>(&self, name: &str, value: &mut T) -> Result<()> {
        self.transfer("attribute", Field::Attribute(name), &mut ScalarSlot::new(value))
    }

    /// Transfers `value` through the attribute `name`, with the same default
    /// handling as [`scalar_or`](Self::scalar_or).
    pub fn attribute_or<T: Scalar>(&self, name: &str, value: &mut T, default: T) -> Result<()> {
        self.transfer(
            "attribute_or",
            Field::Attribute(name),
            &mut ScalarSlot::with_default(value, default),
        )
    }

    fn transfer(
        &self,
        operation: &'static str,
        field: Field<'_>,
        slot: &mut dyn Slot,
    ) -> Result<()> {
        self.ensure_valid(operation)?;
        self.strategy.transfer(&self.node, field, slot)
    }

    fn at(&self, node: N) -> Cursor<'s, N> {
        Cursor {
            node,
            strategy: self.strategy,
        }
    }

    pub(crate) fn ensure_valid(&self, operation: &'static str) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        debug!(
            target: "xml_serializer::cursor",
            operation,
            direction = %self.direction(),
            "operation on invalid cursor"
        );
        Err(Error::InvalidCursor { operation })
    }
}

impl<N: NodeHandle> Clone for Cursor<'_, N> {
    fn clone(&self) -> Self {
        self.at(self.node.clone())
    }
}

impl<N: NodeHandle + fmt::Debug> fmt::Debug for Cursor<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("node", &self.node)
            .field("direction", &self.direction())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::ConversionPolicy;
    use crate::node::{Document, XmlNode};
    use crate::strategy::{ReadStrategy, WriteStrategy};
    use crate::xml::parse_str;

    #[test]
    fn test_direction_queries() {
        let doc = Document::new();
        let reader = ReadStrategy::default();
        let cursor = Cursor::new(doc.node(), &reader);
        assert!(cursor.is_reading());
        assert!(!cursor.is_writing());

        let cursor = Cursor::new(doc.node(), &WriteStrategy);
        assert!(cursor.is_writing());
        assert!(!cursor.is_reading());
    }

    #[test]
    fn test_derived_cursors_share_direction() {
        let doc = Document::new();
        let root = Cursor::new(doc.append_child("doc"), &WriteStrategy);
        let child = root.child("a").unwrap();
        let sibling = child.next_sibling("b").unwrap();

        assert!(child.is_writing() && sibling.is_writing());
        assert_eq!(doc.to_xml_string(), "<doc><a /><b /></doc>");
    }

    #[test]
    fn test_invalid_cursor_fails_loudly() {
        let doc = parse_str("<doc/>").unwrap();
        let reader = ReadStrategy::default();
        let root = Cursor::new(doc.document_element(), &reader);

        let missing = root.child("missing").unwrap();
        assert!(!missing.is_valid());

        let mut value = 5i32;
        let mut name = String::new();
        let errors = [
            missing.scalar(&mut value).unwrap_err(),
            missing.scalar_or(&mut value, 1).unwrap_err(),
            missing.attribute("a", &mut value).unwrap_err(),
            missing.attribute_or("a", &mut value, 1).unwrap_err(),
            missing.node_name(&mut name).unwrap_err(),
            missing.child("x").unwrap_err(),
            missing.next_sibling("x").unwrap_err(),
        ];
        let operations: Vec<_> = errors
            .iter()
            .map(|e| match e {
                Error::InvalidCursor { operation } => *operation,
                other => panic!("unexpected error: {other}"),
            })
            .collect();
        assert_eq!(
            operations,
            ["scalar", "scalar_or", "attribute", "attribute_or", "node_name", "child", "next_sibling"]
        );
        assert_eq!(value, 5);
    }

    #[test]
    fn test_string_default() {
        let doc = parse_str("<doc/>").unwrap();
        let reader = ReadStrategy::new(ConversionPolicy::Strict);
        let root = Cursor::<XmlNode>::new(doc.document_element(), &reader);

        let mut label = String::new();
        root.attribute_or("label", &mut label, "untitled".into()).unwrap();
        assert_eq!(label, "untitled");
    }

    #[test]
    fn test_clone_points_at_same_node() {
        let doc = parse_str("<doc><a/></doc>").unwrap();
        let reader = ReadStrategy::default();
        let cursor = Cursor::new(doc.document_element(), &reader).child("a").unwrap();
        let copy = cursor.clone();
        assert_eq!(copy.node(), cursor.node());
        assert_eq!(format!("{:?}", copy), "Cursor { node: XmlNode(<a>), direction: Reading }");
    }
}
