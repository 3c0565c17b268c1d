//! Serialization sessions.
//!
//! A session fixes the direction, owns the one strategy instance all of its
//! cursors share, and hands out the root cursor. Dropping the session
//! releases the strategy; the borrow checker keeps cursors from outliving it.

use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::direction::{Direction, SerializerOptions};
use crate::error::Result;
use crate::node::{Document, XmlNode};
use crate::provider::NodeHandle;
use crate::strategy::{ReadStrategy, Strategy, WriteStrategy};
use crate::traverse::Serializable;

/// One pass over a tree in a fixed direction.
pub struct Session<N: NodeHandle> {
    root: N,
    strategy: Box<dyn Strategy<N>>,
}

impl<N: NodeHandle> Session<N> {
    /// Starts a session rooted at `root`.
    pub fn new(root: N, direction: Direction, options: SerializerOptions) -> Self {
        let strategy: Box<dyn Strategy<N>> = match direction {
            Direction::Reading => Box::new(ReadStrategy::new(options.conversion)),
            Direction::Writing => Box::new(WriteStrategy),
        };
        debug!(
            target: "xml_serializer::session",
            %direction,
            conversion = ?options.conversion,
            root_missing = root.is_null(),
            "session started"
        );
        Session { root, strategy }
    }

    /// Starts a lenient reading session.
    pub fn reader(root: N) -> Self {
        Self::new(root, Direction::Reading, SerializerOptions::default())
    }

    /// Starts a writing session.
    pub fn writer(root: N) -> Self {
        Self::new(root, Direction::Writing, SerializerOptions::default())
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

    /// The node the session is rooted at.
    pub fn root(&self) -> &N {
        &self.root
    }

    /// A cursor at the session root.
    pub fn cursor(&self) -> Cursor<'_, N> {
        Cursor::new(self.root.clone(), self.strategy.as_ref())
    }

    /// Serializes `value` at the session root.
    pub fn serialize<T: Serializable>(&self, value: &mut T) -> Result<()> {
        value.serialize(&self.cursor())
    }
}

impl Session<XmlNode> {
    /// Reads from the document element of `doc`.
    ///
    /// If the document is empty the root cursor is invalid.
    pub fn read_document(doc: &Document) -> Self {
        Self::read_document_with(doc, SerializerOptions::default())
    }

    /// Reads from the document element of `doc` with explicit options.
    pub fn read_document_with(doc: &Document, options: SerializerOptions) -> Self {
        Self::new(doc.document_element(), Direction::Reading, options)
    }

    /// Appends a new element called `root_name` to `doc` and writes into it.
    pub fn write_document(doc: &Document, root_name: &str) -> Self {
        Self::writer(doc.append_child(root_name))
    }
}

impl<N: NodeHandle> Drop for Session<N> {
    fn drop(&mut self) {
        trace!(
            target: "xml_serializer::session",
            direction = %self.direction(),
            "session closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::xml::parse_str;

    #[test]
    fn test_direction_is_fixed() {
        let doc = Document::new();
        let session = Session::write_document(&doc, "doc");
        assert!(session.is_writing());
        let child = session.cursor().child("a").unwrap();
        assert!(child.is_writing() && !child.is_reading());
        assert_eq!(session.direction(), Direction::Writing);

        let session = Session::read_document(&doc);
        assert!(session.is_reading());
        assert!(session.cursor().child("a").unwrap().is_reading());
    }

    #[test]
    fn test_write_document_appends_root() {
        let doc = Document::new();
        {
            let session = Session::write_document(&doc, "doc");
            assert_eq!(session.root().name(), "doc");
        }
        assert_eq!(doc.to_xml_string(), "<doc />");
    }

    #[test]
    fn test_reading_empty_document() {
        let doc = Document::new();
        let session = Session::read_document(&doc);
        let mut value = 0i32;
        assert!(!session.cursor().is_valid());
        assert!(matches!(
            session.cursor().scalar(&mut value),
            Err(Error::InvalidCursor { operation: "scalar" })
        ));
    }

    #[test]
    fn test_options_reach_the_reader() {
        let doc = parse_str("<doc>NaN-ish</doc>").unwrap();
        let mut value = 3u32;

        Session::read_document(&doc).cursor().scalar(&mut value).unwrap();
        assert_eq!(value, 0);

        let strict = Session::read_document_with(&doc, SerializerOptions::strict());
        assert!(matches!(
            strict.cursor().scalar(&mut value),
            Err(Error::Conversion { kind: "u32", .. })
        ));
    }

    #[test]
    fn test_session_over_subtree() {
        let doc = parse_str("<doc><inner><v>4</v></inner></doc>").unwrap();
        let session = Session::reader(doc.document_element().child("inner"));
        let mut v = 0i64;
        session.cursor().child("v").unwrap().scalar(&mut v).unwrap();
        assert_eq!(v, 4);
    }

    #[test]
    fn test_early_exit_releases_session() {
        fn partial(doc: &Document) -> Result<()> {
            let session = Session::read_document(doc);
            let mut v = 0i32;
            session.cursor().child("missing")?.scalar(&mut v)?;
            Ok(())
        }

        let doc = parse_str("<doc/>").unwrap();
        assert!(partial(&doc).is_err());
        // The tree is untouched and still usable afterwards
        assert_eq!(doc.to_xml_string(), "<doc />");
    }
}
