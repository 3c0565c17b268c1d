//! Documents: the owner of an XML tree.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{new_node, NodeRef, XmlContent, XmlNode};
use crate::error::Result;
use crate::provider::NodeHandle;
use crate::xml::{XmlParser, XmlPrinter, XmlPrinterOptions};

/// An XML document.
///
/// The document node sits above the document element and keeps the whole
/// tree alive. Handles into the tree stay usable for as long as the document
/// (or any clone of it) exists.
#[derive(Debug, Clone)]
pub struct Document {
    root: NodeRef,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Document {
            root: new_node(XmlContent::Document),
        }
    }

    /// Wraps an existing document node.
    pub(crate) fn from_root(root: NodeRef) -> Self {
        Document { root }
    }

    /// Parses a document from a string.
    pub fn parse_str(xml: &str) -> Result<Self> {
        XmlParser::new().parse_str(xml)
    }

    /// Parses a document from a file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        XmlParser::new().parse_file(path)
    }

    /// Returns the document node.
    pub fn node(&self) -> XmlNode {
        XmlNode::from_ref(self.root.clone())
    }

    /// Returns the first top-level element, or a null handle.
    pub fn document_element(&self) -> XmlNode {
        self.node()
            .child_elements()
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// Appends a top-level element.
    pub fn append_child(&self, name: &str) -> XmlNode {
        self.node().append_child(name)
    }

    /// Prints the document without an XML declaration, on a single line.
    pub fn to_xml_string(&self) -> String {
        let mut output = Vec::new();
        {
            let mut printer = XmlPrinter::new(&mut output);
            // Writing into a Vec cannot fail.
            let _ = printer.print_fragment(&self.root);
        }
        String::from_utf8_lossy(&output).into_owned()
    }

    /// Prints the document, with XML declaration, to `writer`.
    pub fn write_to<W: Write>(&self, writer: W, options: XmlPrinterOptions) -> Result<()> {
        XmlPrinter::with_options(writer, options).print(&self.root)?;
        Ok(())
    }

    /// Prints the document to a file.
    pub fn save_file<P: AsRef<Path>>(&self, path: P, options: XmlPrinterOptions) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file), options)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
