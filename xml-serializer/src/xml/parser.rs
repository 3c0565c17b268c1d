//! XML parser that builds node trees.
//!
//! This parser uses quick-xml's streaming API. Text runs (including CDATA
//! sections and entity references) between two markup events are joined
//! into a single text node; runs made only of whitespace are dropped so
//! indented documents read back the same as compact ones.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::node::{
    new_node, Document, NodeInner, NodeRef, XmlComment, XmlContent, XmlElement, XmlText,
};

/// XML parser that builds node trees.
#[derive(Debug, Clone)]
pub struct XmlParser {
    keep_comments: bool,
}

impl XmlParser {
    /// Creates a parser that keeps comments.
    pub fn new() -> Self {
        XmlParser {
            keep_comments: true,
        }
    }

    /// Sets whether comments become nodes of the tree.
    pub fn keep_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }

    /// Parses XML from a string.
    pub fn parse_str(&self, xml: &str) -> Result<Document> {
        let mut reader = Reader::from_str(xml);
        self.configure(&mut reader);
        self.parse_reader(&mut reader)
    }

    /// Parses XML from a file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let file = File::open(path)?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        self.configure(&mut reader);
        self.parse_reader(&mut reader)
    }

    fn configure<R>(&self, reader: &mut Reader<R>) {
        // Whitespace is handled when text nodes are flushed
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;
    }

    /// Parses XML from a quick-xml Reader.
    fn parse_reader<R: BufRead>(&self, reader: &mut Reader<R>) -> Result<Document> {
        let root = new_node(XmlContent::Document);

        let mut node_stack: Vec<NodeRef> = vec![root.clone()];
        let mut current_text = String::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    Self::flush_text(&mut current_text, &node_stack);
                    let node = new_node(XmlContent::Element(self.parse_element(e, reader)?));
                    if let Some(parent) = node_stack.last() {
                        NodeInner::add_child_to_ref(parent, node.clone());
                    }
                    node_stack.push(node);
                }
                Ok(Event::End(_)) => {
                    Self::flush_text(&mut current_text, &node_stack);
                    if node_stack.len() > 1 {
                        node_stack.pop();
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    // Self-closing tag - handle like Start + End
                    Self::flush_text(&mut current_text, &node_stack);
                    let node = new_node(XmlContent::Element(self.parse_element(e, reader)?));
                    if let Some(parent) = node_stack.last() {
                        NodeInner::add_child_to_ref(parent, node);
                    }
                }
                Ok(Event::Text(e)) => {
                    let raw =
                        std::str::from_utf8(e.as_ref()).map_err(|e| Error::Parse(e.to_string()))?;
                    let text = unescape(raw).map_err(|e| Error::Parse(e.to_string()))?;
                    current_text.push_str(&text);
                }
                Ok(Event::CData(ref e)) => {
                    current_text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
                Ok(Event::GeneralRef(ref e)) => {
                    let name =
                        std::str::from_utf8(e.as_ref()).map_err(|e| Error::Parse(e.to_string()))?;
                    current_text.push_str(&resolve_reference(name)?);
                }
                Ok(Event::Comment(ref e)) => {
                    Self::flush_text(&mut current_text, &node_stack);
                    if self.keep_comments {
                        let comment_text = String::from_utf8_lossy(e.as_ref()).to_string();
                        let comment_node =
                            new_node(XmlContent::Comment(XmlComment::new(comment_text)));
                        if let Some(parent) = node_stack.last() {
                            NodeInner::add_child_to_ref(parent, comment_node);
                        }
                    }
                }
                Ok(Event::Decl(_)) | Ok(Event::PI(_)) | Ok(Event::DocType(_)) => {
                    // Not part of the tree model
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(e.into()),
            }
            buf.clear();
        }

        Self::flush_text(&mut current_text, &node_stack);
        Ok(Document::from_root(root))
    }

    /// Parses an element's name and attributes.
    fn parse_element<R: BufRead>(&self, e: &BytesStart, reader: &Reader<R>) -> Result<XmlElement> {
        let name = reader
            .decoder()
            .decode(e.name().as_ref())
            .map_err(|e| Error::Parse(e.to_string()))?
            .to_string();

        let mut attributes = HashMap::new();
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|e| Error::Parse(format!("Attribute error: {}", e)))?;
            let key = reader
                .decoder()
                .decode(attr.key.as_ref())
                .map_err(|e| Error::Parse(e.to_string()))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::Parse(e.to_string()))?
                .to_string();
            attributes.insert(key, value);
        }

        Ok(XmlElement::with_attributes(name, attributes))
    }

    /// Turns accumulated text into a text node of the current element.
    fn flush_text(current_text: &mut String, node_stack: &[NodeRef]) {
        if current_text.is_empty() {
            return;
        }
        let text = std::mem::take(current_text);
        if text.trim().is_empty() {
            return;
        }
        if let Some(parent) = node_stack.last() {
            // Text directly under the document node has nowhere to go
            if parent.borrow().content().is_element() {
                let text_node = new_node(XmlContent::Text(XmlText::new(text)));
                NodeInner::add_child_to_ref(parent, text_node);
            }
        }
    }
}

impl Default for XmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves `&name;` to its replacement text.
fn resolve_reference(name: &str) -> Result<String> {
    if let Some(text) = resolve_predefined_entity(name) {
        return Ok(text.to_string());
    }
    let code = if let Some(hex) = name.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse().ok()
    } else {
        return Err(Error::Parse(format!("unknown entity &{};", name)));
    };
    code.and_then(char::from_u32)
        .map(String::from)
        .ok_or_else(|| Error::Parse(format!("invalid character reference &{};", name)))
}

/// Parses XML from a file with the default parser.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    XmlParser::new().parse_file(path)
}

/// Parses XML from a string with the default parser.
pub fn parse_str(xml: &str) -> Result<Document> {
    XmlParser::new().parse_str(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::NodeHandle;

    #[test]
    fn test_parse_simple_xml() {
        let doc = parse_str(r#"<root><child>text</child></root>"#).unwrap();

        let root = doc.document_element();
        assert_eq!(root.name(), "root");
        assert_eq!(root.child("child").text().as_deref(), Some("text"));
        assert_eq!(doc.node().child_names(), ["root"]);
    }

    #[test]
    fn test_parse_with_attributes() {
        let doc = parse_str(r#"<root id="foo" class="bar">content</root>"#).unwrap();
        let root = doc.document_element();

        assert_eq!(root.attribute("id").as_deref(), Some("foo"));
        assert_eq!(root.attribute("class").as_deref(), Some("bar"));
        assert_eq!(root.text().as_deref(), Some("content"));
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let doc = parse_str("<root>  hello   world  </root>").unwrap();
        assert_eq!(
            doc.document_element().text().as_deref(),
            Some("  hello   world  ")
        );
    }

    #[test]
    fn test_whitespace_between_elements_is_dropped() {
        let doc = parse_str("<root>\n  <a>1</a>\n  <b />\n</root>").unwrap();
        let root = doc.document_element();

        assert!(root.text().is_none());
        assert_eq!(root.child_names(), ["a", "b"]);
    }

    #[test]
    fn test_entities_and_cdata() {
        let doc = parse_str(
            r#"<root a="&lt;&amp;&gt;"><t>x &amp; y &#65;&#x42;</t><c><![CDATA[<raw>]]></c></root>"#,
        )
        .unwrap();
        let root = doc.document_element();

        assert_eq!(root.attribute("a").as_deref(), Some("<&>"));
        assert_eq!(root.child("t").text().as_deref(), Some("x & y AB"));
        assert_eq!(root.child("c").text().as_deref(), Some("<raw>"));
    }

    #[test]
    fn test_comments() {
        let xml = "<root><!--note--><a/></root>";
        let kept = parse_str(xml).unwrap();
        let root = kept.document_element();
        assert_eq!(root.node_ref().unwrap().borrow().child_count(), 2);

        let dropped = XmlParser::new().keep_comments(false).parse_str(xml).unwrap();
        let root = dropped.document_element();
        assert_eq!(root.node_ref().unwrap().borrow().child_count(), 1);
    }

    #[test]
    fn test_declaration_is_ignored() {
        let doc = parse_str(r#"<?xml version="1.0" encoding="UTF-8"?><doc/>"#).unwrap();
        assert_eq!(doc.node().child_names(), ["doc"]);
    }

    #[test]
    fn test_malformed_input() {
        let err = parse_str("<a></b>").unwrap_err();
        assert!(matches!(err, Error::Xml(_)));
        let message = err.to_string();
        assert!(message.starts_with("XML error: "), "{message}");
        assert!(!message.contains("parse error"), "{message}");
    }
}
