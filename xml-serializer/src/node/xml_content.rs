//! XML content types for tree nodes.
//!
//! This module provides `XmlContent`, which represents the content of an XML
//! node: the document itself, an element (tag with attributes), text, or a
//! comment.

use std::collections::HashMap;
use std::fmt;

/// Represents the content of an XML node.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlContent {
    /// The document node at the top of every tree.
    Document,
    /// An XML element with a name and attributes.
    Element(XmlElement),
    /// XML text content.
    Text(XmlText),
    /// XML comment.
    Comment(XmlComment),
}

impl XmlContent {
    /// Returns true if this is the document node.
    pub fn is_document(&self) -> bool {
        matches!(self, XmlContent::Document)
    }

    /// Returns true if this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self, XmlContent::Element(_))
    }

    /// Returns true if this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self, XmlContent::Text(_))
    }

    /// Returns a reference to the element, if this is an element node.
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlContent::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns a mutable reference to the element, if this is an element node.
    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlContent::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns a reference to the text, if this is a text node.
    pub fn as_text(&self) -> Option<&XmlText> {
        match self {
            XmlContent::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Returns a mutable reference to the text, if this is a text node.
    pub fn as_text_mut(&mut self) -> Option<&mut XmlText> {
        match self {
            XmlContent::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// An XML element with a name and attributes.
///
/// Attribute order carries no meaning; printers sort by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: HashMap<String, String>,
}

impl XmlElement {
    /// Creates an element with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_attributes(name, HashMap::new())
    }

    /// Creates an element with the given attributes.
    pub fn with_attributes(name: impl Into<String>, attributes: HashMap<String, String>) -> Self {
        XmlElement {
            name: name.into(),
            attributes,
        }
    }

    /// Returns the qualified name of the element.
    pub fn qname(&self) -> &str {
        &self.name
    }

    /// Sets the qualified name of the element.
    pub fn set_qname(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the attributes.
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// Returns the value of a single attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Returns the attribute names in sorted order.
    pub fn sorted_attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.attributes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, name) in self.sorted_attribute_names().into_iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}={}", name, self.attributes[name])?;
        }
        write!(f, " }}")
    }
}

/// XML text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlText {
    text: String,
}

impl XmlText {
    /// Creates a new text node.
    pub fn new(text: impl Into<String>) -> Self {
        XmlText { text: text.into() }
    }

    /// Returns the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl fmt::Display for XmlText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// XML comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlComment {
    text: String,
}

impl XmlComment {
    /// Creates a new comment.
    pub fn new(text: impl Into<String>) -> Self {
        XmlComment { text: text.into() }
    }

    /// Returns the comment text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for XmlComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!-- {} -->", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_attributes() {
        let mut e = XmlElement::new("item");
        e.set_attribute("b", "2");
        e.set_attribute("a", "1");
        e.set_attribute("b", "3");

        assert_eq!(e.attribute("b"), Some("3"));
        assert_eq!(e.attribute("c"), None);
        assert_eq!(e.sorted_attribute_names(), ["a", "b"]);
        assert_eq!(e.to_string(), "item { a=1, b=3 }");
    }

    #[test]
    fn test_content_accessors() {
        let mut content = XmlContent::Text(XmlText::new("hi"));
        assert!(content.is_text());
        assert!(content.as_element().is_none());
        content.as_text_mut().unwrap().set_text("bye");
        assert_eq!(content.as_text().unwrap().text(), "bye");
        assert!(XmlContent::Document.is_document());
    }
}
