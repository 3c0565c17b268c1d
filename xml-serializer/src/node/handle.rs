//! Nullable node handles for the in-memory tree.

use std::fmt;
use std::rc::Rc;

use super::{new_node, NodeInner, NodeRef, XmlContent, XmlElement, XmlText};
use crate::provider::NodeHandle;

/// A handle to a node of an XML tree, or to nothing.
///
/// Cloning a handle clones the reference, never the subtree. Two handles are
/// equal when they point at the same node (or are both null).
#[derive(Clone, Default)]
pub struct XmlNode(Option<NodeRef>);

impl XmlNode {
    /// A handle that points at nothing.
    pub fn null() -> Self {
        XmlNode(None)
    }

    /// Wraps a node reference.
    pub fn from_ref(node: NodeRef) -> Self {
        XmlNode(Some(node))
    }

    /// Returns the underlying node reference.
    pub fn node_ref(&self) -> Option<&NodeRef> {
        self.0.as_ref()
    }

    /// Returns the parent node, or a null handle.
    pub fn parent(&self) -> XmlNode {
        XmlNode(self.0.as_ref().and_then(|n| n.borrow().parent().upgrade()))
    }

    /// Returns the child elements in document order.
    pub fn child_elements(&self) -> Vec<XmlNode> {
        match &self.0 {
            Some(node) => node
                .borrow()
                .children()
                .iter()
                .filter(|c| c.borrow().content().is_element())
                .cloned()
                .map(XmlNode::from_ref)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Names of the child elements, in document order.
    pub fn child_names(&self) -> Vec<String> {
        self.child_elements().iter().map(NodeHandle::name).collect()
    }

    fn first_text_child(node: &NodeRef) -> Option<NodeRef> {
        node.borrow()
            .children()
            .iter()
            .find(|c| c.borrow().content().is_text())
            .cloned()
    }
}

impl NodeHandle for XmlNode {
    fn is_null(&self) -> bool {
        self.0.is_none()
    }

    fn name(&self) -> String {
        self.0
            .as_ref()
            .and_then(|n| n.borrow().element_name().map(str::to_string))
            .unwrap_or_default()
    }

    fn set_name(&self, name: &str) -> bool {
        let Some(node) = &self.0 else {
            return false;
        };
        match node.borrow_mut().content_mut().as_element_mut() {
            Some(element) => {
                element.set_qname(name);
                true
            }
            None => false,
        }
    }

    fn child(&self, name: &str) -> Self {
        XmlNode(
            self.0
                .as_ref()
                .and_then(|n| NodeInner::find_child_element(n, name)),
        )
    }

    fn append_child(&self, name: &str) -> Self {
        let Some(node) = &self.0 else {
            return XmlNode::null();
        };
        if !node.borrow().accepts_children() {
            return XmlNode::null();
        }
        let child = new_node(XmlContent::Element(XmlElement::new(name)));
        NodeInner::add_child_to_ref(node, child.clone());
        XmlNode::from_ref(child)
    }

    fn next_sibling(&self, name: &str) -> Self {
        XmlNode(
            self.0
                .as_ref()
                .and_then(|n| NodeInner::find_next_sibling_element(n, name)),
        )
    }

    fn insert_sibling_after(&self, name: &str) -> Self {
        let Some(node) = &self.0 else {
            return XmlNode::null();
        };
        let (parent, pos) = {
            let borrowed = node.borrow();
            (borrowed.parent().upgrade(), borrowed.child_pos())
        };
        let Some(parent) = parent else {
            return XmlNode::null();
        };
        let sibling = new_node(XmlContent::Element(XmlElement::new(name)));
        NodeInner::add_child_at_to_ref(&parent, (pos + 1) as usize, sibling.clone());
        XmlNode::from_ref(sibling)
    }

    fn text(&self) -> Option<String> {
        let node = self.0.as_ref()?;
        let text_node = Self::first_text_child(node)?;
        let borrowed = text_node.borrow();
        borrowed.content().as_text().map(|t| t.text().to_string())
    }

    fn set_text(&self, text: &str) -> bool {
        let Some(node) = &self.0 else {
            return false;
        };
        if !node.borrow().content().is_element() {
            return false;
        }
        match Self::first_text_child(node) {
            Some(existing) => {
                if let Some(t) = existing.borrow_mut().content_mut().as_text_mut() {
                    t.set_text(text);
                }
            }
            None => {
                let text_node = new_node(XmlContent::Text(XmlText::new(text)));
                NodeInner::add_child_to_ref(node, text_node);
            }
        }
        true
    }

    fn attribute(&self, name: &str) -> Option<String> {
        let node = self.0.as_ref()?;
        let borrowed = node.borrow();
        borrowed
            .content()
            .as_element()
            .and_then(|e| e.attribute(name))
            .map(str::to_string)
    }

    fn set_attribute(&self, name: &str, value: &str) -> bool {
        let Some(node) = &self.0 else {
            return false;
        };
        match node.borrow_mut().content_mut().as_element_mut() {
            Some(element) => {
                element.set_attribute(name, value);
                true
            }
            None => false,
        }
    }
}

impl PartialEq for XmlNode {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for XmlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("XmlNode(null)"),
            Some(node) => match node.borrow().content() {
                XmlContent::Document => f.write_str("XmlNode(#document)"),
                XmlContent::Element(e) => write!(f, "XmlNode(<{}>)", e.qname()),
                XmlContent::Text(t) => write!(f, "XmlNode({:?})", t.text()),
                XmlContent::Comment(c) => write!(f, "XmlNode({})", c),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Document;

    #[test]
    fn test_null_handle_operations_fail() {
        let null = XmlNode::null();
        assert!(null.is_null());
        assert_eq!(null.name(), "");
        assert!(!null.set_name("x"));
        assert!(null.child("x").is_null());
        assert!(null.append_child("x").is_null());
        assert!(null.insert_sibling_after("x").is_null());
        assert!(null.text().is_none());
        assert!(!null.set_text("x"));
        assert!(null.attribute("x").is_none());
        assert!(!null.set_attribute("x", "y"));
    }

    #[test]
    fn test_append_and_find_child() {
        let doc = Document::new();
        let root = doc.append_child("root");
        let a = root.append_child("a");

        assert_eq!(root.child("a"), a);
        assert!(root.child("b").is_null());
        assert_eq!(a.parent(), root);
        assert_eq!(doc.document_element(), root);
    }

    #[test]
    fn test_insert_sibling_after_keeps_order() {
        let doc = Document::new();
        let p = doc.append_child("p");
        let a = p.append_child("a");
        a.insert_sibling_after("b");
        a.insert_sibling_after("c");

        assert_eq!(p.child_names(), ["a", "c", "b"]);
        assert_eq!(a.next_sibling("b").name(), "b");
        assert!(p.child("b").next_sibling("c").is_null());
    }

    #[test]
    fn test_document_node_has_no_siblings() {
        let doc = Document::new();
        assert!(doc.node().insert_sibling_after("x").is_null());
    }

    #[test]
    fn test_text_replaces_first_text_child() {
        let doc = Document::new();
        let e = doc.append_child("e");
        assert!(e.text().is_none());

        assert!(e.set_text("one"));
        assert!(e.set_text("two"));
        assert_eq!(e.text().as_deref(), Some("two"));
        assert_eq!(e.node_ref().unwrap().borrow().child_count(), 1);
    }

    #[test]
    fn test_text_nodes_reject_mutation() {
        let doc = Document::new();
        let e = doc.append_child("e");
        e.set_text("t");
        let text = XmlNode::from_ref(e.node_ref().unwrap().borrow().child(0).unwrap().clone());

        assert!(!text.set_text("u"));
        assert!(!text.set_attribute("a", "b"));
        assert!(!text.set_name("n"));
        assert!(text.append_child("c").is_null());
    }

    #[test]
    fn test_attributes_and_rename() {
        let doc = Document::new();
        let e = doc.append_child("e");
        assert!(e.set_attribute("k", "v"));
        assert_eq!(e.attribute("k").as_deref(), Some("v"));
        assert!(e.attribute("missing").is_none());

        assert!(e.set_name("renamed"));
        assert_eq!(e.name(), "renamed");
    }
}
