//! Node structures for the in-memory XML tree.
//!
//! Nodes are shared through [`NodeRef`] (`Rc<RefCell<NodeInner>>`) with weak
//! parent links, so a handle to any node can walk and edit its surroundings.
//! [`XmlNode`] wraps an optional `NodeRef` and implements the serializer's
//! [`NodeHandle`](crate::NodeHandle) capability on top of it.

mod document;
mod handle;
mod xml_content;

pub use document::Document;
pub use handle::XmlNode;
pub use xml_content::{XmlComment, XmlContent, XmlElement, XmlText};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A reference-counted pointer to a node.
pub type NodeRef = Rc<RefCell<NodeInner>>;

/// Creates a new node reference holding `content`.
pub fn new_node(content: XmlContent) -> NodeRef {
    Rc::new(RefCell::new(NodeInner::new(content)))
}

/// The inner data of a node in the tree.
///
/// Each node has:
/// - XML content (document, element, text or comment)
/// - 0 or more children, in document order
/// - A parent (except for the document node and detached nodes)
/// - A position among siblings
#[derive(Debug)]
pub struct NodeInner {
    /// XML content of this node.
    content: XmlContent,
    /// Child nodes.
    children: Vec<NodeRef>,
    /// Weak reference to parent node.
    parent: Weak<RefCell<NodeInner>>,
    /// Zero-based position among siblings (-1 when detached).
    child_pos: i32,
}

impl NodeInner {
    /// Creates a detached node with the given content.
    pub fn new(content: XmlContent) -> Self {
        NodeInner {
            content,
            children: Vec::new(),
            parent: Weak::new(),
            child_pos: -1,
        }
    }

    /// Returns the content of this node.
    pub fn content(&self) -> &XmlContent {
        &self.content
    }

    /// Returns a mutable reference to the content.
    pub fn content_mut(&mut self) -> &mut XmlContent {
        &mut self.content
    }

    /// Returns the number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns a reference to the child at the given index.
    pub fn child(&self, index: usize) -> Option<&NodeRef> {
        self.children.get(index)
    }

    /// Returns the children as a slice.
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Returns a weak reference to the parent.
    pub fn parent(&self) -> &Weak<RefCell<NodeInner>> {
        &self.parent
    }

    /// Returns the child position (0-based index among siblings, -1 if detached).
    pub fn child_pos(&self) -> i32 {
        self.child_pos
    }

    /// Returns the element name, if this node is an element.
    pub fn element_name(&self) -> Option<&str> {
        self.content.as_element().map(XmlElement::qname)
    }

    /// Returns true if this node can own child nodes.
    pub fn accepts_children(&self) -> bool {
        matches!(self.content, XmlContent::Document | XmlContent::Element(_))
    }
}

/// Helper functions that work with NodeRef.
impl NodeInner {
    /// Adds a child node at the end of the parent's children.
    pub fn add_child_to_ref(parent_ref: &NodeRef, child_ref: NodeRef) {
        {
            let mut child = child_ref.borrow_mut();
            child.parent = Rc::downgrade(parent_ref);
            child.child_pos = parent_ref.borrow().children.len() as i32;
        }
        parent_ref.borrow_mut().children.push(child_ref);
    }

    /// Inserts a child at the given index.
    pub fn add_child_at_to_ref(parent_ref: &NodeRef, index: usize, child_ref: NodeRef) {
        {
            let mut child = child_ref.borrow_mut();
            child.parent = Rc::downgrade(parent_ref);
            child.child_pos = index as i32;
        }
        {
            let mut parent = parent_ref.borrow_mut();
            parent.children.insert(index, child_ref);
            // Positions after the insertion point shift by one
            for i in (index + 1)..parent.children.len() {
                parent.children[i].borrow_mut().child_pos = i as i32;
            }
        }
    }

    /// Gets the right sibling of a node.
    pub fn right_sibling_of_ref(node_ref: &NodeRef) -> Option<NodeRef> {
        let node = node_ref.borrow();
        if node.child_pos < 0 {
            return None;
        }
        let parent = node.parent.upgrade()?;
        let parent_borrowed = parent.borrow();
        parent_borrowed
            .children
            .get((node.child_pos + 1) as usize)
            .cloned()
    }

    /// Finds the first child element of `parent_ref` called `name`.
    pub fn find_child_element(parent_ref: &NodeRef, name: &str) -> Option<NodeRef> {
        parent_ref
            .borrow()
            .children
            .iter()
            .find(|child| child.borrow().element_name() == Some(name))
            .cloned()
    }

    /// Finds the first element after `node_ref` among its siblings called `name`.
    pub fn find_next_sibling_element(node_ref: &NodeRef, name: &str) -> Option<NodeRef> {
        let mut current = Self::right_sibling_of_ref(node_ref);
        while let Some(sibling) = current {
            if sibling.borrow().element_name() == Some(name) {
                return Some(sibling);
            }
            current = Self::right_sibling_of_ref(&sibling);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str) -> NodeRef {
        new_node(XmlContent::Element(XmlElement::new(name)))
    }

    fn names(parent: &NodeRef) -> Vec<String> {
        parent
            .borrow()
            .children()
            .iter()
            .filter_map(|c| c.borrow().element_name().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_add_child() {
        let parent = element("parent");
        let child1 = element("child1");
        let child2 = element("child2");

        NodeInner::add_child_to_ref(&parent, child1.clone());
        NodeInner::add_child_to_ref(&parent, child2.clone());

        assert_eq!(parent.borrow().child_count(), 2);
        assert_eq!(child1.borrow().child_pos(), 0);
        assert_eq!(child2.borrow().child_pos(), 1);
        assert!(Rc::ptr_eq(
            &child2.borrow().parent().upgrade().unwrap(),
            &parent
        ));
    }

    #[test]
    fn test_insert_child() {
        let parent = element("p");
        let a = element("a");
        let b = element("b");
        let c = element("c");

        NodeInner::add_child_to_ref(&parent, a.clone());
        NodeInner::add_child_to_ref(&parent, c.clone());
        NodeInner::add_child_at_to_ref(&parent, 1, b.clone());

        assert_eq!(names(&parent), ["a", "b", "c"]);
        assert_eq!(b.borrow().child_pos(), 1);
        assert_eq!(c.borrow().child_pos(), 2);
    }

    #[test]
    fn test_find_elements_by_name() {
        let parent = element("p");
        let text = new_node(XmlContent::Text(XmlText::new("x")));
        let a = element("a");
        let b1 = element("b");
        let b2 = element("b");
        for child in [&text, &a, &b1, &b2] {
            NodeInner::add_child_to_ref(&parent, child.clone());
        }

        let found = NodeInner::find_child_element(&parent, "b").unwrap();
        assert!(Rc::ptr_eq(&found, &b1));
        assert!(NodeInner::find_child_element(&parent, "missing").is_none());

        let next = NodeInner::find_next_sibling_element(&a, "b").unwrap();
        assert!(Rc::ptr_eq(&next, &b1));
        let next = NodeInner::find_next_sibling_element(&b1, "b").unwrap();
        assert!(Rc::ptr_eq(&next, &b2));
        assert!(NodeInner::find_next_sibling_element(&b2, "b").is_none());
    }

    #[test]
    fn test_only_documents_and_elements_take_children() {
        assert!(NodeInner::new(XmlContent::Document).accepts_children());
        assert!(NodeInner::new(XmlContent::Element(XmlElement::new("e"))).accepts_children());
        assert!(!NodeInner::new(XmlContent::Text(XmlText::new("t"))).accepts_children());
    }
}
