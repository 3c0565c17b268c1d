//! The node capability the serializer runs against.
//!
//! Any tree engine can back a session by implementing [`NodeHandle`] for its
//! node handle type. The crate ships one implementation, [`XmlNode`].
//!
//! [`XmlNode`]: crate::XmlNode

/// A cheap, clonable reference to a position in a tree.
///
/// Handles may be null (pointing at nothing). Lookups that find nothing
/// return a null handle rather than failing, and operations on a null handle
/// are no-ops that report failure. Mutating methods take `&self`: the tree
/// is expected to use interior mutability, the way shared node references do.
pub trait NodeHandle: Clone {
    /// Returns true if this handle points at no node.
    fn is_null(&self) -> bool;

    /// Returns the node's name, or an empty string for unnamed nodes.
    fn name(&self) -> String;

    /// Renames the node. Returns false if the node cannot be renamed.
    fn set_name(&self, name: &str) -> bool;

    /// Finds the first child element called `name`.
    fn child(&self, name: &str) -> Self;

    /// Appends a new child element called `name` and returns it.
    fn append_child(&self, name: &str) -> Self;

    /// Finds the next sibling element after this one called `name`.
    fn next_sibling(&self, name: &str) -> Self;

    /// Inserts a new element called `name` immediately after this node.
    fn insert_sibling_after(&self, name: &str) -> Self;

    /// Returns the node's text content, or `None` if it has none.
    fn text(&self) -> Option<String>;

    /// Replaces the node's text content. Returns false on failure.
    fn set_text(&self, text: &str) -> bool;

    /// Returns the value of the attribute `name`, or `None` if absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Sets the attribute `name`, replacing any existing value.
    /// Returns false on failure.
    fn set_attribute(&self, name: &str, value: &str) -> bool;
}
