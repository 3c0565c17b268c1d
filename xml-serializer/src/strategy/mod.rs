//! Direction strategies.
//!
//! A [`Strategy`] gives every primitive operation its meaning for one
//! direction. [`ReadStrategy`] looks nodes up and copies values out of the
//! tree; [`WriteStrategy`] creates nodes and copies values into it. Values of
//! every scalar type, with or without a default, go through the single
//! [`Strategy::transfer`] entry point.

mod reader;
mod writer;

pub use reader::ReadStrategy;
pub use writer::WriteStrategy;

use crate::direction::Direction;
use crate::error::Result;
use crate::provider::NodeHandle;
use crate::scalar::Slot;

/// Where on a node a scalar value lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// The node's text content.
    Text,
    /// The named attribute.
    Attribute(&'a str),
}

/// One direction's implementation of the primitive operations.
///
/// Implementations hold no per-node state, so a single instance serves every
/// cursor of a session. Callers guarantee that `node` is not null.
pub trait Strategy<N: NodeHandle> {
    /// The direction this strategy implements.
    fn direction(&self) -> Direction;

    /// Copies the node's name into `name`, or renames the node from it.
    fn node_name(&self, node: &N, name: &mut String) -> Result<()>;

    /// Finds or creates the child called `name`.
    ///
    /// Reading returns a null handle when there is no such child.
    fn child(&self, node: &N, name: &str) -> N;

    /// Finds or inserts the sibling called `name` after `node`.
    ///
    /// Reading returns a null handle when there is no such sibling.
    fn next_sibling(&self, node: &N, name: &str) -> N;

    /// Moves one scalar between `field` of `node` and `slot`.
    fn transfer(&self, node: &N, field: Field<'_>, slot: &mut dyn Slot) -> Result<()>;
}
