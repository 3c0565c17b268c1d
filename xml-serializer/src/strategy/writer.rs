//! The writing direction.

use super::{Field, Strategy};
use crate::direction::Direction;
use crate::error::{Error, Result};
use crate::provider::NodeHandle;
use crate::scalar::Slot;

/// Builds a tree from caller-owned values.
///
/// Navigation always creates nodes. A value equal to its slot's default is
/// not written at all, leaving the text or attribute absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteStrategy;

impl<N: NodeHandle> Strategy<N> for WriteStrategy {
    fn direction(&self) -> Direction {
        Direction::Writing
    }

    fn node_name(&self, node: &N, name: &mut String) -> Result<()> {
        if node.set_name(name) {
            Ok(())
        } else {
            Err(Error::Node(format!("cannot rename node to `{}`", name)))
        }
    }

    fn child(&self, node: &N, name: &str) -> N {
        node.append_child(name)
    }

    fn next_sibling(&self, node: &N, name: &str) -> N {
        node.insert_sibling_after(name)
    }

    fn transfer(&self, node: &N, field: Field<'_>, slot: &mut dyn Slot) -> Result<()> {
        let Some(value) = slot.encode() else {
            return Ok(());
        };

        let written = match field {
            Field::Text => node.set_text(&value),
            Field::Attribute(name) => node.set_attribute(name, &value),
        };
        if written {
            Ok(())
        } else {
            Err(Error::Node(match field {
                Field::Text => format!("node does not accept {} text", slot.kind()),
                Field::Attribute(name) => format!("node does not accept attribute `{}`", name),
            }))
        }
    }
}
