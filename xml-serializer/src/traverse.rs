//! Types that describe their own layout once for both directions.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::provider::NodeHandle;
use crate::scalar::Scalar;

/// A value whose tree layout is written once and used for reading and
/// writing alike.
///
/// Scalars serialize as the text of the node they are given.
pub trait Serializable {
    /// Moves this value to or from the node under `cursor`.
    fn serialize<N: NodeHandle>(&mut self, cursor: &Cursor<'_, N>) -> Result<()>;
}

impl<T: Scalar> Serializable for T {
    fn serialize<N: NodeHandle>(&mut self, cursor: &Cursor<'_, N>) -> Result<()> {
        cursor.scalar(self)
    }
}

impl<N: NodeHandle> Cursor<'_, N> {
    /// Serializes `value` into the child called `name`.
    ///
    /// Returns false, leaving `value` untouched, when reading and the child
    /// does not exist.
    pub fn field<T: Serializable>(&self, name: &str, value: &mut T) -> Result<bool> {
        let child = self.child(name)?;
        if !child.is_valid() {
            return Ok(false);
        }
        value.serialize(&child)?;
        Ok(true)
    }

    /// Serializes a scalar as the text of an optional child called `name`.
    ///
    /// Writing a value equal to `default` creates no child at all; reading
    /// a missing child (or one without text) yields `default`.
    pub fn field_or<T: Scalar>(&self, name: &str, value: &mut T, default: T) -> Result<()> {
        self.ensure_valid("field_or")?;
        if self.is_writing() && *value == default {
            return Ok(());
        }
        let child = self.child(name)?;
        if child.is_valid() {
            child.scalar_or(value, default)
        } else {
            *value = default;
            Ok(())
        }
    }

    /// Serializes `items` as consecutive children called `name`.
    ///
    /// Reading replaces the contents of `items` with one entry per matching
    /// child, in document order. Writing emits one child per entry, each
    /// placed directly after the previous one.
    pub fn sequence<T: Serializable + Default>(&self, name: &str, items: &mut Vec<T>) -> Result<()> {
        if self.is_reading() {
            items.clear();
            let mut current = self.child(name)?;
            while current.is_valid() {
                let mut item = T::default();
                item.serialize(&current)?;
                items.push(item);
                current = current.next_sibling(name)?;
            }
            return Ok(());
        }

        let mut previous: Option<Cursor<'_, N>> = None;
        for item in items.iter_mut() {
            let current = match &previous {
                Some(prev) => prev.next_sibling(name)?,
                None => self.child(name)?,
            };
            item.serialize(&current)?;
            previous = Some(current);
        }
        Ok(())
    }
}
