//! Session direction and configuration.

use std::fmt;

/// Whether a session moves data out of the tree or into it.
///
/// Fixed when the session is created and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Values are copied from the tree into caller-owned slots.
    Reading,
    /// Values are copied from caller-owned slots into the tree.
    Writing,
}

impl Direction {
    /// Returns true for [`Direction::Reading`].
    pub fn is_reading(self) -> bool {
        self == Direction::Reading
    }

    /// Returns true for [`Direction::Writing`].
    pub fn is_writing(self) -> bool {
        self == Direction::Writing
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Reading => f.write_str("reading"),
            Direction::Writing => f.write_str("writing"),
        }
    }
}

/// How malformed text is handled when it is read into a typed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionPolicy {
    /// Malformed text becomes the type's zero value (`0`, `false`, `0.0`).
    #[default]
    Lenient,
    /// Malformed text is reported as [`Error::Conversion`].
    ///
    /// [`Error::Conversion`]: crate::Error::Conversion
    Strict,
}

/// Options for a serialization session.
#[derive(Debug, Clone, Default)]
pub struct SerializerOptions {
    /// Conversion policy applied to every scalar read.
    pub conversion: ConversionPolicy,
}

impl SerializerOptions {
    /// Options that reject malformed values instead of zeroing them.
    pub fn strict() -> Self {
        SerializerOptions {
            conversion: ConversionPolicy::Strict,
        }
    }
}
