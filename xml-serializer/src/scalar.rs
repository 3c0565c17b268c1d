//! Typed values stored as node text or attribute values.
//!
//! Every supported primitive goes through one generic path: a [`Scalar`]
//! knows how to parse and format itself, and a [`ScalarSlot`] pairs a
//! caller-owned variable with an optional default. Strategies only ever see
//! the slot through the object-safe [`Slot`] trait.

use tracing::debug;

use crate::direction::ConversionPolicy;
use crate::error::{Error, Result};

/// A primitive value that can live in node text or an attribute.
///
/// `Default` must yield the type's zero value; it is what lenient reads
/// produce for text with no leading value and what text reads produce for
/// missing text.
pub trait Scalar: Clone + PartialEq + Default {
    /// Human-readable type name used in conversion errors.
    const KIND: &'static str;

    /// Parses `raw`, accepting only well-formed input.
    fn parse_strict(raw: &str) -> Option<Self>;

    /// Parses `raw` the forgiving way. `None` means "use the zero value".
    fn parse_lenient(raw: &str) -> Option<Self> {
        Self::parse_strict(raw)
    }

    /// Formats the value for storage in the tree.
    fn format(&self) -> String;
}

impl Scalar for String {
    const KIND: &'static str = "string";

    fn parse_strict(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn format(&self) -> String {
        self.clone()
    }
}

impl Scalar for bool {
    const KIND: &'static str = "bool";

    fn parse_strict(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") || raw == "1" {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
            Some(false)
        } else {
            None
        }
    }

    /// True when the first character is one of `1 t T y Y`.
    fn parse_lenient(raw: &str) -> Option<Self> {
        Some(matches!(
            raw.trim_start().chars().next(),
            Some('1' | 't' | 'T' | 'y' | 'Y')
        ))
    }

    fn format(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }
}

macro_rules! impl_scalar_integer {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const KIND: &'static str = $kind;

                fn parse_strict(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }

                /// Reads the leading integer, clamping it to the type's range.
                fn parse_lenient(raw: &str) -> Option<Self> {
                    let value = leading_integer(raw)?;
                    Some(value.clamp(<$ty>::MIN as i128, <$ty>::MAX as i128) as $ty)
                }

                fn format(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

macro_rules! impl_scalar_float {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const KIND: &'static str = $kind;

                fn parse_strict(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }

                /// Reads the longest prefix that forms a number.
                fn parse_lenient(raw: &str) -> Option<Self> {
                    leading_float(raw)?.parse().ok()
                }

                fn format(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_scalar_integer! {
    i32 => "i32",
    u32 => "u32",
    i64 => "i64",
    u64 => "u64",
}

impl_scalar_float! {
    f32 => "f32",
    f64 => "f64",
}

/// Parses an optional sign followed by decimal or `0x` hex digits,
/// ignoring whatever follows. Saturates instead of overflowing.
///
/// Returns `None` when no digit comes first.
fn leading_integer(raw: &str) -> Option<i128> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("0x") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut magnitude: i128 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        seen = true;
        magnitude = magnitude
            .saturating_mul(i128::from(radix))
            .saturating_add(i128::from(digit));
    }

    if !seen {
        return None;
    }
    Some(if negative { -magnitude } else { magnitude })
}

/// Returns the longest leading slice of `raw` that is a decimal float
/// (sign, digits, fraction, exponent) or an `inf`/`nan` word.
fn leading_float(raw: &str) -> Option<&str> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let is_digit = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let sign_len = end;
    while is_digit(end) {
        end += 1;
    }
    let mut digits = end - sign_len;
    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while is_digit(frac_end) {
            frac_end += 1;
        }
        digits += frac_end - end - 1;
        end = frac_end;
    }

    if digits == 0 {
        let word = &s[sign_len..];
        return ["infinity", "inf", "nan"].into_iter().find_map(|name| {
            let head = word.get(..name.len())?;
            head.eq_ignore_ascii_case(name)
                .then(|| &s[..sign_len + name.len()])
        });
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while is_digit(exp_end) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    Some(&s[..end])
}

/// Converts raw text to `T` under the given policy.
pub fn decode<T: Scalar>(raw: &str, policy: ConversionPolicy) -> Result<T> {
    match policy {
        ConversionPolicy::Strict => T::parse_strict(raw).ok_or_else(|| Error::Conversion {
            value: raw.to_string(),
            kind: T::KIND,
        }),
        ConversionPolicy::Lenient => Ok(T::parse_lenient(raw).unwrap_or_else(|| {
            debug!(
                target: "xml_serializer::scalar",
                value = raw,
                kind = T::KIND,
                "malformed value replaced with zero"
            );
            T::default()
        })),
    }
}

/// Type-erased view of a caller-owned value, as seen by a strategy.
pub trait Slot {
    /// Name of the underlying scalar type.
    fn kind(&self) -> &'static str;

    /// Overwrites the slot with the value parsed from `raw`.
    fn decode(&mut self, raw: &str, policy: ConversionPolicy) -> Result<()>;

    /// Overwrites the slot with its default. Returns false if it has none.
    fn fill_default(&mut self) -> bool;

    /// Resets the slot to the type's zero value.
    fn clear(&mut self);

    /// Formats the slot for writing, or `None` if it equals its default.
    fn encode(&self) -> Option<String>;
}

/// A mutable borrow of a scalar variable plus an optional default.
pub struct ScalarSlot<'a, T: Scalar> {
    value: &'a mut T,
    default: Option<T>,
}

impl<'a, T: Scalar> ScalarSlot<'a, T> {
    /// A slot that is always written and has nothing to back-fill.
    pub fn new(value: &'a mut T) -> Self {
        ScalarSlot {
            value,
            default: None,
        }
    }

    /// A slot whose value is omitted when it equals `default`.
    pub fn with_default(value: &'a mut T, default: T) -> Self {
        ScalarSlot {
            value,
            default: Some(default),
        }
    }
}

impl<T: Scalar> Slot for ScalarSlot<'_, T> {
    fn kind(&self) -> &'static str {
        T::KIND
    }

    fn decode(&mut self, raw: &str, policy: ConversionPolicy) -> Result<()> {
        *self.value = decode(raw, policy)?;
        Ok(())
    }

    fn fill_default(&mut self) -> bool {
        match &self.default {
            Some(default) => {
                *self.value = default.clone();
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        *self.value = T::default();
    }

    fn encode(&self) -> Option<String> {
        match &self.default {
            Some(default) if default == &*self.value => None,
            _ => Some(self.value.format()),
        }
    }
}
