//! The closed set of value shapes a log field can take.
//!
//! [`Value`] is the tagged variant every field passes through on its way to
//! JSON. Ordinary Rust values reach it through [`ToValue`]; structs gain an
//! implementation from `#[derive(Record)]`. Values borrow from the caller for
//! the duration of a single call and are encoded to owned text before the call
//! returns, so nothing a caller logs is retained by reference.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

mod convert;

#[cfg(test)]
mod tests;

/// One field value, borrowed from the caller.
///
/// Adding a representable shape means adding a variant here and an arm in the
/// encoder; there is no open-ended lookup.
#[derive(Clone)]
pub enum Value<'a> {
    /// Absent value, rendered as `null`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer up to 64 bits.
    I64(i64),
    /// Signed 128-bit integer.
    I128(i128),
    /// Unsigned integer up to 64 bits.
    U64(u64),
    /// Unsigned 128-bit integer.
    U128(u128),
    /// Single-precision float. Non-finite values cannot be encoded.
    F32(f32),
    /// Double-precision float. Non-finite values cannot be encoded.
    F64(f64),
    /// Text.
    Str(Cow<'a, str>),
    /// Ordered sequence of values.
    Seq(Vec<Value<'a>>),
    /// Mapping with text keys, in the source collection's iteration order.
    Map(Vec<(Cow<'a, str>, Value<'a>)>),
    /// Aggregate with named members, in declaration order.
    Record(Vec<(&'a str, Value<'a>)>),
    /// Error rendered through its `Display` text.
    Error(&'a (dyn Error + 'a)),
    /// Any other value rendered through its `Display` text.
    Display(&'a (dyn fmt::Display + 'a)),
    /// A value with no JSON representation. Fields holding it are omitted.
    Unsupported,
}

impl<'a> Value<'a> {
    /// Builds a text value borrowing `text`.
    #[must_use]
    pub const fn str(text: &'a str) -> Self {
        Self::Str(Cow::Borrowed(text))
    }

    /// Builds an error value rendered through the error's message.
    #[must_use]
    pub fn error(err: &'a (dyn Error + 'a)) -> Self {
        Self::Error(err)
    }

    /// Builds a value rendered as the JSON string of `display`.
    ///
    /// Useful for types with a canonical textual form, such as addresses or
    /// identifiers.
    #[must_use]
    pub fn display(display: &'a (dyn fmt::Display + 'a)) -> Self {
        Self::Display(display)
    }

    /// Returns the text when this value is a [`Value::Str`].
    ///
    /// Field keys and map keys must be text; anything else is dropped.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Re-borrows this value so it can be handed out through [`ToValue`].
    #[must_use]
    pub fn reborrow(&self) -> Value<'_> {
        match self {
            Self::Null => Value::Null,
            Self::Bool(v) => Value::Bool(*v),
            Self::I64(v) => Value::I64(*v),
            Self::I128(v) => Value::I128(*v),
            Self::U64(v) => Value::U64(*v),
            Self::U128(v) => Value::U128(*v),
            Self::F32(v) => Value::F32(*v),
            Self::F64(v) => Value::F64(*v),
            Self::Str(text) => Value::Str(Cow::Borrowed(text)),
            Self::Seq(items) => Value::Seq(items.iter().map(Value::reborrow).collect()),
            Self::Map(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(key, value)| (Cow::Borrowed(key.as_ref()), value.reborrow()))
                    .collect(),
            ),
            Self::Record(members) => Value::Record(
                members
                    .iter()
                    .map(|(name, value)| (*name, value.reborrow()))
                    .collect(),
            ),
            Self::Error(err) => Value::Error(*err),
            Self::Display(display) => Value::Display(*display),
            Self::Unsupported => Value::Unsupported,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::I64(v) => f.debug_tuple("I64").field(v).finish(),
            Self::I128(v) => f.debug_tuple("I128").field(v).finish(),
            Self::U64(v) => f.debug_tuple("U64").field(v).finish(),
            Self::U128(v) => f.debug_tuple("U128").field(v).finish(),
            Self::F32(v) => f.debug_tuple("F32").field(v).finish(),
            Self::F64(v) => f.debug_tuple("F64").field(v).finish(),
            Self::Str(text) => f.debug_tuple("Str").field(text).finish(),
            Self::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::Record(members) => f.debug_tuple("Record").field(members).finish(),
            Self::Error(err) => f.debug_tuple("Error").field(&err.to_string()).finish(),
            Self::Display(display) => f
                .debug_tuple("Display")
                .field(&display.to_string())
                .finish(),
            Self::Unsupported => f.write_str("Unsupported"),
        }
    }
}

/// Conversion into a loggable [`Value`].
///
/// Implemented for primitives, text, standard collections, options, smart
/// pointers and common error types. Derive it for structs with
/// `#[derive(Record)]`.
///
/// # Examples
///
/// ```
/// use fieldlog::{ToValue, Value};
///
/// assert!(matches!(42_u8.to_value(), Value::U64(42)));
/// assert!(None::<i32>.to_value().is_null());
/// ```
pub trait ToValue {
    /// Borrows `self` as a [`Value`].
    fn to_value(&self) -> Value<'_>;
}
