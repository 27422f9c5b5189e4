//! Encoding of [`Value`]s as single-line JSON text.
//!
//! Containers are written with one space inside the brackets and `, `
//! between entries, so `[1, 2]` renders as `[ 1, 2 ]` and an empty sequence
//! as `[  ]`. An entry that cannot be encoded is skipped together with its
//! separator; separators are placed by "something was already written",
//! never by position.
//!
//! Every function here leaves the output buffer untouched when it reports
//! failure, so callers can drop a field without cleaning up after it.

use std::fmt::{self, Write as _};

use crate::value::Value;

mod escape;


use escape::{Escaped, escape_into};

/// Appends the JSON encoding of `value` to `out`.
///
/// Returns `false` when the value has no JSON representation (unsupported
/// values, non-finite floats, records with no member that encodes). `out` is unchanged
/// in that case.
///
/// # Examples
///
/// ```
/// use fieldlog::{Value, encode};
///
/// let mut out = String::new();
/// assert!(encode(&Value::Seq(vec![Value::I64(1), Value::Unsupported, Value::Bool(true)]), &mut out));
/// assert_eq!(out, "[ 1, true ]");
/// assert!(!encode(&Value::F64(f64::NAN), &mut out));
/// assert_eq!(out, "[ 1, true ]");
/// ```
pub fn encode(value: &Value<'_>, out: &mut String) -> bool {
    let mark = out.len();
    let written = match value {
        Value::Null => push(out, "null"),
        Value::Bool(true) => push(out, "true"),
        Value::Bool(false) => push(out, "false"),
        Value::I64(v) => push(out, itoa::Buffer::new().format(*v)),
        Value::I128(v) => push(out, itoa::Buffer::new().format(*v)),
        Value::U64(v) => push(out, itoa::Buffer::new().format(*v)),
        Value::U128(v) => push(out, itoa::Buffer::new().format(*v)),
        Value::F32(v) => v.is_finite() && write!(out, "{v}").is_ok(),
        Value::F64(v) => v.is_finite() && write!(out, "{v}").is_ok(),
        Value::Str(text) => {
            encode_str(text, out);
            true
        }
        Value::Seq(items) => {
            encode_seq(items, out);
            true
        }
        Value::Map(entries) => {
            encode_object(entries.iter().map(|(key, value)| (key.as_ref(), value)), out);
            true
        }
        Value::Record(members) => {
            encode_object(members.iter().map(|(name, value)| (*name, value)), out)
        }
        Value::Error(err) => encode_display(*err, out),
        Value::Display(display) => encode_display(*display, out),
        Value::Unsupported => false,
    };
    if !written {
        out.truncate(mark);
    }
    written
}

/// Encodes `value` into a fresh string, or `None` when it is not
/// representable.
#[must_use]
pub fn encode_to_string(value: &Value<'_>) -> Option<String> {
    let mut out = String::new();
    encode(value, &mut out).then_some(out)
}

/// Appends `text` as a quoted JSON string.
///
/// This is the path field keys take: it never fails.
pub fn encode_str(text: &str, out: &mut String) {
    out.push('"');
    escape_into(text, out);
    out.push('"');
}

fn push(out: &mut String, text: &str) -> bool {
    out.push_str(text);
    true
}

fn encode_display<D: fmt::Display + ?Sized>(display: &D, out: &mut String) -> bool {
    out.push('"');
    if write!(Escaped(&mut *out), "{display}").is_err() {
        return false;
    }
    out.push('"');
    true
}

fn encode_seq(items: &[Value<'_>], out: &mut String) {
    out.push_str("[ ");
    let mut written = false;
    for item in items {
        let mark = out.len();
        if written {
            out.push_str(", ");
        }
        if encode(item, out) {
            written = true;
        } else {
            out.truncate(mark);
        }
    }
    out.push_str(" ]");
}

/// Returns `true` when at least one member was written.
fn encode_object<'v, 'a: 'v, I>(members: I, out: &mut String) -> bool
where
    I: Iterator<Item = (&'v str, &'v Value<'a>)>,
{
    out.push_str("{ ");
    let mut written = false;
    for (key, value) in members {
        let mark = out.len();
        if written {
            out.push_str(", ");
        }
        encode_str(key, out);
        out.push_str(": ");
        if encode(value, out) {
            written = true;
        } else {
            out.truncate(mark);
        }
    }
    out.push_str(" }");
    written
}
