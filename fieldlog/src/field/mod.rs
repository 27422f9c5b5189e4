//! Encoded fields and the builder that produces them from flat key/value lists.
//!
//! Callers pass fields as one alternating list: key, value, key, value. The
//! builder walks it in pairs, keeps pairs whose key is text and whose value
//! encodes, and drops everything else without reporting an error. A trailing
//! key with no value is dropped as well.

use std::fmt;
use std::sync::Arc;

use crate::encode::{encode, encode_str};
use crate::value::Value;

#[cfg(test)]
mod tests;

/// A field after encoding: a quoted JSON key and a JSON value fragment.
///
/// Owns its text; nothing refers back to the value it was built from.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EncodedField {
    key: Box<str>,
    value: Box<str>,
}

impl EncodedField {
    /// Encodes a single field.
    ///
    /// Returns `None` when `value` has no JSON representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldlog::{EncodedField, Value};
    ///
    /// let field = EncodedField::encode("potato", &Value::I64(4)).expect("integers encode");
    /// assert_eq!(field.key(), "\"potato\"");
    /// assert_eq!(field.value(), "4");
    /// ```
    #[must_use]
    pub fn encode(key: &str, value: &Value<'_>) -> Option<Self> {
        let mut key_text = String::with_capacity(key.len() + 2);
        encode_str(key, &mut key_text);
        let mut value_text = String::new();
        encode(value, &mut value_text).then(|| Self {
            key: key_text.into_boxed_str(),
            value: value_text.into_boxed_str(),
        })
    }

    fn from_encoded(key: &str, value: &str) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The key as a quoted JSON string.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value as a JSON fragment.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for EncodedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// An immutable, shareable sequence of encoded fields.
///
/// Cloning shares the underlying storage. Sequences produced by
/// [`merge`](crate::merge) hold each key at most once.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EncodedFields(Arc<[EncodedField]>);

impl EncodedFields {
    /// An empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The fields in order.
    #[must_use]
    pub fn as_slice(&self) -> &[EncodedField] {
        &self.0
    }

    /// Iterates the fields in order.
    pub fn iter(&self) -> std::slice::Iter<'_, EncodedField> {
        self.0.iter()
    }

    /// Looks up the encoded value stored under the unquoted `key`.
    ///
    /// Returns the first match; merged sequences never hold more than one.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut quoted = String::with_capacity(key.len() + 2);
        encode_str(key, &mut quoted);
        self.iter()
            .find(|field| field.key() == quoted)
            .map(EncodedField::value)
    }

    /// Returns `true` when both sequences share the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EncodedFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<EncodedField> for EncodedFields {
    fn from_iter<I: IntoIterator<Item = EncodedField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<EncodedField>> for EncodedFields {
    fn from(fields: Vec<EncodedField>) -> Self {
        Self(fields.into())
    }
}

impl<'a> IntoIterator for &'a EncodedFields {
    type Item = &'a EncodedField;
    type IntoIter = std::slice::Iter<'a, EncodedField>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Encodes an alternating key/value list into fields, in input order.
///
/// Pairs with a non-text key or an unrepresentable value are dropped, as is
/// an unpaired trailing key. Duplicate keys are kept; deduplication is the
/// job of [`merge`](crate::merge).
///
/// # Examples
///
/// ```
/// use fieldlog::{encode_field_list, fields};
///
/// let encoded = encode_field_list(&fields!["a", 1, 2, "dropped", "b", true, "dangling"]);
/// let keys: Vec<_> = encoded.iter().map(|f| f.key()).collect();
/// assert_eq!(keys, ["\"a\"", "\"b\""]);
/// ```
#[must_use]
pub fn encode_field_list(values: &[Value<'_>]) -> EncodedFields {
    let mut arena = String::new();
    let mut spans = Vec::new();
    encode_pairs(values, &mut arena, &mut spans);
    spans
        .iter()
        .map(|span| EncodedField::from_encoded(span.key(&arena), span.value(&arena)))
        .collect()
}

/// Location of one encoded field inside a scratch arena.
///
/// The key occupies `start..split` and the value `split..end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FieldSpan {
    start: usize,
    split: usize,
    end: usize,
}

impl FieldSpan {
    pub(crate) fn key<'a>(&self, arena: &'a str) -> &'a str {
        arena.get(self.start..self.split).unwrap_or_default()
    }

    pub(crate) fn value<'a>(&self, arena: &'a str) -> &'a str {
        arena.get(self.split..self.end).unwrap_or_default()
    }
}

/// Encodes `values` pairwise into `arena`, recording one span per kept field.
///
/// Dropped pairs leave no trace in `arena`.
pub(crate) fn encode_pairs(values: &[Value<'_>], arena: &mut String, spans: &mut Vec<FieldSpan>) {
    let mut pairs = values.chunks_exact(2);
    for (index, pair) in pairs.by_ref().enumerate() {
        let [key, value] = pair else { continue };
        let Some(name) = key.as_str() else {
            tracing::debug!(index, "dropping field with a non-text key");
            continue;
        };
        let start = arena.len();
        encode_str(name, arena);
        let split = arena.len();
        if encode(value, arena) {
            spans.push(FieldSpan {
                start,
                split,
                end: arena.len(),
            });
        } else {
            arena.truncate(start);
            tracing::debug!(key = name, "dropping field with an unrepresentable value");
        }
    }
    if !pairs.remainder().is_empty() {
        tracing::debug!("dropping trailing field key without a value");
    }
}
