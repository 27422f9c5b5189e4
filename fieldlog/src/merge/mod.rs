//! Field precedence: combining encoded field sequences without duplicate keys.
//!
//! [`merge`] walks the incoming sequence from its last entry to its first and
//! prepends every entry whose key is not present yet. Keys already in the base
//! sequence therefore win, the last of several duplicates inside the incoming
//! sequence wins, and surviving incoming entries keep their relative order
//! ahead of the base.
//!
//! A log line is assembled as `merge(merge({}, call), context)`: fields passed
//! to the call beat fields stored on the logger. Attaching context composes the
//! same way, with freshly attached fields beating older context.

use std::collections::HashSet;

use crate::field::{EncodedField, EncodedFields};

mod view;


pub(crate) use view::MergedView;

/// Sequences larger than this use a hash set for key lookups.
const LINEAR_SCAN_LIMIT: usize = 32;

/// Combines `base` with the entries of `incoming` whose keys it lacks.
///
/// An empty `incoming` returns `base` itself, sharing its storage.
///
/// # Examples
///
/// ```
/// use fieldlog::{encode_field_list, fields, merge};
///
/// let base = encode_field_list(&fields!["potato", 4]);
/// let incoming = encode_field_list(&fields!["tomato", 1, "potato", 2]);
/// let merged = merge(&base, &incoming);
/// assert_eq!(merged.get("potato"), Some("4"));
/// assert_eq!(merged.get("tomato"), Some("1"));
/// assert_eq!(merged.iter().next().map(|f| f.key()), Some("\"tomato\""));
/// ```
#[must_use]
pub fn merge(base: &EncodedFields, incoming: &EncodedFields) -> EncodedFields {
    if incoming.is_empty() {
        return base.clone();
    }
    let survivors = prepend_order(base.as_slice(), incoming.as_slice());
    if survivors.is_empty() {
        return base.clone();
    }
    survivors
        .into_iter()
        .cloned()
        .chain(base.iter().cloned())
        .collect()
}

/// Deduplicates `call` and lays it over `context`, the composition used for a
/// single log line.
///
/// Call fields win over context fields; among duplicate call fields the last
/// one wins.
#[must_use]
pub fn merge_call_over_context(call: &EncodedFields, context: &EncodedFields) -> EncodedFields {
    merge(&merge(&EncodedFields::new(), call), context)
}

/// Entries of `incoming` that survive a merge onto `base`, in their original
/// order.
fn prepend_order<'a>(base: &[EncodedField], incoming: &'a [EncodedField]) -> Vec<&'a EncodedField> {
    let mut seen = KeySet::with_expected(base.len() + incoming.len());
    for field in base {
        seen.insert(field.key());
    }
    let mut survivors: Vec<&EncodedField> = incoming
        .iter()
        .rev()
        .filter(|field| seen.insert(field.key()))
        .collect();
    survivors.reverse();
    survivors
}

/// Set of keys seen so far, scanned linearly while small.
enum KeySet<'a> {
    Linear(Vec<&'a str>),
    Hashed(HashSet<&'a str>),
}

impl<'a> KeySet<'a> {
    fn with_expected(expected: usize) -> Self {
        if expected > LINEAR_SCAN_LIMIT {
            Self::Hashed(HashSet::with_capacity(expected))
        } else {
            Self::Linear(Vec::with_capacity(expected))
        }
    }

    /// Records `key`, returning `true` when it was not present before.
    fn insert(&mut self, key: &'a str) -> bool {
        match self {
            Self::Linear(keys) => {
                if keys.contains(&key) {
                    false
                } else {
                    keys.push(key);
                    true
                }
            }
            Self::Hashed(keys) => keys.insert(key),
        }
    }
}
