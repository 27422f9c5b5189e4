//! Allocation-free merge used while assembling a log line.

use std::slice;

use crate::field::{EncodedField, FieldSpan};

/// Yields the fields of `merge(merge({}, call), context)` without building
/// the merged sequence.
///
/// The call's fields live in a scratch arena as spans; the context is the
/// logger's own sequence. Context entries come first, skipping keys the call
/// sets, followed by each call entry that no later call entry overrides.
/// Logger context is always produced by [`merge`](super::merge) and so holds
/// no duplicate keys of its own.
pub(crate) struct MergedView<'a> {
    context: slice::Iter<'a, EncodedField>,
    call: &'a [FieldSpan],
    arena: &'a str,
    position: usize,
}

impl<'a> MergedView<'a> {
    pub(crate) fn new(context: &'a [EncodedField], call: &'a [FieldSpan], arena: &'a str) -> Self {
        Self {
            context: context.iter(),
            call,
            arena,
            position: 0,
        }
    }
}

fn sets_key(spans: &[FieldSpan], arena: &str, key: &str) -> bool {
    spans.iter().any(|span| span.key(arena) == key)
}

impl<'a> Iterator for MergedView<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        for field in self.context.by_ref() {
            if !sets_key(self.call, self.arena, field.key()) {
                return Some((field.key(), field.value()));
            }
        }
        while let Some(span) = self.call.get(self.position) {
            self.position += 1;
            let key = span.key(self.arena);
            let later = self.call.get(self.position..).unwrap_or_default();
            if !sets_key(later, self.arena, key) {
                return Some((key, span.value(self.arena)));
            }
        }
        None
    }
}
