//! Top-level entry points that wire every trigger to one input.

use crate::{crash, format, heap, stack, temporal};

/// Runs the full trigger sequence on one input.
///
/// Empty input returns immediately; anything else walks every trigger in a
/// fixed order, each seeing the same bytes. Memory corruption from an earlier
/// trigger is the only coupling between them.
pub fn parse_message(data: &[u8]) {
    if data.is_empty() {
        return;
    }
    stack::copy_to_stack(data);
    heap::undersized_copy(data);
    heap::parse_chunks(data);
    temporal::use_after_free_pair(data);
    crash::instant_crash(data);
}

/// Fuzzing-engine entry: the full sequence, the null write again, and the
/// format path for inputs that start with `%`.
pub fn fuzz_entry(data: &[u8]) {
    parse_message(data);
    crash::instant_crash(data);
    if data.first() == Some(&b'%') {
        format::unchecked_format(data);
    }
}
