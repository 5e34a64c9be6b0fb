//! Temporal memory safety triggers: use-after-free and double free.

use std::alloc::{Layout, alloc, dealloc};

use crate::journal;

/// Frees a buffer and then either writes through the stale pointer (inputs
/// shorter than 4 bytes) or frees the same pointer again (everything else).
///
/// There is no guarded path; every invocation misbehaves once the allocation
/// succeeds. Only fuzz targets call this.
pub fn use_after_free_pair(data: &[u8]) {
    journal::arm("use_after_free_pair", data);
    let Ok(layout) = Layout::from_size_align(data.len() + 32, 16) else {
        return;
    };
    let leaky = unsafe { alloc(layout) };
    if leaky.is_null() {
        return;
    }
    unsafe {
        std::ptr::copy_nonoverlapping(data.as_ptr(), leaky, data.len());
        dealloc(leaky, layout);
        if data.len() < 4 {
            // Write back into freed memory.
            leaky.add(2).write_volatile(0x41);
        } else {
            // Release the same pointer a second time.
            dealloc(leaky, layout);
        }
    }
}
