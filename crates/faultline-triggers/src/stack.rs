//! Stack buffer overflow trigger.

use crate::journal;

/// Size of the fixed stack buffer the copy ignores.
pub const STACK_BUF_LEN: usize = 64;

/// Copies attacker-controlled data into a fixed stack buffer without bounds.
///
/// Writes past the end of the frame whenever `data.len() > 64`. Empty input
/// returns without touching the buffer; that and inputs of at most 64 bytes
/// are the guarded paths.
pub fn copy_to_stack(data: &[u8]) {
    journal::arm("copy_to_stack", data);
    let mut buf = [0u8; STACK_BUF_LEN];
    if data.is_empty() {
        return;
    }
    // The count is the input length, not the buffer length.
    unsafe {
        std::ptr::copy_nonoverlapping(data.as_ptr(), buf.as_mut_ptr(), data.len());
    }
    if buf[0] == b'!' && data.len() > STACK_BUF_LEN {
        // Touch memory past the end so the overflow is visible under sanitizers.
        unsafe {
            buf.as_mut_ptr()
                .add(data.len() - STACK_BUF_LEN)
                .write_volatile(b'X');
        }
    }
    std::hint::black_box(&buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_a_no_op() {
        copy_to_stack(&[]);
    }

    #[test]
    fn input_within_buffer_bounds_returns() {
        copy_to_stack(b"hello");
        copy_to_stack(&[0u8; STACK_BUF_LEN]);
    }
}
