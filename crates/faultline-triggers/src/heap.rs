//! Heap overflow triggers.
//!
//! Two flavors: an integer-overflow-driven under-allocation followed by a
//! copy sized from the real payload, and an off-by-one in a length-prefixed
//! chunk walker.

use std::alloc::{Layout, alloc, dealloc};

use crate::journal;

/// Multiplies two attacker-derived lengths without overflow checks and uses
/// the wrapped product as the allocation size for a copy of the payload.
///
/// Inputs shorter than 8 bytes return untouched. The copy runs past the
/// allocation whenever the product wraps below `data.len() - 4`.
pub fn undersized_copy(data: &[u8]) {
    journal::arm("undersized_copy", data);
    if data.len() < 8 {
        return;
    }
    let len = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    // Exaggerated repeat count so small inputs already produce large products.
    let repeat = data[4] as usize * 16;
    let total = len.wrapping_mul(repeat);

    let Ok(layout) = Layout::from_size_align(total.max(1), 1) else {
        return;
    };
    let buf = unsafe { alloc(layout) };
    if buf.is_null() {
        return;
    }
    unsafe {
        // Copies more than was allocated when total wrapped too small.
        std::ptr::copy_nonoverlapping(data.as_ptr().add(4), buf, data.len() - 4);
        if total > 0 {
            let last = buf.add(total - 1);
            last.write(last.read() ^ 0xAA);
        }
        dealloc(buf, layout);
    }
}

/// Walks a count-plus-length-prefixed chunk list, allocating `len` bytes per
/// chunk but copying `len + 1` to include a terminator.
///
/// Inputs shorter than 2 bytes, a zero chunk count, and zero-length chunks
/// are the guarded paths. Any chunk with `len > 0` writes one byte past its
/// allocation; a chunk starting with `#` writes a second.
pub fn parse_chunks(data: &[u8]) {
    journal::arm("parse_chunks", data);
    if data.len() < 2 {
        return;
    }
    let count = data[0];
    let mut offset = 1usize;
    for _ in 0..count {
        if offset + 1 >= data.len() {
            break;
        }
        let len = u16::from_be_bytes([data[offset], data[offset + 1]]) as usize;
        offset += 2;
        if offset >= data.len() {
            break;
        }
        let Ok(layout) = Layout::from_size_align(len.max(1), 1) else {
            return;
        };
        let chunk = unsafe { alloc(layout) };
        if chunk.is_null() {
            return;
        }
        unsafe {
            // Off-by-one: the copy includes a terminator the allocation lacks.
            std::ptr::copy_nonoverlapping(data.as_ptr().add(offset), chunk, len + 1);
            if len > 0 && chunk.read() == b'#' {
                chunk.add(len).write(b'!');
            }
            dealloc(chunk, layout);
        }
        offset += len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undersized_copy_short_input_returns() {
        undersized_copy(&[]);
        undersized_copy(&[0xFF; 7]);
    }

    #[test]
    fn undersized_copy_with_ample_product_stays_in_bounds() {
        // len = 8, repeat = 16, product = 128; payload is 4 bytes.
        undersized_copy(&[0, 0, 0, 8, 1, 0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn parse_chunks_short_input_returns() {
        parse_chunks(&[]);
        parse_chunks(&[5]);
    }

    #[test]
    fn parse_chunks_zero_count_returns() {
        parse_chunks(&[0, 0xFF, 0xFF]);
    }

    #[test]
    fn parse_chunks_zero_length_chunks_stay_in_bounds() {
        // Two zero-length chunks with a trailing byte for the one-byte copy.
        parse_chunks(&[2, 0, 0, 0, 0, 0x7F]);
    }
}
