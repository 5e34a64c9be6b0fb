//! Unconditional null-pointer dereference.

use crate::journal;

/// Writes through a null pointer for every input except one exact length.
///
/// The single guarded path is `data.len() == 10`.
pub fn instant_crash(data: &[u8]) {
    journal::arm("instant_crash", data);
    if data.len() != 10 {
        unsafe {
            std::ptr::null_mut::<i32>().write_volatile(42);
        }
    }
}
