//! Format-string injection trigger.
//!
//! The input lands in a fixed stack buffer via an unchecked copy, then gets
//! interpreted as a printf-style format string with no argument list.
//! Conversions that would consume a pointer argument dereference whatever
//! stands in for one.

use crate::journal;

/// Size of the fixed format buffer the copy ignores.
pub const FMT_BUF_LEN: usize = 128;

/// Treats the input as an attacker-controlled format string.
///
/// Overflows the stack buffer when `data.len() > 128`. Inputs of at most 128
/// bytes that avoid `%s` and `%n` are the guarded path.
pub fn unchecked_format(data: &[u8]) {
    journal::arm("unchecked_format", data);
    let mut fmt = [0u8; FMT_BUF_LEN];
    // Unchecked copy sized from the input.
    unsafe {
        std::ptr::copy_nonoverlapping(data.as_ptr(), fmt.as_mut_ptr(), data.len());
    }
    fmt[data.len() % FMT_BUF_LEN] = 0;
    render(&fmt);
}

/// Walks the format buffer up to its terminator, consuming arguments that
/// were never passed.
fn render(fmt: &[u8]) {
    let mut out = String::new();
    let mut args = MissingArgs::new();
    let mut it = fmt.iter().copied();
    while let Some(b) = it.next() {
        if b == 0 {
            break;
        }
        if b != b'%' {
            out.push(b as char);
            continue;
        }
        match it.next() {
            Some(b'%') => out.push('%'),
            Some(b'd' | b'u' | b'x') => {
                out.push_str(&args.next_int().to_string());
            }
            Some(b's') => {
                // Reads a C string through a pointer nobody supplied.
                let mut p = args.next_ptr() as *const u8;
                unsafe {
                    while p.read_volatile() != 0 {
                        out.push(p.read() as char);
                        p = p.add(1);
                    }
                }
            }
            Some(b'n') => {
                // Writes the byte count through a pointer nobody supplied.
                let p = args.next_ptr() as *mut usize;
                unsafe {
                    p.write_volatile(out.len());
                }
            }
            Some(other) => {
                out.push('%');
                out.push(other as char);
            }
            None => break,
        }
    }
    println!("{out}");
}

/// Stand-in for a va_list that was never supplied. The first pointer it
/// hands out is null; later ones are near-null junk.
struct MissingArgs {
    cursor: usize,
}

impl MissingArgs {
    fn new() -> Self {
        Self { cursor: 0 }
    }

    fn next_int(&mut self) -> u64 {
        self.cursor += 1;
        0x5A5A_5A5A ^ self.cursor as u64
    }

    fn next_ptr(&mut self) -> usize {
        let p = self.cursor * 8;
        self.cursor += 1;
        p
    }
}
