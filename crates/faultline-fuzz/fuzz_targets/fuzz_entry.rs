#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Drive every vulnerable path with the same input.
    faultline_triggers::entry::fuzz_entry(data);
    if data.len() > 2 {
        // Flip bits to reach branches gated on exact byte values.
        let mut flipped = [0u8; 512];
        let copy = data.len().min(flipped.len());
        for (dst, src) in flipped[..copy].iter_mut().zip(data) {
            *dst = src ^ 0x5A;
        }
        faultline_triggers::entry::fuzz_entry(&flipped[..copy]);
    }
});
