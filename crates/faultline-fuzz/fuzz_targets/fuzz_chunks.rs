#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    faultline_triggers::heap::parse_chunks(data);
});
