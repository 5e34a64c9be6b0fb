//! Input shim for the persistent-mode CLI harness.
//!
//! Reads up to a fixed-size buffer from a path argument or standard input
//! and hands the bytes to one trigger, mirroring the classic AFL file/stdin
//! harness shape.

use std::io::Read;
use std::path::Path;

use crate::error::HarnessError;

/// Maximum bytes one harness invocation will consume.
pub const MAX_INPUT: usize = 1 << 16;

/// Read at most [`MAX_INPUT`] bytes from `path`, or from stdin when `path`
/// is `None`. Trailing bytes beyond the cap are silently dropped.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>, HarnessError> {
    match path {
        Some(p) => {
            let file = std::fs::File::open(p).map_err(|e| HarnessError::io(p, e))?;
            read_capped(file)
        }
        None => read_capped(std::io::stdin().lock()),
    }
}

fn read_capped(reader: impl Read) -> Result<Vec<u8>, HarnessError> {
    let mut buf = Vec::with_capacity(8 * 1024);
    reader.take(MAX_INPUT as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_whole_short_stream() {
        let got = read_capped(Cursor::new(b"abc".to_vec())).expect("read");
        assert_eq!(got, b"abc");
    }

    #[test]
    fn caps_oversized_stream_at_max_input() {
        let big = vec![0x41u8; MAX_INPUT + 4096];
        let got = read_capped(Cursor::new(big)).expect("read");
        assert_eq!(got.len(), MAX_INPUT);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_input(Some(Path::new("/nonexistent/faultline-input")))
            .expect_err("should fail");
        assert!(err.to_string().contains("faultline-input"));
    }

    #[test]
    fn reads_from_file_path() {
        let path = std::env::temp_dir().join(format!("faultline-input-{}", std::process::id()));
        std::fs::write(&path, b"payload").expect("write temp input");
        let got = read_input(Some(&path)).expect("read");
        assert_eq!(got, b"payload");
        let _ = std::fs::remove_file(&path);
    }
}
