//! Armed-trigger journal.
//!
//! Each trigger records its name and an input fingerprint *before* the
//! trigger body runs. When the process dies under a fuzzer, the journal
//! (recovered from a core dump or printed by the harness on the guarded
//! paths) attributes the crash to the trigger that was armed last.

use parking_lot::Mutex;
use std::sync::OnceLock;

/// Records kept before old entries are evicted.
const JOURNAL_CAP: usize = 64;

/// One armed-trigger record.
#[derive(Debug, Clone)]
pub struct Armed {
    /// Registry name of the trigger.
    pub trigger: &'static str,
    /// Length of the input the trigger was handed.
    pub input_len: usize,
    /// blake3 hash of the input, lowercase hex.
    pub fingerprint: String,
}

static JOURNAL: OnceLock<Mutex<Vec<Armed>>> = OnceLock::new();

fn journal() -> &'static Mutex<Vec<Armed>> {
    JOURNAL.get_or_init(|| Mutex::new(Vec::with_capacity(JOURNAL_CAP)))
}

/// Record a trigger that is about to run.
pub fn arm(trigger: &'static str, data: &[u8]) {
    let record = Armed {
        trigger,
        input_len: data.len(),
        fingerprint: blake3::hash(data).to_hex().to_string(),
    };
    let mut log = journal().lock();
    if log.len() == JOURNAL_CAP {
        log.remove(0);
    }
    log.push(record);
}

/// Snapshot of the retained records, oldest first.
#[must_use]
pub fn snapshot() -> Vec<Armed> {
    journal().lock().clone()
}

/// The most recently armed trigger, if any trigger has run.
#[must_use]
pub fn last_armed() -> Option<Armed> {
    journal().lock().last().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_records_name_length_and_fingerprint() {
        arm("journal_probe", b"abc");
        let expected = blake3::hash(b"abc").to_hex().to_string();
        // Other tests share the journal, so search rather than inspect the tail.
        assert!(snapshot().iter().any(|a| {
            a.trigger == "journal_probe" && a.input_len == 3 && a.fingerprint == expected
        }));
    }

    #[test]
    fn journal_evicts_oldest_beyond_capacity() {
        for _ in 0..(JOURNAL_CAP * 2) {
            arm("journal_flood", b"x");
        }
        assert!(snapshot().len() <= JOURNAL_CAP);
        assert!(last_armed().is_some());
    }
}
