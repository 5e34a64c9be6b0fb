//! Static descriptor table over every trigger.
//!
//! The harness CLI lists and dispatches triggers by name, and the harness
//! generator stamps out one fuzz target per entry.

use crate::{crash, entry, format, heap, stack, temporal};

/// A named, runnable trigger.
pub struct Trigger {
    /// Stable name used by the CLI and generated harnesses.
    pub name: &'static str,
    /// One-line description of the bug the trigger demonstrates.
    pub summary: &'static str,
    /// The trigger body.
    pub run: fn(&[u8]),
}

/// Every trigger, including the composite entry points.
pub const TRIGGERS: &[Trigger] = &[
    Trigger {
        name: "copy_to_stack",
        summary: "stack buffer overflow past a 64-byte frame",
        run: stack::copy_to_stack,
    },
    Trigger {
        name: "undersized_copy",
        summary: "integer-overflow under-allocation then heap overflow",
        run: heap::undersized_copy,
    },
    Trigger {
        name: "parse_chunks",
        summary: "off-by-one heap overflow in a chunk walker",
        run: heap::parse_chunks,
    },
    Trigger {
        name: "use_after_free_pair",
        summary: "use-after-free write or double free",
        run: temporal::use_after_free_pair,
    },
    Trigger {
        name: "unchecked_format",
        summary: "attacker-controlled format string with no argument list",
        run: format::unchecked_format,
    },
    Trigger {
        name: "instant_crash",
        summary: "unconditional null-pointer write",
        run: crash::instant_crash,
    },
    Trigger {
        name: "parse_message",
        summary: "full trigger sequence on one input",
        run: entry::parse_message,
    },
    Trigger {
        name: "fuzz_entry",
        summary: "fuzzing-engine entry driving every path",
        run: entry::fuzz_entry,
    },
];

/// Look up a trigger by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static Trigger> {
    TRIGGERS.iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_trigger_is_reachable_by_name() {
        for trigger in TRIGGERS {
            assert!(find(trigger.name).is_some(), "missing {}", trigger.name);
        }
    }

    #[test]
    fn unknown_name_yields_none() {
        assert!(find("no_such_trigger").is_none());
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = TRIGGERS.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), TRIGGERS.len());
    }

    #[test]
    fn dispatch_runs_a_guarded_path() {
        let trigger = find("instant_crash").expect("registered trigger");
        (trigger.run)(&[0u8; 10]);
    }
}
