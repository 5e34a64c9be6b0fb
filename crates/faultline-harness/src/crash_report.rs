//! Collect fuzzer crash artifacts into a JSON summary.
//!
//! Scans `out-<harness>*/default/crashes/` directories the way AFL++ lays
//! them out, parses the comma/colon metadata in crash filenames, deduplicates
//! by SHA-256 of file contents, and groups everything by harness.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::error::HarnessError;

/// One crash input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrashEntry {
    /// Path relative to the scanned fuzzer directory.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sig: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execs: Option<String>,
    /// SHA-256 of the crash input, lowercase hex.
    pub sha256: String,
}

/// All crashes attributed to one harness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessCrashes {
    pub harness: String,
    /// Trigger the harness drives, derived from the harness name.
    pub function: String,
    pub crashes: Vec<CrashEntry>,
}

/// The full summary document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrashReport {
    pub harnesses: Vec<HarnessCrashes>,
}

impl CrashReport {
    /// Total crash inputs across all harnesses.
    #[must_use]
    pub fn total_crashes(&self) -> usize {
        self.harnesses.iter().map(|h| h.crashes.len()).sum()
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), HarnessError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| HarnessError::io(parent, e))?;
        }
        let json =
            serde_json::to_string_pretty(self).map_err(|e| HarnessError::json(path, e))?;
        std::fs::write(path, json + "\n").map_err(|e| HarnessError::io(path, e))
    }

    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        serde_json::from_str(&contents).map_err(|e| HarnessError::json(path, e))
    }
}

/// Parse AFL-style crash filename metadata (`id:000000,sig:11,...`).
#[must_use]
pub fn parse_crash_filename(name: &str) -> BTreeMap<String, String> {
    let mut meta = BTreeMap::new();
    for part in name.split(',') {
        if let Some((key, value)) = part.split_once(':') {
            meta.insert(key.to_string(), value.to_string());
        }
    }
    meta
}

/// Derive the driven function from a harness source path or name.
///
/// `fuzz_instant_crash.rs` and `instant_crash_afl` both map to
/// `instant_crash`.
#[must_use]
pub fn function_for_harness(harness: &str) -> String {
    let stem = Path::new(harness)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(harness);
    let stem = stem.strip_suffix("_afl").unwrap_or(stem);
    stem.strip_prefix("fuzz_").unwrap_or(stem).to_string()
}

/// Collect crashes for the named harnesses under `fuzzer_dir`.
///
/// Within a harness, inputs with identical contents are reported once.
pub fn collect(fuzzer_dir: &Path, harnesses: &[String]) -> Result<CrashReport, HarnessError> {
    let mut report = CrashReport::default();
    for harness in harnesses {
        let base = harness_base(harness);
        let mut crashes = Vec::new();
        let mut seen = HashSet::new();
        for run_dir in matching_run_dirs(fuzzer_dir, &base)? {
            let crash_dir = run_dir.join("default").join("crashes");
            if !crash_dir.is_dir() {
                continue;
            }
            let mut paths: Vec<_> = std::fs::read_dir(&crash_dir)
                .map_err(|e| HarnessError::io(&crash_dir, e))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .collect();
            paths.sort();
            for path in paths {
                if !path.is_file() || path.file_name().is_some_and(|n| n == "README.txt") {
                    continue;
                }
                let contents =
                    std::fs::read(&path).map_err(|e| HarnessError::io(&path, e))?;
                let sha256 = hex_sha256(&contents);
                if !seen.insert(sha256.clone()) {
                    continue;
                }
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default();
                let mut meta = parse_crash_filename(name);
                let rel = path.strip_prefix(fuzzer_dir).unwrap_or(&path);
                crashes.push(CrashEntry {
                    path: rel.display().to_string(),
                    sig: meta.remove("sig"),
                    time: meta.remove("time"),
                    execs: meta.remove("execs"),
                    sha256,
                });
            }
        }
        report.harnesses.push(HarnessCrashes {
            harness: harness.clone(),
            function: function_for_harness(harness),
            crashes,
        });
    }
    Ok(report)
}

/// List harness base names by scanning `out-*` run directories, used when no
/// harness index file exists.
pub fn discover_harnesses(fuzzer_dir: &Path) -> Result<Vec<String>, HarnessError> {
    if !fuzzer_dir.is_dir() {
        return Err(HarnessError::MissingPath(fuzzer_dir.to_path_buf()));
    }
    let mut names: Vec<String> = std::fs::read_dir(fuzzer_dir)
        .map_err(|e| HarnessError::io(fuzzer_dir, e))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()
                .and_then(|n| n.strip_prefix("out-"))
                .map(str::to_string)
        })
        .collect();
    names.sort();
    names.dedup();
    Ok(names)
}

fn harness_base(harness: &str) -> String {
    Path::new(harness)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(harness)
        .to_string()
}

fn matching_run_dirs(
    fuzzer_dir: &Path,
    base: &str,
) -> Result<Vec<std::path::PathBuf>, HarnessError> {
    if !fuzzer_dir.is_dir() {
        return Ok(Vec::new());
    }
    let prefix = format!("out-{base}");
    let mut dirs: Vec<_> = std::fs::read_dir(fuzzer_dir)
        .map_err(|e| HarnessError::io(fuzzer_dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
        })
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn hex_sha256(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut out = String::with_capacity(64);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_afl_crash_filename_metadata() {
        let meta = parse_crash_filename("id:000000,sig:11,src:000000,time:267,execs:29,op:havoc");
        assert_eq!(meta.get("id").map(String::as_str), Some("000000"));
        assert_eq!(meta.get("sig").map(String::as_str), Some("11"));
        assert_eq!(meta.get("time").map(String::as_str), Some("267"));
        assert_eq!(meta.get("execs").map(String::as_str), Some("29"));
    }

    #[test]
    fn filename_without_metadata_yields_empty_map() {
        assert!(parse_crash_filename("crash-deadbeef").is_empty());
    }

    #[test]
    fn derives_function_from_harness_names() {
        assert_eq!(function_for_harness("fuzz_instant_crash.rs"), "instant_crash");
        assert_eq!(
            function_for_harness("gen/fuzz_parse_chunks.rs"),
            "parse_chunks"
        );
        assert_eq!(function_for_harness("instant_crash_afl"), "instant_crash");
    }

    #[test]
    fn collect_scans_dedupes_and_skips_readme() {
        let root =
            std::env::temp_dir().join(format!("faultline-crashes-{}", std::process::id()));
        let crashes = root
            .join("out-fuzz_instant_crash")
            .join("default")
            .join("crashes");
        std::fs::create_dir_all(&crashes).expect("mkdir");
        std::fs::write(crashes.join("id:000000,sig:11,time:4,execs:9"), b"AAAA").expect("write");
        // Same contents under a different id: deduplicated.
        std::fs::write(crashes.join("id:000001,sig:11,time:9,execs:12"), b"AAAA")
            .expect("write");
        std::fs::write(crashes.join("id:000002,sig:06,time:20,execs:44"), b"BBBB")
            .expect("write");
        std::fs::write(crashes.join("README.txt"), b"afl readme").expect("write");

        let report = collect(&root, &["fuzz_instant_crash.rs".to_string()]).expect("collect");
        assert_eq!(report.harnesses.len(), 1);
        let entry = &report.harnesses[0];
        assert_eq!(entry.function, "instant_crash");
        assert_eq!(entry.crashes.len(), 2);
        assert_eq!(report.total_crashes(), 2);
        assert_eq!(entry.crashes[0].sig.as_deref(), Some("11"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn discover_harnesses_strips_out_prefix() {
        let root =
            std::env::temp_dir().join(format!("faultline-discover-{}", std::process::id()));
        std::fs::create_dir_all(root.join("out-fuzz_entry")).expect("mkdir");
        std::fs::create_dir_all(root.join("out-fuzz_format")).expect("mkdir");
        std::fs::create_dir_all(root.join("corpus")).expect("mkdir");

        let names = discover_harnesses(&root).expect("discover");
        assert_eq!(names, vec!["fuzz_entry".to_string(), "fuzz_format".to_string()]);

        let _ = std::fs::remove_dir_all(&root);
    }
}
