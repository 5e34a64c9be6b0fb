//! Flat `config.yml` loader.
//!
//! The configuration is a line-oriented `key: value` file: `#` starts a
//! comment and the first colon splits key from value. Unknown keys are
//! ignored so the file can carry settings for external tooling.

use std::path::{Path, PathBuf};

/// Artifact paths the workbench reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbenchConfig {
    /// Function span database produced by `code-db`.
    pub code_db: PathBuf,
    /// Findings list produced by `findings`.
    pub vuln_output: PathBuf,
    /// Crash summary produced by `collect`.
    pub crash_report: PathBuf,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            code_db: PathBuf::from("target/workbench/code_db.json"),
            vuln_output: PathBuf::from("target/workbench/vulnerable_functions.json"),
            crash_report: PathBuf::from("target/workbench/crashes_report.json"),
        }
    }
}

impl WorkbenchConfig {
    /// Parse from file contents. Keys missing from the file keep their
    /// defaults; malformed lines are skipped.
    #[must_use]
    pub fn from_contents(contents: &str) -> Self {
        let mut cfg = Self::default();
        for line in contents.lines() {
            let stripped = line.trim();
            if stripped.is_empty() || stripped.starts_with('#') {
                continue;
            }
            let Some((key, value)) = stripped.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if value.is_empty() {
                continue;
            }
            match key {
                "code_db" => cfg.code_db = PathBuf::from(value),
                "vuln_output" => cfg.vuln_output = PathBuf::from(value),
                "crash_report" => cfg.crash_report = PathBuf::from(value),
                _ => {}
            }
        }
        cfg
    }

    /// Load `root/config.yml` when present, defaults otherwise. Relative
    /// artifact paths are resolved against `root`.
    #[must_use]
    pub fn load(root: &Path) -> Self {
        let path = root.join("config.yml");
        let mut cfg = match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_contents(&contents),
            Err(_) => Self::default(),
        };
        cfg.resolve_against(root);
        cfg
    }

    fn resolve_against(&mut self, root: &Path) {
        for path in [
            &mut self.code_db,
            &mut self.vuln_output,
            &mut self.crash_report,
        ] {
            if path.is_relative() {
                let resolved = root.join(&*path);
                *path = resolved;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_contents_empty() {
        assert_eq!(WorkbenchConfig::from_contents(""), WorkbenchConfig::default());
    }

    #[test]
    fn parses_known_keys_and_ignores_the_rest() {
        let cfg = WorkbenchConfig::from_contents(
            "# artifact paths\n\
             code_db: out/db.json\n\
             engine: aflplusplus\n\
             crash_report: out/crashes.json\n",
        );
        assert_eq!(cfg.code_db, PathBuf::from("out/db.json"));
        assert_eq!(cfg.crash_report, PathBuf::from("out/crashes.json"));
        assert_eq!(cfg.vuln_output, WorkbenchConfig::default().vuln_output);
    }

    #[test]
    fn splits_on_first_colon_only() {
        let cfg = WorkbenchConfig::from_contents("vuln_output: c:/reports/vuln.json\n");
        assert_eq!(cfg.vuln_output, PathBuf::from("c:/reports/vuln.json"));
    }

    #[test]
    fn empty_values_keep_defaults() {
        let cfg = WorkbenchConfig::from_contents("code_db:\n");
        assert_eq!(cfg.code_db, WorkbenchConfig::default().code_db);
    }

    #[test]
    fn load_resolves_relative_paths_against_root() {
        // No config.yml under this root: defaults apply, resolved against it.
        let root = std::env::temp_dir().join("faultline-config-absent");
        let cfg = WorkbenchConfig::load(&root);
        assert!(cfg.code_db.starts_with(&root));
        assert!(cfg.crash_report.starts_with(&root));
    }
}
