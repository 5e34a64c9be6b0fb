//! Generate one libFuzzer target per vulnerable function.
//!
//! Each generated target looks the function up in the trigger registry at
//! runtime, so a stale findings list produces a harness that no-ops instead
//! of failing to compile.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::HarnessError;

/// Index of generated harness sources, written next to them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessIndex {
    pub harnesses: Vec<String>,
}

impl HarnessIndex {
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        serde_json::from_str(&contents).map_err(|e| HarnessError::json(path, e))
    }

    pub fn write(&self, path: &Path) -> Result<(), HarnessError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| HarnessError::json(path, e))?;
        std::fs::write(path, json + "\n").map_err(|e| HarnessError::io(path, e))
    }
}

/// Replace everything outside `[A-Za-z0-9_]` with underscores.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Render the fuzz target source for one function.
#[must_use]
pub fn render_target(function: &str) -> String {
    format!(
        "#![no_main]\n\
         // Generated harness for {function}\n\
         use libfuzzer_sys::fuzz_target;\n\
         \n\
         fuzz_target!(|data: &[u8]| {{\n\
         \x20   if let Some(trigger) = faultline_triggers::registry::find(\"{function}\") {{\n\
         \x20       (trigger.run)(data);\n\
         \x20   }}\n\
         }});\n"
    )
}

/// Write one `fuzz_<function>.rs` per name into `out_dir` plus a
/// `harnesses.json` index. Returns the index.
pub fn generate(functions: &[String], out_dir: &Path) -> Result<HarnessIndex, HarnessError> {
    std::fs::create_dir_all(out_dir).map_err(|e| HarnessError::io(out_dir, e))?;

    let mut index = HarnessIndex::default();
    for function in functions {
        let stem = sanitize_name(function);
        let path: PathBuf = out_dir.join(format!("fuzz_{stem}.rs"));
        std::fs::write(&path, render_target(function))
            .map_err(|e| HarnessError::io(&path, e))?;
        index.harnesses.push(path.display().to_string());
    }
    index.write(&out_dir.join("harnesses.json"))?;
    Ok(index)
}
