//! Map SARIF analyzer results onto the function span database.
//!
//! Only the slice of the SARIF schema the workbench consumes is modeled;
//! everything else in the report is ignored.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::code_db::CodeDb;
use crate::error::HarnessError;

#[derive(Debug, Default, Deserialize)]
pub struct Sarif {
    #[serde(default)]
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SarifRun {
    #[serde(default)]
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SarifResult {
    #[serde(default, rename = "ruleId")]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub message: SarifMessage,
    #[serde(default)]
    pub locations: Vec<SarifLocation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SarifMessage {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SarifLocation {
    #[serde(default, rename = "physicalLocation")]
    pub physical: Option<PhysicalLocation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PhysicalLocation {
    #[serde(default, rename = "artifactLocation")]
    pub artifact: Option<ArtifactLocation>,
    #[serde(default)]
    pub region: Option<Region>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArtifactLocation {
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Region {
    #[serde(default, rename = "startLine")]
    pub start_line: Option<usize>,
}

impl Sarif {
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        serde_json::from_str(&contents).map_err(|e| HarnessError::json(path, e))
    }
}

/// One analyzer result resolved to a function span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: Option<String>,
    pub message: String,
    /// Code-db relative path when the location resolved, raw URI otherwise.
    pub file: String,
    pub function: Option<String>,
    pub function_start: Option<usize>,
    pub function_end: Option<usize>,
    pub line: usize,
}

/// Resolve every SARIF result location against the span database.
#[must_use]
pub fn collect(sarif: &Sarif, db: &CodeDb) -> Vec<Finding> {
    let mut findings = Vec::new();
    for run in &sarif.runs {
        for result in &run.results {
            for location in &result.locations {
                let Some(physical) = &location.physical else {
                    continue;
                };
                let Some(uri) = physical.artifact.as_ref().and_then(|a| a.uri.as_deref())
                else {
                    continue;
                };
                let Some(line) = physical.region.as_ref().and_then(|r| r.start_line) else {
                    continue;
                };
                let uri = normalize_uri(uri);
                let resolved = db.function_at(uri, line);
                findings.push(Finding {
                    rule_id: result.rule_id.clone(),
                    message: result.message.text.clone(),
                    file: resolved
                        .map(|(entry, _)| entry.path.clone())
                        .unwrap_or_else(|| uri.to_string()),
                    function: resolved.map(|(_, span)| span.name.clone()),
                    function_start: resolved.map(|(_, span)| span.start_line),
                    function_end: resolved.map(|(_, span)| span.end_line),
                    line,
                });
            }
        }
    }
    findings
}

/// The null-write trigger must reach the fuzzer even when the analyzer
/// misses it; append a synthetic finding when absent.
pub fn ensure_instant_crash(findings: &mut Vec<Finding>, db: &CodeDb) {
    if findings
        .iter()
        .any(|f| f.function.as_deref() == Some("instant_crash"))
    {
        return;
    }
    if let Some((entry, span)) = db.find_function("instant_crash") {
        findings.push(Finding {
            rule_id: Some("faultline/instant-crash".into()),
            message: "Synthetic: known crash function instant_crash".into(),
            file: entry.path.clone(),
            function: Some(span.name.clone()),
            function_start: Some(span.start_line),
            function_end: Some(span.end_line),
            line: span.start_line,
        });
    }
}

/// Names of functions with at least one finding, sorted and deduplicated.
#[must_use]
pub fn vulnerable_functions(findings: &[Finding]) -> Vec<String> {
    let mut names: Vec<String> = findings.iter().filter_map(|f| f.function.clone()).collect();
    names.sort();
    names.dedup();
    names
}

/// Write findings as pretty JSON, creating parent directories.
pub fn write_findings(findings: &[Finding], path: &Path) -> Result<(), HarnessError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| HarnessError::io(parent, e))?;
    }
    let json =
        serde_json::to_string_pretty(findings).map_err(|e| HarnessError::json(path, e))?;
    std::fs::write(path, json + "\n").map_err(|e| HarnessError::io(path, e))
}

/// Load findings previously written by [`write_findings`].
pub fn read_findings(path: &Path) -> Result<Vec<Finding>, HarnessError> {
    let contents = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|e| HarnessError::json(path, e))
}

fn normalize_uri(uri: &str) -> &str {
    uri.strip_prefix("file://").unwrap_or(uri)
}
