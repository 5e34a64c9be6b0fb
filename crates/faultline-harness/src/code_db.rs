//! Function span database over Rust sources.
//!
//! A deliberately simple scan: comments are stripped, `fn name` headers are
//! matched at any brace depth, and brace tracking closes each span. String
//! literals are not parsed, so a brace inside a literal can skew a span; the
//! consumers (findings mapping, harness generation) tolerate that.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::HarnessError;

/// One function with its line span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpan {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// One scanned source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the scanned root.
    pub path: String,
    pub functions: Vec<FunctionSpan>,
}

/// The database: every `.rs` file under a root with its function spans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeDb {
    pub project_root: String,
    pub files: Vec<FileEntry>,
}

impl CodeDb {
    /// Scan `root` recursively, skipping `target` directories.
    pub fn build(root: &Path) -> Result<Self, HarnessError> {
        if !root.exists() {
            return Err(HarnessError::MissingPath(root.to_path_buf()));
        }
        let mut paths = Vec::new();
        collect_rs_files(root, &mut paths)?;
        paths.sort();

        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            let source =
                std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
            let rel = path.strip_prefix(root).unwrap_or(path);
            files.push(FileEntry {
                path: rel.display().to_string(),
                functions: extract_functions(&source),
            });
        }
        Ok(Self {
            project_root: root.display().to_string(),
            files,
        })
    }

    /// Load a previously written database.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        serde_json::from_str(&contents).map_err(|e| HarnessError::json(path, e))
    }

    /// Write the database as pretty JSON, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), HarnessError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| HarnessError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| HarnessError::json(path, e))?;
        std::fs::write(path, json + "\n").map_err(|e| HarnessError::io(path, e))
    }

    /// Find the function enclosing `line` in the file matching `uri`.
    ///
    /// Tries an exact relative-path match first, then a suffix match so
    /// absolute analyzer URIs still resolve.
    #[must_use]
    pub fn function_at(&self, uri: &str, line: usize) -> Option<(&FileEntry, &FunctionSpan)> {
        let entry = self
            .files
            .iter()
            .find(|f| f.path == uri)
            .or_else(|| self.files.iter().find(|f| uri.ends_with(&f.path)))?;
        let span = entry
            .functions
            .iter()
            .find(|f| f.start_line <= line && line <= f.end_line)?;
        Some((entry, span))
    }

    /// Find a function span by name anywhere in the database.
    #[must_use]
    pub fn find_function(&self, name: &str) -> Option<(&FileEntry, &FunctionSpan)> {
        for entry in &self.files {
            if let Some(span) = entry.functions.iter().find(|f| f.name == name) {
                return Some((entry, span));
            }
        }
        None
    }

    /// Total functions across all files.
    #[must_use]
    pub fn function_count(&self) -> usize {
        self.files.iter().map(|f| f.functions.len()).sum()
    }
}

fn collect_rs_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), HarnessError> {
    for entry in std::fs::read_dir(dir).map_err(|e| HarnessError::io(dir, e))? {
        let entry = entry.map_err(|e| HarnessError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().is_some_and(|n| n == "target") {
                continue;
            }
            collect_rs_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
    Ok(())
}

/// Extract `fn` spans from one source file.
#[must_use]
pub fn extract_functions(source: &str) -> Vec<FunctionSpan> {
    let text = strip_comments(source);
    let bytes = text.as_bytes();

    let mut functions = Vec::new();
    // One slot per open brace: the fn header that opened it, if any.
    let mut stack: Vec<Option<(String, usize)>> = Vec::new();
    let mut pending: Option<(String, usize)> = None;
    let mut line = 1usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => line += 1,
            b'{' => stack.push(pending.take()),
            b'}' => {
                if let Some(Some((name, start_line))) = stack.pop() {
                    functions.push(FunctionSpan {
                        name,
                        start_line,
                        end_line: line,
                    });
                }
            }
            // A semicolon before the body means a bodyless declaration.
            b';' => pending = None,
            b'f' if pending.is_none() && is_fn_keyword(bytes, i) => {
                if let Some(name) = ident_after(&text[i + 2..]) {
                    pending = Some((name, line));
                }
            }
            _ => {}
        }
        i += 1;
    }

    functions.sort_by_key(|f| f.start_line);
    functions
}

fn is_fn_keyword(bytes: &[u8], i: usize) -> bool {
    if !bytes[i..].starts_with(b"fn") {
        return false;
    }
    let boundary_before = i == 0 || !is_ident_byte(bytes[i - 1]);
    let boundary_after = bytes.get(i + 2).is_some_and(|b| b.is_ascii_whitespace());
    boundary_before && boundary_after
}

fn ident_after(rest: &str) -> Option<String> {
    let name: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    (!name.is_empty()).then_some(name)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Remove `//` and `/* */` comments, preserving newlines for line counting.
fn strip_comments(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = String::with_capacity(source.len());
    let mut in_block = 0usize;
    let mut in_line = false;
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\n' {
            out.push('\n');
            in_line = false;
            i += 1;
            continue;
        }
        if in_line {
            i += 1;
            continue;
        }
        if in_block > 0 {
            if bytes[i..].starts_with(b"*/") {
                in_block -= 1;
                i += 2;
            } else if bytes[i..].starts_with(b"/*") {
                // Rust block comments nest.
                in_block += 1;
                i += 2;
            } else {
                i += 1;
            }
            continue;
        }
        if bytes[i..].starts_with(b"//") {
            in_line = true;
            i += 2;
            continue;
        }
        if bytes[i..].starts_with(b"/*") {
            in_block = 1;
            i += 2;
            continue;
        }
        out.push(b as char);
        i += 1;
    }
    out
}
