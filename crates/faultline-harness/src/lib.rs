//! # faultline-harness
//!
//! Workbench tooling around the `faultline-triggers` crash corpus:
//!
//! - [`input`]: the file-or-stdin shim used by the persistent-mode CLI
//!   harness.
//! - [`code_db`]: function span database over Rust sources.
//! - [`findings`]: maps SARIF analyzer results onto the span database.
//! - [`harness_gen`]: stamps out one libFuzzer target per vulnerable
//!   function.
//! - [`crash_report`]: collects fuzzer crash artifacts into a JSON summary.
//! - [`structured_log`]: JSONL event log written by subcommands.
//! - [`config`]: flat `config.yml` artifact-path configuration.
//!
//! None of this crate runs unsafe code; the deliberately broken routines live
//! exclusively in `faultline-triggers`.

pub mod code_db;
pub mod config;
pub mod crash_report;
pub mod error;
pub mod findings;
pub mod harness_gen;
pub mod input;
pub mod structured_log;

pub use code_db::CodeDb;
pub use config::WorkbenchConfig;
pub use crash_report::CrashReport;
pub use error::HarnessError;
pub use findings::Finding;
