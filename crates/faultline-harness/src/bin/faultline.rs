//! CLI entrypoint for the faultline fuzzing workbench.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use faultline_harness::structured_log::{LogEmitter, LogLevel};
use faultline_harness::{CodeDb, HarnessError, WorkbenchConfig, crash_report, findings, harness_gen, input};
use faultline_triggers::registry;

/// Crash-trigger corpus and fuzzing workbench.
#[derive(Debug, Parser)]
#[command(name = "faultline")]
#[command(about = "Crash-trigger corpus and fuzzing workbench")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one trigger on a file or stdin. Expect a crash.
    Run {
        /// Input file; stdin when omitted.
        input: Option<PathBuf>,
        /// Trigger name (see `list`).
        #[arg(long, default_value = "fuzz_entry")]
        trigger: String,
        /// Structured JSONL log path (stderr when omitted).
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// List triggers with their summaries.
    List {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Build the function span database over Rust sources.
    CodeDb {
        /// Source root to scan.
        #[arg(long, default_value = "crates/faultline-triggers")]
        root: PathBuf,
        /// Output path (config default when omitted).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Map SARIF analyzer results onto the function span database.
    Findings {
        /// SARIF report path.
        #[arg(long)]
        sarif: PathBuf,
        /// Code database path (config default when omitted).
        #[arg(long)]
        code_db: Option<PathBuf>,
        /// Output path (config default when omitted).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate libFuzzer target sources for vulnerable functions.
    GenHarnesses {
        /// Findings JSON from `findings`; all registry triggers when omitted.
        #[arg(long)]
        findings: Option<PathBuf>,
        /// Directory receiving generated sources and harnesses.json.
        #[arg(long, default_value = "crates/faultline-fuzz/fuzz_targets/generated")]
        out_dir: PathBuf,
    },
    /// Collect fuzzer crash artifacts into a JSON summary.
    Collect {
        /// Directory holding out-<harness> run directories.
        #[arg(long, default_value = "fuzzer")]
        fuzzer_dir: PathBuf,
        /// harnesses.json index; run directories are discovered when omitted.
        #[arg(long)]
        index: Option<PathBuf>,
        /// Output path (config default when omitted).
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = WorkbenchConfig::load(Path::new("."));

    match cli.command {
        Command::Run { input, trigger, log } => {
            let mut emitter = match log {
                Some(path) => LogEmitter::file(&path)?,
                None => LogEmitter::stderr(),
            };
            let data = input::read_input(input.as_deref())?;
            if data.is_empty() {
                let entry = emitter.entry(LogLevel::Warn, "empty_input");
                emitter.emit(&entry)?;
                return Ok(());
            }
            let found = registry::find(&trigger)
                .ok_or_else(|| HarnessError::UnknownTrigger(trigger.clone()))?;
            let armed = emitter
                .entry(LogLevel::Info, "trigger_armed")
                .with_trigger(found.name, data.len());
            emitter.emit(&armed)?;
            (found.run)(&data);
            // Only the guarded paths reach this point.
            let mut done = emitter
                .entry(LogLevel::Info, "trigger_returned")
                .with_trigger(found.name, data.len());
            if let Some(armed) = faultline_triggers::journal::last_armed() {
                done = done.with_detail(serde_json::json!({
                    "last_armed": armed.trigger,
                    "fingerprint": armed.fingerprint,
                }));
            }
            emitter.emit(&done)?;
        }
        Command::List { json } => {
            if json {
                let entries: Vec<_> = registry::TRIGGERS
                    .iter()
                    .map(|t| serde_json::json!({"name": t.name, "summary": t.summary}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for t in registry::TRIGGERS {
                    println!("{:<20} {}", t.name, t.summary);
                }
            }
        }
        Command::CodeDb { root, output } => {
            let output = output.unwrap_or(config.code_db);
            let db = CodeDb::build(&root)?;
            db.write(&output)?;
            eprintln!(
                "code-db: {} files, {} functions -> {}",
                db.files.len(),
                db.function_count(),
                output.display()
            );
        }
        Command::Findings { sarif, code_db, output } => {
            let db_path = code_db.unwrap_or(config.code_db);
            let output = output.unwrap_or(config.vuln_output);
            let db = CodeDb::from_file(&db_path)?;
            let sarif = findings::Sarif::from_file(&sarif)?;
            let mut results = findings::collect(&sarif, &db);
            findings::ensure_instant_crash(&mut results, &db);
            findings::write_findings(&results, &output)?;
            eprintln!("findings: {} -> {}", results.len(), output.display());
        }
        Command::GenHarnesses { findings: findings_path, out_dir } => {
            let functions = match findings_path {
                Some(path) => {
                    let results = findings::read_findings(&path)?;
                    findings::vulnerable_functions(&results)
                }
                None => registry::TRIGGERS.iter().map(|t| t.name.to_string()).collect(),
            };
            let index = harness_gen::generate(&functions, &out_dir)?;
            eprintln!(
                "gen-harnesses: {} targets -> {}",
                index.harnesses.len(),
                out_dir.display()
            );
        }
        Command::Collect { fuzzer_dir, index, output } => {
            let output = output.unwrap_or(config.crash_report);
            let harnesses = match index {
                Some(path) => harness_gen::HarnessIndex::from_file(&path)?.harnesses,
                None => crash_report::discover_harnesses(&fuzzer_dir)?,
            };
            let report = crash_report::collect(&fuzzer_dir, &harnesses)?;
            report.write(&output)?;
            eprintln!(
                "collect: {} crashes across {} harnesses -> {}",
                report.total_crashes(),
                report.harnesses.len(),
                output.display()
            );
        }
    }
    Ok(())
}
