//! runarchive: archive tabular artifacts into timestamped run directories.
//!
//! `runarchive [--base-dir DIR] [--json] COMMAND`
//!
//! - `demo`: write the sample tables into a new run
//! - `save`: archive a JSON array of objects as one artifact
//! - `runs`: list existing runs
//! - `show`: print an archived CSV file

mod commands;
mod demo;
mod format;
mod parse;

use std::fs;
use std::io::{self, Read};
use std::process;

use runarchive_core::Artifact;
use runarchive_durability::{BatchReport, RunArchiver};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_batch, format_error, format_runs, format_table, OutputMode};
use parse::{global_options, matches_to_action, CliAction, GlobalOptions};

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();
    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let result = global_options(&matches).and_then(|opts| {
        let action = matches_to_action(&matches)?;
        execute(&opts, action)
    });

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            process::exit(1);
        }
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Run one action; returns the process exit code.
fn execute(opts: &GlobalOptions, action: CliAction) -> Result<i32, String> {
    let archiver = RunArchiver::new();
    debug!(?action, base_dir = %opts.base_dir.display(), "Executing command");

    match action {
        CliAction::Demo { parallel, manifest } => {
            let ctx = archiver
                .create_run_context(&opts.base_dir)
                .map_err(|e| e.to_string())?;
            let artifacts = demo::demo_artifacts();
            let report = if parallel {
                archiver.save_batch_parallel(&ctx, &artifacts)
            } else {
                archiver.save_batch(&ctx, &artifacts)
            };
            if manifest {
                archiver
                    .write_manifest(&ctx, &report)
                    .map_err(|e| e.to_string())?;
            }
            println!("{}", format_batch(&ctx, &report, opts.mode));
            Ok(exit_code(&report))
        }
        CliAction::Save { name, input } => {
            let text = match input {
                Some(path) => fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .map_err(|e| format!("Failed to read stdin: {}", e))?;
                    buf
                }
            };
            let json: serde_json::Value =
                serde_json::from_str(&text).map_err(|e| format!("Invalid JSON: {}", e))?;
            let artifact = Artifact::from_json(name, &json).map_err(|e| e.to_string())?;

            let ctx = archiver
                .create_run_context(&opts.base_dir)
                .map_err(|e| e.to_string())?;
            let report = archiver.save_batch(&ctx, std::slice::from_ref(&artifact));
            println!("{}", format_batch(&ctx, &report, opts.mode));
            Ok(exit_code(&report))
        }
        CliAction::Runs => {
            let runs = archiver
                .list_runs(&opts.base_dir)
                .map_err(|e| e.to_string())?;
            println!("{}", format_runs(&runs, opts.mode));
            Ok(0)
        }
        CliAction::Show { path } => {
            let table = runarchive_wire::read_csv(&path).map_err(|e| e.to_string())?;
            println!("{}", format_table(&path, &table, opts.mode));
            Ok(0)
        }
    }
}

fn exit_code(report: &BatchReport) -> i32 {
    if report.is_complete() {
        0
    } else {
        warn!(failed = report.failed_count(), "Some artifacts were not saved");
        1
    }
}
