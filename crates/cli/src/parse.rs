//! ArgMatches → CliAction conversion.

use std::env;
use std::path::PathBuf;

use clap::ArgMatches;

use crate::format::OutputMode;

/// The result of parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Write the sample tables
    Demo { parallel: bool, manifest: bool },
    /// Archive one JSON document
    Save { name: String, input: Option<PathBuf> },
    /// List runs
    Runs,
    /// Print a CSV file
    Show { path: PathBuf },
}

/// Options shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalOptions {
    pub base_dir: PathBuf,
    pub mode: OutputMode,
}

pub fn global_options(matches: &ArgMatches) -> Result<GlobalOptions, String> {
    let base_dir = match matches.get_one::<String>("base-dir") {
        Some(dir) => PathBuf::from(dir),
        None => env::current_dir()
            .map_err(|e| format!("Failed to resolve current directory: {}", e))?,
    };
    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    Ok(GlobalOptions { base_dir, mode })
}

pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "demo" => Ok(CliAction::Demo {
            parallel: sub_matches.get_flag("parallel"),
            manifest: !sub_matches.get_flag("no-manifest"),
        }),
        "save" => {
            let name = sub_matches
                .get_one::<String>("name")
                .cloned()
                .ok_or_else(|| "save requires --name".to_string())?;
            let input = sub_matches.get_one::<String>("input").map(PathBuf::from);
            Ok(CliAction::Save { name, input })
        }
        "runs" => Ok(CliAction::Runs),
        "show" => {
            let path = sub_matches
                .get_one::<String>("path")
                .map(PathBuf::from)
                .ok_or_else(|| "show requires a path".to_string())?;
            Ok(CliAction::Show { path })
        }
        other => Err(format!("Unknown command: {}", other)),
    }
}
