//! clap command tree for the `runarchive` binary.

use clap::{Arg, ArgAction, Command};

/// Environment variable consulted when `--base-dir` is absent
pub const BASE_DIR_ENV: &str = "RUNARCHIVE_BASE_DIR";

pub fn build_cli() -> Command {
    Command::new("runarchive")
        .about("Archive tabular artifacts into timestamped run directories")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("base-dir")
                .long("base-dir")
                .short('d')
                .global(true)
                .env(BASE_DIR_ENV)
                .value_name("DIR")
                .help("Directory that holds Output/ (defaults to the current directory)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print machine-readable JSON"),
        )
        .subcommand(
            Command::new("demo")
                .about("Write the sample employee tables into a new run")
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .action(ArgAction::SetTrue)
                        .help("Write artifacts concurrently"),
                )
                .arg(
                    Arg::new("no-manifest")
                        .long("no-manifest")
                        .action(ArgAction::SetTrue)
                        .help("Skip MANIFEST.json"),
                ),
        )
        .subcommand(
            Command::new("save")
                .about("Archive a JSON array of objects as one artifact in a new run")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .short('n')
                        .required(true)
                        .value_name("NAME")
                        .help("Artifact name used in the file name"),
                )
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .value_name("FILE")
                        .help("JSON file to read (defaults to stdin)"),
                ),
        )
        .subcommand(Command::new("runs").about("List run directories, oldest first"))
        .subcommand(
            Command::new("show")
                .about("Print an archived CSV file as a table")
                .arg(Arg::new("path").required(true).value_name("PATH")),
        )
}
