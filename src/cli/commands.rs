use crate::export::DEFAULT_OUTPUT_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Serverless project tooling
#[derive(Parser, Debug)]
#[command(
    name = "protego",
    about = "Serverless project tooling",
    version,
    long_about = "protego works on a project made of project.json and one directory per \
                  function under functions/. It reads local configuration only and never \
                  talks to the deployment platform."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'C',
        long,
        global = true,
        value_name = "DIR",
        default_value = ".",
        help = "Project directory; relative paths are resolved against it"
    )]
    pub chdir: PathBuf,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Export all functions information to a JSON file",
        long_about = "Writes one record per function (name, runtime, role, region, handler, \
                      limits, environment, VPC, dead-letter target and code location) to \
                      .protego/export.json.\n\n\
                      Examples:\n  \
                      protego export\n  \
                      protego export 'api_*' -s STAGE=prod\n  \
                      protego export -E env.json -O build/functions.json"
    )]
    Export(ExportArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    #[arg(
        value_name = "NAME",
        help = "Functions to export; supports * and ? wildcards (defaults to all)"
    )]
    pub functions: Vec<String>,

    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        help = "Set environment variable (repeatable)"
    )]
    pub set: Vec<String>,

    #[arg(
        short = 'E',
        long,
        value_name = "FILE",
        help = "Set environment variables from JSON file"
    )]
    pub env_file: Option<PathBuf>,

    #[arg(
        short = 'O',
        long,
        value_name = "FILE",
        default_value = DEFAULT_OUTPUT_FILE,
        help = "The name of the output file"
    )]
    pub output_file: PathBuf,

    #[arg(
        long,
        value_name = "FILE",
        help = "JSON file with last known remote state, keyed by deployed function name"
    )]
    pub state_file: Option<PathBuf>,
}
