use protego_export::cli::commands::{CliArgs, Commands};
use protego_export::cli::handlers::handle_export;
use protego_export::fs::RealFileSystem;
use protego_export::util::logging::{init_logging, LoggingConfig};
use protego_export::{NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_flags(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let fs = RealFileSystem::new();
    let exit_code = match &args.command {
        Commands::Export(export_args) => handle_export(&fs, &args.chdir, export_args),
    };

    process::exit(exit_code);
}
