pub mod commands;
pub mod handlers;

pub use commands::{CliArgs, Commands, ExportArgs};
pub use handlers::{handle_export, run_export};
