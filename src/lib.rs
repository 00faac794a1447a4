//! protego-export - JSON metadata export for serverless function projects
//!
//! Reads a project (`project.json` plus `functions/*/function.json`), merges
//! environment overrides, resolves where each function's code lives and writes
//! a single JSON document describing every function, so other tooling can
//! inspect the project without talking to the deployment platform.
//!
//! # Example
//!
//! ```no_run
//! use protego_export::export::{ExportOptions, Exporter};
//! use protego_export::fs::RealFileSystem;
//! use protego_export::project::{load_project, NoRemoteState};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let fs = RealFileSystem::new();
//! let project = load_project(&fs, Path::new("."), &[])?;
//! let summary = Exporter::new(&fs, &NoRemoteState, ExportOptions::default()).run(&project)?;
//! println!("wrote {} functions to {}", summary.functions, summary.output.display());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod fs;
pub mod output;
pub mod project;
pub mod util;

pub use config::{ConfigError, EnvOverlay};
pub use error::{ExportError, IoStep};
pub use export::{ExportOptions, ExportSummary, Exporter};
pub use fs::{FileSystem, MockFileSystem, Probe, RealFileSystem};
pub use output::schema::{ExportManifest, ExportedRecord};
pub use project::{FunctionDefinition, Project, ProjectError, RemoteSnapshot};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
