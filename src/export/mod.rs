//! Export pipeline: environment overlay, per-function records, JSON artifact
//!
//! Every record is built before anything is written, so configuration and
//! probe errors never leave a partial export behind.

pub mod location;
pub mod record;
pub mod writer;

pub use location::{
    archive_candidate, CodeLocation, CodeLocationResolver, ARCHIVE_NAME, WORK_DIR,
};
pub use record::FunctionRecordBuilder;
pub use writer::ExportWriter;

use crate::config::EnvOverlay;
use crate::error::ExportError;
use crate::fs::FileSystem;
use crate::output::schema::ExportManifest;
use crate::project::{Project, RemoteStateSource};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default output file, relative to the project directory.
pub const DEFAULT_OUTPUT_FILE: &str = ".protego/export.json";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory that relative paths below are resolved against
    pub project_dir: PathBuf,
    pub env_file: Option<PathBuf>,
    /// `KEY=VALUE` overrides, applied after `env_file`
    pub env_pairs: Vec<String>,
    pub output_file: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            env_file: None,
            env_pairs: Vec::new(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output: PathBuf,
    pub functions: usize,
}

pub struct Exporter<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    remote: &'a dyn RemoteStateSource,
    options: ExportOptions,
}

impl<'a, F: FileSystem + ?Sized> Exporter<'a, F> {
    pub fn new(fs: &'a F, remote: &'a dyn RemoteStateSource, options: ExportOptions) -> Self {
        Self {
            fs,
            remote,
            options,
        }
    }

    /// Builds the environment overlay from the project defaults and the
    /// configured overrides.
    pub fn overlay(&self, project: &Project) -> Result<EnvOverlay, ExportError> {
        let mut overlay = EnvOverlay::new(project.environment.clone());
        if let Some(env_file) = &self.options.env_file {
            overlay.load_from_file(self.fs, &self.options.project_dir.join(env_file))?;
        }
        overlay.load_from_pairs(&self.options.env_pairs)?;
        Ok(overlay)
    }

    pub fn manifest(&self, project: &Project) -> Result<ExportManifest, ExportError> {
        let root: &Path = &self.options.project_dir;
        let overlay = self.overlay(project)?;
        let resolver = CodeLocationResolver::new(self.fs, root);
        let builder = FunctionRecordBuilder::new(&overlay, resolver);

        let mut manifest = ExportManifest::new();
        for function in &project.functions {
            let snapshot = self.remote.snapshot(function);
            if snapshot.is_none() {
                debug!(function = %function.name, "No remote state");
            }

            let record = builder.build(function, snapshot.as_ref())?;
            manifest
                .insert(function.name.clone(), record)
                .map_err(|_| ExportError::DuplicateFunction(function.name.clone()))?;
        }

        Ok(manifest)
    }

    pub fn run(&self, project: &Project) -> Result<ExportSummary, ExportError> {
        let manifest = self.manifest(project)?;
        let writer = ExportWriter::new(self.fs, &self.options.project_dir);
        let output = writer.write(&manifest, &self.options.output_file)?;

        info!(
            functions = manifest.len(),
            output = %output.display(),
            "Exported function metadata"
        );

        Ok(ExportSummary {
            output,
            functions: manifest.len(),
        })
    }
}
