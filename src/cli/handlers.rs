use super::commands::ExportArgs;
use crate::export::{ExportOptions, ExportSummary, Exporter};
use crate::fs::FileSystem;
use crate::project::{load_project, NoRemoteState, RemoteStateSource, StateFile};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info};

/// Loads the project under `project_dir` and writes the export file.
pub fn run_export<F: FileSystem + ?Sized>(
    fs: &F,
    project_dir: &Path,
    args: &ExportArgs,
) -> Result<ExportSummary> {
    let project = load_project(fs, project_dir, &args.functions)
        .with_context(|| format!("failed to load project in {}", project_dir.display()))?;

    let state = match &args.state_file {
        Some(path) => Some(StateFile::load(fs, &project_dir.join(path))?),
        None => None,
    };
    let remote: &dyn RemoteStateSource = match &state {
        Some(state) => state,
        None => &NoRemoteState,
    };

    let options = ExportOptions {
        project_dir: project_dir.to_path_buf(),
        env_file: args.env_file.clone(),
        env_pairs: args.set.clone(),
        output_file: args.output_file.clone(),
    };
    debug!("Export options: {:?}", options);

    Exporter::new(fs, remote, options)
        .run(&project)
        .context("export failed")
}

pub fn handle_export<F: FileSystem + ?Sized>(
    fs: &F,
    project_dir: &Path,
    args: &ExportArgs,
) -> i32 {
    match run_export(fs, project_dir, args) {
        Ok(summary) => {
            info!(
                "Exported {} function(s) to {}",
                summary.functions,
                summary.output.display()
            );
            0
        }
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}
