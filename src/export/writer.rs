use super::location::WORK_DIR;
use crate::error::{ExportError, IoStep};
use crate::fs::FileSystem;
use crate::output::schema::ExportManifest;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Owner-only permissions for the working directory.
pub const WORK_DIR_MODE: u32 = 0o700;

/// Renders the manifest and writes it in place.
///
/// The destination is overwritten directly, so a failure mid-write can leave
/// a truncated file behind.
pub struct ExportWriter<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    root: &'a Path,
}

impl<'a, F: FileSystem + ?Sized> ExportWriter<'a, F> {
    pub fn new(fs: &'a F, root: &'a Path) -> Self {
        Self { fs, root }
    }

    /// Two-space indented JSON with keys in name order.
    pub fn render(manifest: &ExportManifest) -> Result<String, ExportError> {
        Ok(manifest.to_json_pretty()?)
    }

    pub fn write(&self, manifest: &ExportManifest, output: &Path) -> Result<PathBuf, ExportError> {
        let text = Self::render(manifest)?;

        self.ensure_dir(&self.root.join(WORK_DIR))?;
        let destination = self.root.join(output);
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && !self.fs.is_dir(parent) {
                self.ensure_dir(parent)?;
            }
        }

        self.fs
            .write(&destination, text.as_bytes())
            .map_err(|source| ExportError::Io {
                step: IoStep::WriteFile,
                path: destination.clone(),
                source,
            })?;

        debug!("{}", text);
        Ok(destination)
    }

    fn ensure_dir(&self, dir: &Path) -> Result<(), ExportError> {
        self.fs
            .create_dir_all(dir, WORK_DIR_MODE)
            .map_err(|source| ExportError::Io {
                step: IoStep::CreateDir,
                path: dir.to_path_buf(),
                source,
            })
    }
}
