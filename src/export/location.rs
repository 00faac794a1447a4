//! Chooses between a packaged archive and the raw source directory

use crate::error::ExportError;
use crate::fs::{FileSystem, Probe};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Working directory that holds build artifacts and the export file.
pub const WORK_DIR: &str = ".protego";

/// Archive name expected inside `WORK_DIR/<source path>/`.
pub const ARCHIVE_NAME: &str = "out.zip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLocation {
    /// A prebuilt archive under the staging directory
    Archive(PathBuf),
    /// The function's source directory, used as is
    Source(PathBuf),
}

impl CodeLocation {
    pub fn path(&self) -> &Path {
        match self {
            CodeLocation::Archive(path) | CodeLocation::Source(path) => path,
        }
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, CodeLocation::Archive(_))
    }
}

impl fmt::Display for CodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// `WORK_DIR/<source>/ARCHIVE_NAME`. Root and prefix components of `source`
/// are dropped so the candidate never escapes the staging directory.
pub fn archive_candidate(source: &Path) -> PathBuf {
    let mut candidate = PathBuf::from(WORK_DIR);
    candidate.extend(
        source
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_))),
    );
    candidate.push(ARCHIVE_NAME);
    candidate
}

pub struct CodeLocationResolver<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    root: &'a Path,
}

impl<'a, F: FileSystem + ?Sized> CodeLocationResolver<'a, F> {
    /// Candidates are probed relative to `root`; returned paths stay relative.
    pub fn new(fs: &'a F, root: &'a Path) -> Self {
        Self { fs, root }
    }

    pub fn resolve(&self, source: &Path) -> Result<CodeLocation, ExportError> {
        let candidate = archive_candidate(source);

        match self.fs.probe(&self.root.join(&candidate)) {
            Ok(Probe::Found) => {
                debug!(path = %candidate.display(), "Using packaged archive");
                Ok(CodeLocation::Archive(candidate))
            }
            Ok(Probe::NotFound) => {
                debug!(path = %source.display(), "Using function source path");
                Ok(CodeLocation::Source(source.to_path_buf()))
            }
            Err(err) => Err(ExportError::Probe {
                path: candidate,
                source: err,
            }),
        }
    }
}
