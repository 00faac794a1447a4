//! FileSystem trait definition

use std::io;
use std::path::{Path, PathBuf};

/// Metadata about a file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub size: u64,
    pub file_type: FileType,
}

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

impl FileMetadata {
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }
}

/// Outcome of an existence probe that did not fail.
///
/// Every error other than "not found" stays an `io::Error` so callers can't
/// mistake a permission problem for a missing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Found,
    NotFound,
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Get file/directory metadata
    fn metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// List directory contents
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Create a directory and any missing ancestors with the given unix mode
    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Write contents to a file, replacing it if present
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Check whether an entry exists, keeping "not found" apart from real errors
    fn probe(&self, path: &Path) -> io::Result<Probe> {
        match self.metadata(path) {
            Ok(_) => Ok(Probe::Found),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Probe::NotFound),
            Err(e) => Err(e),
        }
    }

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }
}
