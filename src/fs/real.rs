use super::{DirEntry, FileMetadata, FileSystem, FileType};
use std::fs;
use std::io;
use std::path::Path;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn file_type_of(meta: &fs::Metadata) -> FileType {
    if meta.is_file() {
        FileType::File
    } else if meta.is_dir() {
        FileType::Directory
    } else {
        FileType::Symlink
    }
}

impl FileSystem for RealFileSystem {
    fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let meta = fs::metadata(path)?;
        Ok(FileMetadata {
            size: meta.len(),
            file_type: file_type_of(&meta),
        })
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut result = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = match fs::metadata(&path) {
                Ok(meta) => file_type_of(&meta),
                Err(_) => FileType::Symlink,
            };

            result.push(DirEntry {
                path,
                name,
                file_type,
            });
        }

        Ok(result)
    }

    #[cfg(unix)]
    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
        use std::os::unix::fs::DirBuilderExt;

        fs::DirBuilder::new().recursive(true).mode(mode).create(path)
    }

    #[cfg(not(unix))]
    fn create_dir_all(&self, path: &Path, _mode: u32) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::Probe;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir(base.join("functions")).unwrap();
        fs::File::create(base.join("project.json"))
            .unwrap()
            .write_all(b"{\"name\":\"demo\"}")
            .unwrap();
        fs::File::create(base.join("functions/index.js"))
            .unwrap()
            .write_all(b"exports.handle = () => {}")
            .unwrap();

        dir
    }

    #[test]
    fn test_probe() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert_eq!(fs.probe(temp.path()).unwrap(), Probe::Found);
        assert_eq!(
            fs.probe(&temp.path().join("project.json")).unwrap(),
            Probe::Found
        );
        assert_eq!(
            fs.probe(&temp.path().join("nonexistent")).unwrap(),
            Probe::NotFound
        );
    }

    #[test]
    fn test_metadata() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let meta = fs.metadata(&temp.path().join("project.json")).unwrap();
        assert!(meta.is_file());
        assert_eq!(meta.len(), 15);

        let meta = fs.metadata(&temp.path().join("functions")).unwrap();
        assert!(meta.is_dir());
    }

    #[test]
    fn test_read_dir() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let entries = fs.read_dir(temp.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.file_name()).collect();

        assert!(names.contains(&"project.json"));
        assert!(names.contains(&"functions"));
        let functions = entries.iter().find(|e| e.name == "functions").unwrap();
        assert_eq!(functions.file_type(), FileType::Directory);
    }

    #[test]
    fn test_create_dir_all_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let fs = RealFileSystem::new();
        let nested = temp.path().join(".protego/a/b");

        fs.create_dir_all(&nested, 0o700).unwrap();
        fs.create_dir_all(&nested, 0o700).unwrap();
        assert!(fs.is_dir(&nested));
    }

    #[cfg(unix)]
    #[test]
    fn test_create_dir_all_applies_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let fs = RealFileSystem::new();
        let dir = temp.path().join(".protego");

        fs.create_dir_all(&dir, 0o700).unwrap();
        let mode = fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn test_write_overwrites() {
        let temp = TempDir::new().unwrap();
        let fs = RealFileSystem::new();
        let file = temp.path().join("export.json");

        fs.write(&file, b"first, longer content").unwrap();
        fs.write(&file, b"second").unwrap();
        assert_eq!(fs.read_to_string(&file).unwrap(), "second");
    }
}
