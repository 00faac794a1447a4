use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the built `protego` binary
#[allow(dead_code)]
pub fn protego_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_protego"))
}

#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/projects")
        .join(name)
}

fn copy_dir(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

/// Copies a fixture project into a fresh temp dir so exports don't touch the tree
#[allow(dead_code)]
pub fn project_copy(name: &str) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    copy_dir(&fixture_path(name), dir.path()).expect("Failed to copy fixture");
    dir
}

/// Runs `protego -C <project> export <args>`
#[allow(dead_code)]
pub fn run_export(project: &Path, args: &[&str]) -> Output {
    Command::new(protego_bin())
        .arg("-C")
        .arg(project)
        .arg("export")
        .args(args)
        .output()
        .expect("Failed to execute protego")
}

#[allow(dead_code)]
pub fn export_file(project: &Path) -> PathBuf {
    project.join(".protego/export.json")
}
