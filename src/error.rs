use crate::config::ConfigError;
use crate::project::ProjectError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// File system step that failed while persisting the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoStep {
    CreateDir,
    WriteFile,
}

impl fmt::Display for IoStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoStep::CreateDir => write!(f, "create directory"),
            IoStep::WriteFile => write!(f, "write export file"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("failed to probe code location {path:?}")]
    Probe {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to {step} {path:?}")]
    Io {
        step: IoStep,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize export manifest")]
    Serialize(#[from] serde_json::Error),

    #[error("function {0:?} is defined more than once")]
    DuplicateFunction(String),
}
