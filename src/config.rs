//! Environment overlay applied to every exported function
//!
//! Values are layered in increasing priority: project defaults, entries from an
//! `--env-file` JSON object, then `--set KEY=VALUE` pairs. A function's own
//! environment entries take precedence over the whole overlay.

use crate::fs::FileSystem;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read env file {path:?}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("env file {path:?} must contain a JSON object of string values")]
    InvalidEnvFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("environment variable {0:?} is missing a value, expected KEY=VALUE")]
    InvalidPair(String),

    #[error("environment variable {0:?} has an empty name")]
    EmptyKey(String),

    #[error("failed to read state file {path:?}")]
    ReadStateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid state file {path:?}")]
    InvalidStateFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses `KEY=VALUE` tokens, splitting on the first `=`. Later tokens win.
pub fn parse_env_pairs<S: AsRef<str>>(
    pairs: &[S],
) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut vars = BTreeMap::new();
    for token in pairs {
        let token = token.as_ref();
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidPair(token.to_string()))?;
        if key.is_empty() {
            return Err(ConfigError::EmptyKey(token.to_string()));
        }
        vars.insert(key.to_string(), value.to_string());
    }
    Ok(vars)
}

/// Parses a JSON object of string keys to string values.
pub fn parse_env_json(content: &str) -> Result<BTreeMap<String, String>, serde_json::Error> {
    serde_json::from_str(content)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    vars: BTreeMap<String, String>,
}

impl EnvOverlay {
    /// Starts an overlay from the project-level default environment.
    pub fn new(defaults: BTreeMap<String, String>) -> Self {
        Self { vars: defaults }
    }

    pub fn load_from_file<F: FileSystem + ?Sized>(
        &mut self,
        fs: &F,
        path: &Path,
    ) -> Result<(), ConfigError> {
        let content = fs.read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let vars = parse_env_json(&content).map_err(|source| ConfigError::InvalidEnvFile {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), count = vars.len(), "Loaded env file");
        self.vars.extend(vars);
        Ok(())
    }

    pub fn load_from_pairs<S: AsRef<str>>(&mut self, pairs: &[S]) -> Result<(), ConfigError> {
        let vars = parse_env_pairs(pairs)?;
        if !vars.is_empty() {
            debug!(count = vars.len(), "Applied environment overrides");
        }
        self.vars.extend(vars);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Merges the overlay under a function's own entries.
    pub fn resolve(&self, function_env: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut resolved = self.vars.clone();
        resolved.extend(function_env.iter().map(|(k, v)| (k.clone(), v.clone())));
        resolved
    }
}
