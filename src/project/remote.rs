use super::function::{FunctionDefinition, RemoteSnapshot};
use crate::config::ConfigError;
use crate::fs::FileSystem;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Supplies the last known platform state of a function.
///
/// `None` means the function has not been deployed yet; it is not an error.
pub trait RemoteStateSource {
    fn snapshot(&self, function: &FunctionDefinition) -> Option<RemoteSnapshot>;
}

/// Treats every function as never deployed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRemoteState;

impl RemoteStateSource for NoRemoteState {
    fn snapshot(&self, _function: &FunctionDefinition) -> Option<RemoteSnapshot> {
        None
    }
}

/// Remote state cached in a JSON file keyed by deployed function name:
///
/// ```json
/// { "shop_cart": { "FunctionArn": "arn:aws:lambda:us-east-1:123456789012:function:shop_cart" } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StateFile {
    entries: BTreeMap<String, RemoteSnapshot>,
}

impl StateFile {
    pub fn new(entries: BTreeMap<String, RemoteSnapshot>) -> Self {
        Self { entries }
    }

    pub fn load<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<Self, ConfigError> {
        let content = fs
            .read_to_string(path)
            .map_err(|source| ConfigError::ReadStateFile {
                path: path.to_path_buf(),
                source,
            })?;
        let entries: BTreeMap<String, RemoteSnapshot> =
            serde_json::from_str(&content).map_err(|source| ConfigError::InvalidStateFile {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), functions = entries.len(), "Loaded remote state");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RemoteStateSource for StateFile {
    fn snapshot(&self, function: &FunctionDefinition) -> Option<RemoteSnapshot> {
        self.entries.get(&function.function_name).cloned()
    }
}
