use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Subnet and security-group placement of a function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpcSettings {
    #[serde(default)]
    pub subnets: Vec<String>,
    #[serde(default)]
    pub security_groups: Vec<String>,
}

/// One deployable function as loaded from the project, independent of any
/// remote deployment state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionDefinition {
    /// Logical name, unique within the project
    pub name: String,
    /// Name the function is deployed under
    pub function_name: String,
    pub description: String,
    pub runtime: String,
    pub role: String,
    pub region: String,
    pub handler: String,
    /// Seconds
    pub timeout: i64,
    /// Megabytes
    pub memory: i64,
    pub environment: BTreeMap<String, String>,
    pub vpc: VpcSettings,
    pub dead_letter_arn: String,
    /// Source directory, relative to the project directory
    pub path: PathBuf,
}

/// Last known state of a function on the deployment platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSnapshot {
    #[serde(rename = "FunctionArn", default)]
    pub function_arn: Option<String>,
}

impl RemoteSnapshot {
    pub fn with_arn(arn: impl Into<String>) -> Self {
        Self {
            function_arn: Some(arn.into()),
        }
    }
}
