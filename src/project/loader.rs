//! Loads `project.json` and `functions/*/function.json` into function definitions
//!
//! Per-function settings override the project-level defaults field by field.
//! The project `environment` is not copied into each function; it becomes the
//! base of the export's [`EnvOverlay`](crate::config::EnvOverlay).

use super::function::{FunctionDefinition, VpcSettings};
use crate::fs::{FileSystem, FileType};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const PROJECT_FILE: &str = "project.json";
pub const FUNCTION_FILE: &str = "function.json";
pub const FUNCTIONS_DIR: &str = "functions";
pub const DEFAULT_NAME_TEMPLATE: &str = "{{.Project.Name}}_{{.Function.Name}}";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read {path:?}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path:?}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to list functions in {path:?}")]
    ReadFunctions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no functions found in {0:?}")]
    NoFunctions(PathBuf),

    #[error("no function matches {0:?}")]
    NoMatch(Vec<String>),

    #[error("invalid function name pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FunctionSettings {
    runtime: Option<String>,
    memory: Option<i64>,
    timeout: Option<i64>,
    role: Option<String>,
    handler: Option<String>,
    region: Option<String>,
    vpc: Option<VpcSettings>,
    #[serde(alias = "deadletter_arn")]
    deadletter_arn: Option<String>,
    #[serde(default)]
    environment: BTreeMap<String, String>,
}

impl FunctionSettings {
    fn or(self, defaults: &FunctionSettings) -> FunctionSettings {
        FunctionSettings {
            runtime: self.runtime.or_else(|| defaults.runtime.clone()),
            memory: self.memory.or(defaults.memory),
            timeout: self.timeout.or(defaults.timeout),
            role: self.role.or_else(|| defaults.role.clone()),
            handler: self.handler.or_else(|| defaults.handler.clone()),
            region: self.region.or_else(|| defaults.region.clone()),
            vpc: self.vpc.or_else(|| defaults.vpc.clone()),
            deadletter_arn: self
                .deadletter_arn
                .or_else(|| defaults.deadletter_arn.clone()),
            environment: self.environment,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectConfig {
    name: String,
    #[serde(default)]
    description: String,
    name_template: Option<String>,
    #[serde(flatten)]
    defaults: FunctionSettings,
}

#[derive(Debug, Default, Deserialize)]
struct FunctionConfig {
    #[serde(default)]
    description: String,
    #[serde(flatten)]
    settings: FunctionSettings,
}

/// A loaded project: its default environment plus the selected functions,
/// sorted by logical name.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub environment: BTreeMap<String, String>,
    pub functions: Vec<FunctionDefinition>,
}

fn read_json<F, T>(fs: &F, path: &Path) -> Result<T, ProjectError>
where
    F: FileSystem + ?Sized,
    T: for<'de> Deserialize<'de>,
{
    let content = fs
        .read_to_string(path)
        .map_err(|source| ProjectError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&content).map_err(|source| ProjectError::InvalidConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn render_name(template: &str, project: &str, function: &str) -> String {
    template
        .replace("{{.Project.Name}}", project)
        .replace("{{.Function.Name}}", function)
}

/// Compiles a shell-style pattern (`*`, `?`) into an anchored regex.
fn compile_pattern(pattern: &str) -> Result<Regex, ProjectError> {
    let mut expr = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            c => expr.push_str(&regex::escape(&c.to_string())),
        }
    }
    expr.push('$');

    Regex::new(&expr).map_err(|source| ProjectError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn build_definition(
    project: &ProjectConfig,
    template: &str,
    name: &str,
    config: FunctionConfig,
) -> FunctionDefinition {
    let settings = config.settings.or(&project.defaults);

    FunctionDefinition {
        name: name.to_string(),
        function_name: render_name(template, &project.name, name),
        description: config.description,
        runtime: settings.runtime.unwrap_or_default(),
        role: settings.role.unwrap_or_default(),
        region: settings.region.unwrap_or_default(),
        handler: settings.handler.unwrap_or_default(),
        timeout: settings.timeout.unwrap_or_default(),
        memory: settings.memory.unwrap_or_default(),
        environment: settings.environment,
        vpc: settings.vpc.unwrap_or_default(),
        dead_letter_arn: settings.deadletter_arn.unwrap_or_default(),
        path: Path::new(FUNCTIONS_DIR).join(name),
    }
}

/// Loads the project rooted at `project_dir`, keeping only functions whose
/// logical name matches one of `patterns` (all functions when empty).
pub fn load_project<F: FileSystem + ?Sized>(
    fs: &F,
    project_dir: &Path,
    patterns: &[String],
) -> Result<Project, ProjectError> {
    let project_file = project_dir.join(PROJECT_FILE);
    let config: ProjectConfig = read_json(fs, &project_file)?;
    let template = config
        .name_template
        .clone()
        .unwrap_or_else(|| DEFAULT_NAME_TEMPLATE.to_string());

    let functions_dir = project_dir.join(FUNCTIONS_DIR);
    let mut names: Vec<String> = fs
        .read_dir(&functions_dir)
        .map_err(|source| ProjectError::ReadFunctions {
            path: functions_dir.clone(),
            source,
        })?
        .into_iter()
        .filter(|entry| entry.file_type() == FileType::Directory)
        .map(|entry| entry.name)
        .collect();
    names.sort();

    if names.is_empty() {
        return Err(ProjectError::NoFunctions(functions_dir));
    }

    let matchers = patterns
        .iter()
        .map(|p| compile_pattern(p))
        .collect::<Result<Vec<_>, _>>()?;
    if !matchers.is_empty() {
        names.retain(|name| matchers.iter().any(|m| m.is_match(name)));
        if names.is_empty() {
            return Err(ProjectError::NoMatch(patterns.to_vec()));
        }
    }

    let mut functions = Vec::with_capacity(names.len());
    for name in names {
        let function_file = functions_dir.join(&name).join(FUNCTION_FILE);
        let function_config = if fs.is_file(&function_file) {
            read_json(fs, &function_file)?
        } else {
            debug!(function = %name, "No function.json, using project defaults");
            FunctionConfig::default()
        };

        functions.push(build_definition(&config, &template, &name, function_config));
    }

    info!(project = %config.name, functions = functions.len(), "Loaded project");

    Ok(Project {
        name: config.name,
        description: config.description,
        environment: config.defaults.environment,
        functions,
    })
}
