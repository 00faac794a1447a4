use super::location::CodeLocationResolver;
use crate::config::EnvOverlay;
use crate::error::ExportError;
use crate::fs::FileSystem;
use crate::output::schema::{DeadLetterConfig, EnvironmentConfig, ExportedRecord, VpcConfig};
use crate::project::{FunctionDefinition, RemoteSnapshot};

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Builds one [`ExportedRecord`] per function definition.
pub struct FunctionRecordBuilder<'a, F: FileSystem + ?Sized> {
    overlay: &'a EnvOverlay,
    resolver: CodeLocationResolver<'a, F>,
}

impl<'a, F: FileSystem + ?Sized> FunctionRecordBuilder<'a, F> {
    pub fn new(overlay: &'a EnvOverlay, resolver: CodeLocationResolver<'a, F>) -> Self {
        Self { overlay, resolver }
    }

    pub fn build(
        &self,
        function: &FunctionDefinition,
        snapshot: Option<&RemoteSnapshot>,
    ) -> Result<ExportedRecord, ExportError> {
        let function_arn = snapshot
            .and_then(|s| s.function_arn.as_deref())
            .and_then(non_empty);

        let variables = self.overlay.resolve(&function.environment);
        let environment = (!variables.is_empty()).then_some(EnvironmentConfig { variables });

        // security groups ride along even when empty
        let vpc_config = (!function.vpc.subnets.is_empty()).then(|| VpcConfig {
            subnet_ids: function.vpc.subnets.clone(),
            security_group_ids: function.vpc.security_groups.clone(),
        });

        let dead_letter_config =
            non_empty(&function.dead_letter_arn).map(|target_arn| DeadLetterConfig { target_arn });

        let code_location = self.resolver.resolve(&function.path)?;

        Ok(ExportedRecord {
            function_name: function.function_name.clone(),
            description: non_empty(&function.description),
            runtime: function.runtime.clone(),
            role: function.role.clone(),
            region: function.region.clone(),
            handler: function.handler.clone(),
            timeout: function.timeout,
            function_arn,
            memory_size: function.memory,
            environment,
            vpc_config,
            dead_letter_config,
            code_location: code_location.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::project::VpcSettings;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::io;
    use std::path::PathBuf;

    fn hello() -> FunctionDefinition {
        FunctionDefinition {
            name: "hello".to_string(),
            function_name: "hello-dev".to_string(),
            runtime: "custom".to_string(),
            timeout: 5,
            memory: 128,
            path: PathBuf::from("functions/hello"),
            ..Default::default()
        }
    }

    fn build(
        fs: &MockFileSystem,
        overlay: &EnvOverlay,
        function: &FunctionDefinition,
        snapshot: Option<&RemoteSnapshot>,
    ) -> Result<ExportedRecord, ExportError> {
        let resolver = CodeLocationResolver::new(fs, fs.root());
        FunctionRecordBuilder::new(overlay, resolver).build(function, snapshot)
    }

    #[test]
    fn test_minimal_function() {
        let fs = MockFileSystem::new();
        let record = build(&fs, &EnvOverlay::default(), &hello(), None).unwrap();

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"FunctionName":"hello-dev","Runtime":"custom","Role":"","Region":"","Handler":"","Timeout":5,"MemorySize":128,"CodeLocation":"functions/hello"}"#
        );
    }

    #[test]
    fn test_optional_sections_omitted_when_empty() {
        let fs = MockFileSystem::new();
        let function = FunctionDefinition {
            vpc: VpcSettings {
                subnets: vec![],
                security_groups: vec!["sg-1".to_string()],
            },
            ..hello()
        };
        let record = build(&fs, &EnvOverlay::default(), &function, None).unwrap();

        assert!(record.environment.is_none());
        assert!(record.vpc_config.is_none());
        assert!(record.dead_letter_config.is_none());
        assert!(record.description.is_none());
        assert!(record.function_arn.is_none());
    }

    #[test]
    fn test_environment_wrapper() {
        let fs = MockFileSystem::new();
        let function = FunctionDefinition {
            environment: BTreeMap::from([("FOO".to_string(), "bar".to_string())]),
            ..hello()
        };
        let record = build(&fs, &EnvOverlay::default(), &function, None).unwrap();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Environment"], json!({"Variables": {"FOO": "bar"}}));
    }

    #[test]
    fn test_overlay_alone_produces_environment() {
        let fs = MockFileSystem::new();
        let mut overlay = EnvOverlay::default();
        overlay.load_from_pairs(&["STAGE=prod"]).unwrap();

        let record = build(&fs, &overlay, &hello(), None).unwrap();
        assert_eq!(
            record.environment,
            Some(EnvironmentConfig {
                variables: BTreeMap::from([("STAGE".to_string(), "prod".to_string())]),
            })
        );
    }

    #[test]
    fn test_function_environment_wins_on_collision() {
        let fs = MockFileSystem::new();
        let mut overlay = EnvOverlay::default();
        overlay.load_from_pairs(&["STAGE=prod", "REGION=eu"]).unwrap();
        let function = FunctionDefinition {
            environment: BTreeMap::from([("STAGE".to_string(), "canary".to_string())]),
            ..hello()
        };

        let record = build(&fs, &overlay, &function, None).unwrap();
        let vars = record.environment.unwrap().variables;
        assert_eq!(vars["STAGE"], "canary");
        assert_eq!(vars["REGION"], "eu");
    }

    #[test]
    fn test_vpc_wrapper_keeps_empty_security_groups() {
        let fs = MockFileSystem::new();
        let function = FunctionDefinition {
            vpc: VpcSettings {
                subnets: vec!["subnet-a".to_string(), "subnet-b".to_string()],
                security_groups: vec![],
            },
            ..hello()
        };
        let record = build(&fs, &EnvOverlay::default(), &function, None).unwrap();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value["VpcConfig"],
            json!({"SubnetIds": ["subnet-a", "subnet-b"], "SecurityGroupIds": []})
        );
    }

    #[test]
    fn test_dead_letter_and_description() {
        let fs = MockFileSystem::new();
        let function = FunctionDefinition {
            description: "says hello".to_string(),
            dead_letter_arn: "arn:aws:sqs:us-east-1:1:dlq".to_string(),
            ..hello()
        };
        let record = build(&fs, &EnvOverlay::default(), &function, None).unwrap();

        assert_eq!(record.description.as_deref(), Some("says hello"));
        assert_eq!(
            record.dead_letter_config,
            Some(DeadLetterConfig {
                target_arn: "arn:aws:sqs:us-east-1:1:dlq".to_string()
            })
        );
    }

    #[test]
    fn test_function_arn_from_snapshot() {
        let fs = MockFileSystem::new();
        let overlay = EnvOverlay::default();
        let deployed = RemoteSnapshot::with_arn("arn:aws:lambda:us-east-1:1:function:hello-dev");

        let record = build(&fs, &overlay, &hello(), Some(&deployed)).unwrap();
        assert_eq!(
            record.function_arn.as_deref(),
            Some("arn:aws:lambda:us-east-1:1:function:hello-dev")
        );

        let unknown = RemoteSnapshot { function_arn: None };
        let record = build(&fs, &overlay, &hello(), Some(&unknown)).unwrap();
        assert!(record.function_arn.is_none());
    }

    #[test]
    fn test_code_location_prefers_archive() {
        let fs = MockFileSystem::new();
        fs.add_file(".protego/functions/hello/out.zip", "PK");

        let record = build(&fs, &EnvOverlay::default(), &hello(), None).unwrap();
        assert_eq!(record.code_location, ".protego/functions/hello/out.zip");
    }

    #[test]
    fn test_probe_error_propagates() {
        let fs = MockFileSystem::new();
        fs.fail_path(
            ".protego/functions/hello/out.zip",
            io::ErrorKind::PermissionDenied,
        );

        let err = build(&fs, &EnvOverlay::default(), &hello(), None).unwrap_err();
        assert!(matches!(err, ExportError::Probe { .. }));
    }
}
