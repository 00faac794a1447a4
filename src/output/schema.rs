use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentConfig {
    pub variables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpcConfig {
    pub subnet_ids: Vec<String>,
    pub security_group_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeadLetterConfig {
    pub target_arn: String,
}

/// Exported view of one function. Field order is the JSON key order.
///
/// `None` fields are left out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExportedRecord {
    pub function_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub runtime: String,
    pub role: String,
    pub region: String,
    pub handler: String,
    pub timeout: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_arn: Option<String>,
    pub memory_size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_config: Option<VpcConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_letter_config: Option<DeadLetterConfig>,
    pub code_location: String,
}

/// Records keyed by logical function name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportManifest {
    records: BTreeMap<String, ExportedRecord>,
}

impl ExportManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, handing it back if `name` is already present.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        record: ExportedRecord,
    ) -> Result<(), ExportedRecord> {
        match self.records.entry(name.into()) {
            btree_map::Entry::Occupied(_) => Err(record),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ExportedRecord> {
        self.records.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_record() -> ExportedRecord {
        ExportedRecord {
            function_name: "hello-dev".to_string(),
            description: None,
            runtime: "custom".to_string(),
            role: String::new(),
            region: String::new(),
            handler: String::new(),
            timeout: 5,
            function_arn: None,
            memory_size: 128,
            environment: None,
            vpc_config: None,
            dead_letter_config: None,
            code_location: "functions/hello".to_string(),
        }
    }

    #[test]
    fn test_minimal_record_key_order() {
        let json = serde_json::to_string(&minimal_record()).unwrap();
        assert_eq!(
            json,
            r#"{"FunctionName":"hello-dev","Runtime":"custom","Role":"","Region":"","Handler":"","Timeout":5,"MemorySize":128,"CodeLocation":"functions/hello"}"#
        );
    }

    #[test]
    fn test_full_record_shape() {
        let record = ExportedRecord {
            description: Some("greets".to_string()),
            function_arn: Some("arn:aws:lambda:us-east-1:1:function:hello-dev".to_string()),
            environment: Some(EnvironmentConfig {
                variables: BTreeMap::from([("FOO".to_string(), "bar".to_string())]),
            }),
            vpc_config: Some(VpcConfig {
                subnet_ids: vec!["subnet-1".to_string()],
                security_group_ids: vec![],
            }),
            dead_letter_config: Some(DeadLetterConfig {
                target_arn: "arn:aws:sqs:us-east-1:1:dlq".to_string(),
            }),
            ..minimal_record()
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Description"], json!("greets"));
        assert_eq!(value["Environment"], json!({"Variables": {"FOO": "bar"}}));
        assert_eq!(
            value["VpcConfig"],
            json!({"SubnetIds": ["subnet-1"], "SecurityGroupIds": []})
        );
        assert_eq!(
            value["DeadLetterConfig"],
            json!({"TargetArn": "arn:aws:sqs:us-east-1:1:dlq"})
        );
        assert_eq!(
            value["FunctionArn"],
            json!("arn:aws:lambda:us-east-1:1:function:hello-dev")
        );
    }

    #[test]
    fn test_manifest_rejects_duplicates() {
        let mut manifest = ExportManifest::new();
        assert!(manifest.insert("hello", minimal_record()).is_ok());
        assert!(manifest.insert("hello", minimal_record()).is_err());
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_manifest_serializes_sorted() {
        let mut manifest = ExportManifest::new();
        manifest.insert("zeta", minimal_record()).unwrap();
        manifest.insert("alpha", minimal_record()).unwrap();

        let text = manifest.to_json_pretty().unwrap();
        assert!(text.find("\"alpha\"").unwrap() < text.find("\"zeta\"").unwrap());
        assert!(text.starts_with("{\n  \"alpha\": {\n    \"FunctionName\""));

        let parsed: ExportManifest = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, manifest);
    }
}
