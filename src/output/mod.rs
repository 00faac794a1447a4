pub mod schema;

pub use schema::{DeadLetterConfig, EnvironmentConfig, ExportManifest, ExportedRecord, VpcConfig};
