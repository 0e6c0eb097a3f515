//! Output formatter trait for CLI results.

use anyhow::Result;
use csar_core::CsarReader;
use csar_core::PackageMetadata;
use serde::Serialize;
use std::time::Duration;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the outcome of a successful validation
    fn format_validation_result(&self, summary: &ValidationSummary) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// What `csar validate` learned about a package.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    pub source: String,
    pub destination: String,
    pub destination_kept: bool,
    pub metadata: PackageMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tosca_definitions_version: Option<String>,
    pub files_extracted: usize,
    pub directories_created: usize,
    pub bytes_written: u64,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl ValidationSummary {
    pub fn new(
        source: &str,
        reader: &CsarReader,
        tosca_definitions_version: Option<String>,
        destination_kept: bool,
    ) -> Self {
        let report = reader.extraction_report();
        Self {
            source: source.to_string(),
            destination: reader.destination().display().to_string(),
            destination_kept,
            metadata: reader.metadata().clone(),
            tosca_definitions_version,
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            duration: report.duration,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u128(d.as_millis())
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Warning,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
        }
    }

    pub fn warning(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Warning,
            data: Some(data),
        }
    }
}
