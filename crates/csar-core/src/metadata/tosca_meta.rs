//! `TOSCA-Metadata/TOSCA.meta` descriptor resolver.
//!
//! The descriptor is a sequence of `Key: Value` lines. Blocks are separated
//! by blank lines and only the first block (the header block) is read.
//! Lines starting with `#` are comments; lines starting with whitespace
//! continue the previous value.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::MetadataResolver;
use super::PackageMetadata;
use crate::MetadataError;

/// Location of the descriptor relative to the package root.
pub const DESCRIPTOR_PATH: &str = "TOSCA-Metadata/TOSCA.meta";

const META_FILE_VERSION: &str = "TOSCA-Meta-File-Version";
const CSAR_VERSION: &str = "CSAR-Version";
const CREATED_BY: &str = "Created-By";
const ENTRY_DEFINITIONS: &str = "Entry-Definitions";

const MANIFEST: &[&str] = &["ETSI-Entry-Manifest", "Entry-Manifest"];
const CHANGE_LOG: &[&str] = &["ETSI-Entry-Change-Log", "Entry-Change-Log"];
const TESTS: &[&str] = &["ETSI-Entry-Tests", "Entry-Tests"];
const LICENSES: &[&str] = &["ETSI-Entry-Licenses", "Entry-Licenses"];
const CERTIFICATE: &[&str] = &["ETSI-Entry-Certificate", "Entry-Certificate"];

/// Reads package metadata from `TOSCA-Metadata/TOSCA.meta`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToscaMetaResolver;

impl MetadataResolver for ToscaMetaResolver {
    fn resolve(&self, root: &Path) -> Result<PackageMetadata, MetadataError> {
        let path = root.join(DESCRIPTOR_PATH);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(MetadataError::DescriptorNotFound { path });
            }
            Err(e) => return Err(MetadataError::Io(e)),
        };

        tracing::debug!(path = %path.display(), "parsing metadata descriptor");
        parse_tosca_meta(&text)
    }
}

/// Parses descriptor text into a [`PackageMetadata`] record.
///
/// # Examples
///
/// ```
/// use csar_core::metadata::tosca_meta::parse_tosca_meta;
///
/// let meta = parse_tosca_meta(
///     "TOSCA-Meta-File-Version: 1.0\n\
///      CSAR-Version: 1.1\n\
///      Created-By: vendor-x\n\
///      Entry-Definitions: Definitions/main.yaml\n",
/// )
/// .unwrap();
/// assert_eq!(meta.csar_version(), "1.1");
/// assert!(meta.entry_manifest_file().is_none());
/// ```
pub fn parse_tosca_meta(text: &str) -> Result<PackageMetadata, MetadataError> {
    let fields = parse_header_block(text)?;

    let required = |key: &str| {
        fields
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or_else(|| MetadataError::MissingField {
                field: key.to_string(),
            })
    };
    let optional = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| fields.get(*key))
            .filter(|value| !value.is_empty())
            .cloned()
    };

    let mut meta = PackageMetadata::new(
        required(CREATED_BY)?,
        required(CSAR_VERSION)?,
        required(META_FILE_VERSION)?,
        required(ENTRY_DEFINITIONS)?,
    );
    meta.entry_manifest_file = optional(MANIFEST);
    meta.entry_history_file = optional(CHANGE_LOG);
    meta.entry_tests_dir = optional(TESTS);
    meta.entry_licenses_dir = optional(LICENSES);
    meta.entry_certificate_file = optional(CERTIFICATE);

    Ok(meta)
}

fn parse_header_block(text: &str) -> Result<HashMap<String, String>, MetadataError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut last_key: Option<String> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end_matches('\r');

        if line.trim().is_empty() {
            if fields.is_empty() {
                continue;
            }
            break;
        }
        if line.starts_with('#') {
            continue;
        }

        if line.starts_with([' ', '\t']) {
            let value = last_key
                .as_ref()
                .and_then(|key| fields.get_mut(key))
                .ok_or_else(|| MetadataError::Malformed {
                    line: line_no,
                    reason: "continuation line without a preceding key".to_string(),
                })?;
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(line.trim());
            continue;
        }

        let (key, value) = line.split_once(':').ok_or_else(|| MetadataError::Malformed {
            line: line_no,
            reason: format!("expected 'Key: Value', found '{line}'"),
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(MetadataError::Malformed {
                line: line_no,
                reason: "empty key".to_string(),
            });
        }
        if fields.contains_key(key) {
            return Err(MetadataError::Malformed {
                line: line_no,
                reason: format!("duplicate key '{key}'"),
            });
        }

        fields.insert(key.to_string(), value.trim().to_string());
        last_key = Some(key.to_string());
    }

    Ok(fields)
}
