//! Error conversion utilities for CLI.
//!
//! Converts csar-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use csar_core::CsarError;
use csar_core::MetadataError;

/// Converts `CsarError` to user-friendly anyhow error with context
pub fn convert_read_error(err: CsarError, source: &str) -> anyhow::Error {
    match err {
        CsarError::DestinationNotEmpty { path } => {
            anyhow!(
                "Destination '{}' already exists and is not empty\n\
                 HINT: Pass a new or empty directory with --destination.",
                path.display()
            )
        }
        CsarError::Download { url, status } => {
            anyhow!(
                "Download of '{url}' failed: server returned status {status}\n\
                 HINT: Check that the URL points to a published CSAR package."
            )
        }
        CsarError::InvalidUrl { url, reason } => {
            anyhow!(
                "Invalid package URL '{url}': {reason}\n\
                 HINT: Remote sources must be absolute URLs such as https://host/pkg.csar."
            )
        }
        CsarError::Http(http_err) => {
            anyhow!(
                "Could not fetch '{source}': {http_err}\n\
                 HINT: Check network connectivity and proxy settings (HTTPS_PROXY, NO_PROXY)."
            )
        }
        CsarError::SourceNotFound { path } => {
            anyhow!(
                "Package '{}' does not exist\n\
                 HINT: Check the path, or pass a URL containing '://' for remote packages.",
                path.display()
            )
        }
        CsarError::InvalidArchive { path, reason } => {
            anyhow!(
                "'{}' is not a valid CSAR: {reason}\n\
                 HINT: CSAR packages are ZIP archives; the file may be truncated or corrupted.",
                path.display()
            )
        }
        CsarError::PathTraversal { entry } => {
            anyhow!(
                "Security violation: package '{source}' contains entry '{entry}' outside the destination\n\
                 HINT: This package may be malicious. Do not extract from untrusted sources."
            )
        }
        CsarError::SecurityViolation { reason } => {
            anyhow!(
                "Security violation in package '{source}': {reason}\n\
                 HINT: This package may be malicious. Do not extract from untrusted sources."
            )
        }
        CsarError::Metadata(MetadataError::DescriptorNotFound { .. }) => {
            anyhow!(
                "Package '{source}' has no TOSCA-Metadata/TOSCA.meta\n\
                 HINT: A CSAR must carry its metadata descriptor at TOSCA-Metadata/TOSCA.meta."
            )
        }
        CsarError::Metadata(MetadataError::MissingField { field }) => {
            anyhow!(
                "Package '{source}' metadata is missing '{field}'\n\
                 HINT: TOSCA.meta must declare TOSCA-Meta-File-Version, CSAR-Version, \
                 Created-By and Entry-Definitions."
            )
        }
        CsarError::StructuredData { path, source: inner } => {
            anyhow!(
                "Entry definitions '{}' could not be loaded: {inner}\n\
                 HINT: Entry-Definitions must name a YAML file inside the package.",
                path.display()
            )
        }
        _ => anyhow::Error::from(err).context(format!("Error reading package '{source}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_destination_not_empty() {
        let err = CsarError::DestinationNotEmpty {
            path: PathBuf::from("out"),
        };
        let msg = format!("{:?}", convert_read_error(err, "pkg.csar"));
        assert!(msg.contains("'out'"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_download_error() {
        let err = CsarError::Download {
            url: "http://example.com/pkg.csar".to_string(),
            status: 404,
        };
        let msg = format!("{:?}", convert_read_error(err, "http://example.com/pkg.csar"));
        assert!(msg.contains("status 404"));
    }

    #[test]
    fn test_convert_path_traversal() {
        let err = CsarError::PathTraversal {
            entry: "../../etc/passwd".to_string(),
        };
        let msg = format!("{:?}", convert_read_error(err, "evil.csar"));
        assert!(msg.contains("Security violation"));
        assert!(msg.contains("evil.csar"));
    }

    #[test]
    fn test_convert_missing_field() {
        let err = CsarError::Metadata(MetadataError::MissingField {
            field: "CSAR-Version".to_string(),
        });
        let msg = format!("{:?}", convert_read_error(err, "pkg.csar"));
        assert!(msg.contains("CSAR-Version"));
    }

    #[test]
    fn test_convert_io_error_keeps_context() {
        let err = CsarError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let msg = format!("{:?}", convert_read_error(err, "pkg.csar"));
        assert!(msg.contains("Error reading package 'pkg.csar'"));
        assert!(msg.contains("denied"));
    }
}
