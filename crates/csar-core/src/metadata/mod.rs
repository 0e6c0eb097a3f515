//! Package metadata record and the resolver interface that produces it.

pub mod tosca_meta;

use std::path::Path;

use serde::Serialize;

use crate::MetadataError;

pub use tosca_meta::ToscaMetaResolver;

/// Resolved package metadata.
///
/// Header fields are always present; auxiliary part locations are optional
/// because not every package carries every part. All paths are relative to
/// the extraction root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    pub(crate) created_by: String,
    pub(crate) csar_version: String,
    pub(crate) meta_file_version: String,
    pub(crate) entry_definitions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) entry_manifest_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) entry_history_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) entry_tests_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) entry_licenses_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) entry_certificate_file: Option<String>,
}

impl PackageMetadata {
    /// Creates a record with the required header fields and no auxiliary parts.
    #[must_use]
    pub fn new(
        created_by: impl Into<String>,
        csar_version: impl Into<String>,
        meta_file_version: impl Into<String>,
        entry_definitions: impl Into<String>,
    ) -> Self {
        Self {
            created_by: created_by.into(),
            csar_version: csar_version.into(),
            meta_file_version: meta_file_version.into(),
            entry_definitions: entry_definitions.into(),
            entry_manifest_file: None,
            entry_history_file: None,
            entry_tests_dir: None,
            entry_licenses_dir: None,
            entry_certificate_file: None,
        }
    }

    /// Sets the manifest file location.
    #[must_use]
    pub fn with_manifest_file(mut self, path: impl Into<String>) -> Self {
        self.entry_manifest_file = Some(path.into());
        self
    }

    /// Sets the change history file location.
    #[must_use]
    pub fn with_history_file(mut self, path: impl Into<String>) -> Self {
        self.entry_history_file = Some(path.into());
        self
    }

    /// Sets the tests directory location.
    #[must_use]
    pub fn with_tests_dir(mut self, path: impl Into<String>) -> Self {
        self.entry_tests_dir = Some(path.into());
        self
    }

    /// Sets the licenses directory location.
    #[must_use]
    pub fn with_licenses_dir(mut self, path: impl Into<String>) -> Self {
        self.entry_licenses_dir = Some(path.into());
        self
    }

    /// Sets the signing certificate file location.
    #[must_use]
    pub fn with_certificate_file(mut self, path: impl Into<String>) -> Self {
        self.entry_certificate_file = Some(path.into());
        self
    }

    /// Package author.
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// CSAR format version.
    pub fn csar_version(&self) -> &str {
        &self.csar_version
    }

    /// Descriptor format version.
    pub fn meta_file_version(&self) -> &str {
        &self.meta_file_version
    }

    /// Relative path of the entry service template.
    pub fn entry_definitions(&self) -> &str {
        &self.entry_definitions
    }

    /// Relative path of the manifest file.
    pub fn entry_manifest_file(&self) -> Option<&str> {
        self.entry_manifest_file.as_deref()
    }

    /// Relative path of the change history file.
    pub fn entry_history_file(&self) -> Option<&str> {
        self.entry_history_file.as_deref()
    }

    /// Relative path of the tests directory.
    pub fn entry_tests_dir(&self) -> Option<&str> {
        self.entry_tests_dir.as_deref()
    }

    /// Relative path of the licenses directory.
    pub fn entry_licenses_dir(&self) -> Option<&str> {
        self.entry_licenses_dir.as_deref()
    }

    /// Relative path of the signing certificate.
    pub fn entry_certificate_file(&self) -> Option<&str> {
        self.entry_certificate_file.as_deref()
    }
}

/// Produces [`PackageMetadata`] from an extracted package.
///
/// Implement this to support a descriptor layout other than
/// `TOSCA-Metadata/TOSCA.meta`.
///
/// # Examples
///
/// ```
/// use csar_core::MetadataError;
/// use csar_core::metadata::MetadataResolver;
/// use csar_core::metadata::PackageMetadata;
/// use std::path::Path;
///
/// struct Fixed;
///
/// impl MetadataResolver for Fixed {
///     fn resolve(&self, _root: &Path) -> Result<PackageMetadata, MetadataError> {
///         Ok(PackageMetadata::new("me", "1.1", "1.0", "main.yaml"))
///     }
/// }
/// ```
pub trait MetadataResolver {
    /// Locates and parses the descriptor under `root`.
    fn resolve(&self, root: &Path) -> Result<PackageMetadata, MetadataError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_only() {
        let meta = PackageMetadata::new("vendor-x", "1.1", "1.0", "Definitions/main.yaml");
        assert_eq!(meta.created_by(), "vendor-x");
        assert_eq!(meta.csar_version(), "1.1");
        assert_eq!(meta.meta_file_version(), "1.0");
        assert_eq!(meta.entry_definitions(), "Definitions/main.yaml");
        assert!(meta.entry_manifest_file().is_none());
        assert!(meta.entry_history_file().is_none());
        assert!(meta.entry_tests_dir().is_none());
        assert!(meta.entry_licenses_dir().is_none());
        assert!(meta.entry_certificate_file().is_none());
    }

    #[test]
    fn test_auxiliary_parts() {
        let meta = PackageMetadata::new("v", "1.1", "1.0", "main.yaml")
            .with_manifest_file("main.mf")
            .with_history_file("ChangeLog.txt")
            .with_tests_dir("Tests")
            .with_licenses_dir("Licenses")
            .with_certificate_file("main.cert");

        assert_eq!(meta.entry_manifest_file(), Some("main.mf"));
        assert_eq!(meta.entry_history_file(), Some("ChangeLog.txt"));
        assert_eq!(meta.entry_tests_dir(), Some("Tests"));
        assert_eq!(meta.entry_licenses_dir(), Some("Licenses"));
        assert_eq!(meta.entry_certificate_file(), Some("main.cert"));
    }
}
