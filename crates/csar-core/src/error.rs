//! Error types for CSAR read operations.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `CsarError`.
pub type Result<T> = std::result::Result<T, CsarError>;

/// Errors raised while locating or parsing a package metadata descriptor.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The descriptor file is not present at its well-known location.
    #[error("metadata descriptor not found: {path}")]
    DescriptorNotFound {
        /// Location where the descriptor was expected.
        path: PathBuf,
    },

    /// A required descriptor field is absent.
    #[error("metadata descriptor is missing required field '{field}'")]
    MissingField {
        /// Name of the missing field as it appears in the descriptor.
        field: String,
    },

    /// The descriptor could not be parsed.
    #[error("malformed metadata descriptor at line {line}: {reason}")]
    Malformed {
        /// 1-indexed line number of the offending line.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Reading the descriptor failed.
    #[error("failed to read metadata descriptor: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while reading a CSAR package.
#[derive(Error, Debug)]
pub enum CsarError {
    /// Destination exists and is not an empty directory.
    #[error("{path} already exists and is not empty")]
    DestinationNotEmpty {
        /// The rejected destination.
        path: PathBuf,
    },

    /// Remote server answered with a status other than 200.
    #[error("server at {url} returned a {status} status code")]
    Download {
        /// Requested URL.
        url: String,
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// Remote locator could not be parsed as a URL.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected locator.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// HTTP transport failed before a response status was obtained.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Local source path does not exist.
    #[error("{path} does not exist")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// Source is not a structurally valid ZIP container.
    #[error("{path} is not a valid CSAR: {reason}")]
    InvalidArchive {
        /// The offending file.
        path: PathBuf,
        /// Why the container was rejected.
        reason: String,
    },

    /// Archive entry would be written outside the destination directory.
    #[error("archive entry escapes destination directory: {entry}")]
    PathTraversal {
        /// Entry name as stored in the archive.
        entry: String,
    },

    /// Archive entry violates an extraction limit.
    #[error("archive entry rejected: {reason}")]
    SecurityViolation {
        /// Reason for the rejection.
        reason: String,
    },

    /// Package metadata could not be resolved.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Entry definitions file could not be loaded as structured data.
    #[error("failed to load structured data from {path}: {source}")]
    StructuredData {
        /// File that was being loaded.
        path: PathBuf,
        /// Underlying read or parse error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CsarError {
    /// Returns `true` if the package source could not be obtained or is not
    /// an archive.
    ///
    /// # Examples
    ///
    /// ```
    /// use csar_core::CsarError;
    /// use std::path::PathBuf;
    ///
    /// let err = CsarError::SourceNotFound {
    ///     path: PathBuf::from("missing.csar"),
    /// };
    /// assert!(err.is_source_error());
    ///
    /// let err = CsarError::DestinationNotEmpty {
    ///     path: PathBuf::from("out"),
    /// };
    /// assert!(!err.is_source_error());
    /// ```
    #[must_use]
    pub const fn is_source_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl { .. }
                | Self::Download { .. }
                | Self::Http(_)
                | Self::SourceNotFound { .. }
                | Self::InvalidArchive { .. }
        )
    }

    /// Returns `true` if an archive entry was refused by path validation.
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. } | Self::SecurityViolation { .. }
        )
    }

    /// Returns the filesystem path this error concerns, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use csar_core::CsarError;
    /// use std::path::Path;
    /// use std::path::PathBuf;
    ///
    /// let err = CsarError::DestinationNotEmpty {
    ///     path: PathBuf::from("out"),
    /// };
    /// assert_eq!(err.path(), Some(Path::new("out")));
    /// ```
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::DestinationNotEmpty { path }
            | Self::SourceNotFound { path }
            | Self::InvalidArchive { path, .. }
            | Self::StructuredData { path, .. } => Some(path),
            Self::Metadata(MetadataError::DescriptorNotFound { path }) => Some(path),
            _ => None,
        }
    }
}
