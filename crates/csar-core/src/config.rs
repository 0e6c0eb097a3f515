//! Configuration for CSAR read operations.

use std::path::PathBuf;

/// Default size of each chunk written while streaming a download.
pub const DEFAULT_DOWNLOAD_CHUNK_SIZE: usize = 8192;

/// Default maximum number of path components in an archive entry.
pub const DEFAULT_MAX_PATH_DEPTH: usize = 32;

/// Settings for reading a CSAR package.
///
/// # Examples
///
/// ```
/// use csar_core::ReaderConfig;
///
/// let config = ReaderConfig::default()
///     .with_verify_certificate(false)
///     .with_download_chunk_size(64 * 1024);
/// assert!(!config.verify_certificate);
/// ```
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether the signer's certificate should be verified.
    ///
    /// Accepted for interface compatibility; no verification is performed.
    pub verify_certificate: bool,

    /// Size in bytes of each chunk written while streaming a download.
    pub download_chunk_size: usize,

    /// Directory for the temporary download file (`None` = system default).
    pub temp_dir: Option<PathBuf>,

    /// Maximum number of path components allowed in an archive entry.
    pub max_path_depth: usize,
}

impl Default for ReaderConfig {
    /// Default values:
    /// - `verify_certificate`: true
    /// - `download_chunk_size`: 8 KiB
    /// - `temp_dir`: system temporary directory
    /// - `max_path_depth`: 32
    fn default() -> Self {
        Self {
            verify_certificate: true,
            download_chunk_size: DEFAULT_DOWNLOAD_CHUNK_SIZE,
            temp_dir: None,
            max_path_depth: DEFAULT_MAX_PATH_DEPTH,
        }
    }
}

impl ReaderConfig {
    /// Sets whether the signer's certificate should be verified.
    #[must_use]
    pub fn with_verify_certificate(mut self, verify: bool) -> Self {
        self.verify_certificate = verify;
        self
    }

    /// Sets the download chunk size in bytes.
    #[must_use]
    pub fn with_download_chunk_size(mut self, size: usize) -> Self {
        self.download_chunk_size = size;
        self
    }

    /// Sets the directory used for the temporary download file.
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Sets the maximum entry path depth.
    #[must_use]
    pub fn with_max_path_depth(mut self, depth: usize) -> Self {
        self.max_path_depth = depth;
        self
    }

    /// Chunk size to use for downloads; zero falls back to the default.
    #[must_use]
    pub fn effective_chunk_size(&self) -> usize {
        if self.download_chunk_size == 0 {
            DEFAULT_DOWNLOAD_CHUNK_SIZE
        } else {
            self.download_chunk_size
        }
    }
}
