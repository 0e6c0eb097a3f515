//! Source acquisition: resolve a locator to a local archive file.
//!
//! A locator containing `"://"` is treated as a URL and downloaded into a
//! temporary file; anything else is a local path, returned as-is (after
//! home directory expansion). The temporary file is owned by
//! [`AcquiredArchive`] and removed when it is dropped, whichever way the
//! surrounding read operation ends.

pub mod http;

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempPath;

use crate::ProgressCallback;
use crate::ReaderConfig;
use crate::Result;

/// Separator whose presence marks a locator as remote.
pub const SCHEME_SEPARATOR: &str = "://";

/// Where a package comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    /// Filesystem path, with `~` already expanded.
    Local(PathBuf),
    /// URL to fetch with an HTTP GET.
    Remote(String),
}

impl SourceLocator {
    /// Classifies a raw locator string.
    ///
    /// # Examples
    ///
    /// ```
    /// use csar_core::source::SourceLocator;
    ///
    /// assert!(SourceLocator::parse("https://example.com/pkg.csar").is_remote());
    /// assert!(!SourceLocator::parse("packages/pkg.csar").is_remote());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.contains(SCHEME_SEPARATOR) {
            Self::Remote(raw.to_string())
        } else {
            Self::Local(expand_home(Path::new(raw)))
        }
    }

    /// Returns `true` for URL locators.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

/// A local archive file ready for validation.
#[derive(Debug)]
pub enum AcquiredArchive {
    /// Caller-owned file; never deleted.
    Local(PathBuf),
    /// Downloaded temporary file; deleted on drop.
    Downloaded(TempPath),
}

impl AcquiredArchive {
    /// Path of the local archive file.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Local(path) => path.as_path(),
            Self::Downloaded(temp) => &**temp,
        }
    }

    /// Returns `true` if the file was downloaded and will be removed on drop.
    #[must_use]
    pub const fn is_temporary(&self) -> bool {
        matches!(self, Self::Downloaded(_))
    }
}

/// Resolves a locator to a local file, downloading remote sources.
///
/// Local paths are not checked for existence here.
///
/// # Errors
///
/// - `CsarError::InvalidUrl` if a remote locator is not a valid URL
/// - `CsarError::Download` if the server does not answer 200
/// - `CsarError::Http` if the request cannot be sent or the body cannot be
///   read
/// - `CsarError::Io` if the temporary file cannot be created or written
pub fn acquire(
    locator: &SourceLocator,
    config: &ReaderConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<AcquiredArchive> {
    match locator {
        SourceLocator::Local(path) => Ok(AcquiredArchive::Local(path.clone())),
        SourceLocator::Remote(url) => download_to_temp(url, config, progress),
    }
}

fn download_to_temp(
    url: &str,
    config: &ReaderConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<AcquiredArchive> {
    let parsed = http::parse_url(url)?;
    let client = http::get_http_client(&parsed)?;
    let response = http::fetch(&client, &parsed)?;

    let mut builder = tempfile::Builder::new();
    builder.prefix("csar-").suffix(".csar");
    let mut file = match &config.temp_dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };

    tracing::info!(url, target = %file.path().display(), "downloading package");
    progress.on_download_start(url, response.content_length());

    let written = http::stream_body(response, &mut file, config.effective_chunk_size(), progress)?;
    file.flush()?;
    tracing::debug!(url, bytes = written, "download complete");

    Ok(AcquiredArchive::Downloaded(file.into_temp_path()))
}

/// Expands a leading `~` to the current user's home directory.
///
/// Only the bare `~` and `~/...` forms are expanded; `~user/...` is left
/// as-is. Paths without a leading `~`, and paths when no home directory can
/// be determined, are returned unchanged.
///
/// # Examples
///
/// ```
/// use csar_core::source::expand_home;
/// use std::path::Path;
///
/// assert_eq!(expand_home(Path::new("pkg.csar")), Path::new("pkg.csar"));
/// ```
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
