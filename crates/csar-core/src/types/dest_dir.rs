//! Validated destination directory type.

use crate::CsarError;
use crate::Result;
use crate::source::expand_home;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

/// A destination directory that was absent or empty when it was validated.
///
/// Construct with [`DestDir::vacant`] before any other work is done, so a
/// populated destination is rejected without touching the network or the
/// filesystem.
///
/// # Examples
///
/// ```no_run
/// use csar_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::vacant("/tmp/csar-out")?;
/// dest.ensure_created()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Validates that `path` does not exist or is an empty directory.
    ///
    /// A leading `~` is expanded to the home directory and a symlink is
    /// judged by its target. Nothing is created.
    ///
    /// # Errors
    ///
    /// Returns `CsarError::DestinationNotEmpty` if the path is a non-empty
    /// directory or any other kind of filesystem object, and
    /// `CsarError::Io` if the directory cannot be listed.
    pub fn vacant(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_home(path.as_ref());

        // Symlinks are followed; a dangling link still occupies the path.
        match fs::metadata(&path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if fs::symlink_metadata(&path).is_ok() {
                    return Err(CsarError::DestinationNotEmpty { path });
                }
                return Ok(Self(path));
            }
            Err(e) => return Err(CsarError::Io(e)),
            Ok(meta) if !meta.is_dir() => {
                return Err(CsarError::DestinationNotEmpty { path });
            }
            Ok(_) => {}
        }

        if fs::read_dir(&path)?.next().is_some() {
            return Err(CsarError::DestinationNotEmpty { path });
        }

        Ok(Self(path))
    }

    /// Creates the directory (and missing parents) if it does not exist.
    pub fn ensure_created(&self) -> Result<()> {
        fs::create_dir_all(&self.0)?;
        Ok(())
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a validated entry path to this destination.
    #[inline]
    #[must_use]
    pub fn join(&self, safe_path: &super::SafePath) -> PathBuf {
        self.0.join(safe_path.as_path())
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
