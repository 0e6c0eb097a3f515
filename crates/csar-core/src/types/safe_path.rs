//! Validated archive entry path.

use crate::CsarError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// A relative archive entry path that stays inside the destination.
///
/// `SafePath` rejects:
/// - Null bytes
/// - Absolute paths and drive prefixes
/// - Parent directory components (`..`)
/// - Paths deeper than the configured maximum
///
/// `.` components are dropped during normalization.
///
/// # Examples
///
/// ```
/// use csar_core::types::SafePath;
///
/// let safe = SafePath::validate("Definitions/main.yaml", 32).unwrap();
/// assert_eq!(safe.as_path(), std::path::Path::new("Definitions/main.yaml"));
///
/// assert!(SafePath::validate("../etc/passwd", 32).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates an entry name as stored in the archive.
    ///
    /// # Errors
    ///
    /// - `CsarError::PathTraversal` for `..`, absolute, or empty paths
    /// - `CsarError::SecurityViolation` for null bytes or excessive depth
    pub fn validate(entry: &str, max_depth: usize) -> Result<Self> {
        if entry.contains('\0') {
            return Err(CsarError::SecurityViolation {
                reason: format!("entry name contains null bytes: {}", entry.escape_debug()),
            });
        }

        let mut normalized = PathBuf::new();
        let mut depth = 0;

        for component in Path::new(entry).components() {
            match component {
                Component::Normal(part) => {
                    depth += 1;
                    normalized.push(part);
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(CsarError::PathTraversal {
                        entry: entry.to_string(),
                    });
                }
            }
        }

        if depth == 0 {
            return Err(CsarError::PathTraversal {
                entry: entry.to_string(),
            });
        }

        if depth > max_depth {
            return Err(CsarError::SecurityViolation {
                reason: format!("path depth {depth} exceeds maximum {max_depth}: {entry}"),
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
