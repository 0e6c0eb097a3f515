//! Extraction reporting and progress callbacks.

use std::path::Path;
use std::time::Duration;

/// Report of a CSAR extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directory entries created.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction step.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of entries processed.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

/// Callback trait for progress reporting while a package is read.
///
/// Every method has an empty default body so implementors only override
/// the events they care about.
///
/// # Examples
///
/// ```
/// use csar_core::ProgressCallback;
/// use std::path::Path;
///
/// struct EntryLogger;
///
/// impl ProgressCallback for EntryLogger {
///     fn on_entry_complete(&mut self, path: &Path) {
///         println!("extracted {}", path.display());
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called once a remote download has started.
    ///
    /// `content_length` is the size advertised by the server, if any.
    fn on_download_start(&mut self, _url: &str, _content_length: Option<u64>) {}

    /// Called after each non-empty chunk of the download is written.
    fn on_bytes_downloaded(&mut self, _bytes: u64) {}

    /// Called when starting to extract an entry.
    ///
    /// * `total` - Total number of entries in the archive
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    /// Called when bytes of an entry are written.
    fn on_bytes_written(&mut self, _bytes: u64) {}

    /// Called when an entry has been completely extracted.
    fn on_entry_complete(&mut self, _path: &Path) {}

    /// Called when extraction is complete.
    fn on_complete(&mut self) {}
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report() {
        let report = ExtractionReport::new();
        assert_eq!(report.files_extracted, 0);
        assert_eq!(report.directories_created, 0);
        assert_eq!(report.bytes_written, 0);
    }

    #[test]
    fn test_total_items() {
        let mut report = ExtractionReport::new();
        report.files_extracted = 10;
        report.directories_created = 5;
        assert_eq!(report.total_items(), 15);
    }

    #[test]
    fn test_default_methods_are_callable() {
        #[derive(Default)]
        struct Counting {
            completed: usize,
        }

        impl ProgressCallback for Counting {
            fn on_entry_complete(&mut self, _path: &Path) {
                self.completed += 1;
            }
        }

        let mut progress = Counting::default();
        progress.on_download_start("http://example.com/a.csar", Some(10));
        progress.on_bytes_downloaded(10);
        progress.on_entry_start(Path::new("a.txt"), 1, 1);
        progress.on_entry_complete(Path::new("a.txt"));
        progress.on_complete();
        assert_eq!(progress.completed, 1);
    }
}
