//! ZIP extraction into a destination directory.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::CsarError;
use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::ReaderConfig;
use crate::Result;
use crate::types::DestDir;
use crate::types::SafePath;

/// Extracts every entry of the ZIP file at `archive_path` into `dest`.
///
/// Entry paths are preserved relative to `dest` after validation with
/// [`SafePath`]. Entries are written in archive order; if an entry fails,
/// the entries already written are left in place. Symlink entries are
/// written as regular files holding the link target, and stored Unix
/// permissions are not applied.
///
/// # Errors
///
/// - `CsarError::InvalidArchive` if the central directory cannot be read or
///   an entry fails to decompress
/// - `CsarError::PathTraversal` / `CsarError::SecurityViolation` for entry
///   names that would land outside `dest`
/// - `CsarError::Io` for filesystem failures
pub fn extract_zip(
    archive_path: &Path,
    dest: &DestDir,
    config: &ReaderConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let start = Instant::now();
    let file = File::open(archive_path)?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| zip_error(archive_path, e))?;

    let total = archive.len();
    let mut report = ExtractionReport::new();

    for index in 0..total {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| zip_error(archive_path, e))?;
        let safe = SafePath::validate(entry.name(), config.max_path_depth)?;
        let target = dest.join(&safe);

        progress.on_entry_start(safe.as_path(), total, index + 1);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            report.directories_created += 1;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&target)?;
            let written = io::copy(&mut entry, &mut out).map_err(|e| {
                if is_corrupt_data(e.kind()) {
                    CsarError::InvalidArchive {
                        path: archive_path.to_path_buf(),
                        reason: format!("{}: {e}", safe.as_path().display()),
                    }
                } else {
                    CsarError::Io(e)
                }
            })?;

            report.files_extracted += 1;
            report.bytes_written += written;
            progress.on_bytes_written(written);
        }

        progress.on_entry_complete(safe.as_path());
    }

    report.duration = start.elapsed();
    progress.on_complete();

    Ok(report)
}

/// Error kinds the decompressors and CRC check use for damaged input.
const fn is_corrupt_data(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::InvalidData | ErrorKind::InvalidInput | ErrorKind::UnexpectedEof
    )
}

fn zip_error(path: &Path, err: ZipError) -> CsarError {
    match err {
        ZipError::Io(e) if !is_corrupt_data(e.kind()) => CsarError::Io(e),
        other => CsarError::InvalidArchive {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}
