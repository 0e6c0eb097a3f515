//! Structural ZIP check based on the End of Central Directory record.
//!
//! ZIP files are read from the end: a valid container carries an EOCD
//! record in its last `22 + 65535` bytes (fixed record plus the largest
//! possible comment). Finding it is enough to accept the file as a
//! container; nothing is decompressed here.

use std::fs;
use std::fs::File;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;

use crate::CsarError;
use crate::Result;

/// Maximum ZIP comment size allowed by the format.
const MAX_COMMENT_SIZE: u64 = 65535;

/// Fields of the End of Central Directory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfCentralDirectory {
    /// Number of entries in the central directory.
    pub total_entries: u16,
    /// Size of the central directory in bytes.
    pub cd_size: u32,
    /// Offset of the central directory from the start of the file.
    pub cd_offset: u32,
    /// Length of the trailing archive comment.
    pub comment_len: u16,
}

impl EndOfCentralDirectory {
    /// Record signature (`PK\x05\x06`).
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    /// Fixed size of the record without comment.
    pub const SIZE: usize = 22;

    fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return None;
        }
        let u16_at = |i: usize| u16::from_le_bytes([data[i], data[i + 1]]);
        let u32_at = |i: usize| u32::from_le_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);

        Some(Self {
            total_entries: u16_at(10),
            cd_size: u32_at(12),
            cd_offset: u32_at(16),
            comment_len: u16_at(20),
        })
    }
}

/// Confirms `path` exists and is a structurally valid ZIP container.
///
/// # Errors
///
/// - `CsarError::SourceNotFound` if nothing exists at `path`
/// - `CsarError::InvalidArchive` if no End of Central Directory record is
///   found
pub fn probe_zip(path: &Path) -> Result<EndOfCentralDirectory> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CsarError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(CsarError::Io(e)),
    };

    if meta.is_dir() {
        return Err(invalid(path, "is a directory"));
    }

    let size = meta.len();
    if size < EndOfCentralDirectory::SIZE as u64 {
        return Err(invalid(path, "file is too small to be a ZIP container"));
    }

    let search_size = (MAX_COMMENT_SIZE + EndOfCentralDirectory::SIZE as u64).min(size);
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(size - search_size))?;

    #[allow(clippy::cast_possible_truncation)]
    let mut buf = vec![0u8; search_size as usize];
    file.read_exact(&mut buf)?;

    find_eocd(&buf).ok_or_else(|| invalid(path, "end of central directory record not found"))
}

/// Searches backwards for an EOCD record whose comment fits in the buffer.
///
/// Bytes after the comment are allowed, so data appended to an archive
/// does not make it unreadable.
fn find_eocd(buf: &[u8]) -> Option<EndOfCentralDirectory> {
    let last = buf.len().checked_sub(EndOfCentralDirectory::SIZE)?;

    (0..=last).rev().find_map(|i| {
        let eocd = EndOfCentralDirectory::from_bytes(&buf[i..])?;
        let trailing = buf.len() - i - EndOfCentralDirectory::SIZE;
        (usize::from(eocd.comment_len) <= trailing).then_some(eocd)
    })
}

fn invalid(path: &Path, reason: &str) -> CsarError {
    CsarError::InvalidArchive {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
