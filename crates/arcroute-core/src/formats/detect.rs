//! Archive format detection.
//!
//! Detection runs in two stages:
//!
//! 1. **Extension fast path**: a file name with a dot-separated extension is
//!    trusted and its last extension is returned without touching the file
//!    (`archive.tar.gz` → `gz`).
//! 2. **Content sniffing**: otherwise up to [`SNIFF_LEN`] bytes are read from
//!    the start of the file and matched against [`SIGNATURES`].

use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::id::FormatId;
use super::signature::SIGNATURES;
use crate::ArchiveError;
use crate::Result;
use crate::fs::FileSystem;
use crate::fs::open_source;

/// Maximum number of bytes inspected while sniffing.
pub const SNIFF_LEN: usize = 512;

/// Returns the extension hint for `path`, if its file name has one.
///
/// Only the final path component is considered. The hint is the text after
/// the last `.`, ASCII-lowercased; names without a dot or ending in a dot have
/// no hint.
///
/// # Examples
///
/// ```
/// use arcroute_core::formats::detect::extension_hint;
/// use std::path::Path;
///
/// assert_eq!(extension_hint(Path::new("a/archive.tar.gz")).unwrap(), "gz");
/// assert_eq!(extension_hint(Path::new("BACKUP.ZIP")).unwrap(), "zip");
/// assert!(extension_hint(Path::new("release.d/archive")).is_none());
/// assert!(extension_hint(Path::new("archive.")).is_none());
/// ```
#[must_use]
pub fn extension_hint(path: &Path) -> Option<FormatId> {
    let name = path.file_name()?.to_str()?;
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(FormatId::from(ext.to_ascii_lowercase()))
}

/// Detects the format of the file at `path`.
///
/// The extension fast path is tried first and performs no I/O. Otherwise the
/// file is opened through `fs` (or the real filesystem when `None`) and its
/// first bytes are sniffed. The file handle is dropped before returning.
///
/// # Errors
///
/// - [`ArchiveError::Io`] if the file cannot be opened or read
/// - [`ArchiveError::EmptyInput`] if the file is empty
/// - [`ArchiveError::UnknownFormat`] if no signature matches
///
/// # Examples
///
/// ```
/// use arcroute_core::FormatId;
/// use arcroute_core::detect;
/// use arcroute_core::fs::MemFs;
///
/// let fs = MemFs::new().with_file("payload", b"PK\x03\x04....".to_vec());
/// assert_eq!(detect("payload", Some(&fs))?, FormatId::ZIP);
/// assert_eq!(detect("payload.tar.gz", None)?, FormatId::GZ);
/// # Ok::<(), arcroute_core::ArchiveError>(())
/// ```
pub fn detect<P: AsRef<Path>>(path: P, fs: Option<&dyn FileSystem>) -> Result<FormatId> {
    let path = path.as_ref();

    if let Some(hint) = extension_hint(path) {
        debug!(path = %path.display(), format = %hint, "format taken from extension");
        return Ok(hint);
    }

    let reader = open_source(path, fs)?;
    let format = detect_reader(reader)?;
    debug!(path = %path.display(), format = %format, "format sniffed from content");
    Ok(format)
}

/// Sniffs the format from the first [`SNIFF_LEN`] bytes of `reader`.
///
/// Reads until the window is full or the reader is exhausted.
///
/// # Errors
///
/// - [`ArchiveError::Io`] if reading fails
/// - [`ArchiveError::EmptyInput`] if the reader yields no bytes
/// - [`ArchiveError::UnknownFormat`] if no signature matches
pub fn detect_reader<R: Read>(reader: R) -> Result<FormatId> {
    let mut window = Vec::with_capacity(SNIFF_LEN);
    reader.take(SNIFF_LEN as u64).read_to_end(&mut window)?;
    if window.is_empty() {
        return Err(ArchiveError::EmptyInput);
    }
    detect_bytes(&window).ok_or(ArchiveError::UnknownFormat)
}

/// Matches `window` against the signature table and returns the first hit.
///
/// # Examples
///
/// ```
/// use arcroute_core::FormatId;
/// use arcroute_core::detect_bytes;
///
/// assert_eq!(detect_bytes(&[0x1F, 0x8B, 0x08]), Some(FormatId::GZ));
/// assert_eq!(detect_bytes(b"plain text"), None);
/// ```
#[must_use]
pub fn detect_bytes(window: &[u8]) -> Option<FormatId> {
    SIGNATURES
        .iter()
        .find(|signature| signature.matches(window))
        .map(|signature| signature.name.clone())
}
