//! The handler capability implemented once per archive format.

use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionReport;
use crate::Result;
use crate::fs::FileSystem;

/// Kind of an archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic or hard link.
    Symlink,
    /// Anything else (devices, fifos, ...).
    Other,
}

/// Metadata for one entry of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Path of the entry inside the archive.
    pub path: PathBuf,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Entry kind.
    pub kind: EntryKind,
}

impl EntryInfo {
    /// Creates a regular file entry.
    pub fn file<P: Into<PathBuf>>(path: P, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            kind: EntryKind::File,
        }
    }

    /// Creates a directory entry.
    pub fn directory<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            size: 0,
            kind: EntryKind::Directory,
        }
    }

    /// Returns `true` for directory entries.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Extraction capability for one format.
///
/// Handlers are keyed by [`Handler::extension`] in a
/// [`HandlerRegistry`](crate::HandlerRegistry). They are shared across
/// threads, so implementations hold no per-call state.
///
/// # Examples
///
/// ```
/// use arcroute_core::fs::FileSystem;
/// use arcroute_core::{EntryInfo, ExtractionReport, Handler, Result};
/// use std::path::Path;
///
/// struct Noop;
///
/// impl Handler for Noop {
///     fn extension(&self) -> &str {
///         "noop"
///     }
///
///     fn list(&self, _source: &Path, _fs: Option<&dyn FileSystem>) -> Result<Vec<EntryInfo>> {
///         Ok(Vec::new())
///     }
///
///     fn extract(
///         &self,
///         _source: &Path,
///         _destination: &Path,
///         _fs: Option<&dyn FileSystem>,
///     ) -> Result<ExtractionReport> {
///         Ok(ExtractionReport::new())
///     }
/// }
///
/// assert_eq!(Noop.extension(), "noop");
/// ```
pub trait Handler: Send + Sync {
    /// Format identifier this handler is registered under.
    fn extension(&self) -> &str;

    /// Lists the entries of `source` without extracting anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or is not a valid
    /// archive of this format.
    fn list(&self, source: &Path, fs: Option<&dyn FileSystem>) -> Result<Vec<EntryInfo>>;

    /// Extracts `source` into `destination`.
    ///
    /// `fs` is used to read the source; the destination is always on the
    /// real filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the source or writing the destination
    /// fails. Partial output is left in place.
    fn extract(
        &self,
        source: &Path,
        destination: &Path,
        fs: Option<&dyn FileSystem>,
    ) -> Result<ExtractionReport>;
}
