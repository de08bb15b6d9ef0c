//! Outcome of one [`compress`](super::compress) call.

use std::time::Duration;

/// Counters collected while packing a source tree.
///
/// # Examples
///
/// ```
/// use arcroute_core::creation::CreationReport;
///
/// let mut report = CreationReport::default();
/// report.files_added = 10;
/// report.bytes_written = 1024;
/// report.bytes_compressed = 512;
///
/// assert_eq!(report.compression_ratio(), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreationReport {
    /// Regular files stored.
    pub files_added: usize,

    /// Directory entries stored, the source root included.
    pub directories_added: usize,

    /// Source bytes read.
    pub bytes_written: u64,

    /// On-disk size of the produced archive.
    pub bytes_compressed: u64,

    /// Wall time of the whole call.
    pub duration: Duration,

    /// Source entries left out: symlinks, special files and the archive
    /// being written.
    pub files_skipped: usize,

    /// One line per skipped source entry.
    pub warnings: Vec<String>,
}

impl CreationReport {
    /// Returns an all-zero report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Whether any source entry was skipped.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Source size divided by archive size; `0.0` while either is unknown.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        match (self.bytes_written, self.bytes_compressed) {
            (0, _) | (_, 0) => 0.0,
            (raw, packed) => raw as f64 / packed as f64,
        }
    }

    /// Files plus directories stored.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_added + self.directories_added
    }
}
