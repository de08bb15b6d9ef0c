//! Outcome of one extraction request.

use std::time::Duration;

/// Counters filled in by a [`Handler`](crate::Handler) while it extracts.
///
/// `duration` is left at zero by handlers and stamped by the
/// [`Archiver`](crate::Archiver) once the handler returns.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Regular files written, including renamed ones.
    pub files_extracted: usize,

    /// Directories that did not exist before.
    pub directories_created: usize,

    /// Payload bytes written.
    pub bytes_written: u64,

    /// Entries left out: unsafe names, links and special entries.
    pub files_skipped: usize,

    /// Files written as `name (N).ext` because `name.ext` was taken.
    pub files_renamed: usize,

    /// Wall time spent in the handler.
    pub duration: Duration,

    /// One line per skipped entry.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Returns an all-zero report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Files plus directories written.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }

    /// Whether any entry was skipped.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
