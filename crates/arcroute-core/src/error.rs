//! Error types for detection, dispatch and extraction.

use std::path::PathBuf;

use thiserror::Error;

use crate::formats::FormatId;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors produced by the detector, the registry/orchestrator layer and the
/// built-in handlers.
///
/// The orchestrator never wraps handler errors, so callers can tell
/// [`ArchiveError::UnsupportedFormat`] ("no handler registered") apart from
/// any error a handler returned while extracting.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Source path does not exist.
    #[error("path not exists: {}", path.display())]
    PathNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Zero bytes were available while sniffing the content.
    #[error("empty file")]
    EmptyInput,

    /// I/O operation failed (open, read or write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No signature matched and the path carried no usable extension.
    #[error("unknown compress format")]
    UnknownFormat,

    /// The format was recognized but no handler is registered for it.
    #[error("unsupported archive type: {0}")]
    UnsupportedFormat(FormatId),

    /// Archive is corrupted or invalid.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Opaque error raised by a third-party handler.
    #[error(transparent)]
    Handler(Box<dyn std::error::Error + Send + Sync>),
}

impl ArchiveError {
    /// Wraps an arbitrary handler error.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcroute_core::ArchiveError;
    ///
    /// let err = ArchiveError::handler("codec exploded");
    /// assert_eq!(err.to_string(), "codec exploded");
    /// ```
    pub fn handler<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Handler(err.into())
    }

    /// Returns `true` if the format of the input could not be determined.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcroute_core::ArchiveError;
    ///
    /// assert!(ArchiveError::UnknownFormat.is_detection_failure());
    /// assert!(ArchiveError::EmptyInput.is_detection_failure());
    /// assert!(!ArchiveError::InvalidArchive("bad".into()).is_detection_failure());
    /// ```
    #[must_use]
    pub const fn is_detection_failure(&self) -> bool {
        matches!(self, Self::UnknownFormat | Self::EmptyInput)
    }

    /// Returns `true` if no handler is registered for the detected format.
    #[must_use]
    pub const fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_))
    }
}
