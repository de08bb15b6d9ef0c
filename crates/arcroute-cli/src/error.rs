//! Error conversion utilities for CLI.
//!
//! Converts arcroute-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use arcroute_core::ArchiveError;
use arcroute_core::default_registry;
use std::path::Path;

/// Converts `ArchiveError` to user-friendly anyhow error with context
pub fn convert_archive_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    match err {
        ArchiveError::PathNotFound { .. } => anyhow!("{err}"),
        ArchiveError::EmptyInput => {
            anyhow!(
                "Cannot detect format of '{}': {err}\n\
                 HINT: The file is empty; it may not have finished downloading.",
                archive.display()
            )
        }
        ArchiveError::UnknownFormat => {
            anyhow!(
                "Cannot detect format of '{}': {err}\n\
                 HINT: Neither the extension nor the first 512 bytes match a known format.",
                archive.display()
            )
        }
        ArchiveError::UnsupportedFormat(_) => {
            anyhow!(
                "{err}\n\
                 HINT: Supported formats: {}",
                default_registry().extensions().join(", ")
            )
        }
        ArchiveError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        ArchiveError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted or truncated.",
                archive.display(),
                reason
            )
        }
        ArchiveError::Handler(_) => anyhow::Error::from(err)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcroute_core::FormatId;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_path_not_found_is_verbatim() {
        let err = ArchiveError::PathNotFound {
            path: PathBuf::from("missing/dir"),
        };
        let converted = convert_archive_error(err, Path::new("missing/dir"));
        assert_eq!(format!("{converted}"), "path not exists: missing/dir");
    }

    #[test]
    fn test_unsupported_extract_format_lists_handlers() {
        let err = ArchiveError::UnsupportedFormat(FormatId::RAR);
        let msg = format!("{:?}", convert_archive_error(err, Path::new("a.rar")));
        assert!(msg.contains("unsupported archive type: rar"));
        assert!(msg.contains("HINT: Supported formats"));
    }

    #[test]
    fn test_unregistered_writable_format_points_at_handlers() {
        let err = ArchiveError::UnsupportedFormat(FormatId::SEVEN_Z);
        let msg = format!("{:?}", convert_archive_error(err, Path::new("a.7z")));
        assert!(msg.contains("unsupported archive type: 7z"));
        assert!(msg.contains("HINT: Supported formats"));
        assert!(!msg.contains("compress formats"));
    }

    #[test]
    fn test_unknown_format_has_hint() {
        let msg = format!(
            "{:?}",
            convert_archive_error(ArchiveError::UnknownFormat, Path::new("blob"))
        );
        assert!(msg.contains("unknown compress format"));
        assert!(msg.contains("blob"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let converted = convert_archive_error(ArchiveError::Io(io_err), Path::new("a.tar.gz"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("a.tar.gz"));
    }
}
