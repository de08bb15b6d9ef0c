//! 7z handler.
//!
//! Reads archives through `sevenz-rust2`'s callback extraction API. Encrypted
//! archives are not supported: they are opened with an empty password and
//! fail as invalid.
//!
//! `sevenz-rust2` does not expose Unix symlink metadata, so symlinks stored
//! in a 7z archive are extracted as regular files holding the link target.

use std::cell::RefCell;
use std::fs::create_dir_all;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use sevenz_rust2::Archive;
use sevenz_rust2::Password;

use super::common;
use crate::ArchiveError;
use crate::EntryInfo;
use crate::ExtractionReport;
use crate::Handler;
use crate::Result;
use crate::fs::FileSystem;
use crate::fs::open_source;

impl From<sevenz_rust2::Error> for ArchiveError {
    fn from(err: sevenz_rust2::Error) -> Self {
        Self::InvalidArchive(format!("7z: {err}"))
    }
}

/// Extracts `.7z` archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct SevenZHandler;

impl Handler for SevenZHandler {
    fn extension(&self) -> &str {
        "7z"
    }

    fn list(&self, source: &Path, fs: Option<&dyn FileSystem>) -> Result<Vec<EntryInfo>> {
        let mut reader = BufReader::new(open_source(source, fs)?);
        let archive = Archive::read(&mut reader, &Password::empty())?;
        Ok(archive
            .files
            .iter()
            .map(|entry| {
                if entry.is_directory() {
                    EntryInfo::directory(&entry.name)
                } else {
                    EntryInfo::file(&entry.name, entry.size)
                }
            })
            .collect())
    }

    fn extract(
        &self,
        source: &Path,
        destination: &Path,
        fs: Option<&dyn FileSystem>,
    ) -> Result<ExtractionReport> {
        let reader = BufReader::new(open_source(source, fs)?);
        create_dir_all(destination)?;

        let report = RefCell::new(ExtractionReport::new());
        // First handler-side failure; the library only carries its own error type.
        let failure: RefCell<Option<ArchiveError>> = RefCell::new(None);

        let extract_fn = |entry: &sevenz_rust2::ArchiveEntry,
                          reader: &mut dyn Read,
                          _dest: &PathBuf|
         -> std::result::Result<bool, sevenz_rust2::Error> {
            let name = PathBuf::from(&entry.name);
            let mut report = report.borrow_mut();

            let outcome = match common::sanitize(&name) {
                None => {
                    common::skip(&mut report, &name, "unsafe path");
                    Ok(())
                }
                Some(relative) if entry.is_directory() => {
                    common::create_directory(destination, &relative, &mut report)
                }
                Some(relative) => common::write_file(reader, destination, &relative, &mut report),
            };

            match outcome {
                Ok(()) => Ok(true),
                Err(err) => {
                    let message = err.to_string();
                    *failure.borrow_mut() = Some(err);
                    Err(sevenz_rust2::Error::Other(message.into()))
                }
            }
        };

        let result = sevenz_rust2::decompress_with_extract_fn(reader, destination, extract_fn);
        if let Some(err) = failure.into_inner() {
            return Err(err);
        }
        result?;
        Ok(report.into_inner())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::creation::CompressFormat;
    use crate::creation::compress;
    use crate::fs::MemFs;
    use std::fs;
    use tempfile::TempDir;

    fn sample_archive(temp: &TempDir) -> PathBuf {
        let root = temp.path().join("notes");
        fs::create_dir_all(root.join("2024")).unwrap();
        fs::write(root.join("todo.txt"), "ship it\n").unwrap();
        fs::write(root.join("2024/march.md"), "# March").unwrap();
        fs::write(root.join("2024/empty"), "").unwrap();

        let archive = temp.path().join("notes.7z");
        compress(&archive, &root, CompressFormat::SevenZ).unwrap();
        archive
    }

    #[test]
    fn test_extension() {
        assert_eq!(SevenZHandler.extension(), "7z");
    }

    #[test]
    fn test_truncated_archive_is_invalid() {
        let temp = TempDir::new().unwrap();
        let data = vec![b'7', b'z', 0xBC, 0xAF, 0x27, 0x1C, 0x00, 0x04];
        let fs = MemFs::new().with_file("broken.7z", data);

        let err = SevenZHandler
            .extract(Path::new("broken.7z"), temp.path(), Some(&fs))
            .unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidArchive(_)));

        let err = SevenZHandler
            .list(Path::new("broken.7z"), Some(&fs))
            .unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidArchive(_)));
    }

    #[test]
    fn test_extract_recreates_tree() {
        let temp = TempDir::new().unwrap();
        let archive = sample_archive(&temp);
        let out = temp.path().join("out");

        let report = SevenZHandler.extract(&archive, &out, None).unwrap();
        assert_eq!(report.files_extracted, 3);
        assert_eq!(report.bytes_written, 15);
        assert_eq!(
            fs::read_to_string(out.join("notes/todo.txt")).unwrap(),
            "ship it\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("notes/2024/march.md")).unwrap(),
            "# March"
        );
        assert_eq!(fs::read(out.join("notes/2024/empty")).unwrap(), b"");
    }

    #[test]
    fn test_extract_from_memory_filesystem() {
        let temp = TempDir::new().unwrap();
        let archive = sample_archive(&temp);
        let fs = MemFs::new().with_file("upload.7z", fs::read(&archive).unwrap());
        let out = temp.path().join("out");

        let report = SevenZHandler
            .extract(Path::new("upload.7z"), &out, Some(&fs))
            .unwrap();
        assert_eq!(report.files_extracted, 3);
        assert!(out.join("notes/2024/march.md").is_file());
    }

    #[test]
    fn test_list_reports_kinds_and_sizes() {
        let temp = TempDir::new().unwrap();
        let archive = sample_archive(&temp);

        let entries = SevenZHandler.list(&archive, None).unwrap();
        assert_eq!(entries.len(), 5);

        let find = |name: &str| {
            entries
                .iter()
                .find(|e| e.path == Path::new(name))
                .unwrap_or_else(|| panic!("missing {name}"))
        };
        assert!(find("notes").is_dir());
        assert!(find("notes/2024").is_dir());
        assert_eq!(find("notes/todo.txt").size, 8);
        assert_eq!(find("notes/2024/march.md").size, 7);
        assert_eq!(find("notes/2024/empty").size, 0);
        assert!(!find("notes/2024/empty").is_dir());
    }
}
