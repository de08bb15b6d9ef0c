//! ZIP handler.

use std::fs::create_dir_all;
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use super::common;
use crate::ArchiveError;
use crate::EntryInfo;
use crate::EntryKind;
use crate::ExtractionReport;
use crate::Handler;
use crate::Result;
use crate::fs::FileSystem;
use crate::fs::SourceReader;
use crate::fs::open_source;

const S_IFMT: u32 = 0o170_000;
const S_IFLNK: u32 = 0o120_000;

impl From<ZipError> for ArchiveError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(io) => Self::Io(io),
            other => Self::InvalidArchive(format!("zip: {other}")),
        }
    }
}

/// Extracts `.zip` archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipHandler;

impl ZipHandler {
    fn open(source: &Path, fs: Option<&dyn FileSystem>) -> Result<ZipArchive<SourceReader>> {
        Ok(ZipArchive::new(open_source(source, fs)?)?)
    }
}

fn is_symlink(mode: Option<u32>) -> bool {
    mode.is_some_and(|mode| mode & S_IFMT == S_IFLNK)
}

impl Handler for ZipHandler {
    fn extension(&self) -> &str {
        "zip"
    }

    fn list(&self, source: &Path, fs: Option<&dyn FileSystem>) -> Result<Vec<EntryInfo>> {
        let mut archive = Self::open(source, fs)?;
        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let file = archive.by_index_raw(i)?;
            let kind = if file.is_dir() {
                EntryKind::Directory
            } else if is_symlink(file.unix_mode()) {
                EntryKind::Symlink
            } else {
                EntryKind::File
            };
            entries.push(EntryInfo {
                path: file.name().into(),
                size: file.size(),
                kind,
            });
        }
        Ok(entries)
    }

    fn extract(
        &self,
        source: &Path,
        destination: &Path,
        fs: Option<&dyn FileSystem>,
    ) -> Result<ExtractionReport> {
        let mut archive = Self::open(source, fs)?;
        create_dir_all(destination)?;

        let mut report = ExtractionReport::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = Path::new(file.name()).to_path_buf();
            let Some(relative) = common::sanitize(&name) else {
                common::skip(&mut report, &name, "unsafe path");
                continue;
            };

            if file.is_dir() {
                common::create_directory(destination, &relative, &mut report)?;
            } else if is_symlink(file.unix_mode()) {
                common::skip(&mut report, &name, "link");
            } else {
                common::write_file(&mut file, destination, &relative, &mut report)?;
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fs::MemFs;
    use crate::test_utils::ZipTestBuilder;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> MemFs {
        let data = ZipTestBuilder::new()
            .add_directory("docs/")
            .add_file("docs/readme.md", b"# hi")
            .add_file("top.txt", b"top")
            .build();
        MemFs::new().with_file("bundle.zip", data)
    }

    #[test]
    fn test_extract_zip() {
        let temp = TempDir::new().unwrap();
        let fs = fixture();

        let report = ZipHandler
            .extract(Path::new("bundle.zip"), temp.path(), Some(&fs))
            .unwrap();

        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.bytes_written, 7);
        assert_eq!(fs::read_to_string(temp.path().join("docs/readme.md")).unwrap(), "# hi");
    }

    #[test]
    fn test_list_zip_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("never");
        let fs = fixture();

        let entries = ZipHandler.list(Path::new("bundle.zip"), Some(&fs)).unwrap();

        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_dir());
        assert_eq!(entries[2], EntryInfo::file("top.txt", 3));
        assert!(!dest.exists());
    }

    #[test]
    fn test_traversal_entry_is_skipped() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        let data = ZipTestBuilder::new()
            .add_file("../escape.txt", b"nope")
            .add_file("ok.txt", b"ok")
            .build();
        let fs = MemFs::new().with_file("evil.zip", data);

        let report = ZipHandler
            .extract(Path::new("evil.zip"), &dest, Some(&fs))
            .unwrap();

        assert_eq!(report.files_skipped, 1);
        assert_eq!(report.files_extracted, 1);
        assert!(report.has_warnings());
        assert!(!temp.path().join("escape.txt").exists());
    }

    #[test]
    fn test_corrupt_zip_is_invalid_archive() {
        let temp = TempDir::new().unwrap();
        let fs = MemFs::new().with_file("bad.zip", b"PK\x03\x04 truncated".to_vec());
        let err = ZipHandler
            .extract(Path::new("bad.zip"), temp.path(), Some(&fs))
            .unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidArchive(_) | ArchiveError::Io(_)));
    }
}
