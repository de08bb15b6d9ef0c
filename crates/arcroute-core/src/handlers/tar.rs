//! Plain tar handler.

use std::fs::create_dir_all;
use std::io::BufReader;
use std::path::Path;

use super::common;
use crate::EntryInfo;
use crate::ExtractionReport;
use crate::Handler;
use crate::Result;
use crate::fs::FileSystem;
use crate::fs::open_source;

/// Extracts uncompressed `.tar` archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarHandler;

impl Handler for TarHandler {
    fn extension(&self) -> &str {
        "tar"
    }

    fn list(&self, source: &Path, fs: Option<&dyn FileSystem>) -> Result<Vec<EntryInfo>> {
        common::list_tar(BufReader::new(open_source(source, fs)?))
    }

    fn extract(
        &self,
        source: &Path,
        destination: &Path,
        fs: Option<&dyn FileSystem>,
    ) -> Result<ExtractionReport> {
        let reader = BufReader::new(open_source(source, fs)?);
        create_dir_all(destination)?;

        let mut report = ExtractionReport::new();
        common::extract_tar(reader, destination, &mut report)?;
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::EntryKind;
    use crate::fs::MemFs;
    use crate::test_utils::TarTestBuilder;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extract_tar_with_directories() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_directory("pkg/")
            .add_file("pkg/lib.rs", b"fn main() {}")
            .build();
        let fs = MemFs::new().with_file("pkg.tar", data);

        let report = TarHandler
            .extract(Path::new("pkg.tar"), temp.path(), Some(&fs))
            .unwrap();

        assert_eq!(report.files_extracted, 1);
        assert_eq!(report.directories_created, 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("pkg/lib.rs")).unwrap(),
            "fn main() {}"
        );
    }

    #[test]
    fn test_links_and_traversal_are_skipped() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        let data = TarTestBuilder::new()
            .add_file("safe.txt", b"safe")
            .add_symlink("link", "/etc/passwd")
            .add_raw_file("../../escape.txt", b"nope")
            .build();
        let fs = MemFs::new().with_file("mixed.tar", data);

        let report = TarHandler
            .extract(Path::new("mixed.tar"), &dest, Some(&fs))
            .unwrap();

        assert_eq!(report.files_extracted, 1);
        assert_eq!(report.files_skipped, 2);
        assert_eq!(report.warnings.len(), 2);
        assert!(!dest.join("link").exists());
        assert!(!temp.path().join("escape.txt").exists());
    }

    #[test]
    fn test_list_reports_kinds() {
        let data = TarTestBuilder::new()
            .add_directory("d/")
            .add_file("d/f", b"12345")
            .add_symlink("l", "d/f")
            .build();
        let fs = MemFs::new().with_file("k.tar", data);

        let entries = TarHandler.list(Path::new("k.tar"), Some(&fs)).unwrap();
        let kinds: Vec<EntryKind> = entries.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EntryKind::Directory, EntryKind::File, EntryKind::Symlink]
        );
        assert_eq!(entries[1].size, 5);
    }
}
