//! Source tree walking for archive creation.

use std::io;
use std::path::Path;
use std::path::PathBuf;

use tracing::warn;
use walkdir::WalkDir;

use super::CreationReport;
use crate::EntryKind;
use crate::Result;

/// A source entry ready to be added to an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Full filesystem path to the entry.
    pub path: PathBuf,

    /// Path to store in the archive, rooted at the source's base name.
    pub archive_path: PathBuf,

    /// Either [`EntryKind::File`] or [`EntryKind::Directory`].
    pub kind: EntryKind,

    /// Size in bytes (0 for directories).
    pub size: u64,
}

/// Walks `source` in sorted order and returns the entries to archive.
///
/// Every archive path starts with `base`. Symlinks are not followed and,
/// like special files and `exclude`, are left out with a warning.
pub(crate) fn walk_source(
    source: &Path,
    base: &Path,
    exclude: Option<&Path>,
    report: &mut CreationReport,
) -> Result<Vec<SourceEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(source).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();

        if exclude.is_some_and(|excluded| path.canonicalize().is_ok_and(|p| p == excluded)) {
            report.files_skipped += 1;
            continue;
        }

        let relative = path.strip_prefix(source).unwrap_or(path);
        let archive_path = base.join(relative);
        let file_type = entry.file_type();

        let (kind, size) = if file_type.is_dir() {
            (EntryKind::Directory, 0)
        } else if file_type.is_file() {
            (EntryKind::File, entry.metadata().map_err(io::Error::from)?.len())
        } else {
            warn!(path = %path.display(), "skipping non-regular file");
            report.files_skipped += 1;
            report.add_warning(format!("skipped {}: not a regular file", path.display()));
            continue;
        };

        entries.push(SourceEntry {
            path: path.to_path_buf(),
            archive_path,
            kind,
            size,
        });
    }

    Ok(entries)
}

/// Returns `archive_path` with `/` separators, as stored in archives.
pub(crate) fn archive_name(archive_path: &Path) -> String {
    archive_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_walk_is_sorted_and_rooted_at_base() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("proj");
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("b.txt"), "bb").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();

        let mut report = CreationReport::new();
        let entries = walk_source(&root, Path::new("proj"), None, &mut report).unwrap();
        let names: Vec<String> = entries.iter().map(|e| archive_name(&e.archive_path)).collect();

        assert_eq!(names, ["proj", "proj/a.txt", "proj/b.txt", "proj/src", "proj/src/main.rs"]);
        assert_eq!(entries[2].size, 2);
        assert_eq!(entries[0].kind, EntryKind::Directory);
    }

    #[test]
    fn test_single_file_source() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notes.txt");
        fs::write(&file, "hello").unwrap();

        let mut report = CreationReport::new();
        let entries = walk_source(&file, Path::new("notes.txt"), None, &mut report).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].archive_path, PathBuf::from("notes.txt"));
        assert_eq!(entries[0].size, 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_skipped() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("d");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("real"), "x").unwrap();
        std::os::unix::fs::symlink("real", root.join("link")).unwrap();

        let mut report = CreationReport::new();
        let entries = walk_source(&root, Path::new("d"), None, &mut report).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(report.files_skipped, 1);
        assert!(report.has_warnings());
    }

    #[test]
    fn test_excluded_path_is_left_out() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("d");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("keep"), "x").unwrap();
        fs::write(root.join("d.zip"), "partial").unwrap();
        let output = root.join("d.zip").canonicalize().unwrap();

        let mut report = CreationReport::new();
        let entries = walk_source(&root, Path::new("d"), Some(&output), &mut report).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(report.files_skipped, 1);
    }
}
