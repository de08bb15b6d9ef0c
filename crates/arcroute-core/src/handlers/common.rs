//! Extraction helpers shared between the built-in handlers.
//!
//! - [`sanitize`]: maps an entry name to a path relative to the destination
//! - [`write_file`]: collision-aware buffered file write
//! - [`create_directory`]: idempotent directory creation
//! - [`extract_tar`] / [`list_tar`]: tar unpacking over any reader

use std::fs::File;
use std::fs::create_dir_all;
use std::io;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

use crate::EntryInfo;
use crate::EntryKind;
use crate::ExtractionReport;
use crate::Result;

const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Converts an archive entry name into a destination-relative path.
///
/// Returns `None` for absolute names, names containing `..`, and names that
/// reduce to nothing (`""`, `"./"`).
pub(crate) fn sanitize(name: &Path) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in name.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!clean.as_os_str().is_empty()).then_some(clean)
}

/// Records a skipped entry.
pub(crate) fn skip(report: &mut ExtractionReport, name: &Path, reason: &str) {
    warn!(entry = %name.display(), reason, "skipping entry");
    report.files_skipped += 1;
    report.add_warning(format!("skipped {}: {reason}", name.display()));
}

fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Returns `path` if nothing exists there, otherwise the first free
/// `<stem> (N).<ext>` sibling.
pub(crate) fn unique_path(path: &Path) -> PathBuf {
    if !occupied(path) {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path.extension().map(|e| e.to_string_lossy().into_owned());

    let mut n: u32 = 1;
    loop {
        let name = match &extension {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = path.with_file_name(name);
        if !occupied(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Writes `reader` to `destination/relative`, renaming on collision.
///
/// Parent directories are created as needed.
pub(crate) fn write_file<R: Read + ?Sized>(
    reader: &mut R,
    destination: &Path,
    relative: &Path,
    report: &mut ExtractionReport,
) -> Result<()> {
    let wanted = destination.join(relative);
    if let Some(parent) = wanted.parent() {
        create_dir_all(parent)?;
    }

    let target = unique_path(&wanted);
    if target != wanted {
        debug!(
            wanted = %wanted.display(),
            written = %target.display(),
            "target exists, writing under a new name"
        );
        report.files_renamed += 1;
    }

    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, File::create(&target)?);
    let written = io::copy(reader, &mut writer)?;
    writer.flush()?;

    report.files_extracted += 1;
    report.bytes_written += written;
    Ok(())
}

/// Creates `destination/relative`. Existing directories are merged and not
/// counted.
pub(crate) fn create_directory(
    destination: &Path,
    relative: &Path,
    report: &mut ExtractionReport,
) -> Result<()> {
    let path = destination.join(relative);
    if !path.is_dir() {
        create_dir_all(&path)?;
        report.directories_created += 1;
    }
    Ok(())
}

fn entry_kind(entry_type: tar::EntryType) -> EntryKind {
    match entry_type {
        tar::EntryType::Regular | tar::EntryType::Continuous => EntryKind::File,
        tar::EntryType::Directory => EntryKind::Directory,
        tar::EntryType::Symlink | tar::EntryType::Link => EntryKind::Symlink,
        _ => EntryKind::Other,
    }
}

/// Unpacks a tar stream into `destination`.
pub(crate) fn extract_tar<R: Read>(
    reader: R,
    destination: &Path,
    report: &mut ExtractionReport,
) -> Result<()> {
    let mut archive = tar::Archive::new(reader);
    for entry in archive.entries()? {
        let mut entry = entry?;
        let entry_type = entry.header().entry_type();
        if entry_type == tar::EntryType::XGlobalHeader {
            continue;
        }

        let name = entry.path()?.into_owned();
        let Some(relative) = sanitize(&name) else {
            skip(report, &name, "unsafe path");
            continue;
        };

        match entry_kind(entry_type) {
            EntryKind::File => write_file(&mut entry, destination, &relative, report)?,
            EntryKind::Directory => create_directory(destination, &relative, report)?,
            EntryKind::Symlink => skip(report, &name, "link"),
            EntryKind::Other => skip(report, &name, "unsupported entry type"),
        }
    }
    Ok(())
}

/// Lists the entries of a tar stream.
pub(crate) fn list_tar<R: Read>(reader: R) -> Result<Vec<EntryInfo>> {
    let mut archive = tar::Archive::new(reader);
    let mut entries = Vec::new();
    for entry in archive.entries()? {
        let entry = entry?;
        let header = entry.header();
        if header.entry_type() == tar::EntryType::XGlobalHeader {
            continue;
        }
        entries.push(EntryInfo {
            path: entry.path()?.into_owned(),
            size: header.size()?,
            kind: entry_kind(header.entry_type()),
        });
    }
    Ok(entries)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(Path::new("a/b.txt")), Some(PathBuf::from("a/b.txt")));
        assert_eq!(sanitize(Path::new("./a/./b")), Some(PathBuf::from("a/b")));
        assert_eq!(sanitize(Path::new("../evil")), None);
        assert_eq!(sanitize(Path::new("a/../../evil")), None);
        assert_eq!(sanitize(Path::new("/etc/passwd")), None);
        assert_eq!(sanitize(Path::new("./")), None);
    }

    #[test]
    fn test_unique_path_numbers_from_one() {
        let temp = TempDir::new().unwrap();
        let wanted = temp.path().join("report.txt");
        assert_eq!(unique_path(&wanted), wanted);

        fs::write(&wanted, "a").unwrap();
        assert_eq!(unique_path(&wanted), temp.path().join("report (1).txt"));

        fs::write(temp.path().join("report (1).txt"), "b").unwrap();
        assert_eq!(unique_path(&wanted), temp.path().join("report (2).txt"));
    }

    #[test]
    fn test_unique_path_without_extension() {
        let temp = TempDir::new().unwrap();
        let wanted = temp.path().join("README");
        fs::write(&wanted, "a").unwrap();
        assert_eq!(unique_path(&wanted), temp.path().join("README (1)"));
    }

    #[test]
    fn test_write_file_renames_on_collision() {
        let temp = TempDir::new().unwrap();
        let mut report = ExtractionReport::new();

        write_file(&mut &b"one"[..], temp.path(), Path::new("a/x.txt"), &mut report).unwrap();
        write_file(&mut &b"two"[..], temp.path(), Path::new("a/x.txt"), &mut report).unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("a/x.txt")).unwrap(), "one");
        assert_eq!(fs::read_to_string(temp.path().join("a/x (1).txt")).unwrap(), "two");
        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.files_renamed, 1);
        assert_eq!(report.bytes_written, 6);
    }

    #[test]
    fn test_create_directory_merges() {
        let temp = TempDir::new().unwrap();
        let mut report = ExtractionReport::new();
        create_directory(temp.path(), Path::new("d"), &mut report).unwrap();
        create_directory(temp.path(), Path::new("d"), &mut report).unwrap();
        assert_eq!(report.directories_created, 1);
    }
}
