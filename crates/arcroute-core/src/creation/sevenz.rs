//! 7z archive writer.

use std::fs::File;
use std::io::Seek;
use std::io::Write;

use sevenz_rust2::ArchiveEntry;
use sevenz_rust2::ArchiveWriter;

use super::CreationReport;
use super::walker::SourceEntry;
use super::walker::archive_name;
use crate::EntryKind;
use crate::Result;

/// Writes `entries` as a non-solid LZMA2 7z archive and returns the inner
/// writer.
pub(crate) fn write_sevenz<W: Write + Seek>(
    writer: W,
    entries: &[SourceEntry],
    report: &mut CreationReport,
) -> Result<W> {
    let mut archive = ArchiveWriter::new(writer)?;

    for entry in entries {
        let name = archive_name(&entry.archive_path);
        let header = ArchiveEntry::from_path(&entry.path, name);
        match entry.kind {
            EntryKind::Directory => {
                archive.push_archive_entry::<File>(header, None)?;
                report.directories_added += 1;
            }
            // Empty files are stored without a stream.
            _ if entry.size == 0 => {
                archive.push_archive_entry::<File>(header, None)?;
                report.files_added += 1;
            }
            _ => {
                let written = archive.push_archive_entry(header, Some(File::open(&entry.path)?))?;
                report.files_added += 1;
                report.bytes_written += written.size;
            }
        }
    }

    Ok(archive.finish()?)
}
