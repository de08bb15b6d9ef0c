//! ZIP archive writer.

use std::fs::File;
use std::io;
use std::io::Seek;
use std::io::Write;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::CreationReport;
use super::walker::SourceEntry;
use super::walker::archive_name;
use crate::EntryKind;
use crate::Result;

/// Writes `entries` as a deflate-compressed ZIP archive and returns the
/// inner writer.
pub(crate) fn write_zip<W: Write + Seek>(
    writer: W,
    entries: &[SourceEntry],
    report: &mut CreationReport,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        let name = archive_name(&entry.archive_path);
        match entry.kind {
            EntryKind::Directory => {
                zip.add_directory(format!("{name}/"), options)?;
                report.directories_added += 1;
            }
            _ => {
                zip.start_file(name, options)?;
                let copied = io::copy(&mut File::open(&entry.path)?, &mut zip)?;
                report.files_added += 1;
                report.bytes_written += copied;
            }
        }
    }

    Ok(zip.finish()?)
}
