//! TAR archive writer.

use std::io::Write;

use super::CreationReport;
use super::walker::SourceEntry;
use crate::EntryKind;
use crate::Result;

/// Writes `entries` as a plain tar stream and returns the inner writer.
///
/// Compressed tarballs pass an [`Encoder`](crate::codec::Encoder) as
/// `writer` and finish it afterwards.
pub(crate) fn write_tar<W: Write>(
    writer: W,
    entries: &[SourceEntry],
    report: &mut CreationReport,
) -> Result<W> {
    let mut builder = tar::Builder::new(writer);
    builder.follow_symlinks(false);

    for entry in entries {
        match entry.kind {
            EntryKind::Directory => {
                builder.append_dir(&entry.archive_path, &entry.path)?;
                report.directories_added += 1;
            }
            _ => {
                builder.append_path_with_name(&entry.path, &entry.archive_path)?;
                report.files_added += 1;
                report.bytes_written += entry.size;
            }
        }
    }

    Ok(builder.into_inner()?)
}
