//! Archive creation.
//!
//! [`compress`] packs a file or directory into one of the
//! [`CompressFormat`]s. Entries are stored under the source's base name, so
//! extracting `dir.zip` recreates `dir/`.

mod report;
mod sevenz;
mod tar;
mod walker;
mod zip;

use std::fmt;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use tracing::debug;
use tracing::info;

pub use self::report::CreationReport;
pub use self::walker::SourceEntry;
use self::sevenz::write_sevenz;
use self::tar::write_tar;
use self::walker::walk_source;
use self::zip::write_zip;
use crate::ArchiveError;
use crate::EntryKind;
use crate::FormatId;
use crate::Result;
use crate::codec::Codec;

/// Output format for [`compress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressFormat {
    /// ZIP with deflate.
    #[default]
    Zip,
    /// Plain tar.
    Tar,
    /// Gzip.
    Gz,
    /// Bzip2.
    Bz2,
    /// Xz.
    Xz,
    /// Zstandard.
    Zst,
    /// 7z with LZMA2.
    SevenZ,
}

impl CompressFormat {
    /// All formats, in the order they are listed to users.
    pub const ALL: [Self; 7] = [
        Self::Zip,
        Self::Tar,
        Self::Gz,
        Self::Bz2,
        Self::Xz,
        Self::Zst,
        Self::SevenZ,
    ];

    /// Returns the file extension, which is also the format identifier.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Tar => "tar",
            Self::Gz => "gz",
            Self::Bz2 => "bz2",
            Self::Xz => "xz",
            Self::Zst => "zst",
            Self::SevenZ => "7z",
        }
    }

    /// Returns the format identifier.
    #[must_use]
    pub const fn format(self) -> FormatId {
        FormatId::from_static(self.extension())
    }

    const fn codec(self) -> Option<Codec> {
        match self {
            Self::Gz => Some(Codec::Gzip),
            Self::Bz2 => Some(Codec::Bzip2),
            Self::Xz => Some(Codec::Xz),
            Self::Zst => Some(Codec::Zstd),
            Self::Zip | Self::Tar | Self::SevenZ => None,
        }
    }
}

impl fmt::Display for CompressFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for CompressFormat {
    type Err = ArchiveError;

    /// Parses a format name, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == lower)
            .ok_or_else(|| ArchiveError::UnsupportedFormat(FormatId::from(lower)))
    }
}

/// Returns the base name entries are stored under.
fn base_name(source: &Path) -> Result<PathBuf> {
    let canonical = source.canonicalize()?;
    Ok(canonical
        .file_name()
        .map_or_else(|| PathBuf::from("archive"), PathBuf::from))
}

/// Returns `<base name>.<format>`, the default archive name for `source`.
///
/// # Errors
///
/// Returns [`ArchiveError::PathNotFound`] if `source` does not exist.
///
/// # Examples
///
/// ```no_run
/// use arcroute_core::creation::CompressFormat;
/// use arcroute_core::creation::default_output_name;
/// use std::path::PathBuf;
///
/// let name = default_output_name("photos/2024", CompressFormat::Gz)?;
/// assert_eq!(name, PathBuf::from("2024.gz"));
/// # Ok::<(), arcroute_core::ArchiveError>(())
/// ```
pub fn default_output_name<P: AsRef<Path>>(source: P, format: CompressFormat) -> Result<PathBuf> {
    let source = source.as_ref();
    ensure_exists(source)?;
    let mut name = base_name(source)?.into_os_string();
    name.push(".");
    name.push(format.extension());
    Ok(PathBuf::from(name))
}

fn ensure_exists(source: &Path) -> Result<()> {
    if source.symlink_metadata().is_err() {
        return Err(ArchiveError::PathNotFound {
            path: source.to_path_buf(),
        });
    }
    Ok(())
}

/// Compresses `source` (a file or a directory) into `output`.
///
/// - `zip`, `tar` and `7z` store the walked tree.
/// - `gz`, `bz2`, `xz` and `zst` compress a tar of a directory, or the raw
///   bytes of a single file.
///
/// # Errors
///
/// - [`ArchiveError::PathNotFound`] if `source` does not exist
/// - [`ArchiveError::Io`] on read or write failures
///
/// # Examples
///
/// ```no_run
/// use arcroute_core::creation::CompressFormat;
/// use arcroute_core::creation::compress;
///
/// let report = compress("project.tar", "project", CompressFormat::Tar)?;
/// println!("{} files", report.files_added);
/// # Ok::<(), arcroute_core::ArchiveError>(())
/// ```
pub fn compress<P, Q>(output: P, source: Q, format: CompressFormat) -> Result<CreationReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let start = Instant::now();
    let output = output.as_ref();
    let source = source.as_ref();

    ensure_exists(source)?;

    let base = base_name(source)?;
    let mut report = CreationReport::new();
    let file = File::create(output)?;
    let excluded = output.canonicalize().ok();
    let entries = walk_source(source, &base, excluded.as_deref(), &mut report)?;
    debug!(
        source = %source.display(),
        entries = entries.len(),
        format = %format,
        "writing archive"
    );

    let single_file = entries.len() == 1 && entries[0].kind == EntryKind::File;
    let writer = BufWriter::new(file);
    let mut writer = match format.codec() {
        None if format == CompressFormat::Zip => write_zip(writer, &entries, &mut report)?,
        None if format == CompressFormat::SevenZ => write_sevenz(writer, &entries, &mut report)?,
        None => write_tar(writer, &entries, &mut report)?,
        Some(codec) => {
            let mut encoder = codec.encoder(writer)?;
            if single_file {
                let copied = io::copy(&mut File::open(&entries[0].path)?, &mut encoder)?;
                report.files_added += 1;
                report.bytes_written += copied;
            } else {
                encoder = write_tar(encoder, &entries, &mut report)?;
            }
            encoder.finish()?
        }
    };
    writer.flush()?;
    drop(writer);

    report.bytes_compressed = std::fs::metadata(output)?.len();
    report.duration = start.elapsed();
    info!(
        output = %output.display(),
        files = report.files_added,
        directories = report.directories_added,
        "archive created"
    );
    Ok(report)
}
