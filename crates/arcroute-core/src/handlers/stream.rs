//! Handler for single-stream compressed sources (`gz`, `zz`, `bz2`, `xz`,
//! `zst`).
//!
//! The decompressed stream is sniffed: a tar payload is unpacked, anything
//! else is written as one file named after the source.

use std::ffi::OsString;
use std::fs::create_dir_all;
use std::io;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use super::common;
use crate::EntryInfo;
use crate::ExtractionReport;
use crate::FormatId;
use crate::Handler;
use crate::Result;
use crate::codec::Codec;
use crate::formats::SNIFF_LEN;
use crate::formats::SIGNATURES;
use crate::fs::FileSystem;
use crate::fs::open_source;

/// Extracts one compressed stream using a [`Codec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHandler {
    codec: Codec,
    extension: FormatId,
}

impl StreamHandler {
    /// Creates a handler for `codec`.
    #[must_use]
    pub const fn new(codec: Codec) -> Self {
        Self {
            codec,
            extension: codec.format(),
        }
    }

    /// Returns the codec.
    #[must_use]
    pub const fn codec(&self) -> Codec {
        self.codec
    }

    /// Opens the source, decodes it and peeks the first bytes of the
    /// payload. Returns whether the payload is a tar archive and a reader
    /// over the full payload.
    fn open(&self, source: &Path, fs: Option<&dyn FileSystem>) -> Result<(bool, Box<dyn Read>)> {
        let reader = BufReader::new(open_source(source, fs)?);
        let mut decoded = self.codec.decoder(reader)?;

        let mut head = Vec::with_capacity(SNIFF_LEN);
        (&mut decoded).take(SNIFF_LEN as u64).read_to_end(&mut head)?;
        let is_tar = is_tar_header(&head);

        Ok((is_tar, Box::new(Cursor::new(head).chain(decoded))))
    }
}

/// Whether `head` carries the tar marker, whatever earlier catalogue entries
/// its first bytes happen to match.
fn is_tar_header(head: &[u8]) -> bool {
    SIGNATURES
        .iter()
        .any(|signature| signature.name == FormatId::TAR && signature.matches(head))
}

/// Name of the file written for a non-tar payload: the source file name
/// with its last extension removed, or `<name>.out` when nothing remains.
pub(crate) fn output_name(source: &Path) -> PathBuf {
    let name = source
        .file_name()
        .map_or_else(|| OsString::from("stream"), OsString::from);
    let text = name.to_string_lossy();
    match text.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => PathBuf::from(stem),
        _ => {
            let mut out = name.clone();
            out.push(".out");
            PathBuf::from(out)
        }
    }
}

impl Handler for StreamHandler {
    fn extension(&self) -> &str {
        self.extension.as_str()
    }

    fn list(&self, source: &Path, fs: Option<&dyn FileSystem>) -> Result<Vec<EntryInfo>> {
        let (is_tar, mut payload) = self.open(source, fs)?;
        if is_tar {
            return common::list_tar(payload);
        }
        let size = io::copy(&mut payload, &mut io::sink())?;
        Ok(vec![EntryInfo::file(output_name(source), size)])
    }

    fn extract(
        &self,
        source: &Path,
        destination: &Path,
        fs: Option<&dyn FileSystem>,
    ) -> Result<ExtractionReport> {
        let (is_tar, mut payload) = self.open(source, fs)?;
        create_dir_all(destination)?;

        let mut report = ExtractionReport::new();
        if is_tar {
            debug!(codec = self.codec.name(), "payload is a tar archive");
            common::extract_tar(payload, destination, &mut report)?;
        } else {
            common::write_file(&mut payload, destination, &output_name(source), &mut report)?;
        }
        Ok(report)
    }
}
