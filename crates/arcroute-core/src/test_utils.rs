//! Test utilities for archive construction and dispatch testing.
//!
//! Provides in-memory archive builders plus a recording [`StubHandler`] and a
//! [`FailingFs`] that refuses every open, so tests can observe exactly what
//! the detector and orchestrator touch.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::ArchiveError;
use crate::EntryInfo;
use crate::ExtractionReport;
use crate::Handler;
use crate::Result;
use crate::fs::FileSystem;
use crate::fs::SourceReader;

/// Packs `(name, content)` pairs into an in-memory tar, each as a `0o644`
/// regular file.
///
/// # Examples
///
/// ```
/// use arcroute_core::detect_bytes;
/// use arcroute_core::test_utils::create_test_tar;
///
/// let tar = create_test_tar(vec![("docs/readme.md", b"# hi")]);
/// assert_eq!(detect_bytes(&tar).unwrap(), "tar");
/// ```
#[must_use]
pub fn create_test_tar(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(TarTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Packs `(name, content)` pairs into an in-memory zip, stored
/// uncompressed.
///
/// # Examples
///
/// ```
/// use arcroute_core::test_utils::create_test_zip;
///
/// let zip = create_test_zip(vec![("hello.txt", b"hello")]);
/// assert_eq!(&zip[..4], b"PK\x03\x04");
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Gzip-compresses `data`.
#[must_use]
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// In-memory tar with files, directories, symlinks and hostile names.
///
/// # Examples
///
/// ```
/// use arcroute_core::test_utils::TarTestBuilder;
///
/// let tar = TarTestBuilder::new()
///     .add_directory("site/")
///     .add_file("site/index.html", b"<html>")
///     .add_symlink("site/latest", "index.html")
///     .add_raw_file("../outside", b"x")
///     .build();
/// assert_eq!(tar.len() % 512, 0);
/// ```
pub struct TarTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarTestBuilder {
    /// Starts an empty archive.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    fn header(kind: tar::EntryType, mode: u32, size: usize) -> tar::Header {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(kind);
        header.set_mode(mode);
        header.set_size(size as u64);
        header
    }

    /// Adds a `0o644` regular file.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        let mut header = Self::header(tar::EntryType::Regular, 0o644, data.len());
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a regular file whose name goes into the header untouched, so
    /// `..` and absolute names survive the builder's own checks.
    #[must_use]
    pub fn add_raw_file(mut self, path: &str, data: &[u8]) -> Self {
        let mut header = Self::header(tar::EntryType::Regular, 0o644, data.len());
        let name = path.as_bytes();
        header.as_old_mut().name[..name.len()].copy_from_slice(name);
        header.set_cksum();
        self.builder.append(&header, data).unwrap();
        self
    }

    /// Adds a `0o755` directory.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let mut header = Self::header(tar::EntryType::Directory, 0o755, 0);
        self.builder
            .append_data(&mut header, path, io::empty())
            .unwrap();
        self
    }

    /// Adds a symlink pointing at `target`.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let mut header = Self::header(tar::EntryType::Symlink, 0o777, 0);
        header.set_link_name(target).unwrap();
        self.builder
            .append_data(&mut header, path, io::empty())
            .unwrap();
        self
    }

    /// Writes the end-of-archive marker and returns the bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }
}

impl Default for TarTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory zip whose entry names are stored exactly as given.
///
/// # Examples
///
/// ```
/// use arcroute_core::test_utils::ZipTestBuilder;
///
/// let zip = ZipTestBuilder::new()
///     .add_directory("site/")
///     .add_file("../escape.txt", b"x")
///     .build();
/// assert!(zip.starts_with(b"PK"));
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Starts an empty archive.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a regular file. The name is stored verbatim.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Writes the central directory and returns the bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler that records its calls and writes nothing.
///
/// `list` always returns a single `stub.txt` entry of 4 bytes. A handler
/// built with [`StubHandler::failing`] returns
/// `ArchiveError::InvalidArchive("stub failure")` from `extract`.
#[derive(Debug)]
pub struct StubHandler {
    extension: String,
    fail: bool,
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl StubHandler {
    /// Creates a stub registered under `extension`.
    #[must_use]
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a stub whose `extract` always fails.
    #[must_use]
    pub fn failing(extension: impl Into<String>) -> Self {
        Self {
            fail: true,
            ..Self::new(extension)
        }
    }

    /// Returns the `(source, destination)` pairs passed to `extract`.
    #[must_use]
    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Handler for StubHandler {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn list(&self, _source: &Path, _fs: Option<&dyn FileSystem>) -> Result<Vec<EntryInfo>> {
        Ok(vec![EntryInfo::file("stub.txt", 4)])
    }

    fn extract(
        &self,
        source: &Path,
        destination: &Path,
        _fs: Option<&dyn FileSystem>,
    ) -> Result<ExtractionReport> {
        self.calls
            .lock()
            .unwrap()
            .push((source.to_path_buf(), destination.to_path_buf()));
        if self.fail {
            return Err(ArchiveError::InvalidArchive("stub failure".into()));
        }
        Ok(ExtractionReport::new())
    }
}

/// Filesystem on which every open fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingFs;

impl FileSystem for FailingFs {
    fn open(&self, path: &Path) -> io::Result<SourceReader> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("open refused: {}", path.display()),
        ))
    }
}
