//! Filesystem abstraction used for every read performed on archive sources.
//!
//! Detection and the built-in handlers never call `std::fs` directly to open
//! a source; they go through a [`FileSystem`] so that callers can sandbox
//! access to a directory ([`DirFs`]) or serve archives from memory
//! ([`MemFs`]). Passing `None` means the real filesystem ([`OsFs`]).

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

/// Readable and seekable byte source.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Boxed source handle returned by [`FileSystem::open`].
pub type SourceReader = Box<dyn ReadSeek + Send>;

/// Read-only filesystem capability.
pub trait FileSystem: Send + Sync + fmt::Debug {
    /// Opens the file at `path` for reading.
    ///
    /// The returned handle is released when dropped.
    fn open(&self, path: &Path) -> io::Result<SourceReader>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl FileSystem for OsFs {
    fn open(&self, path: &Path) -> io::Result<SourceReader> {
        Ok(Box::new(File::open(path)?))
    }
}

/// A filesystem rooted at a directory.
///
/// Paths are resolved relative to the root; absolute paths and `..`
/// components are refused so that reads cannot leave the root.
///
/// # Examples
///
/// ```no_run
/// use arcroute_core::fs::DirFs;
/// use arcroute_core::fs::FileSystem;
/// use std::path::Path;
///
/// let fs = DirFs::new("/srv/uploads");
/// let reader = fs.open(Path::new("incoming/archive.zip"))?;
/// assert!(fs.open(Path::new("../etc/passwd")).is_err());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    /// Creates a filesystem rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path escapes filesystem root: {}", path.display()),
            ));
        }
        Ok(self.root.join(path))
    }
}

impl FileSystem for DirFs {
    fn open(&self, path: &Path) -> io::Result<SourceReader> {
        let resolved = self.resolve(path)?;
        Ok(Box::new(File::open(resolved)?))
    }
}

/// In-memory filesystem, mainly for tests and embedded archives.
///
/// # Examples
///
/// ```
/// use arcroute_core::fs::FileSystem;
/// use arcroute_core::fs::MemFs;
/// use std::io::Read;
/// use std::path::Path;
///
/// let fs = MemFs::new().with_file("hello.txt", b"hi".to_vec());
/// let mut content = String::new();
/// fs.open(Path::new("hello.txt"))?.read_to_string(&mut content)?;
/// assert_eq!(content, "hi");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    files: HashMap<PathBuf, Arc<[u8]>>,
}

impl MemFs {
    /// Creates an empty in-memory filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    #[must_use]
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P, data: Vec<u8>) -> Self {
        self.files.insert(path.into(), Arc::from(data));
        self
    }

    /// Returns the number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no files are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileSystem for MemFs {
    fn open(&self, path: &Path) -> io::Result<SourceReader> {
        let data = self.files.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )
        })?;
        Ok(Box::new(Cursor::new(Arc::clone(data))))
    }
}

/// Opens `path` through `fs`, falling back to the real filesystem.
pub fn open_source(path: &Path, fs: Option<&dyn FileSystem>) -> io::Result<SourceReader> {
    match fs {
        Some(fs) => fs.open(path),
        None => OsFs.open(path),
    }
}
