//! The extraction orchestrator.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::ArchiveError;
use crate::ArchiveOptions;
use crate::EntryInfo;
use crate::ExtractionReport;
use crate::FormatId;
use crate::Handler;
use crate::HandlerRegistry;
use crate::Result;
use crate::formats::detect::detect;
use crate::fs::FileSystem;

/// Composes detection and handler lookup to serve extraction requests.
///
/// An `Archiver` owns a private [`HandlerRegistry`] seeded from its
/// [`ArchiveOptions`], so it can be shared across threads and registered
/// into while other threads extract.
///
/// # Examples
///
/// ```no_run
/// use arcroute_core::ArchiveOptions;
/// use arcroute_core::Archiver;
/// use arcroute_core::handlers::ZipHandler;
/// use std::sync::Arc;
///
/// let archiver = Archiver::new(ArchiveOptions::new().with_handler(Arc::new(ZipHandler)));
/// let report = archiver.extract("bundle.zip", "out")?;
/// println!("extracted {} files", report.files_extracted);
/// # Ok::<(), arcroute_core::ArchiveError>(())
/// ```
#[derive(Debug, Default)]
pub struct Archiver {
    root: Option<Arc<dyn FileSystem>>,
    handlers: HandlerRegistry,
}

impl Archiver {
    /// Creates an orchestrator from `options`.
    #[must_use]
    pub fn new(options: ArchiveOptions) -> Self {
        let handlers = HandlerRegistry::new();
        handlers.register_all(options.handlers.into_values());
        Self {
            root: options.root,
            handlers,
        }
    }

    /// Creates an orchestrator seeded from the process-wide default
    /// handlers, reading through `root` when given.
    #[must_use]
    pub fn with_defaults(root: Option<Arc<dyn FileSystem>>) -> Self {
        let mut options = ArchiveOptions::new().with_default_handlers();
        options.root = root;
        Self::new(options)
    }

    /// Registers an additional handler on this instance only.
    pub fn register(&self, handler: Arc<dyn Handler>) -> &Self {
        self.handlers.register(handler);
        self
    }

    /// Returns the instance registry.
    #[must_use]
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Returns the configured filesystem root.
    #[must_use]
    pub fn root(&self) -> Option<&dyn FileSystem> {
        self.root.as_deref()
    }

    /// Detects the format of `source` through the configured root.
    pub fn detect<P: AsRef<Path>>(&self, source: P) -> Result<FormatId> {
        detect(source, self.root())
    }

    /// Returns the handler for `format`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::UnsupportedFormat`] if none is registered.
    pub fn handler_for(&self, format: &FormatId) -> Result<Arc<dyn Handler>> {
        self.handlers
            .get_handler(format.as_str())
            .ok_or_else(|| ArchiveError::UnsupportedFormat(format.clone()))
    }

    fn resolve(&self, source: &Path) -> Result<Arc<dyn Handler>> {
        let format = self.detect(source)?;
        debug!(source = %source.display(), format = %format, "dispatching");
        self.handler_for(&format)
    }

    /// Extracts `source` into `destination`.
    ///
    /// Detection and handler errors are returned unchanged. The orchestrator
    /// itself writes nothing; all side effects come from the handler.
    ///
    /// # Errors
    ///
    /// - any detection error ([`ArchiveError::Io`],
    ///   [`ArchiveError::EmptyInput`], [`ArchiveError::UnknownFormat`])
    /// - [`ArchiveError::UnsupportedFormat`] if no handler is registered for
    ///   the detected format
    /// - whatever the handler returns
    pub fn extract<P, Q>(&self, source: P, destination: Q) -> Result<ExtractionReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let source = source.as_ref();
        let handler = self.resolve(source)?;

        let start = Instant::now();
        let mut report = handler.extract(source, destination.as_ref(), self.root())?;
        report.duration = start.elapsed();
        Ok(report)
    }

    /// Lists the entries of `source` using the handler for its format.
    ///
    /// # Errors
    ///
    /// Same as [`Self::extract`].
    pub fn list<P: AsRef<Path>>(&self, source: P) -> Result<Vec<EntryInfo>> {
        let source = source.as_ref();
        let handler = self.resolve(source)?;
        handler.list(source, self.root())
    }
}
