//! Convenience entry points over the default registry.

use std::path::Path;
use std::sync::Arc;

use crate::Archiver;
use crate::EntryInfo;
use crate::ExtractionReport;
use crate::Result;
use crate::fs::FileSystem;

/// Extracts `source` into `destination` using the default handlers.
///
/// Builds an [`Archiver`] seeded from a snapshot of the process-wide
/// registry, so handlers registered after this call starts are not seen.
///
/// # Errors
///
/// Returns any detection error, [`ArchiveError::UnsupportedFormat`] if no
/// default handler covers the detected format, or the handler's error.
///
/// [`ArchiveError::UnsupportedFormat`]: crate::ArchiveError::UnsupportedFormat
///
/// # Examples
///
/// ```no_run
/// use arcroute_core::extract;
/// use arcroute_core::handlers::register_builtin;
///
/// register_builtin();
/// let report = extract("release.tar.gz", "/tmp/release", None)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok::<(), arcroute_core::ArchiveError>(())
/// ```
pub fn extract<P, Q>(
    source: P,
    destination: Q,
    fs: Option<Arc<dyn FileSystem>>,
) -> Result<ExtractionReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    Archiver::with_defaults(fs).extract(source, destination)
}

/// Lists the entries of `source` using the default handlers.
///
/// # Errors
///
/// Same as [`extract`].
pub fn list<P: AsRef<Path>>(source: P, fs: Option<Arc<dyn FileSystem>>) -> Result<Vec<EntryInfo>> {
    Archiver::with_defaults(fs).list(source)
}
