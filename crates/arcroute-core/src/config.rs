//! Orchestrator configuration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::Handler;
use crate::fs::FileSystem;
use crate::registry::default_handlers;

/// Configuration for an [`Archiver`](crate::Archiver).
///
/// The two recognized options are the filesystem root used for every read
/// the instance performs, and the dispatch table seeded into the instance's
/// private registry.
///
/// # Examples
///
/// ```
/// use arcroute_core::ArchiveOptions;
/// use arcroute_core::fs::MemFs;
/// use arcroute_core::handlers::TarHandler;
/// use std::sync::Arc;
///
/// let options = ArchiveOptions::default()
///     .with_root(Arc::new(MemFs::new()))
///     .with_handler(Arc::new(TarHandler));
/// assert!(options.root.is_some());
/// assert!(options.handlers.contains_key("tar"));
/// ```
#[derive(Clone, Default)]
pub struct ArchiveOptions {
    /// Filesystem used to read sources; `None` means the real filesystem.
    pub root: Option<Arc<dyn FileSystem>>,

    /// Handlers keyed by lowercased extension.
    pub handlers: HashMap<String, Arc<dyn Handler>>,
}

impl ArchiveOptions {
    /// Creates empty options: real filesystem, no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filesystem root.
    #[must_use]
    pub fn with_root(mut self, root: Arc<dyn FileSystem>) -> Self {
        self.root = Some(root);
        self
    }

    /// Adds one handler. Handlers with an empty extension are ignored and a
    /// later handler replaces an earlier one with the same extension,
    /// compared without ASCII case.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        let extension = handler.extension();
        if !extension.is_empty() {
            self.handlers.insert(extension.to_ascii_lowercase(), handler);
        }
        self
    }

    /// Adds a batch of handlers with the same rules as [`Self::with_handler`].
    #[must_use]
    pub fn with_handlers<I>(self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Handler>>,
    {
        handlers
            .into_iter()
            .fold(self, |options, handler| options.with_handler(handler))
    }

    /// Adds a snapshot of the process-wide default handlers.
    #[must_use]
    pub fn with_default_handlers(self) -> Self {
        self.with_handlers(default_handlers())
    }
}

impl fmt::Debug for ArchiveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut extensions: Vec<&String> = self.handlers.keys().collect();
        extensions.sort_unstable();
        f.debug_struct("ArchiveOptions")
            .field("root", &self.root)
            .field("handlers", &extensions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StubHandler;

    #[test]
    fn test_with_handler_skips_empty_extension() {
        let options = ArchiveOptions::new().with_handler(Arc::new(StubHandler::new("")));
        assert!(options.handlers.is_empty());
    }

    #[test]
    fn test_with_handlers_overrides_in_order() {
        let options = ArchiveOptions::new().with_handlers([
            Arc::new(StubHandler::new("gz")) as Arc<dyn Handler>,
            Arc::new(StubHandler::failing("gz")),
        ]);
        assert_eq!(options.handlers.len(), 1);
    }

    #[test]
    fn test_with_handler_folds_extension_case() {
        let options = ArchiveOptions::new()
            .with_handler(Arc::new(StubHandler::new("TGZ")))
            .with_handler(Arc::new(StubHandler::failing("tgz")));
        assert_eq!(options.handlers.len(), 1);
        assert!(options.handlers.contains_key("tgz"));
    }

    #[test]
    fn test_debug_lists_extensions() {
        let options = ArchiveOptions::new()
            .with_handler(Arc::new(StubHandler::new("b")))
            .with_handler(Arc::new(StubHandler::new("a")));
        let debug = format!("{options:?}");
        assert!(debug.contains(r#"["a", "b"]"#));
    }
}
