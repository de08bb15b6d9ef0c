//! Handler registries.
//!
//! A [`HandlerRegistry`] maps a format identifier to the [`Handler`] that
//! extracts it. Every read and write takes the same exclusive lock, so
//! registration and lookup never observe a partially updated map.
//!
//! Two scopes exist:
//!
//! - the process-wide default registry, filled through [`register`] by format
//!   implementations during startup and read through [`default_handlers`];
//! - instance registries owned by an [`Archiver`](crate::Archiver), seeded
//!   from [`ArchiveOptions`](crate::ArchiveOptions).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use tracing::trace;

use crate::Handler;

/// Concurrency-safe mapping from format identifier to handler.
///
/// # Examples
///
/// ```
/// use arcroute_core::HandlerRegistry;
/// use arcroute_core::handlers::ZipHandler;
/// use std::sync::Arc;
///
/// let registry = HandlerRegistry::new();
/// registry.register(Arc::new(ZipHandler));
/// assert!(registry.get_handler("zip").is_some());
/// assert!(registry.get_handler("rar").is_none());
/// ```
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Mutex<HashMap<String, Arc<dyn Handler>>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<dyn Handler>>> {
        // Every mutation is a single insert, so a poisoned map is consistent.
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `handler` under its lowercased extension, replacing any
    /// previous handler for the same extension.
    ///
    /// Handlers reporting an empty extension are ignored.
    pub fn register(&self, handler: Arc<dyn Handler>) {
        let extension = handler.extension();
        if extension.is_empty() {
            trace!("ignoring handler with empty extension");
            return;
        }
        let extension = extension.to_ascii_lowercase();
        trace!(extension = %extension, "registering handler");
        self.lock().insert(extension, handler);
    }

    /// Registers every handler from `handlers`, in order.
    pub fn register_all<I>(&self, handlers: I)
    where
        I: IntoIterator<Item = Arc<dyn Handler>>,
    {
        for handler in handlers {
            self.register(handler);
        }
    }

    /// Returns the handler registered for `extension`, ignoring ASCII case.
    #[must_use]
    pub fn get_handler(&self, extension: &str) -> Option<Arc<dyn Handler>> {
        self.lock().get(&extension.to_ascii_lowercase()).cloned()
    }

    /// Returns a snapshot of all registered handlers in no particular order.
    #[must_use]
    pub fn list_handlers(&self) -> Vec<Arc<dyn Handler>> {
        self.lock().values().cloned().collect()
    }

    /// Returns the registered extensions, sorted.
    #[must_use]
    pub fn extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self.lock().keys().cloned().collect();
        extensions.sort_unstable();
        extensions
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

static DEFAULT_REGISTRY: LazyLock<HandlerRegistry> = LazyLock::new(HandlerRegistry::new);

/// Returns the process-wide default registry.
#[must_use]
pub fn default_registry() -> &'static HandlerRegistry {
    &DEFAULT_REGISTRY
}

/// Registers `handler` in the process-wide default registry.
///
/// Format implementations call this during startup, before the first
/// extraction request.
pub fn register(handler: Arc<dyn Handler>) {
    DEFAULT_REGISTRY.register(handler);
}

/// Returns a snapshot of the handlers in the default registry.
#[must_use]
pub fn default_handlers() -> Vec<Arc<dyn Handler>> {
    DEFAULT_REGISTRY.list_handlers()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::StubHandler;
    use std::thread;

    #[test]
    fn test_empty_extension_is_ignored() {
        let registry = HandlerRegistry::new();
        registry.register(Arc::new(StubHandler::new("")));
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = HandlerRegistry::new();
        let first = Arc::new(StubHandler::new("zip"));
        let second = Arc::new(StubHandler::new("zip"));
        registry.register(first.clone());
        registry.register(second.clone());

        assert_eq!(registry.len(), 1);
        let found = registry.get_handler("zip").unwrap();
        let second_dyn: Arc<dyn Handler> = second;
        assert!(Arc::ptr_eq(&found, &second_dyn));
    }

    #[test]
    fn test_extension_case_is_folded() {
        let registry = HandlerRegistry::new();
        let upper = Arc::new(StubHandler::new("ZIP"));
        registry.register(upper.clone());

        assert_eq!(registry.extensions(), vec!["zip"]);
        let upper_dyn: Arc<dyn Handler> = upper;
        assert!(Arc::ptr_eq(&registry.get_handler("zip").unwrap(), &upper_dyn));
        assert!(registry.get_handler("Zip").is_some());

        registry.register(Arc::new(StubHandler::new("zip")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_handler_is_none() {
        let registry = HandlerRegistry::new();
        assert!(registry.get_handler("zip").is_none());
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let registry = HandlerRegistry::new();
        registry.register(Arc::new(StubHandler::new("a")));
        let snapshot = registry.list_handlers();
        registry.register(Arc::new(StubHandler::new("b")));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.extensions(), vec!["a", "b"]);
    }

    #[test]
    fn test_concurrent_registration_loses_nothing() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 50;

        let registry = Arc::new(HandlerRegistry::new());
        let workers: Vec<_> = (0..THREADS)
            .map(|t| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        registry.register(Arc::new(StubHandler::new(format!("fmt-{t}-{i}"))));
                        let _ = registry.get_handler("fmt-0-0");
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(registry.list_handlers().len(), THREADS * PER_THREAD);
    }
}
