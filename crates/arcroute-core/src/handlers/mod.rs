//! Built-in format handlers.
//!
//! | Format | Handler |
//! |--------|---------|
//! | `zip` | [`ZipHandler`] |
//! | `tar` | [`TarHandler`] |
//! | `gz`, `zz`, `bz2`, `xz`, `zst` | [`StreamHandler`] |
//! | `7z` | [`SevenZHandler`] |
//!
//! Formats the detector recognizes but no handler covers (`rar`, `br`,
//! `lz4`, `lz`, `s2`, `sz`) fail with
//! [`ArchiveError::UnsupportedFormat`](crate::ArchiveError::UnsupportedFormat).

mod common;
mod sevenz;
mod stream;
mod tar;
mod zip;

use std::sync::Arc;

use tracing::debug;

pub use self::sevenz::SevenZHandler;
pub use self::stream::StreamHandler;
pub use self::tar::TarHandler;
pub use self::zip::ZipHandler;
use crate::Handler;
use crate::codec::Codec;

/// Returns one instance of every built-in handler.
#[must_use]
pub fn builtin_handlers() -> Vec<Arc<dyn Handler>> {
    let mut handlers: Vec<Arc<dyn Handler>> = vec![
        Arc::new(ZipHandler),
        Arc::new(TarHandler),
        Arc::new(SevenZHandler),
    ];
    handlers.extend(
        Codec::ALL
            .into_iter()
            .map(|codec| Arc::new(StreamHandler::new(codec)) as Arc<dyn Handler>),
    );
    handlers
}

/// Registers the built-in handlers in the process-wide default registry.
///
/// Call once during startup, before the first extraction. Calling it again
/// replaces the built-ins with fresh instances and leaves other handlers
/// untouched.
pub fn register_builtin() {
    for handler in builtin_handlers() {
        debug!(extension = handler.extension(), "registering built-in handler");
        crate::register(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormatId;

    #[test]
    fn test_builtin_extensions() {
        let mut extensions: Vec<String> = builtin_handlers()
            .iter()
            .map(|h| h.extension().to_owned())
            .collect();
        extensions.sort();
        assert_eq!(extensions, ["7z", "bz2", "gz", "tar", "xz", "zip", "zst", "zz"]);
    }

    #[test]
    fn test_register_builtin_fills_default_registry() {
        register_builtin();
        let registry = crate::default_registry();
        for id in [FormatId::ZIP, FormatId::TAR, FormatId::GZ, FormatId::SEVEN_Z] {
            assert!(registry.get_handler(id.as_str()).is_some(), "{id}");
        }
        assert!(registry.get_handler(FormatId::RAR.as_str()).is_none());
    }
}
