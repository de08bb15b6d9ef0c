//! Tests for the process-wide default registry.
//!
//! Kept in their own test binary so the global state starts empty.

#![allow(clippy::unwrap_used)]

use arcroute_core::ArchiveError;
use arcroute_core::Archiver;
use arcroute_core::default_handlers;
use arcroute_core::default_registry;
use arcroute_core::extract;
use arcroute_core::handlers::register_builtin;
use arcroute_core::register;
use arcroute_core::test_utils::StubHandler;
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_global_registration() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 25;

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    register(Arc::new(StubHandler::new(format!("global-{t}-{i}"))));
                    let _ = default_handlers();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let registered = default_registry()
        .extensions()
        .into_iter()
        .filter(|ext| ext.starts_with("global-"))
        .count();
    assert_eq!(registered, THREADS * PER_THREAD);
}

#[test]
fn test_snapshot_is_taken_at_construction() {
    register(Arc::new(StubHandler::new("snap-before")));
    let archiver = Archiver::with_defaults(None);
    register(Arc::new(StubHandler::new("snap-after")));

    assert!(archiver.handlers().get_handler("snap-before").is_some());
    assert!(archiver.handlers().get_handler("snap-after").is_none());
    assert!(default_registry().get_handler("snap-after").is_some());
}

#[test]
fn test_builtin_registration_enables_top_level_extract() {
    register_builtin();
    let err = extract("payload.rar", "never-created", None).unwrap_err();
    assert!(matches!(err, ArchiveError::UnsupportedFormat(_)));
    assert!(default_registry().get_handler("zip").is_some());
}
