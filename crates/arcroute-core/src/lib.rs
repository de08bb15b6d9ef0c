//! Archive format detection and pluggable extraction dispatch.
//!
//! `arcroute-core` identifies the format of an archive or compressed file
//! (by extension, or by sniffing its first 512 bytes against a signature
//! table) and routes extraction to the [`Handler`] registered for that
//! format.
//!
//! - [`detect`]: extension fast path, then content sniffing
//! - [`HandlerRegistry`]: concurrency-safe format → handler map, with a
//!   process-wide default instance filled through [`register`]
//! - [`Archiver`]: orchestrator configured with [`ArchiveOptions`]
//! - [`handlers`]: built-in zip, tar, 7z and single-stream handlers
//! - [`creation`]: packing files and directories into archives
//!
//! # Examples
//!
//! ```no_run
//! use arcroute_core::extract;
//! use arcroute_core::handlers::register_builtin;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! register_builtin();
//! let report = extract("archive.tar.gz", "/output/dir", None)?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod codec;
pub mod config;
pub mod creation;
pub mod error;
pub mod formats;
pub mod fs;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod report;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::extract;
pub use api::list;
pub use archive::Archiver;
pub use config::ArchiveOptions;
pub use error::ArchiveError;
pub use error::Result;
pub use formats::FormatId;
pub use formats::detect;
pub use formats::detect_bytes;
pub use formats::detect_reader;
pub use formats::extension_hint;
pub use handler::EntryInfo;
pub use handler::EntryKind;
pub use handler::Handler;
pub use registry::HandlerRegistry;
pub use registry::default_handlers;
pub use registry::default_registry;
pub use registry::register;
pub use report::ExtractionReport;
