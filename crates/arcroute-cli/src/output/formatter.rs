//! Output formatter trait for CLI results.

use crate::commands::detect::Detection;
use anyhow::Result;
use arcroute_core::EntryInfo;
use arcroute_core::ExtractionReport;
use arcroute_core::creation::CreationReport;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format extraction result
    fn format_extraction_result(&self, destination: &Path, report: &ExtractionReport)
    -> Result<()>;

    /// Format archive creation result
    fn format_creation_result(&self, output_path: &Path, report: &CreationReport) -> Result<()>;

    /// Format entry paths, one per line
    fn format_listing_short(&self, entries: &[EntryInfo]) -> Result<()>;

    /// Format entries with type and size
    fn format_listing_long(&self, entries: &[EntryInfo], human_readable: bool) -> Result<()>;

    /// Format detected formats
    fn format_detections(&self, detections: &[Detection]) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data,
        }
    }
}
