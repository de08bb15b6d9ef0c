//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use crate::commands::detect::Detection;
use anyhow::Result;
use arcroute_core::EntryInfo;
use arcroute_core::EntryKind;
use arcroute_core::ExtractionReport;
use arcroute_core::creation::CreationReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

#[derive(Serialize)]
struct EntryOutput {
    path: String,
    size: u64,
    kind: &'static str,
}

impl From<&EntryInfo> for EntryOutput {
    fn from(entry: &EntryInfo) -> Self {
        Self {
            path: entry.path.display().to_string(),
            size: entry.size,
            kind: match entry.kind {
                EntryKind::File => "file",
                EntryKind::Directory => "directory",
                EntryKind::Symlink => "symlink",
                EntryKind::Other => "other",
            },
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn listing(entries: &[EntryInfo]) -> Result<()> {
        let data: Vec<EntryOutput> = entries.iter().map(EntryOutput::from).collect();
        Self::output(&JsonOutput::success("list", data))
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(
        &self,
        destination: &Path,
        report: &ExtractionReport,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput {
            destination: String,
            files_extracted: usize,
            directories_created: usize,
            bytes_written: u64,
            files_skipped: usize,
            files_renamed: usize,
            duration_ms: u128,
            warnings: Vec<String>,
        }

        let data = ExtractionOutput {
            destination: destination.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            files_skipped: report.files_skipped,
            files_renamed: report.files_renamed,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        };

        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_creation_result(&self, output_path: &Path, report: &CreationReport) -> Result<()> {
        #[derive(Serialize)]
        struct CreationOutput {
            output_path: String,
            files_added: usize,
            directories_added: usize,
            bytes_written: u64,
            bytes_compressed: u64,
            compression_ratio: f64,
            files_skipped: usize,
            duration_ms: u128,
            warnings: Vec<String>,
        }

        let data = CreationOutput {
            output_path: output_path.display().to_string(),
            files_added: report.files_added,
            directories_added: report.directories_added,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            files_skipped: report.files_skipped,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        };

        Self::output(&JsonOutput::success("compress", data))
    }

    fn format_listing_short(&self, entries: &[EntryInfo]) -> Result<()> {
        Self::listing(entries)
    }

    fn format_listing_long(&self, entries: &[EntryInfo], _human_readable: bool) -> Result<()> {
        Self::listing(entries)
    }

    fn format_detections(&self, detections: &[Detection]) -> Result<()> {
        #[derive(Serialize)]
        struct DetectionOutput<'a> {
            path: String,
            format: &'a str,
            supported: bool,
        }

        let data: Vec<DetectionOutput<'_>> = detections
            .iter()
            .map(|d| DetectionOutput {
                path: d.path.display().to_string(),
                format: &d.format,
                supported: d.supported,
            })
            .collect();

        Self::output(&JsonOutput::success("detect", data))
    }

    // Warnings are carried in the result payload.
    fn format_warning(&self, _message: &str) {}
}
