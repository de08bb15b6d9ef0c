//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::commands::detect::Detection;
use anyhow::Result;
use arcroute_core::EntryInfo;
use arcroute_core::EntryKind;
use arcroute_core::ExtractionReport;
use arcroute_core::creation::CreationReport;
use console::Term;
use console::style;
use std::fmt::Display;
use std::path::Path;

/// Width of the label column in result summaries.
const LABEL_WIDTH: usize = 18;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    /// Binary-prefixed size with one decimal.
    fn format_size(bytes: u64) -> String {
        const UNITS: [&str; 3] = ["KB", "MB", "GB"];

        if bytes < 1024 {
            return format!("{bytes} B");
        }
        let mut value = bytes as f64 / 1024.0;
        let mut unit = 0;
        while value >= 1024.0 && unit + 1 < UNITS.len() {
            value /= 1024.0;
            unit += 1;
        }
        format!("{value:.1} {}", UNITS[unit])
    }

    /// Decimal count with `,` thousands separators.
    fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped
    }

    const fn kind_char(kind: EntryKind) -> char {
        match kind {
            EntryKind::File => '-',
            EntryKind::Directory => 'd',
            EntryKind::Symlink => 'l',
            EntryKind::Other => '?',
        }
    }

    // Write errors (closed pipe) are ignored.
    fn line(&self, text: impl AsRef<str>) {
        let _ = self.term.write_line(text.as_ref());
    }

    fn field(&self, label: &str, value: impl Display) {
        self.line(format!("  {:<width$}{value}", format!("{label}:"), width = LABEL_WIDTH));
    }

    fn headline(&self, message: &str) {
        if self.use_colors {
            self.line(format!("{} {message}", style("✓").green().bold()));
        } else {
            self.line(message);
        }
    }

    fn warnings(&self, warnings: &[String]) {
        self.line("");
        if self.use_colors {
            self.line(style("Warnings:").yellow().bold().to_string());
        } else {
            self.line("Warnings:");
        }
        for warning in warnings {
            self.line(format!("  - {warning}"));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(
        &self,
        destination: &Path,
        report: &ExtractionReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Extraction complete: {}", destination.display()));
        self.field("Files extracted", Self::format_number(report.files_extracted));
        self.field("Directories", Self::format_number(report.directories_created));
        self.field("Total size", Self::format_size(report.bytes_written));
        if report.files_renamed > 0 {
            self.field("Files renamed", report.files_renamed);
        }
        if report.files_skipped > 0 {
            self.field("Files skipped", report.files_skipped);
        }
        if self.verbose {
            self.field("Duration", format!("{:?}", report.duration));
        }
        if self.verbose && report.has_warnings() {
            self.warnings(&report.warnings);
        }

        Ok(())
    }

    fn format_creation_result(&self, output_path: &Path, report: &CreationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Archive created: {}", output_path.display()));
        self.field("Files added", Self::format_number(report.files_added));
        self.field("Directories", Self::format_number(report.directories_added));
        self.field("Total size", Self::format_size(report.bytes_written));
        if report.bytes_compressed > 0 {
            self.field("Archive size", Self::format_size(report.bytes_compressed));
            self.field("Ratio", format!("{:.2}", report.compression_ratio()));
        }
        if report.files_skipped > 0 {
            self.field("Files skipped", report.files_skipped);
        }
        if self.verbose {
            self.field("Duration", format!("{:?}", report.duration));
        }

        Ok(())
    }

    fn format_listing_short(&self, entries: &[EntryInfo]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in entries {
            self.line(entry.path.display().to_string());
        }

        Ok(())
    }

    fn format_listing_long(&self, entries: &[EntryInfo], human_readable: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in entries {
            let size = if human_readable {
                Self::format_size(entry.size)
            } else {
                entry.size.to_string()
            };
            self.line(format!(
                "{} {size:>10}  {}",
                Self::kind_char(entry.kind),
                entry.path.display()
            ));
        }

        let total = entries.iter().fold(0u64, |acc, e| acc.saturating_add(e.size));
        self.line("");
        self.line(format!(
            "Total: {} entries, {}",
            Self::format_number(entries.len()),
            Self::format_size(total)
        ));

        Ok(())
    }

    fn format_detections(&self, detections: &[Detection]) -> Result<()> {
        for detection in detections {
            let format = if detection.supported || !self.use_colors {
                detection.format.clone()
            } else {
                style(&detection.format).yellow().to_string()
            };

            if self.verbose && !detection.supported {
                self.line(format!("{}: {format} (no handler)", detection.path.display()));
            } else {
                self.line(format!("{}: {format}", detection.path.display()));
            }
        }

        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            self.line(format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            self.line(format!("WARNING: {message}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(HumanFormatter::format_size(0), "0 B");
        assert_eq!(HumanFormatter::format_size(1023), "1023 B");
        assert_eq!(HumanFormatter::format_size(1024), "1.0 KB");
        assert_eq!(HumanFormatter::format_size(1536), "1.5 KB");
        assert_eq!(HumanFormatter::format_size(1536 * 1024), "1.5 MB");
        assert_eq!(HumanFormatter::format_size(1024 * 1024 * 1024), "1.0 GB");
        assert_eq!(HumanFormatter::format_size(4096 * 1024 * 1024 * 1024), "4096.0 GB");
    }

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(123_456), "123,456");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_kind_char() {
        assert_eq!(HumanFormatter::kind_char(EntryKind::File), '-');
        assert_eq!(HumanFormatter::kind_char(EntryKind::Directory), 'd');
        assert_eq!(HumanFormatter::kind_char(EntryKind::Symlink), 'l');
        assert_eq!(HumanFormatter::kind_char(EntryKind::Other), '?');
    }
}
