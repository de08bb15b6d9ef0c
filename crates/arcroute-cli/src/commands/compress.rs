//! Compress command implementation.

use crate::cli::CompressArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use arcroute_core::creation::CompressFormat;
use arcroute_core::creation::compress;
use arcroute_core::creation::default_output_name;

/// Writes `<basename>.<format>` into the current directory.
pub fn execute(args: &CompressArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let format = CompressFormat::from(args.format);
    let output = add_archive_context(default_output_name(&args.path, format), &args.path)?;

    let report = add_archive_context(compress(&output, &args.path, format), &args.path)?;

    for warning in &report.warnings {
        formatter.format_warning(warning);
    }
    formatter.format_creation_result(&output, &report)?;

    Ok(())
}
