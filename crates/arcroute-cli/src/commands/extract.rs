//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::Spinner;
use anyhow::Result;
use arcroute_core::extract;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter, silent: bool) -> Result<()> {
    // Spinner only on a TTY and when nothing else owns stdout
    let spinner = (!silent && Spinner::should_show())
        .then(|| Spinner::new(format!("Extracting {}", args.archive.display())));

    let result = extract(&args.archive, &args.output, None);
    drop(spinner);

    let report = add_archive_context(result, &args.archive)?;
    formatter.format_extraction_result(&args.output, &report)?;

    Ok(())
}
