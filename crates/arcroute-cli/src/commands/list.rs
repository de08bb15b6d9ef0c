//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use arcroute_core::list;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let entries = add_archive_context(list(&args.archive, None), &args.archive)?;

    if args.long {
        formatter.format_listing_long(&entries, args.human_readable)?;
    } else {
        formatter.format_listing_short(&entries)?;
    }

    Ok(())
}
