//! Detect command implementation.

use crate::cli::DetectArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use arcroute_core::default_registry;
use arcroute_core::detect;
use std::path::PathBuf;

/// One detected path, as handed to the formatter.
#[derive(Debug)]
pub struct Detection {
    pub path: PathBuf,
    pub format: String,
    pub supported: bool,
}

/// Detects every path before printing, so one failure aborts the command.
pub fn execute(args: &DetectArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let registry = default_registry();
    let mut detections = Vec::with_capacity(args.paths.len());

    for path in &args.paths {
        let format = add_archive_context(detect(path, None), path)?;
        detections.push(Detection {
            path: path.clone(),
            supported: registry.get_handler(format.as_str()).is_some(),
            format: format.to_string(),
        });
    }

    formatter.format_detections(&detections)
}
