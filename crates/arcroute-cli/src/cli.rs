//! CLI argument parsing using clap.

use arcroute_core::creation::CompressFormat;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arcroute")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress a file or directory into an archive in the current directory
    Compress(CompressArgs),
    /// Extract archive contents
    Extract(ExtractArgs),
    /// List archive contents without extraction
    List(ListArgs),
    /// Print the detected format of each path
    Detect(DetectArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct CompressArgs {
    /// File or directory to compress
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Archive format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Zip)]
    pub format: FormatArg,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show entry type and size
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct DetectArgs {
    /// Files to inspect
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Archive formats accepted by `compress --format`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Zip,
    Tar,
    Gz,
    Bz2,
    Xz,
    Zst,
    #[value(name = "7z")]
    SevenZ,
}

impl From<FormatArg> for CompressFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Zip => Self::Zip,
            FormatArg::Tar => Self::Tar,
            FormatArg::Gz => Self::Gz,
            FormatArg::Bz2 => Self::Bz2,
            FormatArg::Xz => Self::Xz,
            FormatArg::Zst => Self::Zst,
            FormatArg::SevenZ => Self::SevenZ,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_arg_names_match_extensions() {
        for arg in FormatArg::value_variants() {
            let name = arg.to_possible_value().map(|v| v.get_name().to_string());
            assert_eq!(name.as_deref(), Some(CompressFormat::from(*arg).extension()));
        }
    }

    #[test]
    fn test_compress_defaults_to_zip() {
        let cli = Cli::try_parse_from(["arcroute", "compress", "photos"]).unwrap_or_else(|e| {
            panic!("parse failed: {e}");
        });
        match cli.command {
            Commands::Compress(args) => assert_eq!(args.format, FormatArg::Zip),
            _ => panic!("expected compress"),
        }
    }

    #[test]
    fn test_extract_output_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["arcroute", "extract", "a.zip"]).unwrap_or_else(|e| {
            panic!("parse failed: {e}");
        });
        match cli.command {
            Commands::Extract(args) => assert_eq!(args.output, PathBuf::from(".")),
            _ => panic!("expected extract"),
        }
    }
}
