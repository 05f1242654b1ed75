use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "globalcursor",
    version = globalcursor_core::version(),
    about = "Prints the global mouse cursor position",
)]
pub struct Args {
    /// Specify custom configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Validate configuration and exit without polling
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Use default configuration and ignore config files
    #[arg(long = "defaults")]
    pub use_defaults: bool,

    /// Milliseconds between refreshes, overrides the config file
    #[arg(short = 'i', long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// X11 display to query instead of $DISPLAY
    #[arg(long = "display", value_name = "NAME")]
    pub display: Option<String>,

    /// Stop after this many refreshes
    #[arg(short = 'n', long = "count", value_name = "N")]
    pub count: Option<u64>,

    /// Only print the position when it changes
    #[arg(long = "changes-only")]
    pub changes_only: bool,

    /// Only log info, warnings and errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log everything, including trace output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}
