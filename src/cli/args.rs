use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "suiterun")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Test files or directories to run. Runs the configured test root when omitted
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Specify a custom config path to use with this instance
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Skip mirroring resource trees into the build output
    #[arg(long)]
    pub no_sync: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}
