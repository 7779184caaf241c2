use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Filter spreadsheet rows by exact column matches",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze value distributions, filter matching rows, and save them to a new workbook
    Run(RunArgs),
    /// Report value distributions for one or more columns
    Analyze(AnalyzeArgs),
    /// List the columns of a sheet with their positions
    Columns(SourceArgs),
    /// Write a sample issue-tracker workbook
    Sample(SampleArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// YAML configuration file; command-line options override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Input workbook (.xlsx, .xls, .xlsb, .ods)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// Worksheet to read
    #[arg(short = 's', long = "sheet")]
    pub sheet: Option<String>,
    /// Refuse date and error cells instead of falling back to a typed read
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Output workbook for matching rows (overwritten when matches exist)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Match condition `column=value`; repeat to require several (replaces configured conditions)
    #[arg(short = 'w', long = "where", action = clap::ArgAction::Append)]
    pub conditions: Vec<String>,
    /// Additional columns that must be present
    #[arg(long = "require", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub require: Vec<String>,
    /// Columns to report distributions for (defaults to the condition columns)
    #[arg(short = 'C', long = "columns", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub columns: Vec<String>,
    /// Maximum distinct values to display per column (0 = all)
    #[arg(long)]
    pub top: Option<usize>,
    /// Number of matching rows to preview (0 disables the preview)
    #[arg(long)]
    pub preview: Option<usize>,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Columns to report distributions for (defaults to the condition columns)
    #[arg(short = 'C', long = "columns", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub columns: Vec<String>,
    /// Maximum distinct values to display per column (0 = all)
    #[arg(long)]
    pub top: Option<usize>,
    /// Emit the distributions as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Destination workbook
    #[arg(short = 'o', long = "output", default_value = crate::config::DEFAULT_INPUT)]
    pub output: PathBuf,
}
