//! CLI argument definitions for the FMEA extractor.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use fmea_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "fmea",
    version,
    about = "Extract structured records from PFMEA and Control Plan worksheets",
    long_about = "Extract structured records from AIAG-VDA PFMEA and Control Plan worksheets.\n\n\
                  Reads xlsx/xls/ods workbooks or delimited text, flattens multi-row\n\
                  headers and derives Action Priority from S/O/D ratings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract records from a worksheet.
    Parse(ParseArgs),

    /// Classify one Severity/Occurrence/Detection triple.
    Classify(ClassifyArgs),

    /// List the available templates.
    Templates(TemplatesArgs),

    /// Print the AIAG-VDA rating guidance.
    Ratings,

    /// Extract the failure-effects list.
    Effects(EffectsArgs),
}

#[derive(Args)]
pub struct ParseArgs {
    /// Workbook (xlsx, xlsm, xlsb, xls, ods) or delimited text file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Worksheet name (default: the template's sheet).
    #[arg(long = "sheet", value_name = "NAME", conflicts_with = "sheet_index")]
    pub sheet: Option<String>,

    /// Worksheet position, 0-based.
    #[arg(long = "sheet-index", value_name = "N")]
    pub sheet_index: Option<usize>,

    /// Header rows, 0-based and comma separated (default: the template's rows).
    #[arg(long = "header-rows", value_name = "ROWS", value_delimiter = ',')]
    pub header_rows: Option<Vec<usize>>,

    /// Template id (default: detect from the header).
    #[arg(long = "template", value_name = "ID")]
    pub template: Option<String>,

    /// JSON file with additional template definitions.
    #[arg(long = "templates", value_name = "FILE")]
    pub templates: Option<PathBuf>,

    /// CSV file with a custom Action Priority matrix.
    #[arg(long = "ap-table", value_name = "FILE")]
    pub ap_table: Option<PathBuf>,

    /// Leave blank priority cells empty instead of deriving them.
    #[arg(long = "no-derive-ap")]
    pub no_derive_ap: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: OutputFormatArg,

    /// Print JSON on a single line.
    #[arg(long = "compact")]
    pub compact: bool,
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Severity rating (1-10).
    #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
    pub severity: u8,

    /// Occurrence rating (1-10).
    #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
    pub occurrence: u8,

    /// Detection rating (1-10).
    #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
    pub detection: u8,

    /// CSV file with a custom Action Priority matrix.
    #[arg(long = "ap-table", value_name = "FILE")]
    pub ap_table: Option<PathBuf>,
}

#[derive(Args)]
pub struct TemplatesArgs {
    /// JSON file with additional template definitions.
    #[arg(long = "templates", value_name = "FILE")]
    pub templates: Option<PathBuf>,
}

#[derive(Args)]
pub struct EffectsArgs {
    /// Workbook holding the failure-effects list.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Worksheet name (default: LIST).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Print JSON on a single line.
    #[arg(long = "compact")]
    pub compact: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Json,
    Table,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
