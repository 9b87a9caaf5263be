use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::io_utils;

#[derive(Debug, Parser)]
#[command(author, version, about = "Inspect tabular sources before binding them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Preview the first rows of a CSV file as typed cells
    Preview(PreviewArgs),
    /// Check that every cell of a CSV file parses under a schema
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input CSV file (`-` for stdin)
    #[arg(short, long)]
    pub input: PathBuf,
    /// Optional schema file declaring column types
    #[arg(short = 'm', long = "schema")]
    pub schema: Option<PathBuf>,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// Emit rows as JSON objects instead of a table
    #[arg(long)]
    pub json: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Input CSV file (`-` for stdin)
    #[arg(short, long)]
    pub input: PathBuf,
    /// Schema file declaring column types
    #[arg(short = 'm', long = "schema")]
    pub schema: PathBuf,
    /// Bind options file (locale and null handling)
    #[arg(long)]
    pub options: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    io_utils::parse_delimiter(value).map_err(|err| err.to_string())
}
