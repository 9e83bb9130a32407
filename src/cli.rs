use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::mode::Mode;

#[derive(Debug, Parser)]
#[command(author, version, about = "Aggregate heterogeneous survey feedback exports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render every report section as a text table
    Report(ReportArgs),
    /// Write report sections as CSV sheets or a JSON document
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Input feedback files (CSV / TSV / XLSX); repeatable
    #[arg(short = 'i', long = "input", required = true, action = clap::ArgAction::Append)]
    pub inputs: Vec<PathBuf>,
    /// Restrict to these modes (defaults to all)
    #[arg(long = "modes", value_delimiter = ',')]
    pub modes: Vec<Mode>,
    /// Restrict to these origin file names; repeatable (defaults to all)
    #[arg(long = "origin", action = clap::ArgAction::Append)]
    pub origins: Vec<String>,
    /// Optional YAML file overriding the column-role keyword tables
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of CSV inputs (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Input feedback files (CSV / TSV / XLSX); repeatable
    #[arg(short = 'i', long = "input", required = true, action = clap::ArgAction::Append)]
    pub inputs: Vec<PathBuf>,
    /// Output directory for the exported sheets
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Export format
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,
    /// Restrict to these modes (defaults to all)
    #[arg(long = "modes", value_delimiter = ',')]
    pub modes: Vec<Mode>,
    /// Restrict to these origin file names; repeatable (defaults to all)
    #[arg(long = "origin", action = clap::ArgAction::Append)]
    pub origins: Vec<String>,
    /// Optional YAML file overriding the column-role keyword tables
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of CSV inputs (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One CSV file per report section
    Csv,
    /// A single report.json covering all sections
    Json,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiter_accepts_named_and_literal_forms() {
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("|").unwrap(), b'|');
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn report_args_parse_mode_lists() {
        let cli = Cli::try_parse_from([
            "feedback-rollup",
            "report",
            "-i",
            "distance_a.csv",
            "--modes",
            "distance,online",
        ])
        .expect("parse");
        match cli.command {
            Commands::Report(args) => {
                assert_eq!(args.modes, vec![Mode::Distance, Mode::Online]);
                assert_eq!(args.inputs.len(), 1);
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }
}
