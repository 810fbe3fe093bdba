//! CLI argument parsing for tmpl

use clap::Parser;
use eyre::{Result, eyre};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Render a template from a file or stdin
#[derive(Parser, Debug)]
#[command(name = "tmpl")]
#[command(author, version, about = "Render templates with variables, environment and helper functions", long_about = None)]
pub struct Cli {
    /// Template file, or `-` for stdin (default: stdin)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<String>,

    /// YAML vars file, applied before --var and --num
    #[arg(short = 'v', long = "vars", value_name = "VARS")]
    pub vars: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "OUT")]
    pub output: Option<PathBuf>,

    /// String variable KEY=VALUE (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub var: Vec<String>,

    /// Numeric variable KEY=NUMBER (repeatable, applied last)
    #[arg(long = "num", value_name = "KEY=NUMBER")]
    pub num: Vec<String>,

    /// Template file whose inline definitions are available (repeatable)
    #[arg(long = "include", value_name = "FILE")]
    pub include: Vec<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Template path, or `None` when the body comes from stdin
    pub fn template_path(&self) -> Option<&str> {
        self.file.as_deref().filter(|f| *f != "-")
    }
}

/// Split `KEY=VALUE` entries on the first `=`; entries without one are
/// skipped with a warning
pub fn parse_assignments(entries: &[String]) -> Vec<(&str, &str)> {
    entries
        .iter()
        .filter_map(|entry| match entry.split_once('=') {
            Some(pair) => Some(pair),
            None => {
                warn!(%entry, "Ignoring variable without '='");
                None
            }
        })
        .collect()
}

/// Like [`parse_assignments`], with values parsed as numbers
pub fn parse_numbers(entries: &[String]) -> Result<Vec<(&str, f64)>> {
    parse_assignments(entries)
        .into_iter()
        .map(|(key, raw)| {
            debug!(%key, %raw, "parse_numbers: parsing");
            raw.trim()
                .parse::<f64>()
                .map(|n| (key, n))
                .map_err(|e| eyre!("Invalid number for --num {}={}: {}", key, raw, e))
        })
        .collect()
}
