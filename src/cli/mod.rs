//! CLI definition for yaml-import
//!
//! Resolves a YAML file (imports and placeholders) and prints the result.

use crate::format::OutputFormat;
use crate::logging::LogTarget;
use clap::Parser;
use std::path::PathBuf;

/// Resolve `import` keys and `{{ key.path }}` placeholders in a YAML file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML file to resolve
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format: yaml (default) or json
    #[arg(short, long, default_value = "yaml", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout (stderr without --output), 2/stderr (default), or filename
    #[arg(short, long, default_value = "2")]
    pub log: String,
}

impl Cli {
    /// Log target to install.
    ///
    /// Without `--output` the document itself goes to stdout, so a stdout
    /// log target is moved to stderr.
    pub fn log_target(&self) -> LogTarget {
        match LogTarget::parse(&self.log) {
            LogTarget::Stdout if self.output.is_none() => LogTarget::Stderr,
            target => target,
        }
    }
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(s).ok_or_else(|| format!("unknown format '{s}', expected yaml or json"))
}
