//! yaml-import
//!
//! Resolves imports and placeholders in a YAML file and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tracing::info;
use yaml_import::cli::Cli;
use yaml_import::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_target(), cli.verbose)?;

    let tree = yaml_import::resolve_file(&cli.file)
        .with_context(|| format!("Failed to resolve {}", cli.file.display()))?;
    let rendered = cli.format.render(&tree)?;

    match cli.output {
        Some(ref path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote resolved document");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
