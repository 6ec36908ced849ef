//! Output formatting for resolved documents.

use crate::document::{self, Tree};
use crate::error::{Error, Result};

/// Output format for a resolved document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Render a resolved tree. JSON output is pretty-printed.
    pub fn render(self, tree: &Tree) -> Result<String> {
        match self {
            OutputFormat::Yaml => document::to_yaml_string(tree),
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(tree).map_err(Error::Json)?;
                out.push('\n');
                Ok(out)
            }
        }
    }
}
