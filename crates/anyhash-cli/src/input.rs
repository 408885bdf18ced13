//! Document loading for the CLI.
//!
//! Documents are read from a path, or from stdin when the path is `-`, and
//! parsed into a `serde_json::Value` so JSON and YAML inputs share one
//! canonical form.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::Value;

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// Input document syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Guess the syntax from the file extension. Anything that is not
    /// `.yaml` or `.yml`, stdin included, is read as JSON.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parse document text in the given syntax.
pub fn parse_document(text: &str, format: Format) -> Result<Value> {
    let value = match format {
        Format::Json => serde_json::from_str(text).context("invalid JSON document")?,
        Format::Yaml => serde_yaml::from_str(text).context("invalid YAML document")?,
    };
    Ok(value)
}

/// Read and parse one document. `format` overrides extension detection.
pub fn load_document(path: &Path, format: Option<Format>) -> Result<Value> {
    let text = if path == Path::new(STDIN_PATH) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read document from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let format = format.unwrap_or_else(|| Format::detect(path));
    tracing::debug!(path = %path.display(), ?format, bytes = text.len(), "loaded document");
    parse_document(&text, format).with_context(|| format!("failed to parse {}", path.display()))
}
