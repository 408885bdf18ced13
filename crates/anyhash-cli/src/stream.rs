//! # Stream Subcommand
//!
//! Prints the canonical byte stream of a document as lowercase hex, for
//! inspecting why two documents do or do not hash alike.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use anyhash::Canonicalizer;

use crate::input::{load_document, Format, STDIN_PATH};

/// Arguments for the `anyhash stream` subcommand.
#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Document to encode. Reads stdin when omitted or `-`.
    #[arg(default_value = STDIN_PATH)]
    pub file: PathBuf,

    /// Input syntax. Detected from the file extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<Format>,
}

/// Execute the stream subcommand.
pub fn run_stream(
    args: &StreamArgs,
    canonicalizer: &Canonicalizer,
    out: &mut dyn Write,
) -> Result<u8> {
    let document = load_document(&args.file, args.format)?;
    let stream = canonicalizer
        .stream(&document)
        .with_context(|| format!("failed to canonicalize {}", args.file.display()))?;
    tracing::info!(path = %args.file.display(), bytes = stream.len(), "encoded document");
    writeln!(out, "{}", hex::encode(stream.as_bytes())).context("failed to write stream")?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_of_single_entry_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.yaml");
        std::fs::write(&path, "Hello: world\n").unwrap();

        let args = StreamArgs { file: path, format: None };
        let mut out = Vec::new();
        run_stream(&args, &Canonicalizer::default(), &mut out).unwrap();

        // md5("Hello") followed by the raw value.
        let expected = format!("8b1a9953c4611296a827abf8c47804d7{}\n", hex::encode("world"));
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_zero_document_is_empty_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, r#"{"a": "", "b": null, "c": []}"#).unwrap();

        let args = StreamArgs { file: path, format: None };
        let mut out = Vec::new();
        run_stream(&args, &Canonicalizer::default(), &mut out).unwrap();
        assert_eq!(out, b"\n");
    }
}
