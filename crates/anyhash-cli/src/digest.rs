//! # Digest Subcommand
//!
//! Prints one `<algorithm>:<hex>  <path>` line per document, in the order
//! the documents were given. With no paths, reads a single document from
//! stdin.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use anyhash::{Canonicalizer, ContentDigest, DigestAlgorithm};

use crate::input::{load_document, Format, STDIN_PATH};

/// Arguments for the `anyhash digest` subcommand.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// Documents to digest. `-` reads stdin.
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Output digest algorithm (sha1, sha256, sha512).
    #[arg(long, short, default_value = "sha256")]
    pub algorithm: DigestAlgorithm,

    /// Input syntax. Detected from each file extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<Format>,
}

impl DigestArgs {
    fn paths(&self) -> Vec<PathBuf> {
        if self.files.is_empty() {
            vec![PathBuf::from(STDIN_PATH)]
        } else {
            self.files.clone()
        }
    }
}

/// Compute the digest of every document named by `args`.
pub fn digest_documents(
    args: &DigestArgs,
    canonicalizer: &Canonicalizer,
) -> Result<Vec<(PathBuf, ContentDigest)>> {
    args.paths()
        .into_iter()
        .map(|path| -> Result<(PathBuf, ContentDigest)> {
            let document = load_document(&path, args.format)?;
            let digest = canonicalizer
                .content_digest(args.algorithm, &document)
                .with_context(|| format!("failed to canonicalize {}", path.display()))?;
            tracing::info!(path = %path.display(), %digest, "digested document");
            Ok((path, digest))
        })
        .collect()
}

/// Execute the digest subcommand, writing one line per document to `out`.
pub fn run_digest(
    args: &DigestArgs,
    canonicalizer: &Canonicalizer,
    out: &mut dyn Write,
) -> Result<u8> {
    for (path, digest) in digest_documents(args, canonicalizer)? {
        writeln!(out, "{digest}  {}", path.display()).context("failed to write digest")?;
    }
    Ok(0)
}
