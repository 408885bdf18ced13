//! # anyhash CLI entry point
//!
//! Parses command-line arguments, resolves the canonicalization config and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use anyhash::KeyDigest;
use anyhash_cli::digest::{run_digest, DigestArgs};
use anyhash_cli::stream::{run_stream, StreamArgs};
use anyhash_cli::CanonicalOptions;

/// Deterministic digests of JSON and YAML documents.
///
/// Documents that differ only in key order, formatting or empty entries
/// produce the same digest.
#[derive(Parser, Debug)]
#[command(name = "anyhash", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Digest used to order map entries (md5, sha1, sha256, sha512).
    #[arg(long, global = true)]
    key_digest: Option<KeyDigest>,

    /// Fail on documents nested deeper than this.
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the canonical digest of each document.
    Digest(DigestArgs),

    /// Print the canonical byte stream of a document as hex.
    Stream(StreamArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flag.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "anyhash CLI starting");

    let options = CanonicalOptions {
        config: cli.config.as_deref(),
        key_digest: cli.key_digest,
        max_depth: cli.max_depth,
    };

    let result = options.canonicalizer().and_then(|canonicalizer| {
        let mut stdout = std::io::stdout().lock();
        match &cli.command {
            Commands::Digest(args) => run_digest(args, &canonicalizer, &mut stdout),
            Commands::Stream(args) => run_stream(args, &canonicalizer, &mut stdout),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
