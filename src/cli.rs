//! Command-line interface for autojoin: argument parsing, the per-path loop and the
//! human-readable console output.
//!
//! All discovery, validation and joining logic lives in the [`autojoin-core`] crate.
//! This module only turns arguments into a [`JoinConfig`], hands each path to the core
//! and prints what came back.
//!
//! ## How To Use
//! - For command-line users: run the `autojoin` binary with `--help`.
//! - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
//!
//! [`autojoin-core`]: ../../autojoin-core/
use anyhow::Result;
use autojoin_core::autojoin::{autojoin_directory, DirectoryReport, SetOutcome, SetReport};
use autojoin_core::config::JoinConfig;
use autojoin_core::validate::FsSpaceProbe;
use bytesize::ByteSize;
use clap::Parser;
use std::path::PathBuf;

/// CLI for autojoin: find split files and join them back together.
#[derive(Parser, Debug)]
#[clap(
    name = "autojoin",
    version,
    about = "Automatically join split files (name.001, name.002, ...) found in the given directories"
)]
pub struct Cli {
    /// Keep the split parts after a successful join
    #[clap(long, short)]
    pub keep: bool,

    /// Replace a joined file that already exists
    #[clap(long, short)]
    pub overwrite: bool,

    /// Log every step to stderr (same as RUST_LOG=debug)
    #[clap(long, short)]
    pub verbose: bool,

    /// Directories to scan
    #[clap(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,
}

impl Cli {
    pub fn join_config(&self) -> JoinConfig {
        JoinConfig {
            keep: self.keep,
            overwrite: self.overwrite,
        }
    }
}

/// Totals over one invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub directories: usize,
    pub unreadable_directories: usize,
    pub sets: usize,
    pub joined: usize,
}

/// Console line for one part-set, and whether it describes a failure.
pub fn outcome_message(set: &SetReport) -> (bool, String) {
    let destination = set.destination.display();
    match &set.outcome {
        SetOutcome::Joined {
            bytes,
            parts,
            cleanup,
        } => {
            let mut message = format!(
                "Joined {destination} from {parts} parts ({}).",
                ByteSize(*bytes)
            );
            if let Some(cleanup) = cleanup {
                for (path, e) in &cleanup.failed {
                    message.push_str(&format!("\nCould not remove part {}: {e}", path.display()));
                }
                return (!cleanup.is_complete(), message);
            }
            (false, message)
        }
        SetOutcome::SinglePart => (
            false,
            format!(
                "Found initial part {} but no others. Skipping.",
                set.initial_part
            ),
        ),
        SetOutcome::MissingParts { expected, found } => {
            let expected = expected.map_or_else(|| "an unknown number of".to_string(), |n| n.to_string());
            (
                false,
                format!("Parts missing for {destination}: expected {expected} parts, found {found}."),
            )
        }
        SetOutcome::InsufficientSpace { needed, available } => (
            false,
            format!(
                "Not enough space to join {destination} (needs {}, {} free).",
                ByteSize(*needed),
                ByteSize(*available)
            ),
        ),
        SetOutcome::DestinationExists => (
            false,
            format!(
                "Joined file {destination} already detected. Use --overwrite to overwrite file."
            ),
        ),
        SetOutcome::ValidationFailed(e) => (true, format!("Could not check {destination}: {e}")),
        SetOutcome::JoinFailed(e) => (
            true,
            format!("Error occurred while joining {}: {e}", e.destination().display()),
        ),
    }
}

fn print_report(report: &DirectoryReport) {
    if !report.found_split_files() {
        println!("No split files found in {}.", report.dir.display());
        return;
    }
    for set in &report.sets {
        match outcome_message(set) {
            (false, message) => println!("{message}"),
            (true, message) => eprintln!("[ERROR] {message}"),
        }
    }
}

/// Processes every path in turn. A path that cannot be read is reported and skipped.
pub fn run(cli: Cli) -> Result<RunSummary> {
    let config = cli.join_config();
    config.trace_loaded();
    let probe = FsSpaceProbe;

    let mut summary = RunSummary::default();
    for path in &cli.paths {
        summary.directories += 1;
        match autojoin_directory(&config, path, &probe) {
            Ok(report) => {
                print_report(&report);
                summary.sets += report.sets.len();
                summary.joined += report.joined();
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Skipping unreadable path");
                eprintln!("[ERROR] {e}");
                summary.unreadable_directories += 1;
            }
        }
    }

    Ok(summary)
}
