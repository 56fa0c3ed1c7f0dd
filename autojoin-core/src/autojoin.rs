//! Per-directory pipeline: discover → validate → join → clean up.
//!
//! For every initial part found in a directory listing this module resolves the
//! part-set and walks it through the checks before concatenating it:
//!   - sets with a single member are skipped
//!   - sets with gaps in their numbering are skipped
//!   - sets whose total size exceeds the free space of the directory's filesystem are skipped
//!   - sets whose destination already exists are skipped unless overwriting was requested
//!
//! Parts are deleted only after a successful join, and only when `keep` is off.
//!
//! # Error Handling
//! Only a failure to list the directory is returned as an error. Everything that goes
//! wrong for a single set ends up in that set's [`SetOutcome`] so sibling sets still run.
//!
//! # Navigation
//! - Main entrypoint: [`autojoin_directory`]
//! - Per-set step: [`process_part_set`]

use crate::cleanup::{remove_parts, CleanupReport};
use crate::config::JoinConfig;
use crate::discover::{find_initial_parts, find_other_parts, list_directory, DiscoverError, Part, PartSet};
use crate::join::{join_files, JoinError};
use crate::validate::{check_for_missing_parts, check_free_space, SpaceProbe, ValidateError};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Debug)]
pub enum SetOutcome {
    Joined {
        bytes: u64,
        parts: usize,
        /// `None` when the parts were kept.
        cleanup: Option<CleanupReport>,
    },
    /// Only the initial part exists.
    SinglePart,
    MissingParts {
        /// Index of the highest-numbered part, which is how many parts the set should have.
        expected: Option<u64>,
        found: usize,
    },
    InsufficientSpace {
        needed: u64,
        available: u64,
    },
    DestinationExists,
    ValidationFailed(ValidateError),
    JoinFailed(JoinError),
}

impl SetOutcome {
    pub fn is_joined(&self) -> bool {
        matches!(self, SetOutcome::Joined { .. })
    }
}

#[derive(Debug)]
pub struct SetReport {
    pub initial_part: String,
    pub destination: PathBuf,
    pub outcome: SetOutcome,
}

#[derive(Debug)]
pub struct DirectoryReport {
    pub dir: PathBuf,
    /// One entry per initial part, in listing order. Empty when no split files were found.
    pub sets: Vec<SetReport>,
}

impl DirectoryReport {
    pub fn found_split_files(&self) -> bool {
        !self.sets.is_empty()
    }

    pub fn joined(&self) -> usize {
        self.sets.iter().filter(|s| s.outcome.is_joined()).count()
    }
}

/// Finds and joins every part-set in `dir`.
pub fn autojoin_directory<P>(
    config: &JoinConfig,
    dir: &Path,
    probe: &P,
) -> Result<DirectoryReport, DiscoverError>
where
    P: SpaceProbe + ?Sized,
{
    info!(path = %dir.display(), "[JOIN] Scanning directory");
    let names = list_directory(dir)?;
    let initial_parts = find_initial_parts(&names);

    if initial_parts.is_empty() {
        info!(path = %dir.display(), "[JOIN] No split files found");
    }

    let sets = initial_parts
        .iter()
        .map(|initial| {
            let set = find_other_parts(&names, initial);
            SetReport {
                initial_part: initial.clone(),
                destination: set.destination(dir),
                outcome: process_part_set(config, dir, &set, probe),
            }
        })
        .collect();

    Ok(DirectoryReport {
        dir: dir.to_path_buf(),
        sets,
    })
}

/// Validates and joins one part-set found in `dir`.
pub fn process_part_set<P>(config: &JoinConfig, dir: &Path, set: &PartSet, probe: &P) -> SetOutcome
where
    P: SpaceProbe + ?Sized,
{
    let destination = set.destination(dir);

    if set.len() <= 1 {
        warn!(initial = %set.initial, "[JOIN] Found an initial part but no others");
        return SetOutcome::SinglePart;
    }

    if check_for_missing_parts(set) {
        let expected = set.last().and_then(Part::index);
        warn!(initial = %set.initial, ?expected, found = set.len(), "[JOIN] Part-set has missing parts");
        return SetOutcome::MissingParts {
            expected,
            found: set.len(),
        };
    }

    let paths = set.paths(dir);
    let space = match check_free_space(&paths, dir, probe) {
        Ok(space) => space,
        Err(e) => {
            error!(initial = %set.initial, error = ?e, "[JOIN][ERROR] Validation failed");
            return SetOutcome::ValidationFailed(e);
        }
    };
    if !space.is_sufficient() {
        warn!(
            destination = %destination.display(),
            needed = space.needed,
            available = space.available,
            "[JOIN] Not enough free space"
        );
        return SetOutcome::InsufficientSpace {
            needed: space.needed,
            available: space.available,
        };
    }

    if !config.overwrite && destination.exists() {
        warn!(destination = %destination.display(), "[JOIN] Destination already exists");
        return SetOutcome::DestinationExists;
    }

    info!(destination = %destination.display(), parts = paths.len(), "[JOIN] Joining");
    let bytes = match join_files(&destination, &paths, config.overwrite) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(destination = %destination.display(), error = ?e, "[JOIN][ERROR] Join failed");
            return SetOutcome::JoinFailed(e);
        }
    };

    let cleanup = if config.keep {
        None
    } else {
        Some(remove_parts(&paths))
    };

    SetOutcome::Joined {
        bytes,
        parts: paths.len(),
        cleanup,
    }
}
