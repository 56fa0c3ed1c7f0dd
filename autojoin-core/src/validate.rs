//! Pre-join checks: part completeness and free disk space.
//!
//! Free space is read through the [`SpaceProbe`] trait so the orchestration can be driven
//! with a mock in tests. [`FsSpaceProbe`] is the real implementation.

use crate::discover::PartSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("could not read size of part {}: {source}", path.display())]
    PartMetadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not read free space for {}: {source}", path.display())]
    FreeSpace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reports how many bytes can still be written to the filesystem holding `path`.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait SpaceProbe {
    fn available_space(&self, path: &Path) -> io::Result<u64>;
}

/// Queries the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSpaceProbe;

impl SpaceProbe for FsSpaceProbe {
    /// Free space of the mounted disk with the longest mount point that contains `path`.
    fn available_space(&self, path: &Path) -> io::Result<u64> {
        use sysinfo::Disks;

        let path = fs::canonicalize(path)?;
        let disks = Disks::new_with_refreshed_list();
        disks
            .list()
            .iter()
            .filter(|disk| path.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().as_os_str().len())
            .map(|disk| disk.available_space())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no mounted disk holds {}", path.display()),
                )
            })
    }
}

/// Outcome of a free-space check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceCheck {
    pub needed: u64,
    pub available: u64,
}

impl SpaceCheck {
    pub fn is_sufficient(&self) -> bool {
        self.available >= self.needed
    }
}

/// True when the set's part count differs from the index of its last part.
pub fn check_for_missing_parts(parts: &PartSet) -> bool {
    match parts.last().and_then(|p| p.index()) {
        Some(last) => parts.len() as u64 != last,
        None => true,
    }
}

/// Sum of the sizes of `parts`.
pub fn total_size(parts: &[PathBuf]) -> Result<u64, ValidateError> {
    parts.iter().try_fold(0u64, |total, path| {
        let meta = fs::metadata(path).map_err(|source| ValidateError::PartMetadata {
            path: path.clone(),
            source,
        })?;
        Ok(total.saturating_add(meta.len()))
    })
}

/// Compares the summed size of `parts` with the free space where `dir` lives.
pub fn check_free_space<P: SpaceProbe + ?Sized>(
    parts: &[PathBuf],
    dir: &Path,
    probe: &P,
) -> Result<SpaceCheck, ValidateError> {
    let needed = total_size(parts)?;
    let available = probe.available_space(dir).map_err(|source| {
        error!(path = %dir.display(), error = ?source, "Failed to query free space");
        ValidateError::FreeSpace {
            path: dir.to_path_buf(),
            source,
        }
    })?;
    debug!(needed, available, path = %dir.display(), "Checked free space");
    Ok(SpaceCheck { needed, available })
}
