use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

/// What happened to each part during cleanup.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, io::Error)>,
}

impl CleanupReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Deletes every part. A failed deletion is recorded and the remaining parts are still removed.
pub fn remove_parts(parts: &[PathBuf]) -> CleanupReport {
    let mut report = CleanupReport::default();
    for part in parts {
        match fs::remove_file(part) {
            Ok(()) => {
                info!(part = %part.display(), "Removed part");
                report.removed.push(part.clone());
            }
            Err(e) => {
                error!(part = %part.display(), error = ?e, "Failed to remove part");
                report.failed.push((part.clone(), e));
            }
        }
    }
    report
}
