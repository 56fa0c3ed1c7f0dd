use tracing::debug;

/// Options for one run, built once from the command line and passed down by reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinConfig {
    /// Keep the source parts after a successful join.
    pub keep: bool,
    /// Replace a destination file that already exists.
    pub overwrite: bool,
}

impl JoinConfig {
    pub fn trace_loaded(&self) {
        debug!(keep = self.keep, overwrite = self.overwrite, "Loaded JoinConfig");
    }
}
