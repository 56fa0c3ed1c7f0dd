use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum JoinError {
    #[error("could not create {}: {source}", destination.display())]
    CreateDestination {
        destination: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not read part {} while joining {}: {source}", part.display(), destination.display())]
    ReadPart {
        destination: PathBuf,
        part: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write {}: {source}", destination.display())]
    WriteDestination {
        destination: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl JoinError {
    pub fn destination(&self) -> &Path {
        match self {
            JoinError::CreateDestination { destination, .. }
            | JoinError::ReadPart { destination, .. }
            | JoinError::WriteDestination { destination, .. } => destination,
        }
    }
}

/// Concatenates `parts`, in the given order, into `destination`.
///
/// Returns the number of bytes written. An existing destination is truncated only when
/// `overwrite` is set; otherwise creation fails. On error the partially written file is
/// left where it is.
pub fn join_files(destination: &Path, parts: &[PathBuf], overwrite: bool) -> Result<u64, JoinError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let file = options
        .open(destination)
        .map_err(|source| JoinError::CreateDestination {
            destination: destination.to_path_buf(),
            source,
        })?;
    let mut writer = BufWriter::new(file);
    let write_err = |source: io::Error| JoinError::WriteDestination {
        destination: destination.to_path_buf(),
        source,
    };

    let mut written = 0u64;
    for part in parts {
        let mut reader = File::open(part).map_err(|source| JoinError::ReadPart {
            destination: destination.to_path_buf(),
            part: part.clone(),
            source,
        })?;
        // io::copy does not separate read and write failures; report them against the part.
        let copied = io::copy(&mut reader, &mut writer).map_err(|source| JoinError::ReadPart {
            destination: destination.to_path_buf(),
            part: part.clone(),
            source,
        })?;
        debug!(part = %part.display(), bytes = copied, "Appended part");
        written += copied;
    }

    writer.flush().map_err(write_err)?;
    writer.get_ref().sync_all().map_err(write_err)?;

    info!(destination = %destination.display(), parts = parts.len(), bytes = written, "Joined parts");
    Ok(written)
}
