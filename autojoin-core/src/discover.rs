//! Discovery of split-file part-sets in a directory listing.
//!
//! A part is a file named `<base>.<digits>`. The first part of a set (the *initial part*)
//! has an extension made of zero or more `0`s followed by a single `1` (`1`, `01`, `001`, ...).
//! Every other file whose name starts with the same base and continues with digits right
//! after the initial part's dot position belongs to the same set.
//!
//! Everything here except [`list_directory`] is pure and works on plain name listings.

use regex::Regex;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("failed to list directory {}: {source}", path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One member of a part-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// File name, relative to the scanned directory.
    pub name: String,
    /// The digit run that follows the initial part's dot position.
    pub suffix: String,
}

impl Part {
    /// Sequence position encoded in the suffix, if it fits in a `u64`.
    pub fn index(&self) -> Option<u64> {
        let trimmed = self.suffix.trim_start_matches('0');
        if trimmed.is_empty() {
            return Some(0);
        }
        trimmed.parse().ok()
    }
}

/// All parts that reconstruct one destination file, in join order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartSet {
    pub initial: String,
    /// Initial part name with its trailing `.NNN` removed; also the destination file name.
    pub base: String,
    pub parts: Vec<Part>,
}

impl PartSet {
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn last(&self) -> Option<&Part> {
        self.parts.last()
    }

    pub fn names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn paths(&self, dir: &Path) -> Vec<PathBuf> {
        self.parts.iter().map(|p| dir.join(&p.name)).collect()
    }

    pub fn destination(&self, dir: &Path) -> PathBuf {
        dir.join(&self.base)
    }
}

fn initial_extension_pattern() -> &'static Regex {
    // Compiled once; the pattern is a constant, so building it cannot fail.
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^0*1$").expect("initial part pattern is valid"))
}

/// Extension after the last dot. Leading dots belong to the stem, so `.001` has none.
fn extension(name: &str) -> Option<&str> {
    let dot = name.rfind('.')?;
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    if dot < leading_dots {
        return None;
    }
    Some(&name[dot + 1..])
}

/// True when `name` looks like the first part of a split set.
pub fn is_initial_part(name: &str) -> bool {
    extension(name).is_some_and(|ext| initial_extension_pattern().is_match(ext))
}

/// Returns the numeric suffix of `candidate` if it belongs to the set started by `initial`.
///
/// The candidate must start with the initial part's base name, and everything from one byte
/// past the initial part's last dot onwards must be a non-empty run of ASCII digits.
pub fn part_suffix<'a>(initial: &str, candidate: &'a str) -> Option<&'a str> {
    let dot = initial.rfind('.')?;
    if !candidate.starts_with(&initial[..dot]) {
        return None;
    }
    let suffix = candidate.get(dot + 1..)?;
    if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
        Some(suffix)
    } else {
        None
    }
}

/// Compares two digit strings by numeric value, whatever their zero padding.
fn numeric_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Every name in `file_names` that is the first part of a split set, in listing order.
pub fn find_initial_parts<S: AsRef<str>>(file_names: &[S]) -> Vec<String> {
    file_names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| is_initial_part(name))
        .map(str::to_string)
        .collect()
}

/// Collects the full part-set started by `initial`, ordered by numeric suffix.
pub fn find_other_parts<S: AsRef<str>>(all_files: &[S], initial: &str) -> PartSet {
    let base = initial
        .rfind('.')
        .map_or(initial, |dot| &initial[..dot])
        .to_string();

    let mut parts: Vec<Part> = all_files
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|name| {
            part_suffix(initial, name).map(|suffix| Part {
                name: name.to_string(),
                suffix: suffix.to_string(),
            })
        })
        .collect();
    parts.sort_by(|a, b| numeric_cmp(&a.suffix, &b.suffix).then_with(|| a.name.cmp(&b.name)));

    debug!(initial, count = parts.len(), "Resolved part-set");
    PartSet {
        initial: initial.to_string(),
        base,
        parts,
    }
}

/// Names of the regular files directly inside `dir`, sorted.
pub fn list_directory(dir: &Path) -> Result<Vec<String>, DiscoverError> {
    let list_err = |source: std::io::Error| DiscoverError::ListDirectory {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            Err(e) => {
                debug!(path = %entry.path().display(), error = ?e, "Skipping unreadable entry");
                continue;
            }
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!(name = ?raw, "Skipping non UTF-8 file name"),
        }
    }
    names.sort();

    debug!(path = %dir.display(), files = names.len(), "Listed directory");
    Ok(names)
}
