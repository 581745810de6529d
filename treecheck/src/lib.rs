//! Read-back helpers for asserting what a directory tree on disk looks like.
//!
//! Nothing here writes to the filesystem. The helpers stat, list and read
//! entries so that a test (or a tool summarizing its own output) can compare
//! the produced tree with what it expected.
use errors::CheckError;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;
pub mod errors;

/// A single entry observed on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Directory,
    /// A regular file and its full contents.
    File(Vec<u8>),
    /// Anything that is neither a directory nor a regular file (symlinks, sockets, ...).
    Other,
}

/// Immediate children of a directory, split by type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub directories: usize,
    pub files: usize,
}
impl Counts {
    pub fn is_empty(&self) -> bool {
        self.directories == 0 && self.files == 0
    }
}

/// Every entry below a root, keyed by its path relative to that root.
///
/// Keys are sorted, so two snapshots of identical trees compare equal
/// regardless of the order the filesystem reported entries in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: BTreeMap<PathBuf, Entry>,
}
impl Snapshot {
    pub fn get<P: AsRef<Path>>(&self, relative: P) -> Option<&Entry> {
        self.entries.get(relative.as_ref())
    }

    /// Contents of the regular file at `relative`, if there is one.
    pub fn contents<P: AsRef<Path>>(&self, relative: P) -> Option<&[u8]> {
        match self.get(relative) {
            Some(Entry::File(bytes)) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    pub fn is_dir<P: AsRef<Path>>(&self, relative: P) -> bool {
        matches!(self.get(relative), Some(Entry::Directory))
    }

    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().filter_map(|(path, entry)| match entry {
            Entry::Directory => Some(path.as_path()),
            _ => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = (&Path, &[u8])> {
        self.entries.iter().filter_map(|(path, entry)| match entry {
            Entry::File(bytes) => Some((path.as_path(), bytes.as_slice())),
            _ => None,
        })
    }

    pub fn directory_count(&self) -> usize {
        self.directories().count()
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `true` if `path` exists and is a directory.
pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path)
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}

/// `true` if `path` exists and is a regular file.
pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path)
        .map(|metadata| metadata.file_type().is_file())
        .unwrap_or(false)
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, CheckError> {
    let path = path.as_ref();

    fs::read(path).map_err(|error| CheckError::Read {
        path: path.to_path_buf(),
        source: error,
    })
}

/// Counts the immediate children of `path`. Anything that is not a
/// directory counts as a file.
pub fn count_entries<P: AsRef<Path>>(path: P) -> Result<Counts, CheckError> {
    let path = path.as_ref();
    let mut counts = Counts::default();

    for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|error| CheckError::Walk {
            root: path.to_path_buf(),
            source: error,
        })?;

        if entry.file_type().is_dir() {
            counts.directories += 1;
        } else {
            counts.files += 1;
        }
    }

    Ok(counts)
}

/// Walks everything below `root` (without following symlinks) and records it.
pub fn snapshot<P: AsRef<Path>>(root: P) -> Result<Snapshot, CheckError> {
    let root = root.as_ref();
    let mut entries = BTreeMap::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|error| CheckError::Walk {
            root: root.to_path_buf(),
            source: error,
        })?;

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| CheckError::OutsideRoot {
                root: root.to_path_buf(),
                path: entry.path().to_path_buf(),
            })?
            .to_path_buf();

        let file_type = entry.file_type();
        let observed = if file_type.is_dir() {
            Entry::Directory
        } else if file_type.is_file() {
            Entry::File(read_file(entry.path())?)
        } else {
            Entry::Other
        };

        entries.insert(relative, observed);
    }

    Ok(Snapshot { entries })
}
