use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use crate::naming::SEPARATOR;

/// Owner read/write/execute.
pub const DIR_MODE: u32 = 0o700;
/// Owner read/write.
pub const FILE_MODE: u32 = 0o600;

/// Appends a node name to its parent path.
///
/// Leading and trailing separators are stripped first, so `"src/"` and
/// `"/src"` both resolve to `parent/src` and a bare `"/"` resolves to
/// `parent` itself. No other normalization happens.
pub fn join_entry(parent: &Path, name: &str) -> PathBuf {
    let relative = name.trim_matches(SEPARATOR);

    if relative.is_empty() {
        parent.to_path_buf()
    } else {
        parent.join(relative)
    }
}

/// Creates `path` and any missing ancestors. Succeeds if a directory is
/// already there, fails if something else is.
pub fn create_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }

    builder.create(path)
}

/// Opens a new file for writing, failing if anything already exists at `path`.
pub fn create_file_exclusive(path: &Path) -> io::Result<File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    options.open(path)
}
