use crate::{
    errors::{FileOperation, IoError},
    utils::create_dir,
};
use miette::Diagnostic;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ProvisionError {
    #[error("root directory cannot be empty")]
    #[diagnostic(
        code(plantree::provision::empty_root),
        help("Pass a directory path, or omit it to generate under a fresh temporary directory")
    )]
    EmptyRoot,

    #[error("unable to allocate a temporary root directory")]
    #[diagnostic(code(plantree::provision::temp_dir))]
    TempDir(#[source] IoError),

    #[error("unable to delete pre-existing root directory")]
    #[diagnostic(code(plantree::provision::clear))]
    Clear(#[source] IoError),

    #[error("unable to create root directory")]
    #[diagnostic(code(plantree::provision::create))]
    Create(#[source] IoError),
}

/// How the root directory is prepared before anything is generated in it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Provisioning {
    /// Create the root if needed and keep whatever it already holds.
    #[default]
    Strict,
    /// Remove everything at the root first.
    Destructive,
}

/// Resolves the root directory to generate into.
///
/// Without a `base`, a uniquely named directory is allocated under the
/// system temp location and left on disk for the caller.
pub fn provision(base: Option<&Path>, prefix: &str) -> Result<PathBuf, ProvisionError> {
    match base {
        Some(path) if path.as_os_str().is_empty() => Err(ProvisionError::EmptyRoot),
        Some(path) => Ok(path.to_path_buf()),
        None => {
            let root = tempfile::Builder::new()
                .prefix(prefix)
                .tempdir()
                .map_err(|error| {
                    ProvisionError::TempDir(IoError::new(
                        FileOperation::TempDir,
                        std::env::temp_dir(),
                        error,
                    ))
                })?
                .keep();

            log::debug!("allocated temporary root {}", root.display());

            Ok(root)
        }
    }
}

/// Makes `root` an existing directory according to `mode`.
pub fn prepare(root: &Path, mode: Provisioning) -> Result<(), ProvisionError> {
    if root.as_os_str().is_empty() {
        return Err(ProvisionError::EmptyRoot);
    }

    if mode == Provisioning::Destructive {
        clear(root).map_err(|error| {
            ProvisionError::Clear(IoError::new(FileOperation::Remove, root.to_path_buf(), error))
        })?;
    }

    create_dir(root).map_err(|error| {
        ProvisionError::Create(IoError::new(FileOperation::Mkdir, root.to_path_buf(), error))
    })
}

fn clear(root: &Path) -> io::Result<()> {
    let metadata = match fs::symlink_metadata(root) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(error) => return Err(error),
    };

    log::debug!("removing pre-existing root {}", root.display());

    if metadata.is_dir() {
        fs::remove_dir_all(root)
    } else {
        fs::remove_file(root)
    }
}
