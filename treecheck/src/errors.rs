use std::path::PathBuf;

#[derive(Debug)]
pub enum CheckError {
    Walk {
        root: PathBuf,
        source: walkdir::Error,
    },
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    OutsideRoot {
        root: PathBuf,
        path: PathBuf,
    },
}

impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckError::Walk { source, .. } => Some(source),
            CheckError::Read { source, .. } => Some(source),
            CheckError::OutsideRoot { .. } => None,
        }
    }
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CheckError::Walk { root, source } => {
                write!(f, "cannot walk tree under '{}': {}", root.display(), source)
            }
            CheckError::Read { path, source } => {
                write!(f, "cannot read '{}': {}", path.display(), source)
            }
            CheckError::OutsideRoot { root, path } => {
                write!(
                    f,
                    "'{}' is not located under '{}'",
                    path.display(),
                    root.display()
                )
            }
        }
    }
}
