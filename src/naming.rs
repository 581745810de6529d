/// Trailing character that marks a name as a directory.
pub const SEPARATOR: char = '/';

/// What a node name denotes on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}
impl EntryKind {
    fn as_str(&self) -> &str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}
impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A name is a directory iff it ends with [`SEPARATOR`]. Nothing else
/// (extension, content) is consulted.
pub fn classify(name: &str) -> EntryKind {
    if name.ends_with(SEPARATOR) {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}
