use crate::{
    naming::EntryKind,
    tree::{Content, ContentKind, Node},
};
use miette::Diagnostic;
use std::{fmt, io::Read};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ShapeError {
    #[error("file content must be textual, byte-stream, or absent (found {found})")]
    #[diagnostic(
        code(plantree::shape::file),
        help("Add a trailing '/' to the name if this entry is meant to be a directory")
    )]
    File { found: ContentKind },

    #[error("directory content must be a node, a collection of nodes, or absent (found {found})")]
    #[diagnostic(
        code(plantree::shape::directory),
        help("Remove the trailing '/' from the name if this entry is meant to be a file")
    )]
    Directory { found: ContentKind },

    #[error("{found} content is not accepted by this generator")]
    #[diagnostic(
        code(plantree::shape::unsupported),
        help("Use a generator configured to accept this content, or describe it differently")
    )]
    Unsupported { found: ContentKind },
}

/// Optional content shapes a generator configuration supports.
///
/// Text, absent content and collections are always accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepts {
    /// Files may be fed from a [`Content::Readable`].
    pub streams: bool,
    /// Directories may hold a lone [`Content::Child`].
    pub single_child: bool,
}
impl Accepts {
    pub fn all() -> Self {
        Self {
            streams: true,
            single_child: true,
        }
    }
}
impl Default for Accepts {
    fn default() -> Self {
        Self::all()
    }
}

/// Resolved content of a file node.
pub enum FileShape {
    Empty,
    Bytes(Vec<u8>),
    Stream(Box<dyn Read>),
}
impl fmt::Debug for FileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Stream(_) => write!(f, "Stream(..)"),
        }
    }
}

/// Resolved content of a directory node.
#[derive(Debug)]
pub enum DirectoryShape {
    Empty,
    Children(Vec<Node>),
}

/// Resolved interpretation of a node's content, valid for its [`EntryKind`].
#[derive(Debug)]
pub enum Shape {
    File(FileShape),
    Directory(DirectoryShape),
}

pub fn classify_file(content: Content, accepts: &Accepts) -> Result<FileShape, ShapeError> {
    match content {
        Content::Absent => Ok(FileShape::Empty),
        Content::Text(bytes) if bytes.is_empty() => Ok(FileShape::Empty),
        Content::Text(bytes) => Ok(FileShape::Bytes(bytes)),
        Content::Readable(_) if !accepts.streams => Err(ShapeError::Unsupported {
            found: ContentKind::Readable,
        }),
        Content::Readable(reader) => Ok(FileShape::Stream(reader)),
        other => Err(ShapeError::File {
            found: other.kind(),
        }),
    }
}

pub fn classify_directory(
    content: Content,
    accepts: &Accepts,
) -> Result<DirectoryShape, ShapeError> {
    match content {
        Content::Absent => Ok(DirectoryShape::Empty),
        Content::Child(_) if !accepts.single_child => Err(ShapeError::Unsupported {
            found: ContentKind::Child,
        }),
        Content::Child(node) => Ok(DirectoryShape::Children(vec![*node])),
        Content::Collection(tree) if tree.is_empty() => Ok(DirectoryShape::Empty),
        Content::Collection(tree) => Ok(DirectoryShape::Children(tree.into_nodes())),
        other => Err(ShapeError::Directory {
            found: other.kind(),
        }),
    }
}

/// Checks `content` against the node kind and the accepted shapes.
pub fn classify_content(
    kind: EntryKind,
    content: Content,
    accepts: &Accepts,
) -> Result<Shape, ShapeError> {
    match kind {
        EntryKind::File => classify_file(content, accepts).map(Shape::File),
        EntryKind::Directory => classify_directory(content, accepts).map(Shape::Directory),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;

    #[test]
    fn test_file_absent_and_empty_text_are_empty_file() {
        let accepts = Accepts::all();

        let shape = classify_content(EntryKind::File, Content::Absent, &accepts).unwrap();
        assert!(matches!(shape, Shape::File(FileShape::Empty)));

        let shape = classify_content(EntryKind::File, "".into(), &accepts).unwrap();
        assert!(matches!(shape, Shape::File(FileShape::Empty)));
    }

    #[test]
    fn test_file_text_is_bytes() {
        let shape = classify_content(EntryKind::File, "hi".into(), &Accepts::all()).unwrap();

        assert!(matches!(shape, Shape::File(FileShape::Bytes(ref bytes)) if bytes == b"hi"));
    }

    #[test]
    fn test_file_stream_depends_on_accepts() {
        let shape =
            classify_content(EntryKind::File, Content::reader(&b"x"[..]), &Accepts::all());
        assert!(matches!(shape, Ok(Shape::File(FileShape::Stream(_)))));

        let accepts = Accepts {
            streams: false,
            single_child: true,
        };
        let error =
            classify_content(EntryKind::File, Content::reader(&b"x"[..]), &accepts).unwrap_err();
        assert_eq!(
            error,
            ShapeError::Unsupported {
                found: ContentKind::Readable
            }
        );
    }

    #[test]
    fn test_file_with_directory_content_is_err() {
        let error = classify_content(EntryKind::File, Tree::new().into(), &Accepts::all())
            .unwrap_err();
        assert_eq!(
            error,
            ShapeError::File {
                found: ContentKind::Collection
            }
        );

        let error = classify_content(
            EntryKind::File,
            crate::tree::Node::new("a", "").into(),
            &Accepts::all(),
        )
        .unwrap_err();
        assert_eq!(
            error,
            ShapeError::File {
                found: ContentKind::Child
            }
        );
    }

    #[test]
    fn test_directory_absent_and_empty_collection_are_empty_directory() {
        let shape =
            classify_content(EntryKind::Directory, Content::Absent, &Accepts::all()).unwrap();
        assert!(matches!(shape, Shape::Directory(DirectoryShape::Empty)));

        let shape =
            classify_content(EntryKind::Directory, Tree::new().into(), &Accepts::all()).unwrap();
        assert!(matches!(shape, Shape::Directory(DirectoryShape::Empty)));
    }

    #[test]
    fn test_directory_children_keep_order() {
        let tree = Tree::new().with("b.txt", "").with("a/", None::<Tree>);

        let shape = classify_directory(tree.into(), &Accepts::all()).unwrap();
        let DirectoryShape::Children(nodes) = shape else {
            panic!("expected children");
        };

        let names: Vec<&str> = nodes.iter().map(|node| node.name.as_str()).collect();
        assert_eq!(names, vec!["b.txt", "a/"]);
    }

    #[test]
    fn test_directory_single_child_depends_on_accepts() {
        let child = || Content::from(crate::tree::Node::new(".gitkeep", ""));

        let shape = classify_content(EntryKind::Directory, child(), &Accepts::all()).unwrap();
        assert!(matches!(
            shape,
            Shape::Directory(DirectoryShape::Children(ref nodes)) if nodes.len() == 1
        ));

        let accepts = Accepts {
            streams: true,
            single_child: false,
        };
        let error = classify_content(EntryKind::Directory, child(), &accepts).unwrap_err();
        assert_eq!(
            error,
            ShapeError::Unsupported {
                found: ContentKind::Child
            }
        );
    }

    #[test]
    fn test_directory_with_file_content_is_err() {
        let error =
            classify_content(EntryKind::Directory, "text".into(), &Accepts::all()).unwrap_err();
        assert_eq!(
            error,
            ShapeError::Directory {
                found: ContentKind::Text
            }
        );

        let error = classify_content(
            EntryKind::Directory,
            Content::reader(&b"x"[..]),
            &Accepts::all(),
        )
        .unwrap_err();
        assert_eq!(
            error,
            ShapeError::Directory {
                found: ContentKind::Readable
            }
        );
    }

    #[test]
    fn test_shape_error_messages() {
        assert_eq!(
            ShapeError::File {
                found: ContentKind::Collection
            }
            .to_string(),
            "file content must be textual, byte-stream, or absent (found collection of nodes)"
        );
        assert_eq!(
            ShapeError::Directory {
                found: ContentKind::Text
            }
            .to_string(),
            "directory content must be a node, a collection of nodes, or absent (found text)"
        );
    }
}
