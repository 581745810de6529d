use crate::{
    errors::{FileOperation, IoError},
    naming::EntryKind,
    shape::{classify_directory, classify_file, Accepts, DirectoryShape, FileShape, ShapeError},
    tree::{Content, Node, Tree},
    utils::{create_dir, create_file_exclusive, join_entry},
};
use miette::Diagnostic;
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MaterializeError {
    #[error("unable to create directory")]
    #[diagnostic(
        code(plantree::materialize::directory_creation),
        help("A file may already occupy this path, or its parent is not writable")
    )]
    DirectoryCreation(#[source] IoError),

    #[error("unable to create file")]
    #[diagnostic(
        code(plantree::materialize::file_creation),
        help("Existing files are never overwritten; remove the entry or generate with a clean root")
    )]
    FileCreation(#[source] IoError),

    #[error("invalid content for '{}'", .path.display())]
    #[diagnostic(code(plantree::materialize::shape))]
    Shape {
        path: PathBuf,
        #[source]
        #[diagnostic_source]
        source: ShapeError,
    },

    #[error("unable to write file contents")]
    #[diagnostic(code(plantree::materialize::write))]
    Write(#[source] IoError),
}
impl MaterializeError {
    /// Path of the entry that could not be materialized.
    pub fn path(&self) -> &Path {
        match self {
            Self::DirectoryCreation(error) | Self::FileCreation(error) | Self::Write(error) => {
                &error.path
            }
            Self::Shape { path, .. } => path,
        }
    }
}

/// Materializes every node of `tree` below `root`.
///
/// Nodes are handled depth first in tree order. The first failure stops the
/// walk; whatever was created before it stays on disk.
pub fn materialize(root: &Path, tree: Tree, accepts: &Accepts) -> Result<(), MaterializeError> {
    for node in tree {
        materialize_node(root, node, accepts)?;
    }

    Ok(())
}

/// Materializes a single node (and its descendants) below `parent`.
pub fn materialize_node(
    parent: &Path,
    node: Node,
    accepts: &Accepts,
) -> Result<(), MaterializeError> {
    let path = join_entry(parent, &node.name);

    match node.kind() {
        EntryKind::Directory => generate_dir(path, node.content, accepts),
        EntryKind::File => generate_file(path, node.content, accepts),
    }
}

fn generate_dir(
    path: PathBuf,
    content: Content,
    accepts: &Accepts,
) -> Result<(), MaterializeError> {
    create_dir(&path).map_err(|error| {
        MaterializeError::DirectoryCreation(IoError::new(FileOperation::Mkdir, path.clone(), error))
    })?;

    log::debug!("created directory {}", path.display());

    let shape = classify_directory(content, accepts).map_err(|error| shape_error(&path, error))?;

    if let DirectoryShape::Children(nodes) = shape {
        for node in nodes {
            materialize_node(&path, node, accepts)?;
        }
    }

    Ok(())
}

fn generate_file(
    path: PathBuf,
    content: Content,
    accepts: &Accepts,
) -> Result<(), MaterializeError> {
    // the handle lives until the end of this function, whichever way it exits
    let mut file = create_file_exclusive(&path).map_err(|error| {
        MaterializeError::FileCreation(IoError::new(FileOperation::Create, path.clone(), error))
    })?;

    log::debug!("created file {}", path.display());

    let shape = classify_file(content, accepts).map_err(|error| shape_error(&path, error))?;

    let written = match shape {
        FileShape::Empty => Ok(0),
        FileShape::Bytes(bytes) => file.write_all(&bytes).map(|_| bytes.len() as u64),
        FileShape::Stream(mut reader) => io::copy(&mut reader, &mut file),
    };

    let written = written.map_err(|error| {
        MaterializeError::Write(IoError::new(FileOperation::Write, path.clone(), error))
    })?;

    log::trace!("wrote {} bytes to {}", written, path.display());

    Ok(())
}

fn shape_error(path: &Path, error: ShapeError) -> MaterializeError {
    log::warn!("rejecting content of {}: {}", path.display(), error);

    MaterializeError::Shape {
        path: path.to_path_buf(),
        source: error,
    }
}
