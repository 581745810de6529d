//! Materializes in-memory descriptions of file trees onto disk.
//!
//! A [`Tree`] maps names to [`Content`]. Names ending with `/` are
//! directories, everything else is a file. A [`Generator`] walks the tree
//! depth first, creating directories idempotently and files exclusively:
//! an existing file is never overwritten.
//!
//! ```no_run
//! use plantree::{Node, Tree};
//!
//! let tree = Tree::new()
//!     .with("README.md", "# This is the title")
//!     .with("src/", Tree::new().with("main.rs", "fn main() {}"))
//!     .with("test/", Node::new(".gitkeep", None::<&str>))
//!     .with("vendor/", None::<Tree>);
//!
//! let root = plantree::generate(tree)?;
//! assert!(root.join("src/main.rs").is_file());
//! # Ok::<(), plantree::GenerateError>(())
//! ```
pub mod api;
pub mod description;
pub mod errors;
pub mod materialize;
pub mod naming;
pub mod preview;
pub mod prompt;
pub mod provision;
pub mod shape;
pub mod tree;
pub mod utils;

pub use api::{generate, generate_from_root, GenerateError, Generator};
pub use description::DescriptionError;
pub use materialize::MaterializeError;
pub use naming::{classify, EntryKind};
pub use provision::{ProvisionError, Provisioning};
pub use shape::{Accepts, ShapeError};
pub use tree::{Content, ContentKind, Node, Tree};
