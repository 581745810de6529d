use crate::{
    materialize::{self, MaterializeError},
    provision::{self, ProvisionError, Provisioning},
    shape::Accepts,
    tree::Tree,
};
use std::path::{Path, PathBuf};

const DEFAULT_PREFIX: &str = "plantree";

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GenerateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Provision(#[from] ProvisionError),

    #[error("unable to populate root directory '{}'", .root.display())]
    #[diagnostic(
        code(plantree::generate),
        help("Entries created before the failure were left in place under the root")
    )]
    Materialize {
        root: PathBuf,
        #[source]
        #[diagnostic_source]
        source: MaterializeError,
    },
}
impl GenerateError {
    /// The root that was being populated, if provisioning got that far.
    pub fn root(&self) -> Option<&Path> {
        match self {
            Self::Provision(_) => None,
            Self::Materialize { root, .. } => Some(root),
        }
    }
}

/// Materializes [`Tree`] descriptions under a root directory.
///
/// A generator combines a [`Provisioning`] mode with the [`Accepts`] set of
/// optional content shapes. [`Generator::strict`] never clears the root and
/// accepts single-child directories; [`Generator::destructive`] clears the
/// root first and accepts streamed file contents.
#[derive(Debug, Clone)]
pub struct Generator {
    provisioning: Provisioning,
    accepts: Accepts,
    prefix: String,
}
impl Generator {
    pub fn strict() -> Self {
        Self {
            provisioning: Provisioning::Strict,
            accepts: Accepts {
                streams: false,
                single_child: true,
            },
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    pub fn destructive() -> Self {
        Self {
            provisioning: Provisioning::Destructive,
            accepts: Accepts {
                streams: true,
                single_child: false,
            },
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    pub fn with_accepts(mut self, accepts: Accepts) -> Self {
        self.accepts = accepts;
        self
    }

    /// Name prefix of temporary roots allocated by [`Generator::generate`].
    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn provisioning(&self) -> Provisioning {
        self.provisioning
    }

    pub fn accepts(&self) -> &Accepts {
        &self.accepts
    }

    /// Generates `tree` under a freshly allocated temporary root and returns it.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] if the temporary root cannot be allocated or
    /// if any node fails to materialize. In the latter case
    /// [`GenerateError::root`] points at the partially populated root.
    pub fn generate(&self, tree: Tree) -> Result<PathBuf, GenerateError> {
        let root = provision::provision(None, &self.prefix)?;

        self.generate_from_root(&root, tree)?;

        Ok(root)
    }

    /// Generates `tree` under `root`, preparing it per the provisioning mode.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] if:
    ///
    /// - `root` is empty.
    /// - The root cannot be cleared (destructive mode) or created.
    /// - A directory or file cannot be created, or a file cannot be written.
    /// - A node's content does not fit its name or is not accepted.
    pub fn generate_from_root<P: AsRef<Path>>(
        &self,
        root: P,
        tree: Tree,
    ) -> Result<(), GenerateError> {
        let root = root.as_ref();

        provision::prepare(root, self.provisioning)?;

        log::debug!(
            "generating {} top-level entries under {} ({:?})",
            tree.len(),
            root.display(),
            self.provisioning
        );

        materialize::materialize(root, tree, &self.accepts).map_err(|error| {
            GenerateError::Materialize {
                root: root.to_path_buf(),
                source: error,
            }
        })
    }
}
impl Default for Generator {
    fn default() -> Self {
        Self::strict()
    }
}

/// [`Generator::generate`] with the strict generator.
pub fn generate(tree: Tree) -> Result<PathBuf, GenerateError> {
    Generator::strict().generate(tree)
}

/// [`Generator::generate_from_root`] with the strict generator.
pub fn generate_from_root<P: AsRef<Path>>(root: P, tree: Tree) -> Result<(), GenerateError> {
    Generator::strict().generate_from_root(root, tree)
}
