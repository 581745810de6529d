use inquire::Confirm;
use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("Error occurred trying to prompt user")]
    #[diagnostic(
        code(plantree::prompt::inquire),
        help("Run in an interactive terminal, or pass --yes to skip confirmation")
    )]
    Inquire(#[from] inquire::InquireError),
}

/// Asks whether the entries already under `root` may be removed.
pub fn confirm_clean(root: &Path, existing: usize) -> Result<bool, PromptError> {
    let question = format!(
        "{} already holds {} entries, remove them before generating?",
        root.display(),
        existing
    );

    let answer = Confirm::new(&question)
        .with_default(false)
        .with_help_message("Everything under the root directory will be deleted")
        .prompt()?;

    Ok(answer)
}
