use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use colored::Colorize;
use plantree::{
    description::DescriptionError,
    preview,
    prompt::{self, PromptError},
    GenerateError, Generator, Tree,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Description(#[from] DescriptionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] PromptError),

    #[error("unable to inspect root directory '{}'", .root.display())]
    #[diagnostic(code(plantree::cli::inspect))]
    Inspect {
        root: PathBuf,
        #[source]
        source: treecheck::errors::CheckError,
    },
}

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates the tree described by a TOML file")
                .arg(
                    Arg::new("description")
                        .help("TOML file describing the tree to generate")
                        .required(true),
                )
                .arg(
                    Arg::new("root")
                        .short('r')
                        .long("root")
                        .help("Directory to generate into (defaults to a new temporary directory)"),
                )
                .arg(
                    Arg::new("clean")
                        .short('c')
                        .long("clean")
                        .help("Remove everything under the root before generating")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Do not ask for confirmation before cleaning the root")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("prefix")
                        .long("prefix")
                        .help("Name prefix of the temporary root directory")
                        .default_value("plantree"),
                ),
        )
        .subcommand(
            Command::new("preview")
                .about("Prints the tree described by a TOML file without generating it")
                .arg(
                    Arg::new("description")
                        .help("TOML file describing the tree")
                        .required(true),
                ),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("generate", args)) => handle_generate(args)?,
        Some(("preview", args)) => handle_preview(args)?,
        _ => unreachable!(),
    }

    Ok(())
}

fn init_logging(is_verbose: bool) {
    let level = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn handle_generate(args: &ArgMatches) -> Result<(), CliError> {
    let description = args
        .get_one::<String>("description")
        .expect("description required");
    let prefix = args.get_one::<String>("prefix").expect("prefix defaulted");
    let clean = args.get_flag("clean");

    let tree = Tree::from_file(description)?;

    let generator = match clean {
        true => Generator::destructive(),
        false => Generator::strict(),
    };
    let generator = generator.with_prefix(prefix.as_str());

    let root = match args.get_one::<String>("root") {
        Some(root) => {
            let root = PathBuf::from(root);

            if clean && !args.get_flag("yes") {
                let existing = existing_entries(&root)?;

                if existing > 0 && !prompt::confirm_clean(&root, existing)? {
                    eprintln!("{}", "aborted, nothing was removed".yellow());
                    return Ok(());
                }
            }

            generator.generate_from_root(&root, tree)?;
            root
        }
        None => generator.generate(tree)?,
    };

    let snapshot = treecheck::snapshot(&root).map_err(|error| CliError::Inspect {
        root: root.clone(),
        source: error,
    })?;

    println!("{}", root.display());
    eprintln!(
        "{} {} ({} directories, {} files)",
        "generated".green(),
        root.display(),
        snapshot.directory_count(),
        snapshot.file_count()
    );

    Ok(())
}

// a non-directory root counts as one entry since cleaning removes it
fn existing_entries(root: &Path) -> Result<usize, CliError> {
    if treecheck::is_dir(root) {
        let counts = treecheck::count_entries(root).map_err(|error| CliError::Inspect {
            root: root.to_path_buf(),
            source: error,
        })?;

        return Ok(counts.directories + counts.files);
    }

    Ok(usize::from(fs::symlink_metadata(root).is_ok()))
}

fn handle_preview(args: &ArgMatches) -> Result<(), CliError> {
    let description = args
        .get_one::<String>("description")
        .expect("description required");

    let tree = Tree::from_file(description)?;

    let label = Path::new(description)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| description.clone());

    preview::preview_as_tree(&tree, &label);

    Ok(())
}
