//! l10n-extract's main application entry point and orchestration logic.
//! Handles command-line argument parsing, the extraction flow, and the
//! optional source substitution and generator run.

use std::io::Read;

use l10n_extract::{
    cli::{get_args, Args},
    error::{default_error_handler, Error, Result},
    extract::{extract, finish, Preset},
    prompt::{DefaultsPrompter, DialoguerPrompter, Prompter},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn read_selection(args: &Args) -> Result<String> {
    match &args.selection {
        Some(selection) if !args.stdin => Ok(selection.clone()),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(Error::IoError)?;
            Ok(buffer)
        }
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration from the project root
/// 2. Collects the key and placeholder types
/// 3. Patches every output file, skipping those that fail
/// 4. Prints the reference token once at least one file holds the key
/// 5. Substitutes the token in a source file and runs the generator,
///    both only when every output file was updated
fn run(args: Args) -> Result<()> {
    let selection = read_selection(&args)?;
    let prompt: Box<dyn Prompter> = if args.non_interactive {
        Box::new(DefaultsPrompter)
    } else {
        Box::new(DialoguerPrompter::new())
    };
    let preset = Preset {
        key: args.key.clone(),
        types: args.types.iter().cloned().collect(),
    };

    let outcome = extract(&args.project_root, &selection, &*prompt, &preset)?;

    for (path, err) in &outcome.report.failed {
        eprintln!("Failed to update '{}': {}", path.display(), err);
    }
    for path in &outcome.report.updated {
        eprintln!("Updated: '{}'", path.display());
    }
    if !outcome.report.updated.is_empty() {
        println!("{}", outcome.reference);
    }

    let command = finish(
        &args.project_root,
        &outcome,
        selection.trim(),
        args.replace_in.as_deref(),
        !args.skip_generator,
    )?;

    eprintln!("Localization key '{}' created successfully.", outcome.extraction.key);
    if let Some(command) = command {
        eprintln!("Command \"{command}\" completed successfully.");
    }

    Ok(())
}
