//! Core extraction orchestration.
//! Combines the configuration, key derivation, prompting and patching steps
//! into a single run over every configured localization file, and the steps
//! that follow once the files are committed.

use crate::config::{load_config, Config};
use crate::constants::DEFAULT_PLACEHOLDER_TYPE;
use crate::error::{Error, Result};
use crate::generator::{resolve_command, spawn_generator, GeneratorHandle};
use crate::patcher::{patch_file, LocalizationEntry};
use crate::prompt::Prompter;
use crate::reference::build_reference;
use crate::selection::{
    clean_selection, extract_placeholders, key_from_selection, meaning_from_selection,
    validate_key,
};
use indexmap::IndexMap;
use log::{debug, error};
use std::fs;
use std::path::{Path, PathBuf};

/// Answers supplied up front, e.g. from the command line.
#[derive(Debug, Default, Clone)]
pub struct Preset {
    pub key: Option<String>,
    pub types: IndexMap<String, String>,
}

/// Everything gathered for one selection before any file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub key: String,
    /// Message with `{name}` placeholders
    pub text: String,
    /// Placeholder names in order of appearance, repeats included
    pub placeholders: Vec<String>,
    /// Declared type per distinct placeholder name
    pub types: IndexMap<String, String>,
}

impl Extraction {
    pub fn entry(&self) -> LocalizationEntry {
        LocalizationEntry {
            key: self.key.clone(),
            text: self.text.clone(),
            placeholders: self.types.clone(),
        }
    }

    pub fn reference(&self, prefix: &str) -> String {
        build_reference(prefix, &self.key, &self.placeholders)
    }
}

/// Derives the key, message and placeholders from `selection` and collects
/// the key and every placeholder type.
///
/// # Errors
/// * `Error::InvalidKey` if the chosen key is empty or not alphanumeric
/// * `Error::MissingPlaceholderType` if a placeholder type is left empty
/// * `Error::PromptError` if the prompter fails
pub fn prepare(selection: &str, prompter: &dyn Prompter, preset: &Preset) -> Result<Extraction> {
    let selection = clean_selection(selection);

    let key = match &preset.key {
        Some(key) => key.trim().to_string(),
        None => prompter.text("Enter localization key", &key_from_selection(selection))?,
    };
    validate_key(&key)?;

    let text = meaning_from_selection(selection);
    let placeholders = extract_placeholders(selection);
    debug!("Key '{}', message '{}', placeholders {:?}", key, text, placeholders);

    let mut types = IndexMap::new();
    for placeholder in &placeholders {
        if types.contains_key(placeholder) {
            continue;
        }

        let declared = match preset.types.get(placeholder) {
            Some(declared) => declared.clone(),
            None => prompter.text(
                &format!("Enter data type for placeholder '{placeholder}' (e.g., String, int)"),
                DEFAULT_PLACEHOLDER_TYPE,
            )?,
        };

        let declared = declared.trim();
        if declared.is_empty() {
            return Err(Error::MissingPlaceholderType {
                placeholder: placeholder.clone(),
            });
        }
        types.insert(placeholder.clone(), declared.to_string());
    }

    Ok(Extraction {
        key,
        text,
        placeholders,
        types,
    })
}

/// Outcome of patching every configured output file.
#[derive(Debug, Default)]
pub struct PatchReport {
    pub updated: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, Error)>,
}

impl PatchReport {
    /// True when no output file was skipped.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Appends `entry` to every output file of `config`, in declaration order.
///
/// A file that cannot be patched is skipped and recorded in the report; files
/// already written are left in place.
pub fn apply<P: AsRef<Path>>(
    project_root: P,
    config: &Config,
    entry: &LocalizationEntry,
) -> PatchReport {
    let mut report = PatchReport::default();

    for path in config.output_paths(project_root) {
        match patch_file(&path, entry) {
            Ok(()) => {
                debug!("Updated {}", path.display());
                report.updated.push(path);
            }
            Err(e) => {
                debug!("Skipping '{}': {}", path.display(), e);
                report.failed.push((path, e));
            }
        }
    }

    report
}

/// Result of a complete extraction run.
#[derive(Debug)]
pub struct Outcome {
    pub config: Config,
    pub extraction: Extraction,
    /// Token to put in place of the selection
    pub reference: String,
    pub report: PatchReport,
}

/// Loads the configuration, gathers all answers and patches the output files.
///
/// Configuration, key and placeholder errors are returned before any file is
/// touched.
pub fn extract<P: AsRef<Path>>(
    project_root: P,
    selection: &str,
    prompter: &dyn Prompter,
    preset: &Preset,
) -> Result<Outcome> {
    let project_root = project_root.as_ref();
    let config = load_config(project_root)?;
    let extraction = prepare(selection, prompter, preset)?;

    let report = apply(project_root, &config, &extraction.entry());
    let reference = extraction.reference(&config.prefix);

    Ok(Outcome {
        config,
        extraction,
        reference,
        report,
    })
}

/// Replaces the first occurrence of `selection` in the file at `path` with `token`.
///
/// # Errors
/// * `Error::SelectionNotFound` if `selection` does not occur in the file
/// * `Error::IoError` if the file cannot be read or written
pub fn replace_selection<P: AsRef<Path>>(path: P, selection: &str, token: &str) -> Result<()> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(Error::IoError)?;

    if selection.is_empty() || !content.contains(selection) {
        return Err(Error::SelectionNotFound {
            path: path.display().to_string(),
        });
    }

    fs::write(path, content.replacen(selection, token, 1)).map_err(Error::IoError)
}

/// Runs the steps that follow a patch: the optional source substitution and
/// the generator command.
///
/// Nothing runs unless every output file was updated. A failed substitution
/// does not keep the generator from running; it is reported afterwards.
///
/// # Returns
/// * `Result<Option<String>>` - The generator command that completed, if any
///
/// # Errors
/// * `Error::IncompletePatch` if any output file was skipped
/// * `Error::SelectionNotFound` or `Error::IoError` if the substitution fails
/// * `Error::GeneratorLaunchError` or `Error::GeneratorNonZeroExit` from the generator
pub fn finish<P: AsRef<Path>>(
    project_root: P,
    outcome: &Outcome,
    selection: &str,
    replace_in: Option<&Path>,
    run_generator: bool,
) -> Result<Option<String>> {
    if !outcome.report.is_complete() {
        let skipped: Vec<String> = outcome
            .report
            .failed
            .iter()
            .map(|(path, _)| path.display().to_string())
            .collect();
        return Err(Error::IncompletePatch {
            skipped: skipped.join(", "),
        });
    }

    let substituted = match replace_in {
        Some(source) => replace_selection(source, selection, &outcome.reference),
        None => Ok(()),
    };

    let command = if run_generator {
        resolve_command(&outcome.config.generator)
    } else {
        None
    };
    let generated = match &command {
        Some(command) => spawn_generator(command, project_root).and_then(GeneratorHandle::wait),
        None => Ok(()),
    };

    match (substituted, generated) {
        (Err(substitution), Err(generator)) => {
            error!("{substitution}");
            Err(generator)
        }
        (Err(substitution), Ok(())) => Err(substitution),
        (Ok(()), generated) => generated.map(|()| command),
    }
}
