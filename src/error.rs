//! Error handling for the l10n-extract application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for extraction operations.
///
/// Configuration and key errors abort the whole run before any file is touched.
/// File level errors (`MalformedFile`, `IoError`) only skip the file they occurred on.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file does not exist in the project root
    #[error("Configuration file not found (tried: {tried}).")]
    ConfigNotFound { tried: String },

    /// The configuration file exists but could not be read or understood
    #[error("Failed to parse configuration '{path}': {reason}.")]
    ConfigParseError { path: String, reason: String },

    /// The localization key is empty or contains characters outside `[A-Za-z0-9]`
    #[error("Localization key '{key}' is invalid.")]
    InvalidKey { key: String },

    /// No type was supplied for a placeholder
    #[error("Data type for placeholder '{placeholder}' is required.")]
    MissingPlaceholderType { placeholder: String },

    /// The localization file has no closing brace to insert before
    #[error("Malformed localization file: no closing brace found.")]
    MalformedFile,

    /// Some output files could not be patched
    #[error("Localization files left unchanged: {skipped}.")]
    IncompletePatch { skipped: String },

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The generator command could not be started
    #[error("Failed to run \"{command}\": {source}.")]
    GeneratorLaunchError {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The generator command ran but did not succeed
    #[error("Command \"{command}\" failed with exit code {}.", exit_code(.code))]
    GeneratorNonZeroExit { command: String, code: Option<i32> },

    /// Represents failures of the interactive prompt itself
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// The selection to substitute is absent from the source file
    #[error("Selection not found in '{path}'.")]
    SelectionNotFound { path: String },
}

fn exit_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
