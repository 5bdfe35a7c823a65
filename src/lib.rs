//! l10n-extract moves a selected string literal into localization files.
//! It derives a key and a message template from the selection, appends them
//! to every configured file without disturbing existing content, and can run
//! a code generator afterwards.

/// Command-line interface module for the l10n-extract application
pub mod cli;

/// Configuration handling
/// Supports JSON and YAML formats (extract_localization_config.yaml, .yml, .json)
pub mod config;

/// Shared constants
pub mod constants;

/// Error types and handling for the l10n-extract application
pub mod error;

/// Core extraction orchestration
/// Combines all components into one run over the output files
pub mod extract;

/// External generator command handling
pub mod generator;

/// Format-preserving localization file patching
pub mod patcher;

/// User input and interaction handling
pub mod prompt;

/// Reference token construction
pub mod reference;

/// Key, message and placeholder derivation from selected text
pub mod selection;
