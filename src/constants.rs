//! Common constants used throughout the l10n-extract application.

/// Supported configuration file names, tried in order
pub const CONFIG_FILES: [&str; 3] = [
    "extract_localization_config.yaml",
    "extract_localization_config.yml",
    "extract_localization_config.json",
];

/// Indent used when a localization file has no indented entries
pub const DEFAULT_INDENT: &str = "  ";

/// Type offered when prompting for a placeholder type
pub const DEFAULT_PLACEHOLDER_TYPE: &str = "String";

/// Command run for `GeneratorDirective::DefaultCommand`
pub const DEFAULT_GENERATOR_COMMAND: &str = "flutter gen-l10n";
