//! Configuration handling for l10n-extract.
//! This module locates the project configuration file and resolves it into a
//! [`Config`], including the generator directive written in any of the
//! historically supported shapes.

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// What to run after the localization files have been patched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GeneratorDirective {
    /// Do not run anything
    #[default]
    None,
    /// Run the built-in default command
    DefaultCommand,
    /// Run the given command line
    CustomCommand(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawGenerator {
    Flag(bool),
    Command(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    output_files: Vec<String>,
    prefix: String,
    #[serde(default)]
    generator: Option<RawGenerator>,
    #[serde(default)]
    gen_command: Option<String>,
    #[serde(default)]
    run_flutter_gen: Option<bool>,
}

/// Resolved project configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Localization files to patch, relative to the project root
    pub output_files: Vec<String>,
    /// Namespace prepended to generated references
    pub prefix: String,
    pub generator: GeneratorDirective,
}

impl Config {
    /// Output file paths joined onto `project_root`, in declaration order.
    pub fn output_paths<P: AsRef<Path>>(&self, project_root: P) -> Vec<PathBuf> {
        self.output_files
            .iter()
            .map(|file| project_root.as_ref().join(file))
            .collect()
    }
}

fn command_directive(command: String) -> GeneratorDirective {
    if command.trim().is_empty() {
        GeneratorDirective::None
    } else {
        GeneratorDirective::CustomCommand(command)
    }
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let generator = match (raw.generator, raw.gen_command, raw.run_flutter_gen) {
            (Some(RawGenerator::Command(command)), _, _) => command_directive(command),
            (Some(RawGenerator::Flag(true)), _, _) => GeneratorDirective::DefaultCommand,
            (Some(RawGenerator::Flag(false)), _, _) => GeneratorDirective::None,
            (None, Some(command), _) => command_directive(command),
            (None, None, Some(true)) => GeneratorDirective::DefaultCommand,
            (None, None, _) => GeneratorDirective::None,
        };

        Self {
            output_files: raw.output_files,
            prefix: raw.prefix,
            generator,
        }
    }
}

/// Finds the first existing configuration file in `project_root`.
///
/// # Errors
/// * `Error::ConfigNotFound` if none of the names exists
pub fn find_config<P: AsRef<Path>>(project_root: P, config_files: &[&str]) -> Result<PathBuf> {
    let project_root = project_root.as_ref();
    config_files
        .iter()
        .map(|file| project_root.join(file))
        .find(|path| path.is_file())
        .ok_or_else(|| Error::ConfigNotFound {
            tried: config_files
                .iter()
                .map(|file| project_root.join(file).display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Parses configuration content, trying JSON first and then YAML.
///
/// # Errors
/// * `Error::ConfigParseError` if the content matches neither format or the schema
pub fn parse_config(content: &str, path: &Path) -> Result<Config> {
    let raw: RawConfig = match serde_json::from_str(content) {
        Ok(raw) => raw,
        Err(_) => serde_yaml::from_str(content).map_err(|e| Error::ConfigParseError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?,
    };

    Ok(raw.into())
}

/// Loads the configuration of the project at `project_root`.
///
/// The file is read anew on every call.
///
/// # Errors
/// * `Error::ConfigNotFound` if no configuration file exists
/// * `Error::ConfigParseError` if it cannot be read or parsed
pub fn load_config<P: AsRef<Path>>(project_root: P) -> Result<Config> {
    let config_path = find_config(project_root, &CONFIG_FILES)?;
    debug!("Loading configuration from {}", config_path.display());

    let content = std::fs::read_to_string(&config_path).map_err(|e| Error::ConfigParseError {
        path: config_path.display().to_string(),
        reason: e.to_string(),
    })?;

    parse_config(&content, &config_path)
}
