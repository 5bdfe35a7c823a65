//! Command-line interface implementation for l10n-extract.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for l10n-extract.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Extract a string literal into localization files",
    long_about = None
)]
pub struct Args {
    /// Selected text, optionally still wrapped in quotes
    #[arg(value_name = "SELECTION", required_unless_present = "stdin")]
    pub selection: Option<String>,

    /// Project root containing the configuration file
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub project_root: PathBuf,

    /// Read the selection from stdin
    #[arg(short, long, conflicts_with = "selection")]
    pub stdin: bool,

    /// Localization key to use instead of prompting for one
    #[arg(short, long)]
    pub key: Option<String>,

    /// Placeholder type as NAME=TYPE; may be repeated
    #[arg(
        short = 't',
        long = "type",
        value_name = "NAME=TYPE",
        value_parser = parse_type_assignment
    )]
    pub types: Vec<(String, String)>,

    /// Accept every default answer without prompting
    #[arg(short = 'y', long)]
    pub non_interactive: bool,

    /// Replace the first occurrence of the selection in this file with the reference
    #[arg(long, value_name = "FILE")]
    pub replace_in: Option<PathBuf>,

    /// Do not run the configured generator command
    #[arg(long)]
    pub skip_generator: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses a `NAME=TYPE` pair.
pub fn parse_type_assignment(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((name, kind)) if !name.trim().is_empty() && !kind.trim().is_empty() => {
            Ok((name.trim().to_string(), kind.trim().to_string()))
        }
        _ => Err(format!("expected NAME=TYPE, got '{value}'")),
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
