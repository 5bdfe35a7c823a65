//! Launching of the external code generator once all files are patched.
//!
//! The process runs detached from the patching work. Its outcome is only
//! observed through [`GeneratorHandle::wait`].

use std::path::Path;
use std::process::{Child, Command, Stdio};

use crate::config::GeneratorDirective;
use crate::constants::DEFAULT_GENERATOR_COMMAND;
use crate::error::{Error, Result};
use log::debug;

/// Splits a command line on whitespace into the program and its arguments.
///
/// Returns `None` for a blank command line.
pub fn parse_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Returns the command line to run for `directive`, if any.
pub fn resolve_command(directive: &GeneratorDirective) -> Option<String> {
    match directive {
        GeneratorDirective::None => None,
        GeneratorDirective::DefaultCommand => Some(DEFAULT_GENERATOR_COMMAND.to_string()),
        GeneratorDirective::CustomCommand(command) => Some(command.clone()),
    }
}

/// A launched generator process.
#[derive(Debug)]
pub struct GeneratorHandle {
    command: String,
    child: Child,
}

impl GeneratorHandle {
    /// The command line the process was started from.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Waits for the process to finish and reports its outcome.
    ///
    /// # Errors
    /// * `Error::GeneratorNonZeroExit` if the process did not exit successfully
    /// * `Error::GeneratorLaunchError` if waiting on the process fails
    pub fn wait(mut self) -> Result<()> {
        let status = self
            .child
            .wait()
            .map_err(|source| Error::GeneratorLaunchError {
                command: self.command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::GeneratorNonZeroExit {
                command: self.command,
                code: status.code(),
            });
        }

        debug!("Command \"{}\" completed successfully", self.command);
        Ok(())
    }
}

/// Starts `command` with `project_root` as its working directory.
///
/// # Errors
/// * `Error::GeneratorLaunchError` if the command is blank or cannot be spawned
pub fn spawn_generator<P: AsRef<Path>>(command: &str, project_root: P) -> Result<GeneratorHandle> {
    let (program, args) = parse_command(command).ok_or_else(|| Error::GeneratorLaunchError {
        command: command.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
    })?;

    debug!("Running \"{}\" in {}", command, project_root.as_ref().display());

    let child = Command::new(program)
        .args(args)
        .current_dir(project_root)
        .stdin(Stdio::null())
        // stdout carries the reference token
        .stdout(Stdio::from(std::io::stderr()))
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| Error::GeneratorLaunchError {
            command: command.to_string(),
            source,
        })?;

    Ok(GeneratorHandle {
        command: command.to_string(),
        child,
    })
}
