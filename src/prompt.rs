//! User input and interaction handling.

use crate::error::{Error, Result};
use dialoguer::Input;

/// Source of answers for the key and placeholder type questions.
pub trait Prompter {
    /// Asks a free-text question, offering `default` as the initial answer.
    ///
    /// An empty string means the user gave no answer.
    fn text(&self, prompt: &str, default: &str) -> Result<String>;
}

/// Interactive terminal prompter backed by dialoguer.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn text(&self, prompt: &str, default: &str) -> Result<String> {
        let input: String = Input::new()
            .with_prompt(prompt)
            .with_initial_text(default)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))?;

        Ok(input.trim().to_string())
    }
}

/// Prompter that answers every question with its default.
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn text(&self, _prompt: &str, default: &str) -> Result<String> {
        Ok(default.to_string())
    }
}
