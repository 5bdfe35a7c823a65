//! Derivation of localization keys, message templates and placeholder names
//! from the raw text of a selected string literal.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static INTERPOLATION_DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[${}]").expect("valid regex"));

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid regex"));

static BRACED_INTERPOLATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z0-9_]+)\}").expect("valid regex"));

static BARE_INTERPOLATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([A-Za-z0-9_]+)").expect("valid regex"));

static ANY_INTERPOLATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z0-9_]+)\}|\$([A-Za-z0-9_]+)").expect("valid regex")
});

static VALID_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid regex"));

/// Strips surrounding whitespace and at most one quote character from each end.
///
/// # Example
/// ```
/// use l10n_extract::selection::clean_selection;
///
/// assert_eq!(clean_selection("  'Hello, World!' "), "Hello, World!");
/// ```
pub fn clean_selection(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix(['"', '\'']).unwrap_or(trimmed);
    trimmed.strip_suffix(['"', '\'']).unwrap_or(trimmed)
}

/// Builds the default camelCase key candidate for a selection.
///
/// Interpolation delimiters are dropped, every run of non-alphanumeric characters
/// is removed and the character following it is uppercased, and the first character
/// of the result is lowercased. A trailing run has no follower and simply vanishes.
///
/// # Example
/// ```
/// use l10n_extract::selection::key_from_selection;
///
/// assert_eq!(key_from_selection("Hello, World!"), "helloWorld");
/// ```
pub fn key_from_selection(text: &str) -> String {
    let stripped = INTERPOLATION_DELIMITERS.replace_all(text, "");

    let mut key = String::with_capacity(stripped.len());
    for (index, segment) in NON_ALPHANUMERIC.split(&stripped).enumerate() {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if index > 0 => {
                key.push(first.to_ascii_uppercase());
                key.push_str(chars.as_str());
            }
            Some(_) => key.push_str(segment),
            None => {}
        }
    }

    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => key,
    }
}

/// Rewrites `${name}` and `$name` interpolations to `{name}` and drops any other `$`.
pub fn meaning_from_selection(text: &str) -> String {
    let text = BRACED_INTERPOLATION.replace_all(text, "{${1}}");
    let text = BARE_INTERPOLATION.replace_all(&text, "{${1}}");
    text.replace('$', "")
}

/// Returns interpolated names in order of appearance.
///
/// Repeated names are kept: `"${a} and $b and ${a}"` yields `["a", "b", "a"]`.
pub fn extract_placeholders(text: &str) -> Vec<String> {
    ANY_INTERPOLATION
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|name| name.as_str().to_string())
        .collect()
}

/// Accepts only non-empty ASCII alphanumeric keys.
pub fn validate_key(key: &str) -> Result<()> {
    if VALID_KEY.is_match(key) {
        Ok(())
    } else {
        Err(Error::InvalidKey {
            key: key.to_string(),
        })
    }
}
