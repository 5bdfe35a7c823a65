//! Format-preserving insertion of new entries into localization files.
//!
//! The file is never re-serialized. A light scan finds the closing brace of the
//! top-level object, the end of the last value in front of it and the indent
//! unit in use. The separator goes right after that value and the new entry
//! after any comment trailing it. Every byte outside the insertion points stays
//! as it was, so reviewers only see the added lines in a diff.

use crate::constants::DEFAULT_INDENT;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::{debug, warn};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

static INDENTED_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\n( +)""#).expect("valid regex"));

/// A key, its message and the declared type of each placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationEntry {
    pub key: String,
    pub text: String,
    /// Placeholder name to declared type, in order of first appearance.
    pub placeholders: IndexMap<String, String>,
}

impl LocalizationEntry {
    pub fn new<K: Into<String>, T: Into<String>>(key: K, text: T) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            placeholders: IndexMap::new(),
        }
    }

    pub fn with_placeholder<N: Into<String>, T: Into<String>>(mut self, name: N, kind: T) -> Self {
        self.placeholders.insert(name.into(), kind.into());
        self
    }

    /// Key under which the placeholder metadata is stored.
    pub fn metadata_key(&self) -> String {
        format!("@{}", self.key)
    }
}

#[derive(Serialize)]
struct PlaceholderSpec<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Serialize)]
struct Metadata<'a> {
    placeholders: IndexMap<&'a str, PlaceholderSpec<'a>>,
}

/// Returns the indent of the first indented `"`-prefixed line, or two spaces.
pub fn detect_indent(content: &str) -> &str {
    INDENTED_ENTRY
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map_or(DEFAULT_INDENT, |indent| indent.as_str())
}

fn detect_newline(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Byte offset just past the last character of `head` that is neither
/// whitespace nor part of a `//` or `/* */` comment.
fn value_end(head: &str) -> usize {
    let bytes = head.as_bytes();
    let len = bytes.len();
    let mut end = 0;
    let mut i = 0;

    while i < len {
        match bytes[i] {
            b'"' => {
                i += 1;
                while i < len && bytes[i] != b'"' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i = (i + 1).min(len);
                end = i;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < len && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < len && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i = (i + 2).min(len);
            }
            byte if byte.is_ascii_whitespace() => i += 1,
            _ => {
                i += 1;
                end = i;
            }
        }
    }

    end
}

/// Whether an entry appended after `value` must be preceded by a comma.
fn needs_separator(value: &str) -> bool {
    !matches!(value.chars().last(), Some(',') | Some('{') | None)
}

fn to_json_string(value: &str) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::IoError(e.into()))
}

/// Pretty-prints the placeholders object with `indent` as the unit and shifts
/// every continuation line one level right so it nests under the top-level entries.
fn render_metadata(entry: &LocalizationEntry, indent: &str, newline: &str) -> Result<String> {
    let metadata = Metadata {
        placeholders: entry
            .placeholders
            .iter()
            .map(|(name, kind)| (name.as_str(), PlaceholderSpec { kind }))
            .collect(),
    };

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    metadata
        .serialize(&mut serializer)
        .map_err(|e| Error::IoError(e.into()))?;
    let rendered = String::from_utf8(buffer)
        .map_err(|e| Error::IoError(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    Ok(rendered
        .split('\n')
        .collect::<Vec<_>>()
        .join(&format!("{newline}{indent}")))
}

/// Builds the lines inserted in front of the closing brace.
fn render_payload(entry: &LocalizationEntry, indent: &str, newline: &str) -> Result<String> {
    let mut payload = format!(
        "{newline}{indent}{}: {}",
        to_json_string(&entry.key)?,
        to_json_string(&entry.text)?
    );

    if !entry.placeholders.is_empty() {
        payload.push_str(&format!(
            ",{newline}{indent}{}: {}",
            to_json_string(&entry.metadata_key())?,
            render_metadata(entry, indent, newline)?
        ));
    }

    Ok(payload)
}

fn log_diagnostics(content: &str, entry: &LocalizationEntry) {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(serde_json::Value::Object(map)) => {
            if map.contains_key(&entry.key) {
                warn!("Key '{}' already exists and will be appended again", entry.key);
            }
        }
        Ok(_) => debug!("Top-level value is not an object"),
        Err(e) => debug!("Content is not strict JSON: {e}"),
    }
}

/// Splices `entry` into `content` in front of its last closing brace.
///
/// # Arguments
/// * `content` - Current text of the localization file
/// * `entry` - Entry to append
///
/// # Returns
/// * `Result<String>` - The new file text, ending with a newline
///
/// # Errors
/// * `Error::MalformedFile` if `content` has no closing brace
pub fn patch_content(content: &str, entry: &LocalizationEntry) -> Result<String> {
    let close = content.rfind('}').ok_or(Error::MalformedFile)?;
    log_diagnostics(content, entry);

    let head = &content[..close];
    let (value, rest) = head.split_at(value_end(head));
    // Comments trailing the last value stay in front of the new entry.
    let trailer = rest.trim_end();
    let gap = &rest[trailer.len()..];

    let newline = detect_newline(content);
    let indent = detect_indent(content);
    let separator = if needs_separator(value) { "," } else { "" };
    debug!(
        "Inserting '{}' with indent {:?} after byte {}",
        entry.key,
        indent,
        value.len()
    );

    let payload = render_payload(entry, indent, newline)?;

    let mut patched = String::with_capacity(content.len() + payload.len() + 3);
    patched.push_str(value);
    patched.push_str(separator);
    patched.push_str(trailer);
    patched.push_str(&payload);
    patched.push_str(if gap.is_empty() { newline } else { gap });
    patched.push_str(&content[close..]);
    if !patched.ends_with('\n') {
        patched.push_str(newline);
    }

    Ok(patched)
}

/// Reads the file at `path`, appends `entry`, and writes the result back.
///
/// The new content is fully built before the write, so a failure leaves the
/// file as it was.
pub fn patch_file<P: AsRef<Path>>(path: P, entry: &LocalizationEntry) -> Result<()> {
    let path = path.as_ref();
    debug!("Patching localization file {}", path.display());

    let content = fs::read_to_string(path).map_err(Error::IoError)?;
    let patched = patch_content(&content, entry)?;
    fs::write(path, patched).map_err(Error::IoError)
}
