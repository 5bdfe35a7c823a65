//! Builds the token that replaces the selected literal in source code.

/// Formats `<prefix>.<key>`, followed by `(<p1>, <p2>, ...)` when there are placeholders.
///
/// # Example
/// ```
/// use l10n_extract::reference::build_reference;
///
/// let names = vec!["name".to_string(), "count".to_string()];
/// assert_eq!(build_reference("l10n", "greet", &names), "l10n.greet(name, count)");
/// assert_eq!(build_reference::<&str>("l10n", "title", &[]), "l10n.title");
/// ```
pub fn build_reference<S: AsRef<str>>(prefix: &str, key: &str, placeholders: &[S]) -> String {
    let mut reference = format!("{prefix}.{key}");
    if !placeholders.is_empty() {
        let arguments: Vec<&str> = placeholders.iter().map(AsRef::as_ref).collect();
        reference.push('(');
        reference.push_str(&arguments.join(", "));
        reference.push(')');
    }
    reference
}
