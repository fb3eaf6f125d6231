use std::sync::LazyLock;

use regex::Regex;

// Literal pattern, always compiles
static INVALID_ID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Z0-9\-]").unwrap());

/// Normalize a user-supplied project id: uppercase, then drop every character
/// outside `[A-Z0-9-]`. Never fails; the result may be empty and callers must
/// reject that themselves.
pub fn normalize(raw: &str) -> String {
    INVALID_ID_CHARS
        .replace_all(&raw.to_uppercase(), "")
        .into_owned()
}

/// Whether `id` is already in normalized form and non-empty
pub fn is_valid(id: &str) -> bool {
    !id.is_empty() && !INVALID_ID_CHARS.is_match(id)
}

/// Split a comma-separated tag string into trimmed, non-empty tags.
/// Order and duplicates are preserved.
pub fn clean_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
