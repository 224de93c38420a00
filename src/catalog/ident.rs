//! Fallback analytics ids for blocks authored without one.

/// Word characters as the id rules see them: ASCII letters, digits, `_`.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Derive a short id from snippet text.
///
/// Strips leading non-word characters, then a leading `new `, then keeps the
/// first run of word characters. When that run is empty the whole snippet is
/// the id. Ids derived this way are not unique within a category.
pub fn derive_id(code: &str) -> String {
    let rest = code.trim_start_matches(|c: char| !is_word_char(c));
    let rest = rest.strip_prefix("new ").unwrap_or(rest);
    let end = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
    match &rest[..end] {
        "" => code.to_string(),
        word => word.to_string(),
    }
}
