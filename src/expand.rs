//! Binds a receiver name into snippet text.
//!
//! Snippets are authored with a leading `@` where the receiver goes
//! (`@fd 100`). Expanding with `t` yields `t.fd 100`; expanding without a name
//! drops the marker (`fd 100`).

use crate::fieldmap::{FieldTransforms, map_fields};
use serde_json::Value;

/// Placeholder replaced by the receiver prefix.
pub const MARKER: char = '@';
/// Joins the receiver name to the rest of the snippet.
pub const SEPARATOR: char = '.';
/// Fields holding snippet text. `block` is the key older catalog files use
/// for `code`.
pub const SNIPPET_FIELDS: [&str; 3] = ["code", "expansion", "block"];

/// Prefix substituted for the marker: empty without a name, `name.` otherwise.
pub fn replacement_prefix(context: Option<&str>) -> String {
    match context {
        Some(name) if !name.is_empty() => format!("{name}{SEPARATOR}"),
        _ => String::new(),
    }
}

/// Replace the first marker in `text` with `prefix`; later markers stay.
pub fn bind_marker(text: &str, prefix: &str) -> String {
    text.replacen(MARKER, prefix, 1)
}

/// Expand a palette, a category, or any fragment of the same shape.
pub fn expand(fragment: &Value, context: Option<&str>) -> Value {
    let prefix = replacement_prefix(context);
    let replacer = |value: &Value| match value {
        Value::String(text) if !text.is_empty() => Value::String(bind_marker(text, &prefix)),
        other => other.clone(),
    };
    let transforms = SNIPPET_FIELDS
        .iter()
        .fold(FieldTransforms::new(), |table, field| {
            table.with(*field, replacer)
        });
    map_fields(fragment, &transforms)
}
