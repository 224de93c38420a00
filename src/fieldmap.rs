//! Recursive structural mapper over catalog fragments.
//!
//! Walks a `serde_json::Value` tree and rebuilds it, handing the raw value of
//! any record field whose name is registered in a `FieldTransforms` table to
//! that field's transform. The transform's result is used as-is; the walker
//! never descends beneath a transformed field.

use serde_json::Value;
use std::fmt;

/// Pure per-field transform applied to a field's raw value.
pub type FieldTransform<'a> = Box<dyn Fn(&Value) -> Value + 'a>;

/// Explicit table of (field name, transform) pairs, built fresh per call.
#[derive(Default)]
pub struct FieldTransforms<'a> {
    entries: Vec<(String, FieldTransform<'a>)>,
}

impl<'a> FieldTransforms<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `transform` for `field`, replacing any earlier registration.
    pub fn with<F>(mut self, field: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&Value) -> Value + 'a,
    {
        let field = field.into();
        self.entries.retain(|(name, _)| *name != field);
        self.entries.push((field, Box::new(transform)));
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldTransform<'a>> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, transform)| transform)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for FieldTransforms<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Rebuild `value`, applying registered transforms to matching record fields.
///
/// Scalars (including `null`) are returned unchanged, sequences are mapped
/// element-wise in order, and records are rebuilt key by key. The output owns
/// every node; nothing is shared with the input.
pub fn map_fields(value: &Value, transforms: &FieldTransforms<'_>) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| map_fields(item, transforms))
                .collect(),
        ),
        Value::Object(record) => Value::Object(
            record
                .iter()
                .map(|(key, field)| {
                    let mapped = match transforms.get(key) {
                        Some(transform) => transform(field),
                        None => map_fields(field, transforms),
                    };
                    (key.clone(), mapped)
                })
                .collect(),
        ),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
    }
}
