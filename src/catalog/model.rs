//! Typed view of palette data.
//!
//! Authored catalogs are JSON documents: a palette is an array of categories,
//! each with a `name`, a `color` and an ordered `blocks` list. Older files
//! spell the snippet field `block`; it deserializes into `BlockEntry::code`.

use crate::expand::expand;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntry {
    #[serde(alias = "block")]
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansion: Option<String>,
}

impl BlockEntry {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            id: None,
            expansion: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_expansion(mut self, expansion: impl Into<String>) -> Self {
        self.expansion = Some(expansion.into());
        self
    }

    /// The explicit id, if one was authored or already assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Text inserted into the editor: the expansion when present, else the code.
    pub fn insertion_text(&self) -> &str {
        self.expansion.as_deref().unwrap_or(&self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCategory {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub blocks: Vec<BlockEntry>,
}

/// Ordered categories for one target syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    pub categories: Vec<BlockCategory>,
}

impl Palette {
    pub fn new(categories: Vec<BlockCategory>) -> Self {
        Self { categories }
    }

    pub fn category(&self, name: &str) -> Option<&BlockCategory> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Every block in display order, paired with its category.
    pub fn blocks(&self) -> impl Iterator<Item = (&BlockCategory, &BlockEntry)> {
        self.categories
            .iter()
            .flat_map(|category| category.blocks.iter().map(move |block| (category, block)))
    }

    pub fn block_count(&self) -> usize {
        self.categories.iter().map(|category| category.blocks.len()).sum()
    }

    pub fn to_value(&self) -> Value {
        Value::from(self)
    }

    /// Bind `context` into every snippet, producing a new palette fragment.
    pub fn expanded(&self, context: Option<&str>) -> Value {
        expand(&self.to_value(), context)
    }
}

impl From<&BlockEntry> for Value {
    fn from(entry: &BlockEntry) -> Self {
        let mut record = Map::new();
        record.insert("code".into(), Value::String(entry.code.clone()));
        record.insert("title".into(), Value::String(entry.title.clone()));
        if let Some(id) = &entry.id {
            record.insert("id".into(), Value::String(id.clone()));
        }
        if let Some(expansion) = &entry.expansion {
            record.insert("expansion".into(), Value::String(expansion.clone()));
        }
        Value::Object(record)
    }
}

impl From<&BlockCategory> for Value {
    fn from(category: &BlockCategory) -> Self {
        let mut record = Map::new();
        record.insert("name".into(), Value::String(category.name.clone()));
        record.insert("color".into(), Value::String(category.color.clone()));
        record.insert(
            "blocks".into(),
            Value::Array(category.blocks.iter().map(Value::from).collect()),
        );
        Value::Object(record)
    }
}

impl From<&Palette> for Value {
    fn from(palette: &Palette) -> Self {
        Value::Array(palette.categories.iter().map(Value::from).collect())
    }
}

/// Interpret a JSON document as a palette.
///
/// Accepts either a bare array of categories or an object wrapping that array
/// under `palette`.
pub fn palette_from_value(value: Value) -> Result<Palette> {
    match value {
        Value::Array(_) => {
            serde_json::from_value(value).context("Unable to parse palette categories")
        }
        Value::Object(mut record) => match record.remove("palette") {
            Some(inner @ Value::Array(_)) => serde_json::from_value(inner)
                .context("Unable to parse categories under 'palette'"),
            Some(_) => bail!("'palette' must be an array of categories"),
            None => bail!("palette object is missing a 'palette' array"),
        },
        _ => bail!("Unsupported palette JSON; expected array or object"),
    }
}

/// Read an authored palette file. The result is not yet filtered.
pub fn load_palette_from_path(path: &Path) -> Result<Palette> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading palette {}", path.display()))?;
    let value: Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing palette {}", path.display()))?;
    palette_from_value(value).with_context(|| format!("loading palette {}", path.display()))
}
