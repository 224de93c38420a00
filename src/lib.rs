//! Example-snippet palettes for a block-based code editor.
//!
//! Catalog authors write categories of snippet blocks per surface syntax.
//! This crate turns that data into what the editor consumes: blocks needing
//! runtime capabilities the host lacks are dropped, every block gets an id,
//! and on request a receiver name is bound into the snippet text.

pub mod capabilities;
pub mod catalog;
pub mod expand;
pub mod fieldmap;

pub use capabilities::{Capability, CapabilityFlags, ENV_CAPABILITIES};
pub use catalog::{
    BlockCategory, BlockEntry, Catalog, LookupTables, Palette, Syntax, build_palette,
    bundled_palette, derive_id, filter_blocks, load_palette_from_path, palette_from_value,
    required_capabilities, requires_speech_recognition, requires_speech_synthesis,
};
pub use expand::{MARKER, SEPARATOR, expand};
pub use fieldmap::{FieldTransform, FieldTransforms, map_fields};

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Read a JSON fragment from `path`, or from `reader` when no path is given.
pub fn read_fragment(path: Option<&Path>, reader: impl Read) -> Result<Value> {
    match path {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("reading fragment {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("parsing fragment {}", path.display()))
        }
        None => serde_json::from_reader(reader).context("parsing fragment from stdin"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_fragment_prefers_reader_without_path() {
        let input = br#"{"code": "@fd 100"}"#;
        let value = read_fragment(None, &input[..]).unwrap();
        assert_eq!(value, json!({"code": "@fd 100"}));
    }

    #[test]
    fn read_fragment_reports_bad_json() {
        let err = read_fragment(None, &b"{"[..]).unwrap_err();
        assert!(format!("{err:#}").contains("parsing fragment"));
    }
}
