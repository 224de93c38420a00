//! Bundled palette catalog.
//!
//! The palettes for each supported surface syntax ship as JSON documents under
//! `catalogs/` and are compiled into the crate. `Catalog::build` parses them
//! once, filters every category against the host's `CapabilityFlags`, and
//! returns an immutable value the host shares with the UI layer. The lookup
//! tables (function colors, dropdown choices, category colors, HTML tag
//! overrides) are handed through untouched.

pub mod filter;
pub mod ident;
pub mod model;

pub use filter::{
    assign_id, build_palette, filter_blocks, missing_capability, required_capabilities,
    requires_speech_recognition, requires_speech_synthesis,
};
pub use ident::derive_id;
pub use model::{BlockCategory, BlockEntry, Palette, load_palette_from_path, palette_from_value};

use crate::capabilities::CapabilityFlags;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::info;

const COFFEESCRIPT_PALETTE: &str = include_str!("../../catalogs/coffeescript.json");
const JAVASCRIPT_PALETTE: &str = include_str!("../../catalogs/javascript.json");
const PYTHON_PALETTE: &str = include_str!("../../catalogs/python.json");
const HTML_PALETTE: &str = include_str!("../../catalogs/html.json");
const LOOKUP_TABLES: &str = include_str!("../../catalogs/lookup_tables.json");

/// Surface syntax a palette is authored for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Syntax {
    CoffeeScript,
    JavaScript,
    Python,
    Html,
}

impl Syntax {
    pub fn as_str(&self) -> &'static str {
        match self {
            Syntax::CoffeeScript => "coffeescript",
            Syntax::JavaScript => "javascript",
            Syntax::Python => "python",
            Syntax::Html => "html",
        }
    }

    pub fn all() -> [Syntax; 4] {
        [
            Syntax::CoffeeScript,
            Syntax::JavaScript,
            Syntax::Python,
            Syntax::Html,
        ]
    }

    /// Raw authored JSON for this syntax's bundled palette.
    pub fn bundled_source(&self) -> &'static str {
        match self {
            Syntax::CoffeeScript => COFFEESCRIPT_PALETTE,
            Syntax::JavaScript => JAVASCRIPT_PALETTE,
            Syntax::Python => PYTHON_PALETTE,
            Syntax::Html => HTML_PALETTE,
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Syntax {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "coffeescript" | "coffee" => Ok(Syntax::CoffeeScript),
            "javascript" | "js" => Ok(Syntax::JavaScript),
            "python" | "py" => Ok(Syntax::Python),
            "html" => Ok(Syntax::Html),
            other => bail!("Unknown syntax: {other}"),
        }
    }
}

/// Metadata tables consulted by the UI directly; never transformed here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LookupTables {
    pub known_functions: Value,
    pub python_functions: Value,
    pub categories: Value,
    pub known_html_tags: Value,
}

impl LookupTables {
    pub fn bundled() -> Result<Self> {
        serde_json::from_str(LOOKUP_TABLES).context("parsing bundled lookup tables")
    }

    /// Function metadata table for a syntax, if it has one.
    pub fn functions_for(&self, syntax: Syntax) -> Option<&Value> {
        match syntax {
            Syntax::CoffeeScript | Syntax::JavaScript => Some(&self.known_functions),
            Syntax::Python => Some(&self.python_functions),
            Syntax::Html => None,
        }
    }
}

/// Parse the authored palette for `syntax` without filtering it.
pub fn bundled_palette(syntax: Syntax) -> Result<Palette> {
    let value: Value = serde_json::from_str(syntax.bundled_source())
        .with_context(|| format!("parsing bundled {syntax} palette"))?;
    palette_from_value(value).with_context(|| format!("loading bundled {syntax} palette"))
}

/// Every bundled palette, filtered and id-completed, plus the lookup tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    flags: CapabilityFlags,
    coffeescript: Palette,
    javascript: Palette,
    python: Palette,
    html: Palette,
    tables: LookupTables,
}

impl Catalog {
    /// One-time construction. Later capability changes are not observed;
    /// build a new catalog to pick them up.
    pub fn build(flags: &CapabilityFlags) -> Result<Self> {
        let build = |syntax: Syntax| -> Result<Palette> {
            let palette = build_palette(bundled_palette(syntax)?, flags);
            info!(
                syntax = %syntax,
                categories = palette.categories.len(),
                blocks = palette.block_count(),
                "built palette"
            );
            Ok(palette)
        };
        Ok(Self {
            flags: *flags,
            coffeescript: build(Syntax::CoffeeScript)?,
            javascript: build(Syntax::JavaScript)?,
            python: build(Syntax::Python)?,
            html: build(Syntax::Html)?,
            tables: LookupTables::bundled()?,
        })
    }

    pub fn flags(&self) -> &CapabilityFlags {
        &self.flags
    }

    pub fn palette(&self, syntax: Syntax) -> &Palette {
        match syntax {
            Syntax::CoffeeScript => &self.coffeescript,
            Syntax::JavaScript => &self.javascript,
            Syntax::Python => &self.python,
            Syntax::Html => &self.html,
        }
    }

    pub fn palettes(&self) -> impl Iterator<Item = (Syntax, &Palette)> {
        Syntax::all()
            .into_iter()
            .map(move |syntax| (syntax, self.palette(syntax)))
    }

    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }
}
