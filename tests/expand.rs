// Receiver binding over built palettes and arbitrary fragments.
#[path = "support/common.rs"]
mod common;

use anyhow::Result;
use serde_json::{Value, json};
use snippet_palette::{
    CapabilityFlags, Catalog, FieldTransforms, Palette, Syntax, expand, map_fields,
    palette_from_value,
};

use common::sample_palette;

// Binding a receiver keeps categories, ids and titles in place.
#[test]
fn expanded_palette_keeps_shape_and_binds_receiver() -> Result<()> {
    let catalog = Catalog::build(&CapabilityFlags::all())?;
    let palette = catalog.palette(Syntax::CoffeeScript);
    let expanded: Palette = palette_from_value(palette.expanded(Some("t")))?;

    assert_eq!(expanded.categories.len(), palette.categories.len());
    for (before, after) in palette.blocks().zip(expanded.blocks()) {
        assert_eq!(before.0.name, after.0.name);
        assert_eq!(before.1.id, after.1.id);
        assert_eq!(before.1.title, after.1.title);
        if before.1.code.matches('@').count() == 1 {
            assert!(!after.1.code.contains('@'));
        }
    }
    let first = expanded.blocks().next().map(|(_, b)| b.code.clone());
    assert_eq!(first.as_deref(), Some("t.fd 100"));
    Ok(())
}

// The source palette is not mutated by expansion.
#[test]
fn expansion_leaves_original_untouched() {
    let palette = sample_palette();
    let snapshot = palette.clone();
    let _ = palette.expanded(Some("s"));
    assert_eq!(palette, snapshot);
}

// A second marker in the same snippet is left for the author.
#[test]
fn only_first_marker_bound() -> Result<()> {
    let expanded = palette_from_value(sample_palette().expanded(Some("s")))?;
    assert_eq!(expanded.categories[0].blocks[1].code, "s.moveto @lastclick");
    Ok(())
}

// No name and an empty name both strip the marker.
#[test]
fn empty_and_missing_names_agree() {
    let value = sample_palette().to_value();
    let stripped = expand(&value, None);
    assert_eq!(expand(&value, Some("")), stripped);
    assert_eq!(stripped[0]["blocks"][0]["code"], json!("fd 100"));
}

// Re-expanding with the same name is a no-op on single-marker snippets.
#[test]
fn expansion_is_idempotent_for_single_markers() -> Result<()> {
    let catalog = Catalog::build(&CapabilityFlags::all())?;
    for (_, palette) in catalog.palettes() {
        let once = palette.expanded(Some("t"));
        assert_eq!(expand(&once, Some("t")), once);
    }
    Ok(())
}

// A lone category fragment expands the same way a palette does.
#[test]
fn category_fragment_expands_like_a_palette() {
    let category = json!({
        "name": "Sound",
        "color": "indigo",
        "blocks": [{"code": "@play 'c'", "expansion": "@play 'c G/G/ AG z'", "title": "Play"}]
    });
    let expanded = expand(&category, Some("p"));
    assert_eq!(expanded["blocks"][0]["code"], json!("p.play 'c'"));
    assert_eq!(expanded["blocks"][0]["expansion"], json!("p.play 'c G/G/ AG z'"));
    assert_eq!(expanded["name"], json!("Sound"));
}

// An empty transform table reproduces the catalog exactly.
#[test]
fn mapper_with_no_transforms_copies_catalog() -> Result<()> {
    let catalog = Catalog::build(&CapabilityFlags::all())?;
    let value = catalog.palette(Syntax::Python).to_value();
    assert_eq!(map_fields(&value, &FieldTransforms::new()), value);
    Ok(())
}

// Caller transforms reach nested fields without touching siblings.
#[test]
fn custom_transform_reaches_every_title() -> Result<()> {
    let value = sample_palette().to_value();
    let transforms = FieldTransforms::new().with("title", |v: &Value| {
        json!(v.as_str().map(str::len).unwrap_or_default())
    });
    let mapped = map_fields(&value, &transforms);
    assert_eq!(mapped[0]["blocks"][0]["title"], json!(12));
    assert_eq!(mapped[0]["blocks"][0]["code"], json!("@fd 100"));
    Ok(())
}
