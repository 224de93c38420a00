//! Capability filtering and id completion for authored block lists.
//!
//! The capability checks are pattern approximations over the raw snippet
//! text: a snippet "speaks" when it starts with `say` (optionally behind the
//! `@` marker) and "listens" when the word `listen` appears anywhere.

use crate::capabilities::{Capability, CapabilityFlags};
use crate::catalog::ident::derive_id;
use crate::catalog::model::{BlockEntry, Palette};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static SAY_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@?say(?:[^A-Za-z0-9_]|$)").expect("valid say pattern"));
static LISTEN_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_])listen(?:[^A-Za-z0-9_]|$)").expect("valid listen pattern")
});

/// Snippet is an utterance call: `say` as a whole word at the very start.
pub fn requires_speech_synthesis(code: &str) -> bool {
    SAY_CALL.is_match(code)
}

/// Snippet mentions `listen` as a whole word.
pub fn requires_speech_recognition(code: &str) -> bool {
    LISTEN_WORD.is_match(code)
}

/// Capabilities a snippet appears to need, in declaration order.
pub fn required_capabilities(code: &str) -> Vec<Capability> {
    let mut needed = Vec::new();
    if requires_speech_synthesis(code) {
        needed.push(Capability::SpeechSynthesis);
    }
    if requires_speech_recognition(code) {
        needed.push(Capability::SpeechRecognition);
    }
    needed
}

/// First capability the entry needs that `flags` lacks.
pub fn missing_capability(entry: &BlockEntry, flags: &CapabilityFlags) -> Option<Capability> {
    required_capabilities(&entry.code)
        .into_iter()
        .find(|cap| !flags.is_available(*cap))
}

/// Drop entries needing unavailable capabilities and give every survivor an id.
///
/// Explicit ids are kept verbatim. Entries are moved, not copied; the
/// returned list is the only owner going forward.
pub fn filter_blocks(entries: Vec<BlockEntry>, flags: &CapabilityFlags) -> Vec<BlockEntry> {
    entries
        .into_iter()
        .filter(|entry| match missing_capability(entry, flags) {
            Some(capability) => {
                debug!(code = %entry.code, %capability, "dropping block");
                false
            }
            None => true,
        })
        .map(assign_id)
        .collect()
}

/// Fill in a derived id when the entry has none.
pub fn assign_id(mut entry: BlockEntry) -> BlockEntry {
    if entry.id().is_none() {
        let id = derive_id(&entry.code);
        debug!(code = %entry.code, %id, "derived block id");
        entry.id = Some(id);
    }
    entry
}

/// Filter every category of an authored palette. Category order is kept and
/// categories left empty are kept too.
pub fn build_palette(palette: Palette, flags: &CapabilityFlags) -> Palette {
    Palette::new(
        palette
            .categories
            .into_iter()
            .map(|mut category| {
                category.blocks = filter_blocks(category.blocks, flags);
                category
            })
            .collect(),
    )
}
