//! Runtime capability snapshot consulted when palettes are built.
//!
//! Some snippets only make sense when the hosting environment can speak or
//! listen. The host detects what it supports once at startup and hands the
//! resulting `CapabilityFlags` to `Catalog::build`; palettes never react to
//! later changes.

use anyhow::{Result, bail};
use std::env;
use std::fmt;

/// Env var listing the capabilities available to the host, comma or space
/// separated. Unset means everything is available.
pub const ENV_CAPABILITIES: &str = "PALETTE_CAPABILITIES";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    SpeechSynthesis,
    SpeechRecognition,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::SpeechSynthesis => "speech-synthesis",
            Capability::SpeechRecognition => "speech-recognition",
        }
    }

    pub fn all() -> [Capability; 2] {
        [Capability::SpeechSynthesis, Capability::SpeechRecognition]
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Capability {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "speech-synthesis" => Ok(Capability::SpeechSynthesis),
            "speech-recognition" => Ok(Capability::SpeechRecognition),
            other => bail!(
                "Unknown capability: {other} (expected one of {})",
                allowed_capability_names().join(", ")
            ),
        }
    }
}

pub fn allowed_capability_names() -> Vec<&'static str> {
    Capability::all().iter().map(Capability::as_str).collect()
}

/// Read-only snapshot of which optional runtime features are present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapabilityFlags {
    pub speech_synthesis: bool,
    pub speech_recognition: bool,
}

impl CapabilityFlags {
    pub fn all() -> Self {
        Self {
            speech_synthesis: true,
            speech_recognition: true,
        }
    }

    pub fn none() -> Self {
        Self {
            speech_synthesis: false,
            speech_recognition: false,
        }
    }

    pub fn with(mut self, capability: Capability, available: bool) -> Self {
        match capability {
            Capability::SpeechSynthesis => self.speech_synthesis = available,
            Capability::SpeechRecognition => self.speech_recognition = available,
        }
        self
    }

    pub fn is_available(&self, capability: Capability) -> bool {
        match capability {
            Capability::SpeechSynthesis => self.speech_synthesis,
            Capability::SpeechRecognition => self.speech_recognition,
        }
    }

    /// Capabilities missing from this snapshot, in declaration order.
    pub fn missing(&self) -> Vec<Capability> {
        Capability::all()
            .into_iter()
            .filter(|cap| !self.is_available(*cap))
            .collect()
    }

    /// Parse an explicit list of available capabilities; anything not named
    /// is treated as unavailable.
    pub fn from_list(raw: &str) -> Result<Self> {
        let mut flags = Self::none();
        for name in list_entries(raw) {
            flags = flags.with(Capability::try_from(name)?, true);
        }
        Ok(flags)
    }

    /// Snapshot the host environment via `PALETTE_CAPABILITIES`.
    pub fn from_env() -> Result<Self> {
        Self::from_env_value(env::var(ENV_CAPABILITIES).ok())
    }

    pub fn from_env_value(value: Option<String>) -> Result<Self> {
        match value {
            Some(raw) => Self::from_list(&raw),
            None => Ok(Self::all()),
        }
    }
}

impl Default for CapabilityFlags {
    fn default() -> Self {
        Self::all()
    }
}

fn list_entries(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
