//! User preset files.
//!
//! ```toml
//! name = "Vocal plate"
//! description = "Bright, short tail"
//!
//! [params]
//! roomSize = 0.6
//! damping = 0.2
//! wetLevel = 0.4
//! ```
//!
//! Parameters not listed keep their current value.

use anyhow::Context;
use scrambler_plugin::ParamState;
use serde::Deserialize;
use std::path::Path;

/// Preset file format.
#[derive(Debug, Deserialize)]
pub struct PresetFile {
    /// Display name.
    pub name: String,
    /// Free-form notes.
    #[serde(default)]
    pub description: Option<String>,
    /// Parameter string id to value.
    #[serde(default)]
    pub params: ParamState,
}

impl PresetFile {
    /// Parse a preset from TOML text.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a preset file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read preset file '{}'", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("failed to parse preset file '{}'", path.display()))
    }
}
