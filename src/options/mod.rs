//! Centralized animation options with TOML preset support.
//!
//! Timeline defaults, carousel paging, navigation thresholds and
//! user-defined sequences are consolidated here. Options serialize to/from
//! TOML so a page's choreography can live next to its content.

mod carousel;
mod navigation;
mod sequences;
mod timeline;

use std::collections::BTreeMap;
use std::path::Path;

pub use carousel::CarouselOptions;
pub use navigation::NavigationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use sequences::{SequenceOptions, StepOptions};
pub use timeline::TimelineOptions;

use crate::animation::{presets, Sequence};
use crate::error::{ConfigurationError, StorylineError};

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[navigation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Timeline defaults.
    pub timeline: TimelineOptions,
    /// Feature carousel paging.
    pub carousel: CarouselOptions,
    /// Header and menu behavior.
    pub navigation: NavigationOptions,
    /// User-defined sequences, keyed by name.
    #[schemars(skip)]
    pub sequences: BTreeMap<String, SequenceOptions>,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// JSON Schema rendered as pretty-printed JSON.
    pub fn json_schema_string() -> Result<String, StorylineError> {
        serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| StorylineError::OptionsParse(e.to_string()))
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(text: &str) -> Result<Self, StorylineError> {
        toml::from_str(text)
            .map_err(|e| StorylineError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, StorylineError> {
        let content =
            std::fs::read_to_string(path).map_err(StorylineError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!(
            "loaded options from {} ({} custom sequences)",
            path.display(),
            options.sequences.len()
        );
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), StorylineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StorylineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StorylineError::Io)?;
        }
        std::fs::write(path, content).map_err(StorylineError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Sequence by name: a `[sequences.<name>]` table if one exists,
    /// otherwise a built-in preset.
    pub fn sequence(&self, name: &str) -> Result<Sequence, ConfigurationError> {
        match self.sequences.get(name) {
            Some(custom) => custom.to_sequence(self.timeline.looping),
            None => presets::sequence(name),
        }
    }

    /// Every sequence name [`sequence`](Self::sequence) accepts, sorted.
    pub fn sequence_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sequences.keys().cloned().collect();
        for preset in presets::SEQUENCE_PRESETS {
            if !self.sequences.contains_key(*preset) {
                names.push((*preset).to_owned());
            }
        }
        names.sort();
        names
    }
}
