//! # Generator Configuration
//!
//! Limits and caps for batch generation, read from YAML with kebab-case keys.
//! Every key is optional; missing keys keep their defaults.
//!
//! ```yaml
//! max-fret: 15
//! max-span: 5
//! min-fretted: 3
//! min-barre-strings: 3
//! variants-per-symbol: 3
//! symbols-per-root: 40
//! keyboard-center: 60
//! prefer-flat: null
//! slash-chords: true
//! ```

use serde::Deserialize;

use crate::error::ChordError;
use crate::fretted::Limits;

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub max_fret: Option<u8>,
    pub max_span: Option<u8>,
    pub min_fretted: Option<usize>,
    pub min_barre_strings: Option<usize>,
    pub variants_per_symbol: Option<usize>,
    pub symbols_per_root: Option<usize>,
    pub keyboard_center: Option<u8>,
    pub prefer_flat: Option<bool>,
    pub slash_chords: Option<bool>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub max_fret: u8,
    pub max_span: u8,
    pub min_fretted: usize,
    pub min_barre_strings: usize,
    pub variants_per_symbol: usize,
    pub symbols_per_root: usize,
    /// Centre pitch (MIDI) of the keyboard window.
    pub keyboard_center: u8,
    /// Force flat (`true`) or sharp (`false`) spelling; `None` picks per root.
    pub prefer_flat: Option<bool>,
    pub slash_chords: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            max_fret: limits.max_fret,
            max_span: limits.max_span,
            min_fretted: limits.min_fretted,
            min_barre_strings: limits.min_barre_strings,
            variants_per_symbol: 3,
            symbols_per_root: 40,
            keyboard_center: 60,
            prefer_flat: None,
            slash_chords: true,
        }
    }
}

impl GeneratorConfig {
    pub fn from_yaml(content: &str) -> Result<Self, ChordError> {
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| ChordError::ConfigError(e.to_string()))?
        };
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawConfig) -> Result<Self, ChordError> {
        let defaults = Self::default();
        let config = Self {
            max_fret: raw.max_fret.unwrap_or(defaults.max_fret),
            max_span: raw.max_span.unwrap_or(defaults.max_span),
            min_fretted: raw.min_fretted.unwrap_or(defaults.min_fretted),
            min_barre_strings: raw.min_barre_strings.unwrap_or(defaults.min_barre_strings),
            variants_per_symbol: raw.variants_per_symbol.unwrap_or(defaults.variants_per_symbol),
            symbols_per_root: raw.symbols_per_root.unwrap_or(defaults.symbols_per_root),
            keyboard_center: raw.keyboard_center.unwrap_or(defaults.keyboard_center),
            prefer_flat: raw.prefer_flat,
            slash_chords: raw.slash_chords.unwrap_or(defaults.slash_chords),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ChordError> {
        if !(1..=24).contains(&self.max_fret) {
            return Err(ChordError::ConfigError(format!(
                "max-fret must be between 1 and 24, got {}",
                self.max_fret
            )));
        }
        if self.max_span == 0 {
            return Err(ChordError::ConfigError("max-span must be at least 1".to_string()));
        }
        if self.min_fretted == 0 {
            return Err(ChordError::ConfigError("min-fretted must be at least 1".to_string()));
        }
        if self.variants_per_symbol == 0 {
            return Err(ChordError::ConfigError("variants-per-symbol must be at least 1".to_string()));
        }
        if self.symbols_per_root == 0 {
            return Err(ChordError::ConfigError("symbols-per-root must be at least 1".to_string()));
        }
        if !(24..=103).contains(&self.keyboard_center) {
            return Err(ChordError::ConfigError(format!(
                "keyboard-center must be between 24 and 103, got {}",
                self.keyboard_center
            )));
        }
        Ok(())
    }

    /// Playability limits for the fretted pipeline.
    pub fn limits(&self) -> Limits {
        Limits {
            max_fret: self.max_fret,
            max_span: self.max_span,
            min_fretted: self.min_fretted,
            min_barre_strings: self.min_barre_strings,
        }
    }
}
