//! # Error Types
//!
//! This module defines all error types for the chord generator.
//!
//! Lookups against the static tables (note names, chord qualities, instruments)
//! report the offending text so a registry gap is easy to spot. Candidates that
//! fail theory or playability checks are *not* errors; they are simply left out
//! of the output.
//!
//! ## Error Types
//! - `UnknownLabel` - note name not found in the sharp or flat tables
//! - `UnknownRecipe` - chord quality identifier or suffix not in the recipe table
//! - `UnknownInstrument` / `UnsupportedInstrument` - instrument lookups
//! - `InvalidSymbol` - malformed chord symbol
//! - `InvalidVoicing` - submitted voicing doesn't fit the instrument
//! - `ConfigError` - invalid YAML generator configuration
//! - `Serialize` - JSON export failure

use thiserror::Error;

use crate::voicing::Instrument;

#[derive(Error, Debug)]
pub enum ChordError {
    /// Note label not found in either spelling table.
    ///
    /// # Example
    /// ```
    /// # use chordgen::ChordError;
    /// let err = ChordError::UnknownLabel("H".to_string());
    /// assert_eq!(err.to_string(), "Unknown note label: H");
    /// ```
    #[error("Unknown note label: {0}")]
    UnknownLabel(String),

    /// Chord quality identifier (or symbol suffix) not in the recipe table.
    ///
    /// # Example
    /// ```
    /// # use chordgen::ChordError;
    /// let err = ChordError::UnknownRecipe("maj42".to_string());
    /// assert_eq!(err.to_string(), "Unknown chord quality: maj42");
    /// ```
    #[error("Unknown chord quality: {0}")]
    UnknownRecipe(String),

    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// The instrument has no tuning or shape library for the requested operation.
    #[error("Operation not supported for instrument: {0}")]
    UnsupportedInstrument(Instrument),

    #[error("Invalid chord symbol: {0}")]
    InvalidSymbol(String),

    #[error("Invalid voicing: {0}")]
    InvalidVoicing(String),

    /// Invalid generator configuration.
    ///
    /// # Example
    /// ```
    /// # use chordgen::ChordError;
    /// let err = ChordError::ConfigError("max-span must be at least 1".to_string());
    /// assert_eq!(err.to_string(), "Invalid config: max-span must be at least 1");
    /// ```
    #[error("Invalid config: {0}")]
    ConfigError(String),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
