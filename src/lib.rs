pub mod config;
pub mod dedup;
pub mod error;
pub mod fretted;
pub mod generator;
pub mod keyboard;
pub mod pitch;
pub mod recipe;
pub mod symbol;
pub mod voicing;

pub use config::GeneratorConfig;
pub use error::*;
pub use fretted::{compute_transpositions, enumerate_voicings, slash_variant, Limits};
pub use generator::{generate_all_roots, generate_voicings_for_root, GeneratedChords};
pub use keyboard::{build_voicing, KeyboardVoicing};
pub use recipe::{recipe, ChordRecipe, RECIPES};
pub use symbol::ChordSymbol;
pub use voicing::{Barre, ChordEntry, FretState, Instrument, Voicing};

/// Generate the entries for `root_label` and serialise them as a JSON array.
/// This is the main entry point for the library.
pub fn generate_json(root_label: &str, instrument: Instrument, config: &GeneratorConfig) -> Result<String, ChordError> {
    generate_voicings_for_root(root_label, instrument, config)?.to_json()
}
