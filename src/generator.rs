//! # Batch Generation
//!
//! Builds every chord entry for one root: each quality in recipe-table order,
//! followed by its slash entries, capped per symbol and per root.
//!
//! ## Fretted (guitar)
//! enumerate → dedup (relative signature) → rank by position → cap, then the
//! same for each allowed bass tone using inversions of the enumerated grips.
//!
//! ## Keyboard (piano)
//! One closed voicing per quality, plus one entry per distinct slash variant.
//!
//! Symbols without a single variant are left out rather than reported.
//!
//! ## Example
//! ```rust
//! use chordgen::{generate_voicings_for_root, GeneratorConfig, Instrument};
//!
//! let chords = generate_voicings_for_root("C", Instrument::Guitar, &GeneratorConfig::default())?;
//! let symbols = chords.symbols();
//! assert_eq!(&symbols[..3], &["C", "C/E", "C/G"]);
//! # Ok::<(), chordgen::ChordError>(())
//! ```

use log::debug;
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::dedup::{dedup, rank, SignatureKind};
use crate::error::ChordError;
use crate::fretted::{bass_options, enumerate_voicings, slash_variant, GUITAR};
use crate::keyboard::{build_voicing, slash_voicings, KeyboardVoicing};
use crate::pitch::{pc_from_label, prefers_flat, PitchClass};
use crate::recipe::RECIPES;
use crate::symbol::ChordSymbol;
use crate::voicing::{ChordEntry, Instrument, Voicing};

/// Entries for one root, serialised as a plain JSON array either way.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeneratedChords {
    Fretted(Vec<ChordEntry<Voicing>>),
    Keyboard(Vec<ChordEntry<KeyboardVoicing>>),
}

impl GeneratedChords {
    pub fn len(&self) -> usize {
        match self {
            GeneratedChords::Fretted(entries) => entries.len(),
            GeneratedChords::Keyboard(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbols in output order.
    pub fn symbols(&self) -> Vec<&str> {
        match self {
            GeneratedChords::Fretted(entries) => entries.iter().map(|e| e.symbol.as_str()).collect(),
            GeneratedChords::Keyboard(entries) => entries.iter().map(|e| e.symbol.as_str()).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, ChordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Generate every entry for `root_label` on `instrument`.
///
/// The root keeps the spelling it was given (`C#` stays sharp, `Db` flat)
/// unless the config forces one; natural roots follow the config or the
/// conventional Db/Eb/Ab/Bb/F# rule.
pub fn generate_voicings_for_root(
    root_label: &str,
    instrument: Instrument,
    config: &GeneratorConfig,
) -> Result<GeneratedChords, ChordError> {
    let root = pc_from_label(root_label)?;
    let prefer_flat = config
        .prefer_flat
        .or_else(|| written_accidental(root_label))
        .unwrap_or_else(|| prefers_flat(root));

    let chords = match instrument {
        Instrument::Guitar => GeneratedChords::Fretted(fretted_entries(root, prefer_flat, config)),
        Instrument::Piano => GeneratedChords::Keyboard(keyboard_entries(root, prefer_flat, config)),
        Instrument::Ukulele => return Err(ChordError::UnsupportedInstrument(instrument)),
    };
    debug!("{} on {}: {} entries", root_label, instrument, chords.len());
    Ok(chords)
}

/// Every root from C to B, entries concatenated in root order. Roots are
/// spelled by the config or the conventional rule.
pub fn generate_all_roots(instrument: Instrument, config: &GeneratorConfig) -> Result<GeneratedChords, ChordError> {
    let spelling = |root: PitchClass| config.prefer_flat.unwrap_or_else(|| prefers_flat(root));
    let chords = match instrument {
        Instrument::Guitar => GeneratedChords::Fretted(
            (0..12).flat_map(|root| fretted_entries(root, spelling(root), config)).collect(),
        ),
        Instrument::Piano => GeneratedChords::Keyboard(
            (0..12).flat_map(|root| keyboard_entries(root, spelling(root), config)).collect(),
        ),
        Instrument::Ukulele => return Err(ChordError::UnsupportedInstrument(instrument)),
    };
    debug!("all roots on {}: {} entries", instrument, chords.len());
    Ok(chords)
}

/// `Some(true)` for a flat root label, `Some(false)` for a sharp one.
fn written_accidental(label: &str) -> Option<bool> {
    let label = label.trim();
    if label.len() < 2 {
        return None;
    }
    if label.ends_with('b') || label.ends_with('♭') {
        Some(true)
    } else if label.ends_with('#') || label.ends_with('♯') {
        Some(false)
    } else {
        None
    }
}

fn entry<V>(symbol: &ChordSymbol, instrument: Instrument, variants: Vec<V>) -> ChordEntry<V> {
    let mut entry = ChordEntry::new(symbol.to_string(), instrument).with_aliases(symbol.aliases());
    entry.variants = variants;
    entry
}

fn fretted_entries(root: PitchClass, prefer_flat: bool, config: &GeneratorConfig) -> Vec<ChordEntry<Voicing>> {
    let limits = config.limits();
    let cap = config.variants_per_symbol;
    let mut entries = Vec::new();

    for recipe in RECIPES {
        let symbol = ChordSymbol::new(root, recipe, Some(prefer_flat));
        let voicings = enumerate_voicings(root, recipe, &limits);
        if voicings.is_empty() {
            debug!("{}: no playable voicing", symbol);
            continue;
        }

        let variants = rank(dedup(voicings.clone(), &GUITAR, SignatureKind::Relative), cap);
        entries.push(entry(&symbol, Instrument::Guitar, variants));

        if !config.slash_chords {
            continue;
        }
        for bass in bass_options(recipe.id) {
            let bass_pc = bass.bass_pc(root);
            let slash_symbol = symbol.clone().with_bass(bass_pc);
            let flat = symbol.bass_prefers_flat(bass_pc);
            let slashes: Vec<Voicing> = voicings
                .iter()
                .filter_map(|v| slash_variant(v, root, recipe, *bass, &limits, flat))
                .collect();
            if slashes.is_empty() {
                debug!("{}: no inversion survives", slash_symbol);
                continue;
            }
            let variants = rank(dedup(slashes, &GUITAR, SignatureKind::Relative), cap);
            entries.push(entry(&slash_symbol, Instrument::Guitar, variants));
        }
    }

    entries.truncate(config.symbols_per_root);
    entries
}

fn keyboard_entries(
    root: PitchClass,
    prefer_flat: bool,
    config: &GeneratorConfig,
) -> Vec<ChordEntry<KeyboardVoicing>> {
    let center = config.keyboard_center;
    let mut entries = Vec::new();

    for recipe in RECIPES {
        let symbol = ChordSymbol::new(root, recipe, Some(prefer_flat));
        let voicing = build_voicing(root, recipe, center, symbol.spelled_flat());
        entries.push(entry(&symbol, Instrument::Piano, vec![voicing]));

        if !config.slash_chords {
            continue;
        }
        for (bass, voicing) in slash_voicings(&symbol, center) {
            let slash_symbol = symbol.clone().with_bass(bass.bass_pc(root));
            entries.push(entry(&slash_symbol, Instrument::Piano, vec![voicing]));
        }
    }

    entries.truncate(config.symbols_per_root);
    entries
}
