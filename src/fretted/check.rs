//! Theory and playability checks shared by the enumerator, the slash
//! generator and transposition.
//!
//! ## Rules
//! - **Theory**: the sounding pitch classes are a superset of the recipe's
//!   pitch classes above the root. Doublings are fine.
//! - **Playability**: at least `min_fretted` stopped notes, nothing above
//!   `max_fret`, stopped notes within `max_span` frets of each other, and every
//!   barre valid (see [`barre_is_valid`]).
//! - **Submissions**: hand-entered voicings only get the structural checks of
//!   [`validate_submission`]; a person may well know a grip the rules reject.

use std::collections::BTreeSet;

use crate::error::ChordError;
use crate::pitch::PitchClass;
use crate::recipe::ChordRecipe;
use crate::voicing::{Barre, FretState, Instrument, Voicing};

use super::tuning::Tuning;

/// Ergonomic bounds a voicing has to respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_fret: u8,
    pub max_span: u8,
    pub min_fretted: usize,
    pub min_barre_strings: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_fret: 15,
            max_span: 5,
            min_fretted: 3,
            min_barre_strings: 3,
        }
    }
}

/// Does the voicing sound every pitch class the recipe needs?
pub fn is_theory_valid(voicing: &Voicing, tuning: &Tuning, root: PitchClass, recipe: &ChordRecipe) -> bool {
    let sounding: BTreeSet<PitchClass> = tuning.sounding_pcs(voicing).into_iter().collect();
    recipe.pitch_classes(root).iter().all(|pc| sounding.contains(pc))
}

pub fn is_playable(voicing: &Voicing, limits: &Limits) -> bool {
    if voicing.fretted_count() < limits.min_fretted {
        return false;
    }
    let (Some(low), Some(high)) = (voicing.lowest_fretted(), voicing.highest_fretted()) else {
        return false;
    };
    if high > limits.max_fret || high - low > limits.max_span {
        return false;
    }
    voicing
        .barres
        .iter()
        .all(|barre| barre_is_valid(&voicing.frets, barre, limits.min_barre_strings))
}

/// A barre is valid when both of its end strings are stopped exactly at the
/// barre fret, at least `min_strings` strings in its range sound, and none of
/// those sits below the barre (open strings included).
pub fn barre_is_valid(frets: &[FretState], barre: &Barre, min_strings: usize) -> bool {
    if barre.from > barre.to || barre.to >= frets.len() || barre.fret == 0 {
        return false;
    }
    let at_barre = |string: usize| frets[string] == FretState::Fretted(barre.fret);
    if !at_barre(barre.from) || !at_barre(barre.to) {
        return false;
    }
    let covered: Vec<u8> = frets[barre.from..=barre.to]
        .iter()
        .filter_map(|f| f.sounding_fret())
        .collect();
    covered.len() >= min_strings && covered.iter().all(|fret| *fret >= barre.fret)
}

/// Structural checks for a voicing entered by hand: string count, finger
/// slots, barre ranges and a diagram base fret of at least 1.
pub fn validate_submission(voicing: &Voicing, instrument: Instrument) -> Result<(), ChordError> {
    let tuning = Tuning::for_instrument(instrument)?;
    let strings = tuning.string_count();
    if voicing.string_count() != strings {
        return Err(ChordError::InvalidVoicing(format!(
            "{} strings given, {} has {}",
            voicing.string_count(),
            instrument,
            strings
        )));
    }
    if voicing.base_fret == 0 {
        return Err(ChordError::InvalidVoicing("baseFret must be at least 1".to_string()));
    }
    if let Some(fingers) = &voicing.fingers {
        if fingers.len() != strings {
            return Err(ChordError::InvalidVoicing(format!(
                "{} finger slots for {} strings",
                fingers.len(),
                strings
            )));
        }
    }
    for barre in &voicing.barres {
        if barre.fret == 0 || barre.from > barre.to || barre.to >= strings {
            return Err(ChordError::InvalidVoicing(format!(
                "barre at fret {} over strings {}..={} does not fit",
                barre.fret, barre.from, barre.to
            )));
        }
        // open strings under a barre read as stopped at the barre fret
        let under_barre = |string: usize| match voicing.frets[string] {
            FretState::Open => true,
            state => state == FretState::Fretted(barre.fret),
        };
        let below = voicing.frets[barre.from..=barre.to]
            .iter()
            .filter_map(|f| f.fretted())
            .any(|fret| fret < barre.fret);
        if !under_barre(barre.from) || !under_barre(barre.to) || below {
            return Err(ChordError::InvalidVoicing(format!(
                "barre at fret {} is not held on strings {}..={}",
                barre.fret, barre.from, barre.to
            )));
        }
    }
    Ok(())
}
