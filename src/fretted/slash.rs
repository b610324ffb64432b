//! # Slash / Inversion Generator
//!
//! Derives inversions from an accepted voicing by muting the strings under a
//! chord tone so that tone becomes the bass.
//!
//! ## Algorithm
//! 1. Resolve the bass interval to a pitch class (`root + interval`).
//! 2. Find the lowest-pitched string already sounding it; skip the option if
//!    there is none.
//! 3. Mute every string below it, clip any barre to what is left.
//! 4. Re-run the theory and playability checks on the truncated grip.
//!
//! Which intervals a quality may put in the bass comes from [`bass_options`].

use std::fmt;
use std::str::FromStr;

use crate::error::ChordError;
use crate::pitch::{label_for, normalize_pc, PitchClass};
use crate::recipe::ChordRecipe;
use crate::voicing::{Barre, FretState, Voicing};

use super::check::{barre_is_valid, is_playable, is_theory_valid, Limits};
use super::tuning::GUITAR;

/// A chord tone that can be moved into the bass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BassInterval {
    MajorThird,
    MinorThird,
    Fifth,
    DominantSeventh,
}

impl BassInterval {
    pub fn semitones(&self) -> u8 {
        match self {
            BassInterval::MajorThird => 4,
            BassInterval::MinorThird => 3,
            BassInterval::Fifth => 7,
            BassInterval::DominantSeventh => 10,
        }
    }

    pub fn bass_pc(&self, root: PitchClass) -> PitchClass {
        normalize_pc(root as i32 + self.semitones() as i32)
    }
}

impl fmt::Display for BassInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BassInterval::MajorThird => "3",
            BassInterval::MinorThird => "b3",
            BassInterval::Fifth => "5",
            BassInterval::DominantSeventh => "b7",
        };
        f.write_str(name)
    }
}

impl FromStr for BassInterval {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "3" => Ok(BassInterval::MajorThird),
            "b3" | "m3" => Ok(BassInterval::MinorThird),
            "5" => Ok(BassInterval::Fifth),
            "b7" | "7" => Ok(BassInterval::DominantSeventh),
            other => Err(ChordError::InvalidSymbol(format!("bass interval {}", other))),
        }
    }
}

use BassInterval::{DominantSeventh, Fifth, MajorThird, MinorThird};

/// Qualities that get slash entries, and the tones each may put in the bass.
static BASS_RULES: &[(&str, &[BassInterval])] = &[
    ("maj", &[MajorThird, Fifth]),
    ("m", &[MinorThird, Fifth]),
    ("sus4", &[Fifth]),
    ("6", &[MajorThird]),
    ("7", &[MajorThird, Fifth, DominantSeventh]),
    ("maj7", &[MajorThird, Fifth]),
    ("m7", &[MinorThird, Fifth, DominantSeventh]),
    ("add9", &[MajorThird, Fifth]),
];

/// Bass intervals allowed for a quality; empty when it gets no slash entries.
pub fn bass_options(recipe_id: &str) -> &'static [BassInterval] {
    BASS_RULES
        .iter()
        .find(|(id, _)| *id == recipe_id)
        .map(|(_, options)| *options)
        .unwrap_or(&[])
}

/// The inversion of `voicing` with `bass` as its lowest note, if one exists.
pub fn slash_variant(
    voicing: &Voicing,
    root: PitchClass,
    recipe: &ChordRecipe,
    bass: BassInterval,
    limits: &Limits,
    prefer_flat: bool,
) -> Option<Voicing> {
    if !recipe.contains(bass.semitones()) {
        return None;
    }
    let target = bass.bass_pc(root);
    let bass_string = voicing
        .frets
        .iter()
        .enumerate()
        .position(|(string, state)| GUITAR.pitch_class(string, *state) == Some(target))?;

    let mut frets = voicing.frets.clone();
    for state in frets.iter_mut().take(bass_string) {
        *state = FretState::Muted;
    }

    let barres: Vec<Barre> = voicing
        .barres
        .iter()
        .filter_map(|barre| clip_barre(&frets, barre, bass_string, limits.min_barre_strings))
        .collect();

    let fingers = voicing.fingers.as_ref().map(|slots| {
        slots
            .iter()
            .zip(frets.iter())
            .map(|(finger, state)| finger.filter(|_| state.fretted().is_some()))
            .collect()
    });

    let mut derived = Voicing::from_frets(frets);
    derived.fingers = fingers;
    derived.barres = barres;
    derived.bass_pc = Some(target);
    derived.bass_label = Some(label_for(target, prefer_flat).to_string());
    derived.bass_string = Some(bass_string);
    relocate_root(&mut derived, voicing, root);

    if !is_theory_valid(&derived, &GUITAR, root, recipe) || !is_playable(&derived, limits) {
        return None;
    }
    Some(derived)
}

/// Shrink a barre to the strings from `first` upward. A barre that no longer
/// holds is dropped; the remaining notes are still fretted individually.
fn clip_barre(frets: &[FretState], barre: &Barre, first: usize, min_strings: usize) -> Option<Barre> {
    let from = (barre.from.max(first)..=barre.to).find(|s| frets[*s] == FretState::Fretted(barre.fret))?;
    let clipped = Barre { from, ..*barre };
    barre_is_valid(frets, &clipped, min_strings).then_some(clipped)
}

/// Keep the root marker on a string that still sounds it.
fn relocate_root(derived: &mut Voicing, original: &Voicing, root: PitchClass) {
    let still_sounding = original
        .root_string
        .filter(|s| derived.frets.get(*s).is_some_and(|f| f.is_sounding()));
    let string = still_sounding.or_else(|| {
        derived
            .frets
            .iter()
            .enumerate()
            .position(|(string, state)| GUITAR.pitch_class(string, *state) == Some(root))
    });
    derived.root_string = string;
    derived.root_fret = string.and_then(|s| derived.frets[s].sounding_fret());
}
