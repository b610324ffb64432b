//! # Pitch Model
//!
//! Pitch-class arithmetic and note spelling.
//!
//! A pitch class is a note modulo the octave: 0=C, 1=C#/Db, ... 11=B. Every
//! computed value goes through [`normalize_pc`] so negative offsets wrap the
//! right way. Spelling (sharp vs flat) is a display concern only; the data
//! always carries the integer.

use crate::error::ChordError;

/// Note modulo octave, always in `0..12`.
pub type PitchClass = u8;

pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Wrap any semitone count into a pitch class.
pub fn normalize_pc(x: i32) -> PitchClass {
    x.rem_euclid(12) as PitchClass
}

/// Display name for a pitch class from the sharp or flat table.
pub fn label_for(pc: PitchClass, prefer_flat: bool) -> &'static str {
    let idx = (pc % 12) as usize;
    if prefer_flat {
        FLAT_NAMES[idx]
    } else {
        SHARP_NAMES[idx]
    }
}

/// Look a label up in both spelling tables.
///
/// Accepts the unicode accidentals as well (`C♯`, `B♭`).
pub fn pc_from_label(label: &str) -> Result<PitchClass, ChordError> {
    let normalized = label.trim().replace('♯', "#").replace('♭', "b");
    SHARP_NAMES
        .iter()
        .position(|name| *name == normalized)
        .or_else(|| FLAT_NAMES.iter().position(|name| *name == normalized))
        .map(|idx| idx as PitchClass)
        .ok_or_else(|| ChordError::UnknownLabel(label.to_string()))
}

/// Conventional spelling for a chord root: Db, Eb, Ab, Bb but F#.
pub fn prefers_flat(pc: PitchClass) -> bool {
    matches!(pc % 12, 1 | 3 | 8 | 10)
}

/// Root spelling, honouring an explicit override when given.
pub fn root_label(pc: PitchClass, prefer_flat: Option<bool>) -> &'static str {
    label_for(pc, prefer_flat.unwrap_or_else(|| prefers_flat(pc)))
}

/// Both spellings of a pitch class, preferred one first (one entry for naturals).
pub fn enharmonic_labels(pc: PitchClass, prefer_flat: bool) -> Vec<&'static str> {
    let first = label_for(pc, prefer_flat);
    let second = label_for(pc, !prefer_flat);
    if first == second {
        vec![first]
    } else {
        vec![first, second]
    }
}

/// Upward distance in semitones from `from` to `to`, in `0..12`.
pub fn interval_between(from: PitchClass, to: PitchClass) -> u8 {
    normalize_pc(to as i32 - from as i32)
}
