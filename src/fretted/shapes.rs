//! # Shape Pattern Library
//!
//! Movable guitar grips, each described relative to a barre position `B`.
//!
//! A pattern lists one entry per string: muted, or an offset from `B`. Placing
//! the pattern at `B` adds `B` to every offset. The chord root sits on
//! `root_string` at `B + root_offset`; rootless grips still name the string
//! and offset where the root *would* be, so the position arithmetic is the
//! same for every pattern.
//!
//! ## Families
//! - **E / A / D / G shapes** (CAGED): root on the 6th, 5th or 4th string;
//!   the G shape keeps its root on the 6th string above a partial barre.
//! - **Open-only grips**: played at the nut and nowhere else (the C shape).
//! - **Compact colour grips**: four-note voicings for 9ths, 11ths, 13ths and
//!   altered dominants that drop the 5th (or the root) to stay playable.
//!
//! [`candidate_shapes`] maps each recipe identifier to the patterns worth
//! trying, in preference order.

use crate::pitch::{normalize_pc, PitchClass};
use crate::voicing::{Barre, FretState, Voicing};

use super::tuning::Tuning;

/// One string of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeString {
    Muted,
    Offset(u8),
}

/// A barre relative to the pattern position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeBarre {
    pub offset: u8,
    pub from: usize,
    pub to: usize,
    pub finger: u8,
}

/// Where a pattern may be placed relative to the nut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenPosition {
    /// Movable only; position 0 is skipped.
    Never,
    /// Movable, and at position 0 the offset-0 strings ring open.
    Allowed,
    /// Fixed grip at the nut.
    Only,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ShapePattern {
    pub name: &'static str,
    pub root_string: usize,
    pub root_offset: u8,
    pub strings: [ShapeString; 6],
    /// Fingering at a movable position; `None` for muted strings.
    pub fingers: [Option<u8>; 6],
    pub barre: Option<ShapeBarre>,
    pub open: OpenPosition,
}

const X: ShapeString = ShapeString::Muted;

const fn o(offset: u8) -> ShapeString {
    ShapeString::Offset(offset)
}

/// Finger table with 0 for "no finger".
const fn f(raw: [u8; 6]) -> [Option<u8>; 6] {
    let mut out = [None; 6];
    let mut i = 0;
    while i < 6 {
        if raw[i] > 0 {
            out[i] = Some(raw[i]);
        }
        i += 1;
    }
    out
}

const fn index_barre(from: usize, to: usize) -> Option<ShapeBarre> {
    Some(ShapeBarre { offset: 0, from, to, finger: 1 })
}

macro_rules! shape {
    ($name:literal, root: ($string:expr, $offset:expr), [$($s:expr),*], fingers: $fingers:expr, barre: $barre:expr, open: $open:ident) => {
        ShapePattern {
            name: $name,
            root_string: $string,
            root_offset: $offset,
            strings: [$($s),*],
            fingers: f($fingers),
            barre: $barre,
            open: OpenPosition::$open,
        }
    };
}

// major
const MAJ_E: ShapePattern = shape!("maj_E", root: (0, 0), [o(0), o(2), o(2), o(1), o(0), o(0)], fingers: [1, 3, 4, 2, 1, 1], barre: index_barre(0, 5), open: Allowed);
const MAJ_A: ShapePattern = shape!("maj_A", root: (1, 0), [X, o(0), o(2), o(2), o(2), o(0)], fingers: [0, 1, 3, 3, 3, 1], barre: index_barre(1, 5), open: Allowed);
const MAJ_D: ShapePattern = shape!("maj_D", root: (2, 0), [X, X, o(0), o(2), o(3), o(2)], fingers: [0, 0, 1, 2, 4, 3], barre: None, open: Allowed);
const MAJ_G: ShapePattern = shape!("maj_G", root: (0, 3), [o(3), o(2), o(0), o(0), o(0), o(3)], fingers: [3, 2, 1, 1, 1, 4], barre: index_barre(2, 4), open: Allowed);
const MAJ_C: ShapePattern = shape!("maj_C", root: (1, 3), [X, o(3), o(2), o(0), o(1), o(0)], fingers: [0, 3, 2, 0, 1, 0], barre: None, open: Only);
// minor
const MIN_E: ShapePattern = shape!("m_E", root: (0, 0), [o(0), o(2), o(2), o(0), o(0), o(0)], fingers: [1, 3, 4, 1, 1, 1], barre: index_barre(0, 5), open: Allowed);
const MIN_A: ShapePattern = shape!("m_A", root: (1, 0), [X, o(0), o(2), o(2), o(1), o(0)], fingers: [0, 1, 3, 4, 2, 1], barre: index_barre(1, 5), open: Allowed);
const MIN_D: ShapePattern = shape!("m_D", root: (2, 0), [X, X, o(0), o(2), o(3), o(1)], fingers: [0, 0, 1, 3, 4, 2], barre: None, open: Allowed);
// other triads
const DIM_A: ShapePattern = shape!("dim_A", root: (1, 0), [X, o(0), o(1), o(2), o(1), X], fingers: [0, 1, 2, 4, 3, 0], barre: None, open: Never);
const AUG_A: ShapePattern = shape!("aug_A", root: (1, 2), [X, o(2), o(1), o(0), o(0), X], fingers: [0, 3, 2, 1, 1, 0], barre: None, open: Never);
const SUS2_A: ShapePattern = shape!("sus2_A", root: (1, 0), [X, o(0), o(2), o(2), o(0), o(0)], fingers: [0, 1, 3, 4, 1, 1], barre: index_barre(1, 5), open: Allowed);
const SUS4_A: ShapePattern = shape!("sus4_A", root: (1, 0), [X, o(0), o(2), o(2), o(3), o(0)], fingers: [0, 1, 2, 3, 4, 1], barre: index_barre(1, 5), open: Allowed);
const SUS4_E: ShapePattern = shape!("sus4_E", root: (0, 0), [o(0), o(2), o(2), o(2), o(0), o(0)], fingers: [1, 2, 3, 4, 1, 1], barre: index_barre(0, 5), open: Allowed);
// sixths
const SIX_A: ShapePattern = shape!("6_A", root: (1, 0), [X, o(0), o(2), o(2), o(2), o(2)], fingers: [0, 1, 3, 3, 3, 3], barre: Some(ShapeBarre { offset: 2, from: 2, to: 5, finger: 3 }), open: Never);
const MIN6_A: ShapePattern = shape!("m6_A", root: (1, 1), [X, o(1), X, o(0), o(2), o(1)], fingers: [0, 2, 0, 1, 4, 3], barre: None, open: Never);
// sevenths
const DOM7_E: ShapePattern = shape!("7_E", root: (0, 0), [o(0), o(2), o(0), o(1), o(0), o(0)], fingers: [1, 3, 1, 2, 1, 1], barre: index_barre(0, 5), open: Allowed);
const DOM7_A: ShapePattern = shape!("7_A", root: (1, 0), [X, o(0), o(2), o(0), o(2), o(0)], fingers: [0, 1, 3, 1, 4, 1], barre: index_barre(1, 5), open: Allowed);
const DOM7_D: ShapePattern = shape!("7_D", root: (2, 0), [X, X, o(0), o(2), o(1), o(2)], fingers: [0, 0, 1, 3, 2, 4], barre: None, open: Allowed);
const MAJ7_E: ShapePattern = shape!("maj7_E", root: (0, 0), [o(0), X, o(1), o(1), o(0), X], fingers: [1, 0, 3, 4, 2, 0], barre: None, open: Never);
const MAJ7_A: ShapePattern = shape!("maj7_A", root: (1, 0), [X, o(0), o(2), o(1), o(2), o(0)], fingers: [0, 1, 3, 2, 4, 1], barre: index_barre(1, 5), open: Allowed);
const MAJ7_G: ShapePattern = shape!("maj7_G", root: (0, 3), [o(3), o(2), o(0), o(0), o(0), o(2)], fingers: [4, 3, 1, 1, 1, 2], barre: index_barre(2, 4), open: Allowed);
const MAJ7_D: ShapePattern = shape!("maj7_D", root: (2, 0), [X, X, o(0), o(2), o(2), o(2)], fingers: [0, 0, 1, 3, 3, 3], barre: Some(ShapeBarre { offset: 2, from: 3, to: 5, finger: 3 }), open: Allowed);
const MIN7_E: ShapePattern = shape!("m7_E", root: (0, 0), [o(0), o(2), o(0), o(0), o(0), o(0)], fingers: [1, 3, 1, 1, 1, 1], barre: index_barre(0, 5), open: Allowed);
const MIN7_A: ShapePattern = shape!("m7_A", root: (1, 0), [X, o(0), o(2), o(0), o(1), o(0)], fingers: [0, 1, 3, 1, 2, 1], barre: index_barre(1, 5), open: Allowed);
const MIN7_D: ShapePattern = shape!("m7_D", root: (2, 0), [X, X, o(0), o(2), o(1), o(1)], fingers: [0, 0, 1, 3, 2, 2], barre: None, open: Allowed);
const MIN7B5_A: ShapePattern = shape!("m7b5_A", root: (1, 0), [X, o(0), o(1), o(0), o(1), X], fingers: [0, 1, 3, 2, 4, 0], barre: None, open: Never);
const MIN7B5_E: ShapePattern = shape!("m7b5_E", root: (0, 1), [o(1), X, o(1), o(1), o(0), X], fingers: [2, 0, 3, 4, 1, 0], barre: None, open: Never);
const DIM7_A: ShapePattern = shape!("dim7_A", root: (1, 1), [X, o(1), o(2), o(0), o(2), X], fingers: [0, 2, 3, 1, 4, 0], barre: None, open: Never);
const SEVEN_SUS4_A: ShapePattern = shape!("7sus4_A", root: (1, 0), [X, o(0), o(2), o(0), o(3), o(0)], fingers: [0, 1, 3, 1, 4, 1], barre: index_barre(1, 5), open: Allowed);
const SEVEN_SUS4_E: ShapePattern = shape!("7sus4_E", root: (0, 0), [o(0), o(2), o(0), o(2), o(0), o(0)], fingers: [1, 3, 1, 4, 1, 1], barre: index_barre(0, 5), open: Allowed);
// extended
const ADD9_E: ShapePattern = shape!("add9_E", root: (0, 0), [o(0), o(2), o(4), o(1), o(0), o(0)], fingers: [1, 3, 4, 2, 1, 1], barre: index_barre(0, 5), open: Allowed);
const NINE_A: ShapePattern = shape!("9_A", root: (1, 1), [X, o(1), o(0), o(1), o(1), o(1)], fingers: [0, 2, 1, 3, 3, 3], barre: Some(ShapeBarre { offset: 1, from: 3, to: 5, finger: 3 }), open: Never);
const MAJ9_A: ShapePattern = shape!("maj9_A", root: (1, 1), [X, o(1), o(0), o(2), o(1), X], fingers: [0, 2, 1, 4, 3, 0], barre: None, open: Never);
const MIN9_A: ShapePattern = shape!("m9_A", root: (1, 2), [X, o(2), o(0), o(2), o(2), X], fingers: [0, 2, 1, 3, 4, 0], barre: None, open: Never);
const ELEVEN_A: ShapePattern = shape!("11_A", root: (1, 0), [X, o(0), o(0), o(0), o(0), X], fingers: [0, 1, 1, 1, 1, 0], barre: index_barre(1, 4), open: Never);
const MIN11_A: ShapePattern = shape!("m11_A", root: (1, 2), [X, o(2), o(0), o(2), o(2), o(0)], fingers: [0, 2, 1, 3, 4, 1], barre: index_barre(2, 5), open: Never);
const THIRTEEN_E: ShapePattern = shape!("13_E", root: (0, 0), [o(0), X, o(0), o(1), o(2), X], fingers: [1, 0, 2, 3, 4, 0], barre: None, open: Never);
const MAJ13_E: ShapePattern = shape!("maj13_E", root: (0, 0), [o(0), X, o(1), o(1), o(2), X], fingers: [1, 0, 2, 3, 4, 0], barre: None, open: Never);
const MIN13_E: ShapePattern = shape!("m13_E", root: (0, 0), [o(0), X, o(0), o(0), o(2), X], fingers: [1, 0, 2, 3, 4, 0], barre: None, open: Never);
// altered
const SEVEN_FLAT9_A: ShapePattern = shape!("7b9_A", root: (1, 1), [X, o(1), o(0), o(1), o(0), X], fingers: [0, 2, 1, 3, 1, 0], barre: index_barre(2, 4), open: Never);
const SEVEN_SHARP9_A: ShapePattern = shape!("7#9_A", root: (1, 1), [X, o(1), o(0), o(1), o(2), X], fingers: [0, 2, 1, 3, 4, 0], barre: None, open: Never);
const SEVEN_FLAT5_A: ShapePattern = shape!("7b5_A", root: (1, 0), [X, o(0), o(1), o(0), o(2), X], fingers: [0, 1, 3, 2, 4, 0], barre: None, open: Never);
const SEVEN_SHARP5_A: ShapePattern = shape!("7#5_A", root: (1, 0), [X, o(0), X, o(0), o(2), o(1)], fingers: [0, 1, 0, 1, 4, 2], barre: None, open: Never);
const THIRTEEN_SHARP11_A: ShapePattern = shape!("13#11_A", root: (1, 2), [X, o(0), o(1), o(1), X, o(1)], fingers: [0, 1, 2, 3, 0, 4], barre: None, open: Never);

/// Quality → candidate shapes, in the order they're tried.
pub static QUALITY_SHAPES: &[(&str, &[ShapePattern])] = &[
    ("maj", &[MAJ_E, MAJ_A, MAJ_D, MAJ_G, MAJ_C]),
    ("m", &[MIN_E, MIN_A, MIN_D]),
    ("dim", &[DIM_A]),
    ("aug", &[AUG_A]),
    ("sus2", &[SUS2_A]),
    ("sus4", &[SUS4_E, SUS4_A]),
    ("6", &[SIX_A]),
    ("m6", &[MIN6_A]),
    ("7", &[DOM7_E, DOM7_A, DOM7_D]),
    ("maj7", &[MAJ7_E, MAJ7_A, MAJ7_D, MAJ7_G]),
    ("m7", &[MIN7_E, MIN7_A, MIN7_D]),
    ("m7b5", &[MIN7B5_A, MIN7B5_E]),
    ("dim7", &[DIM7_A]),
    ("7sus4", &[SEVEN_SUS4_E, SEVEN_SUS4_A]),
    ("add9", &[ADD9_E]),
    ("9", &[NINE_A]),
    ("maj9", &[MAJ9_A]),
    ("m9", &[MIN9_A]),
    ("11", &[ELEVEN_A]),
    ("m11", &[MIN11_A]),
    ("13", &[THIRTEEN_E]),
    ("maj13", &[MAJ13_E]),
    ("m13", &[MIN13_E]),
    ("7b9", &[SEVEN_FLAT9_A]),
    ("7#9", &[SEVEN_SHARP9_A]),
    ("7b5", &[SEVEN_FLAT5_A]),
    ("7#5", &[SEVEN_SHARP5_A]),
    ("13#11", &[THIRTEEN_SHARP11_A]),
];

/// Patterns to try for a recipe; empty for qualities without guitar grips.
pub fn candidate_shapes(recipe_id: &str) -> &'static [ShapePattern] {
    QUALITY_SHAPES
        .iter()
        .find(|(id, _)| *id == recipe_id)
        .map(|(_, shapes)| *shapes)
        .unwrap_or(&[])
}

/// Find a pattern by name across the whole library.
pub fn shape(name: &str) -> Option<&'static ShapePattern> {
    QUALITY_SHAPES
        .iter()
        .flat_map(|(_, shapes)| shapes.iter())
        .find(|s| s.name == name)
}

impl ShapePattern {
    fn max_offset(&self) -> u8 {
        self.strings
            .iter()
            .filter_map(|s| match s {
                ShapeString::Offset(o) => Some(*o),
                ShapeString::Muted => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Every position `B` at which the pattern's root lands on `root`.
    ///
    /// Positions repeat every 12 frets; only those whose highest note stays at
    /// or below `max_fret` are returned.
    pub fn positions(&self, root: PitchClass, tuning: &Tuning, max_fret: u8) -> Vec<u8> {
        let open_root = tuning.open_pc(self.root_string) as i32 + self.root_offset as i32;
        let base = normalize_pc(root as i32 - open_root);
        match self.open {
            OpenPosition::Only => {
                if base == 0 {
                    vec![0]
                } else {
                    Vec::new()
                }
            }
            OpenPosition::Never | OpenPosition::Allowed => {
                let first = if base == 0 && self.open == OpenPosition::Never { 12 } else { base };
                (first..=max_fret.saturating_sub(self.max_offset()))
                    .step_by(12)
                    .collect()
            }
        }
    }

    /// Absolute voicing for the pattern placed at `position`.
    pub fn instantiate(&self, position: u8) -> Voicing {
        let at_nut = position == 0 && self.open == OpenPosition::Allowed;
        let frets: Vec<FretState> = self
            .strings
            .iter()
            .map(|s| match s {
                ShapeString::Muted => FretState::Muted,
                ShapeString::Offset(o) => FretState::at(position + o),
            })
            .collect();

        // at the nut the index finger's notes ring open and the rest move down a finger
        let fingers: Vec<Option<u8>> = self
            .fingers
            .iter()
            .zip(frets.iter())
            .map(|(finger, state)| match state {
                FretState::Fretted(_) if at_nut => finger.map(|n| n.saturating_sub(1).max(1)),
                FretState::Fretted(_) => *finger,
                _ => None,
            })
            .collect();

        let barres = match self.barre {
            Some(b) if position + b.offset > 0 => vec![Barre {
                fret: position + b.offset,
                from: b.from,
                to: b.to,
                finger: if at_nut { b.finger.saturating_sub(1).max(1) } else { b.finger },
            }],
            _ => Vec::new(),
        };

        let mut voicing = Voicing::from_frets(frets);
        voicing.fingers = Some(fingers);
        voicing.barres = barres;
        voicing.root_string = Some(self.root_string);
        voicing.root_fret = Some(position + self.root_offset);
        voicing
    }
}
