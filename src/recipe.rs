//! # Chord Recipe Table
//!
//! Static registry mapping a chord-quality identifier to the semitone intervals
//! above the root that a voicing has to sound.
//!
//! One table serves both pipelines. The fretted enumerator only cares about the
//! interval *set*; the keyboard builder stacks the intervals in table order, so
//! the order is part of each recipe (e.g. `9` stacks root, 3rd, b7 and puts the
//! 9th on top).
//!
//! Some extended qualities deliberately leave out the 5th (and `13#11` the
//! root) so a four-finger grip can still cover every required tone.
//!
//! ## Example
//! ```rust
//! use chordgen::recipe::recipe;
//!
//! let maj7 = recipe("maj7")?;
//! assert_eq!(maj7.intervals, &[0, 4, 7, 11]);
//! assert_eq!(maj7.pitch_classes(2), vec![2, 6, 9, 1]); // Dmaj7
//! # Ok::<(), chordgen::ChordError>(())
//! ```

use crate::error::ChordError;
use crate::pitch::{normalize_pc, PitchClass};

/// A chord quality: identifier, display suffix, intervals and alias suffixes.
#[derive(Debug, PartialEq, Eq)]
pub struct ChordRecipe {
    pub id: &'static str,
    /// Appended to the root label to form the chord symbol ("" for major).
    pub suffix: &'static str,
    /// Semitones above the root, each in `0..12`.
    pub intervals: &'static [u8],
    /// Other suffixes that spell the same quality.
    pub aliases: &'static [&'static str],
}

// triads
const MAJOR: [u8; 3] = [0, 4, 7];
const MINOR: [u8; 3] = [0, 3, 7];
const DIMINISHED: [u8; 3] = [0, 3, 6];
const AUGMENTED: [u8; 3] = [0, 4, 8];
const SUS2: [u8; 3] = [0, 2, 7];
const SUS4: [u8; 3] = [0, 5, 7];
// sixths and sevenths
const SIX: [u8; 4] = [0, 4, 7, 9];
const MINOR6: [u8; 4] = [0, 3, 7, 9];
const DOM7: [u8; 4] = [0, 4, 7, 10];
const MAJOR7: [u8; 4] = [0, 4, 7, 11];
const MINOR7: [u8; 4] = [0, 3, 7, 10];
const MINOR7FLAT5: [u8; 4] = [0, 3, 6, 10];
const DIMINISHED7: [u8; 4] = [0, 3, 6, 9];
const SEVEN_SUS4: [u8; 4] = [0, 5, 7, 10];
// extensions, 5th omitted unless it's part of the colour
const ADD9: [u8; 4] = [0, 4, 7, 2];
const NINE: [u8; 4] = [0, 4, 10, 2];
const MAJOR9: [u8; 4] = [0, 4, 11, 2];
const MINOR9: [u8; 4] = [0, 3, 10, 2];
const ELEVEN: [u8; 4] = [0, 10, 2, 5];
const MINOR11: [u8; 4] = [0, 3, 10, 5];
const THIRTEEN: [u8; 4] = [0, 4, 10, 9];
const MAJOR13: [u8; 4] = [0, 4, 11, 9];
const MINOR13: [u8; 4] = [0, 3, 10, 9];
// altered dominants
const SEVEN_FLAT9: [u8; 4] = [0, 4, 10, 1];
const SEVEN_SHARP9: [u8; 4] = [0, 4, 10, 3];
const SEVEN_FLAT5: [u8; 4] = [0, 4, 6, 10];
const SEVEN_SHARP5: [u8; 4] = [0, 4, 8, 10];
// rootless
const THIRTEEN_SHARP11: [u8; 4] = [4, 10, 6, 9];

/// Every known quality, in generation order.
pub static RECIPES: &[ChordRecipe] = &[
    ChordRecipe { id: "maj", suffix: "", intervals: &MAJOR, aliases: &["maj", "M"] },
    ChordRecipe { id: "m", suffix: "m", intervals: &MINOR, aliases: &["min", "-"] },
    ChordRecipe { id: "dim", suffix: "dim", intervals: &DIMINISHED, aliases: &["°", "o"] },
    ChordRecipe { id: "aug", suffix: "aug", intervals: &AUGMENTED, aliases: &["+"] },
    ChordRecipe { id: "sus2", suffix: "sus2", intervals: &SUS2, aliases: &[] },
    ChordRecipe { id: "sus4", suffix: "sus4", intervals: &SUS4, aliases: &["sus"] },
    ChordRecipe { id: "6", suffix: "6", intervals: &SIX, aliases: &["maj6"] },
    ChordRecipe { id: "m6", suffix: "m6", intervals: &MINOR6, aliases: &["min6", "-6"] },
    ChordRecipe { id: "7", suffix: "7", intervals: &DOM7, aliases: &["dom7"] },
    ChordRecipe { id: "maj7", suffix: "maj7", intervals: &MAJOR7, aliases: &["M7", "Δ7"] },
    ChordRecipe { id: "m7", suffix: "m7", intervals: &MINOR7, aliases: &["min7", "-7"] },
    ChordRecipe { id: "m7b5", suffix: "m7b5", intervals: &MINOR7FLAT5, aliases: &["ø", "ø7", "-7b5"] },
    ChordRecipe { id: "dim7", suffix: "dim7", intervals: &DIMINISHED7, aliases: &["°7", "o7"] },
    ChordRecipe { id: "7sus4", suffix: "7sus4", intervals: &SEVEN_SUS4, aliases: &["7sus"] },
    ChordRecipe { id: "add9", suffix: "add9", intervals: &ADD9, aliases: &["add2"] },
    ChordRecipe { id: "9", suffix: "9", intervals: &NINE, aliases: &["dom9"] },
    ChordRecipe { id: "maj9", suffix: "maj9", intervals: &MAJOR9, aliases: &["M9", "Δ9"] },
    ChordRecipe { id: "m9", suffix: "m9", intervals: &MINOR9, aliases: &["min9", "-9"] },
    ChordRecipe { id: "11", suffix: "11", intervals: &ELEVEN, aliases: &["dom11"] },
    ChordRecipe { id: "m11", suffix: "m11", intervals: &MINOR11, aliases: &["min11", "-11"] },
    ChordRecipe { id: "13", suffix: "13", intervals: &THIRTEEN, aliases: &["dom13"] },
    ChordRecipe { id: "maj13", suffix: "maj13", intervals: &MAJOR13, aliases: &["M13", "Δ13"] },
    ChordRecipe { id: "m13", suffix: "m13", intervals: &MINOR13, aliases: &["min13", "-13"] },
    ChordRecipe { id: "7b9", suffix: "7b9", intervals: &SEVEN_FLAT9, aliases: &["7(b9)"] },
    ChordRecipe { id: "7#9", suffix: "7#9", intervals: &SEVEN_SHARP9, aliases: &["7(#9)"] },
    ChordRecipe { id: "7b5", suffix: "7b5", intervals: &SEVEN_FLAT5, aliases: &["7(b5)"] },
    ChordRecipe { id: "7#5", suffix: "7#5", intervals: &SEVEN_SHARP5, aliases: &["7(#5)", "7+", "aug7"] },
    ChordRecipe { id: "13#11", suffix: "13#11", intervals: &THIRTEEN_SHARP11, aliases: &["13(#11)"] },
];

/// Look a recipe up by identifier.
pub fn recipe(id: &str) -> Result<&'static ChordRecipe, ChordError> {
    RECIPES
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| ChordError::UnknownRecipe(id.to_string()))
}

/// Look a recipe up by the suffix of a chord symbol, aliases included.
pub fn recipe_for_suffix(suffix: &str) -> Result<&'static ChordRecipe, ChordError> {
    RECIPES
        .iter()
        .find(|r| r.suffix == suffix)
        .or_else(|| RECIPES.iter().find(|r| r.aliases.contains(&suffix)))
        .ok_or_else(|| ChordError::UnknownRecipe(suffix.to_string()))
}

impl ChordRecipe {
    /// Required pitch classes above `root`, in recipe order.
    pub fn pitch_classes(&self, root: PitchClass) -> Vec<PitchClass> {
        self.intervals
            .iter()
            .map(|iv| normalize_pc(root as i32 + *iv as i32))
            .collect()
    }

    pub fn contains(&self, interval: u8) -> bool {
        self.intervals.contains(&(interval % 12))
    }

    /// Chord symbol for a spelled root, e.g. `"Eb"` + `m7` = `"Ebm7"`.
    pub fn symbol(&self, root_label: &str) -> String {
        format!("{}{}", root_label, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(recipe("m7b5").unwrap().intervals, &[0, 3, 6, 10]);
        assert_eq!(recipe("9").unwrap().intervals, &[0, 4, 10, 2]);
        assert!(matches!(recipe("nope"), Err(ChordError::UnknownRecipe(_))));
    }

    #[test]
    fn test_lookup_by_suffix_and_alias() {
        assert_eq!(recipe_for_suffix("").unwrap().id, "maj");
        assert_eq!(recipe_for_suffix("M7").unwrap().id, "maj7");
        assert_eq!(recipe_for_suffix("-7").unwrap().id, "m7");
        assert_eq!(recipe_for_suffix("ø").unwrap().id, "m7b5");
        assert!(recipe_for_suffix("m7b13").is_err());
    }

    #[test]
    fn test_intervals_are_normalized_and_distinct() {
        for r in RECIPES {
            let unique: HashSet<_> = r.intervals.iter().collect();
            assert_eq!(unique.len(), r.intervals.len(), "duplicate interval in {}", r.id);
            assert!(r.intervals.iter().all(|iv| *iv < 12), "{} not normalized", r.id);
        }
    }

    #[test]
    fn test_ids_suffixes_and_aliases_are_unique() {
        let mut seen = HashSet::new();
        for r in RECIPES {
            assert!(seen.insert(r.suffix), "suffix {} used twice", r.suffix);
            for alias in r.aliases {
                assert!(seen.insert(*alias), "alias {} used twice", alias);
            }
        }
        let ids: HashSet<_> = RECIPES.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), RECIPES.len());
    }

    #[test]
    fn test_only_rootless_recipe_omits_root() {
        let rootless: Vec<_> = RECIPES.iter().filter(|r| !r.contains(0)).map(|r| r.id).collect();
        assert_eq!(rootless, vec!["13#11"]);
    }

    #[test]
    fn test_pitch_classes_and_symbol() {
        let m7 = recipe("m7").unwrap();
        assert_eq!(m7.pitch_classes(9), vec![9, 0, 4, 7]); // Am7
        assert_eq!(m7.symbol("A"), "Am7");
        assert_eq!(recipe("maj").unwrap().symbol("C"), "C");
    }
}
