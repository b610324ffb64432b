//! # Keyboard Voicing Builder
//!
//! Closed-position voicings for piano, fitted into a two-octave window around
//! a centre pitch, plus slash variants with a chord tone moved under the stack.
//!
//! ## Pipeline
//! 1. **Stack**: realise the recipe in table order, each note the first pitch
//!    of its class above the previous one, starting at `center - 24`.
//! 2. **Fold**: while the stack spans two octaves or more, drop the top note
//!    an octave.
//! 3. **Fit**: shift the whole stack by octaves so its midpoint lands as close
//!    to `center` as possible, then pick the window origin (`baseKey`) whose
//!    midpoint is closest to `center` while still containing every key.
//!
//! Slash variants take the root-position stack, pull the bass tone out and put
//! it back just under the median, lowered until it is the lowest note. Notes
//! that end up a semitone or less apart are spread by moving the upper one up
//! an octave before the stack is folded and fitted again.
//!
//! Pitches are MIDI note numbers (60 = middle C).

use serde::{Deserialize, Serialize};

use crate::fretted::BassInterval;
use crate::pitch::{label_for, PitchClass};
use crate::recipe::ChordRecipe;
use crate::symbol::ChordSymbol;
use crate::voicing::ChordEntry;

/// Width of the rendering window in semitones.
pub const WINDOW: u8 = 24;

/// One keyboard voicing as stored and rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardVoicing {
    /// Lowest key of the two-octave diagram.
    pub base_key: u8,
    /// Sounding pitches, ascending.
    pub keys: Vec<u8>,
    /// Pitch classes of the recipe on this root.
    pub pcs: Vec<PitchClass>,
    /// Lowest sounding pitch.
    pub bass: u8,
    pub bass_label: String,
}

/// Ascending closed stack of `recipe` on `root`, starting at `center - 24`.
pub fn closed_stack(root: PitchClass, recipe: &ChordRecipe, center: u8) -> Vec<u8> {
    let mut keys = Vec::with_capacity(recipe.intervals.len());
    let mut floor = i32::from(center) - i32::from(WINDOW);
    let mut first = true;
    for pc in recipe.pitch_classes(root) {
        let from = if first { floor.max(0) } else { floor + 1 };
        let pitch = from + (i32::from(pc) - from).rem_euclid(12);
        keys.push(pitch as u8);
        floor = pitch;
        first = false;
    }
    keys
}

/// Drop the top note an octave until the stack spans less than the window.
fn fold(keys: &mut Vec<u8>) {
    loop {
        keys.sort_unstable();
        match (keys.first(), keys.last()) {
            (Some(&low), Some(&high)) if high - low >= WINDOW => {}
            _ => break,
        }
        let top = keys.len() - 1;
        keys[top] -= 12;
    }
    keys.dedup();
}

/// Raise the upper note of any pair a semitone or less apart by an octave.
fn nudge(keys: &mut Vec<u8>) {
    keys.sort_unstable();
    let mut i = 1;
    while i < keys.len() {
        if keys[i] - keys[i - 1] <= 1 {
            keys[i] += 12;
            keys.sort_unstable();
            i = 1;
        } else {
            i += 1;
        }
    }
}

/// Octave shift bringing the stack's midpoint closest to `center`.
fn fit(keys: &mut [u8], center: u8) {
    let (Some(&low), Some(&high)) = (keys.first(), keys.last()) else {
        return;
    };
    let doubled_mid = i32::from(low) + i32::from(high);
    let best = (-2..=2)
        .filter(|k: &i32| i32::from(low) + 12 * k >= 0 && i32::from(high) + 12 * k <= 127)
        .min_by_key(|k| (doubled_mid + 24 * k - 2 * i32::from(center)).pow(2));
    if let Some(k) = best {
        for key in keys.iter_mut() {
            *key = (i32::from(*key) + 12 * k) as u8;
        }
    }
}

/// Window origin for a fitted stack: every key inside `origin..origin + 24`,
/// window midpoint as close to `center` as possible, lower origin on ties.
pub fn window_origin(keys: &[u8], center: u8) -> u8 {
    let (Some(&low), Some(&high)) = (keys.first(), keys.last()) else {
        return center.saturating_sub(WINDOW / 2);
    };
    let earliest = i32::from(high) - i32::from(WINDOW) + 1;
    let ideal = i32::from(center) - i32::from(WINDOW / 2);
    let earliest = earliest.max(0).min(i32::from(low));
    ideal.clamp(earliest, i32::from(low)) as u8
}

fn finish(mut keys: Vec<u8>, root: PitchClass, recipe: &ChordRecipe, center: u8, prefer_flat: bool) -> KeyboardVoicing {
    fold(&mut keys);
    fit(&mut keys, center);
    let bass = keys.first().copied().unwrap_or(center);
    KeyboardVoicing {
        base_key: window_origin(&keys, center),
        pcs: recipe.pitch_classes(root),
        bass,
        bass_label: label_for(bass % 12, prefer_flat).to_string(),
        keys,
    }
}

/// Root-position closed voicing.
pub fn build_voicing(root: PitchClass, recipe: &ChordRecipe, center: u8, prefer_flat: bool) -> KeyboardVoicing {
    finish(closed_stack(root, recipe, center), root, recipe, center, prefer_flat)
}

/// Bass tones offered for slash variants: the 3rd (major, else minor), the
/// 5th, and the dominant 7th, each only when the recipe has it.
pub fn slash_candidates(recipe: &ChordRecipe) -> Vec<BassInterval> {
    let third = if recipe.contains(4) {
        Some(BassInterval::MajorThird)
    } else if recipe.contains(3) {
        Some(BassInterval::MinorThird)
    } else {
        None
    };
    third
        .into_iter()
        .chain(recipe.contains(7).then_some(BassInterval::Fifth))
        .chain(recipe.contains(10).then_some(BassInterval::DominantSeventh))
        .collect()
}

/// The voicing with `bass` moved under the stack.
pub fn slash_voicing(
    root: PitchClass,
    recipe: &ChordRecipe,
    bass: BassInterval,
    center: u8,
    prefer_flat: bool,
) -> Option<KeyboardVoicing> {
    if !recipe.contains(bass.semitones()) {
        return None;
    }
    let target = bass.bass_pc(root);
    let stack = build_voicing(root, recipe, center, prefer_flat).keys;
    let median = stack[stack.len() / 2];

    let mut keys: Vec<u8> = stack.iter().copied().filter(|k| k % 12 != target).collect();
    let lowest = keys.first().copied().unwrap_or(median);
    let mut pitch = i32::from(median) - 1 - (i32::from(median) - 1 - i32::from(target)).rem_euclid(12);
    while pitch >= i32::from(lowest) {
        pitch -= 12;
    }
    if pitch < 0 {
        return None;
    }
    keys.push(pitch as u8);
    nudge(&mut keys);
    Some(finish(keys, root, recipe, center, prefer_flat))
}

/// Every distinct slash variant of `symbol`, in candidate order, each bass
/// spelled the way the symbol spells it.
pub fn slash_voicings(symbol: &ChordSymbol, center: u8) -> Vec<(BassInterval, KeyboardVoicing)> {
    let mut out: Vec<(BassInterval, KeyboardVoicing)> = Vec::new();
    for bass in slash_candidates(symbol.recipe) {
        let flat = symbol.bass_prefers_flat(bass.bass_pc(symbol.root));
        let Some(voicing) = slash_voicing(symbol.root, symbol.recipe, bass, center, flat) else {
            continue;
        };
        if out.iter().all(|(_, v)| v.keys != voicing.keys) {
            out.push((bass, voicing));
        }
    }
    out
}

impl ChordEntry<KeyboardVoicing> {
    /// Append variants whose key sequence isn't stored yet; returns how many.
    pub fn merge_variants(&mut self, incoming: Vec<KeyboardVoicing>) -> usize {
        self.merge_by_key(incoming, |v| v.keys.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{recipe, RECIPES};
    use crate::voicing::Instrument;

    #[test]
    fn test_c_major_around_e4() {
        let voicing = build_voicing(0, recipe("maj").unwrap(), 64, false);
        assert_eq!(voicing.keys, vec![60, 64, 67]);
        assert_eq!(voicing.base_key, 52);
        assert_eq!(voicing.bass, 60);
        assert_eq!(voicing.bass_label, "C");
        assert_eq!(voicing.pcs, vec![0, 4, 7]);
    }

    #[test]
    fn test_closed_stack_order() {
        // 9: root, 3rd, b7 and the 9th on top
        assert_eq!(closed_stack(0, recipe("9").unwrap(), 64), vec![48, 52, 58, 62]);
        // rootless grip starts on the 3rd
        assert_eq!(closed_stack(0, recipe("13#11").unwrap(), 64), vec![40, 46, 54, 57]);
    }

    #[test]
    fn test_fold_wide_stack() {
        let mut keys = vec![48, 60, 76];
        fold(&mut keys);
        assert_eq!(keys, vec![48, 60, 64]);
    }

    #[test]
    fn test_nudge_spreads_clusters() {
        let mut keys = vec![60, 61, 64];
        nudge(&mut keys);
        assert_eq!(keys, vec![60, 64, 73]);
    }

    #[test]
    fn test_slash_candidates() {
        let kinds = |id: &str| slash_candidates(recipe(id).unwrap());
        assert_eq!(kinds("maj"), vec![BassInterval::MajorThird, BassInterval::Fifth]);
        assert_eq!(kinds("m7"), vec![BassInterval::MinorThird, BassInterval::Fifth, BassInterval::DominantSeventh]);
        assert_eq!(kinds("7#9"), vec![BassInterval::MajorThird, BassInterval::DominantSeventh]);
        assert!(kinds("sus2").iter().all(|b| *b == BassInterval::Fifth));
    }

    #[test]
    fn test_c_over_e_and_g() {
        let maj = recipe("maj").unwrap();
        let over_e = slash_voicing(0, maj, BassInterval::MajorThird, 64, false).unwrap();
        assert_eq!(over_e.keys, vec![52, 60, 67]);
        assert_eq!(over_e.bass, 52);
        assert_eq!(over_e.bass_label, "E");
        assert_eq!(over_e.base_key, 52);

        let over_g = slash_voicing(0, maj, BassInterval::Fifth, 64, false).unwrap();
        assert_eq!(over_g.keys, vec![55, 60, 64]);
        assert_eq!(over_g.bass_label, "G");
    }

    #[test]
    fn test_dominant_seventh_in_bass() {
        let voicing = slash_voicing(0, recipe("7").unwrap(), BassInterval::DominantSeventh, 64, true).unwrap();
        assert_eq!(voicing.keys, vec![58, 60, 64, 67]);
        assert_eq!(voicing.bass_label, "Bb");
        assert!(slash_voicing(0, recipe("maj").unwrap(), BassInterval::DominantSeventh, 64, false).is_none());
    }

    #[test]
    fn test_window_invariant_everywhere() {
        for r in RECIPES {
            for root in 0..12 {
                for center in [48u8, 60, 64, 72] {
                    let symbol = ChordSymbol::new(root, r, None);
                    let mut all = vec![build_voicing(root, r, center, false)];
                    all.extend(slash_voicings(&symbol, center).into_iter().map(|(_, v)| v));
                    for v in all {
                        let low = *v.keys.first().unwrap();
                        let high = *v.keys.last().unwrap();
                        assert!(high - low < WINDOW, "{} on {}: {:?}", r.id, root, v.keys);
                        assert!(v.keys.windows(2).all(|w| w[0] < w[1]));
                        assert!(v.base_key <= low && high < v.base_key + WINDOW);
                        assert_eq!(v.bass, low);
                    }
                }
            }
        }
    }

    #[test]
    fn test_merge_keyboard_variants() {
        let maj = recipe("maj").unwrap();
        let mut entry: ChordEntry<KeyboardVoicing> = ChordEntry::new("C", Instrument::Piano);
        assert_eq!(entry.merge_variants(vec![build_voicing(0, maj, 64, false)]), 1);
        assert_eq!(
            entry.merge_variants(vec![build_voicing(0, maj, 64, false), build_voicing(0, maj, 48, false)]),
            1
        );
    }

    #[test]
    fn test_wire_format() {
        let voicing = build_voicing(0, recipe("maj").unwrap(), 64, false);
        let json = serde_json::to_string(&voicing).unwrap();
        assert_eq!(
            json,
            r#"{"baseKey":52,"keys":[60,64,67],"pcs":[0,4,7],"bass":60,"bassLabel":"C"}"#
        );
    }

    #[test]
    fn test_slash_voicings_follow_symbol_spelling() {
        let symbol = ChordSymbol::new(4, recipe("7").unwrap(), None);
        let labels: Vec<String> = slash_voicings(&symbol, 60)
            .into_iter()
            .map(|(_, v)| v.bass_label)
            .collect();
        assert_eq!(labels, vec!["G#", "B", "D"]);
    }
}
