//! # Transposition
//!
//! Turns one hand-entered voicing into the same grip on other roots by sliding
//! it along the neck.
//!
//! A voicing is movable when every open string sits under a barre; such a
//! string is treated as stopped at the barre fret and moves with it. Any other
//! open string pins the grip to the nut and nothing is generated.
//!
//! For each target root the shift is `delta` or `delta - 12` semitones
//! (`delta` = upward interval from the source root). A shift is usable when
//! the lowest stopped fret lands in `1..=11` and the highest stays within the
//! fret limit. The smaller shift wins, then the lower resulting position;
//! targets with no usable shift are skipped.

use std::collections::BTreeMap;

use log::debug;

use crate::error::ChordError;
use crate::pitch::{interval_between, label_for, normalize_pc, PitchClass};
use crate::symbol::ChordSymbol;
use crate::voicing::{Barre, FretState, Instrument, Voicing};

use super::check::{validate_submission, Limits};

/// Lowest stopped fret a transposed grip may start on.
const MIN_POSITION: i32 = 1;
/// Highest stopped fret a transposed grip may start on.
const MAX_POSITION: i32 = 11;

pub fn is_movable(voicing: &Voicing) -> bool {
    voicing.fretted_count() > 0
        && voicing
            .frets
            .iter()
            .enumerate()
            .all(|(string, state)| *state != FretState::Open || voicing.barres.iter().any(|b| b.covers(string)))
}

/// Frets with barred open strings resolved to the barre fret.
fn movable_frets(voicing: &Voicing) -> Vec<FretState> {
    voicing
        .frets
        .iter()
        .enumerate()
        .map(|(string, state)| match state {
            FretState::Open => voicing
                .barres
                .iter()
                .find(|b| b.covers(string))
                .map(|b| FretState::Fretted(b.fret))
                .unwrap_or(FretState::Open),
            other => *other,
        })
        .collect()
}

/// Pick the shift for an upward interval of `delta` semitones, if one fits.
pub fn choose_offset(frets: &[FretState], delta: u8, max_fret: u8) -> Option<i32> {
    let stopped = || frets.iter().filter_map(|f| f.fretted()).map(i32::from);
    let low = stopped().min()?;
    let high = stopped().max()?;
    let up = i32::from(delta % 12);

    [up, up - 12]
        .into_iter()
        .filter(|offset| {
            let position = low + offset;
            (MIN_POSITION..=MAX_POSITION).contains(&position) && high + offset <= i32::from(max_fret)
        })
        .min_by_key(|offset| (offset.abs(), low + offset))
}

/// Slide a movable voicing by `offset` frets. `None` when a fret, barre or
/// root fret would leave the neck.
pub(crate) fn transpose_voicing(voicing: &Voicing, offset: i32) -> Option<Voicing> {
    let shift = |fret: u8| u8::try_from(i32::from(fret) + offset).ok().filter(|f| *f >= 1);

    let frets = movable_frets(voicing)
        .into_iter()
        .map(|state| match state {
            FretState::Fretted(fret) => shift(fret).map(FretState::Fretted),
            other => Some(other),
        })
        .collect::<Option<Vec<FretState>>>()?;

    let mut moved = Voicing::from_frets(frets);
    moved.fingers = voicing.fingers.clone();
    moved.barres = voicing
        .barres
        .iter()
        .map(|b| shift(b.fret).map(|fret| Barre { fret, ..*b }))
        .collect::<Option<Vec<Barre>>>()?;
    moved.root_string = voicing.root_string;
    moved.root_fret = match (voicing.root_string, voicing.root_fret) {
        (Some(string), _) => moved.frets.get(string).and_then(|f| f.sounding_fret()),
        (None, Some(fret)) => Some(shift(fret)?),
        (None, None) => None,
    };
    moved.bass_pc = voicing.bass_pc.map(|pc| normalize_pc(pc as i32 + offset));
    moved.bass_string = voicing.bass_string;
    Some(moved)
}

/// Transpose a submitted voicing of `source_symbol` to each of `target_roots`.
///
/// Keys are the target chord symbols. The source root itself is skipped, as is
/// every target the grip cannot reach; a voicing that isn't movable yields an
/// empty map.
pub fn compute_transpositions(
    source: &Voicing,
    source_symbol: &str,
    target_roots: &[PitchClass],
    instrument: Instrument,
    limits: &Limits,
) -> Result<BTreeMap<String, Vec<Voicing>>, ChordError> {
    validate_submission(source, instrument)?;
    let symbol = ChordSymbol::parse(source_symbol)?;

    let mut out: BTreeMap<String, Vec<Voicing>> = BTreeMap::new();
    if !is_movable(source) {
        debug!("{} on {} has unbarred open strings, not transposing", symbol, instrument);
        return Ok(out);
    }

    let frets = movable_frets(source);
    for target in target_roots.iter().map(|pc| pc % 12) {
        if target == symbol.root {
            continue;
        }
        let delta = interval_between(symbol.root, target);
        let Some(offset) = choose_offset(&frets, delta, limits.max_fret) else {
            debug!("{} to pc {}: no shift fits the neck", symbol, target);
            continue;
        };

        let target_symbol = symbol.transposed(i32::from(delta), None);
        let Some(mut voicing) = transpose_voicing(source, offset) else {
            debug!("{} to pc {}: shift by {} leaves the neck", symbol, target, offset);
            continue;
        };
        voicing.bass_label = voicing
            .bass_pc
            .map(|pc| label_for(pc, target_symbol.bass_prefers_flat(pc)).to_string());
        out.entry(target_symbol.to_string()).or_default().push(voicing);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fretted::shapes::shape;

    fn raw(voicing: &Voicing) -> Vec<i8> {
        voicing.frets.iter().map(|f| i8::from(*f)).collect()
    }

    #[test]
    fn test_movability() {
        assert!(is_movable(&shape("maj_E").unwrap().instantiate(8)));
        assert!(!is_movable(&Voicing::from_raw(&[-1, 3, 2, 0, 1, 0])));
        assert!(!is_movable(&Voicing::from_raw(&[-1, -1, -1, -1, -1, 0])));

        // open string drawn under a barre moves with it
        let mut barred = Voicing::from_raw(&[-1, 3, 5, 5, 5, 0]);
        barred.barres.push(Barre { fret: 3, from: 1, to: 5, finger: 1 });
        assert!(is_movable(&barred));
        assert_eq!(raw(&transpose_voicing(&barred, 2).unwrap()), vec![-1, 5, 7, 7, 7, 5]);
    }

    #[test]
    fn test_choose_offset_prefers_smaller_shift() {
        let frets = shape("maj_E").unwrap().instantiate(8).frets;
        assert_eq!(choose_offset(&frets, 2, 15), Some(2));
        assert_eq!(choose_offset(&frets, 5, 15), Some(-7));
        // 12 and 0 are both outside 1..=11
        assert_eq!(choose_offset(&frets, 4, 15), None);
        // the upward shift would pass the fret limit
        assert_eq!(choose_offset(&frets, 3, 12), None);
    }

    #[test]
    fn test_transpose_moves_barre_and_root() {
        let source = shape("maj_E").unwrap().instantiate(8);
        let moved = transpose_voicing(&source, -5).unwrap();
        assert_eq!(raw(&moved), vec![3, 5, 5, 4, 3, 3]);
        assert_eq!(moved.barres, vec![Barre { fret: 3, from: 0, to: 5, finger: 1 }]);
        assert_eq!(moved.root_fret, Some(3));
        assert_eq!(moved.base_fret, 3);
        assert_eq!(moved.fingers, source.fingers);
    }

    #[test]
    fn test_transpose_refuses_to_leave_the_neck() {
        let mut source = Voicing::from_raw(&[-1, 3, 5, 5, 5, 3]);
        source.barres.push(Barre { fret: 1, from: 1, to: 5, finger: 1 });
        assert_eq!(transpose_voicing(&source, -2), None);

        let mut unanchored = Voicing::from_raw(&[-1, 3, 5, 5, 5, 3]);
        unanchored.root_fret = Some(1);
        assert_eq!(transpose_voicing(&unanchored, -1), None);
        assert_eq!(transpose_voicing(&unanchored, 2).unwrap().root_fret, Some(3));
    }

    #[test]
    fn test_stray_barre_is_rejected_before_transposing() {
        let mut source = Voicing::from_raw(&[-1, 3, 5, 5, 5, 3]);
        source.barres.push(Barre { fret: 1, from: 1, to: 5, finger: 1 });
        assert!(matches!(
            compute_transpositions(&source, "C", &[10], Instrument::Guitar, &Limits::default()),
            Err(ChordError::InvalidVoicing(_))
        ));
    }

    #[test]
    fn test_tritone_goes_whichever_way_fits() {
        // +6 and -6 can't both land in 1..=11, so the window picks the side
        assert_eq!(choose_offset(&shape("maj_E").unwrap().instantiate(5).frets, 6, 15), Some(6));
        assert_eq!(choose_offset(&shape("maj_E").unwrap().instantiate(7).frets, 6, 15), Some(-6));
        assert_eq!(choose_offset(&shape("maj_E").unwrap().instantiate(6).frets, 6, 15), None);
    }

    #[test]
    fn test_compute_transpositions_for_barre_chord() {
        let source = shape("maj_E").unwrap().instantiate(8);
        let targets: Vec<PitchClass> = (0..12).collect();
        let out = compute_transpositions(&source, "C", &targets, Instrument::Guitar, &Limits::default()).unwrap();

        // C itself and E (fret 0 or 12) are missing
        assert_eq!(out.len(), 10);
        assert!(!out.contains_key("C"));
        assert!(!out.contains_key("E"));
        assert_eq!(raw(&out["F"][0]), vec![1, 3, 3, 2, 1, 1]);
        assert_eq!(raw(&out["Db"][0]), vec![9, 11, 11, 10, 9, 9]);
    }

    #[test]
    fn test_unmovable_source_yields_nothing() {
        let source = Voicing::from_raw(&[-1, 3, 2, 0, 1, 0]);
        let out = compute_transpositions(&source, "C", &[2, 7], Instrument::Guitar, &Limits::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_slash_source_keeps_its_bass() {
        let mut source = Voicing::from_raw(&[-1, 7, 5, 5, 5, 8]);
        source.bass_pc = Some(4);
        source.bass_label = Some("E".to_string());
        source.bass_string = Some(1);
        source.barres.push(Barre { fret: 5, from: 2, to: 4, finger: 1 });
        let out = compute_transpositions(&source, "C/E", &[3], Instrument::Guitar, &Limits::default()).unwrap();
        let moved = &out["Eb/G"][0];
        assert_eq!(raw(moved), vec![-1, 10, 8, 8, 8, 11]);
        assert_eq!(moved.bass_pc, Some(7));
        assert_eq!(moved.bass_label.as_deref(), Some("G"));
    }

    #[test]
    fn test_ukulele_transposition() {
        // Bb: 3211 with the index across the top two strings
        let mut source = Voicing::from_raw(&[3, 2, 1, 1]);
        source.barres.push(Barre { fret: 1, from: 2, to: 3, finger: 1 });
        let out = compute_transpositions(&source, "Bb", &[0], Instrument::Ukulele, &Limits::default()).unwrap();
        assert_eq!(raw(&out["C"][0]), vec![5, 4, 3, 3]);
        assert_eq!(out["C"][0].barres[0].fret, 3);
    }

    #[test]
    fn test_bad_submission_is_an_error() {
        let source = Voicing::from_raw(&[3, 2, 1, 1]);
        assert!(compute_transpositions(&source, "Bb", &[0], Instrument::Guitar, &Limits::default()).is_err());
        let source = shape("maj_E").unwrap().instantiate(8);
        assert!(compute_transpositions(&source, "Cmaj42", &[0], Instrument::Guitar, &Limits::default()).is_err());
    }
}
