//! # Dedup & Ranking
//!
//! Canonical signatures for fretted voicings, duplicate removal and the
//! position ordering used to cap each symbol's variants.
//!
//! A signature is the sorted set of sounding pitch classes, the bass pitch
//! class and the fret pattern. Two flavours of the pattern exist:
//!
//! - [`SignatureKind::Positional`]: absolute frets. Used when merging into a
//!   stored entry, where the same grip at another position is a new variant.
//! - [`SignatureKind::Relative`]: stopped frets re-expressed from the lowest
//!   stopped fret, so one grip an octave apart collapses to a single entry.
//!   Used for generator output.
//!
//! Dedup keeps the first voicing seen for each signature.

use std::collections::{BTreeSet, HashSet};

use crate::error::ChordError;
use crate::fretted::{validate_submission, Tuning};
use crate::pitch::PitchClass;
use crate::voicing::{ChordEntry, FretState, Voicing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureKind {
    Positional,
    Relative,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pcs: Vec<PitchClass>,
    bass: Option<PitchClass>,
    frets: Vec<FretState>,
}

pub fn signature(voicing: &Voicing, tuning: &Tuning, kind: SignatureKind) -> Signature {
    let pcs: BTreeSet<PitchClass> = tuning.sounding_pcs(voicing).into_iter().collect();
    let bass = tuning.bass(voicing).map(|(_, pc)| pc);
    let frets = match (kind, voicing.lowest_fretted()) {
        (SignatureKind::Relative, Some(low)) => voicing
            .frets
            .iter()
            .map(|state| match state {
                // keep relative frets above zero so they never read as open
                FretState::Fretted(fret) => FretState::Fretted(fret - low + 1),
                other => *other,
            })
            .collect(),
        _ => voicing.frets.clone(),
    };
    Signature {
        pcs: pcs.into_iter().collect(),
        bass,
        frets,
    }
}

/// Drop every voicing whose signature was already seen, keeping order.
pub fn dedup(voicings: Vec<Voicing>, tuning: &Tuning, kind: SignatureKind) -> Vec<Voicing> {
    let mut seen = HashSet::new();
    voicings
        .into_iter()
        .filter(|v| seen.insert(signature(v, tuning, kind)))
        .collect()
}

/// Stable sort by playing position, lowest first; then keep at most `cap`.
pub fn rank(mut voicings: Vec<Voicing>, cap: usize) -> Vec<Voicing> {
    voicings.sort_by_key(|v| v.position());
    voicings.truncate(cap);
    voicings
}

impl ChordEntry<Voicing> {
    /// Append submitted or regenerated variants, skipping any already stored
    /// under the positional signature. Returns how many were added.
    ///
    /// Every incoming variant must fit the entry's instrument; if one doesn't,
    /// nothing is merged.
    pub fn merge_variants(&mut self, incoming: Vec<Voicing>) -> Result<usize, ChordError> {
        let tuning = Tuning::for_instrument(self.instrument)?;
        for voicing in &incoming {
            validate_submission(voicing, self.instrument)?;
        }
        Ok(self.merge_by_key(incoming, |v| signature(v, tuning, SignatureKind::Positional)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fretted::GUITAR;
    use crate::voicing::Instrument;

    fn v(frets: &[i8]) -> Voicing {
        Voicing::from_raw(frets)
    }

    #[test]
    fn test_octave_copies_collapse_only_when_relative() {
        let low = v(&[1, 3, 3, 2, 1, 1]);
        let high = v(&[13, 15, 15, 14, 13, 13]);
        assert_eq!(
            signature(&low, &GUITAR, SignatureKind::Relative),
            signature(&high, &GUITAR, SignatureKind::Relative)
        );
        assert_ne!(
            signature(&low, &GUITAR, SignatureKind::Positional),
            signature(&high, &GUITAR, SignatureKind::Positional)
        );

        let kept = dedup(vec![low.clone(), high.clone()], &GUITAR, SignatureKind::Relative);
        assert_eq!(kept, vec![low]);
    }

    #[test]
    fn test_open_strings_stay_distinct_from_stopped() {
        // open E vs the same grip barred at 12
        let open = v(&[0, 2, 2, 1, 0, 0]);
        let barred = v(&[12, 14, 14, 13, 12, 12]);
        assert_ne!(
            signature(&open, &GUITAR, SignatureKind::Relative),
            signature(&barred, &GUITAR, SignatureKind::Relative)
        );
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let list = vec![
            v(&[8, 10, 10, 9, 8, 8]),
            v(&[-1, 3, 5, 5, 5, 3]),
            v(&[8, 10, 10, 9, 8, 8]),
            v(&[-1, 15, 17, 17, 17, 15]),
            v(&[-1, 3, 2, 0, 1, 0]),
        ];
        let once = dedup(list, &GUITAR, SignatureKind::Relative);
        let twice = dedup(once.clone(), &GUITAR, SignatureKind::Relative);
        assert_eq!(once.len(), 3);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rank_orders_by_position_and_caps() {
        let ranked = rank(
            vec![
                v(&[8, 10, 10, 9, 8, 8]),
                v(&[-1, 3, 5, 5, 5, 3]),
                v(&[-1, -1, 10, 12, 13, 12]),
                v(&[-1, 3, 2, 0, 1, 0]),
            ],
            3,
        );
        let positions: Vec<u8> = ranked.iter().map(|v| v.position()).collect();
        assert_eq!(positions, vec![1, 3, 8]);
    }

    #[test]
    fn test_rank_is_stable_for_equal_positions() {
        let a = v(&[-1, 3, 5, 5, 5, 3]);
        let b = v(&[3, 5, 5, 4, 3, 3]);
        assert_eq!(rank(vec![a.clone(), b.clone()], 3), vec![a, b]);
    }

    #[test]
    fn test_merge_variants_skips_stored_grips() {
        let mut entry: ChordEntry<Voicing> = ChordEntry::new("C", Instrument::Guitar);
        let added = entry
            .merge_variants(vec![v(&[-1, 3, 2, 0, 1, 0]), v(&[8, 10, 10, 9, 8, 8])])
            .unwrap();
        assert_eq!(added, 2);

        // both stored grips again plus the A shape up the neck: only the latter is new
        let added = entry
            .merge_variants(vec![v(&[8, 10, 10, 9, 8, 8]), v(&[-1, 3, 2, 0, 1, 0]), v(&[-1, 15, 17, 17, 17, 15])])
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(entry.variants.len(), 3);

        let mut piano: ChordEntry<Voicing> = ChordEntry::new("C", Instrument::Piano);
        assert!(piano.merge_variants(vec![v(&[-1, 3, 2, 0, 1, 0])]).is_err());
    }

    #[test]
    fn test_merge_rejects_variants_for_another_instrument() {
        let mut uke: ChordEntry<Voicing> = ChordEntry::new("C", Instrument::Ukulele);
        let err = uke
            .merge_variants(vec![v(&[0, 0, 0, 3]), v(&[0, 0, 0, 3, 5, 5])])
            .unwrap_err();
        assert!(matches!(err, ChordError::InvalidVoicing(_)));
        assert!(uke.variants.is_empty());

        assert_eq!(uke.merge_variants(vec![v(&[0, 0, 0, 3])]).unwrap(), 1);
    }
}
