//! Fixed tunings for the fretted instruments.
//!
//! Strings are indexed from the lowest-pitched string in standard order
//! (guitar: low E = 0 .. high E = 5). The ukulele is re-entrant, so its string
//! 0 (G4) sounds above strings 1 and 2; [`Tuning::bass`] compares real pitches
//! rather than string indices for that reason.

use crate::error::ChordError;
use crate::pitch::{normalize_pc, PitchClass};
use crate::voicing::{FretState, Instrument, Voicing};

#[derive(Debug, PartialEq, Eq)]
pub struct Tuning {
    pub instrument: Instrument,
    /// MIDI pitch of each open string.
    pub open_pitches: &'static [u8],
}

/// E2 A2 D3 G3 B3 E4
pub static GUITAR: Tuning = Tuning {
    instrument: Instrument::Guitar,
    open_pitches: &[40, 45, 50, 55, 59, 64],
};

/// G4 C4 E4 A4
pub static UKULELE: Tuning = Tuning {
    instrument: Instrument::Ukulele,
    open_pitches: &[67, 60, 64, 69],
};

impl Tuning {
    pub fn for_instrument(instrument: Instrument) -> Result<&'static Tuning, ChordError> {
        match instrument {
            Instrument::Guitar => Ok(&GUITAR),
            Instrument::Ukulele => Ok(&UKULELE),
            Instrument::Piano => Err(ChordError::UnsupportedInstrument(instrument)),
        }
    }

    pub fn string_count(&self) -> usize {
        self.open_pitches.len()
    }

    pub fn open_pc(&self, string: usize) -> PitchClass {
        self.open_pitches[string] % 12
    }

    /// Pitch class a string sounds, `None` when muted.
    pub fn pitch_class(&self, string: usize, state: FretState) -> Option<PitchClass> {
        state
            .sounding_fret()
            .map(|fret| normalize_pc(self.open_pitches[string] as i32 + fret as i32))
    }

    /// MIDI pitch a string sounds, `None` when muted.
    pub fn pitch(&self, string: usize, state: FretState) -> Option<u8> {
        state
            .sounding_fret()
            .map(|fret| self.open_pitches[string] + fret)
    }

    /// Pitch class of every sounding string, low string first.
    pub fn sounding_pcs(&self, voicing: &Voicing) -> Vec<PitchClass> {
        voicing
            .frets
            .iter()
            .enumerate()
            .filter_map(|(string, state)| self.pitch_class(string, *state))
            .collect()
    }

    /// Lowest-sounding string and its pitch class.
    pub fn bass(&self, voicing: &Voicing) -> Option<(usize, PitchClass)> {
        voicing
            .frets
            .iter()
            .enumerate()
            .filter_map(|(string, state)| self.pitch(string, *state).map(|p| (p, string)))
            .min()
            .map(|(pitch, string)| (string, pitch % 12))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guitar_open_pitch_classes() {
        let pcs: Vec<_> = (0..6).map(|s| GUITAR.open_pc(s)).collect();
        assert_eq!(pcs, vec![4, 9, 2, 7, 11, 4]);
    }

    #[test]
    fn test_pitch_class_per_string() {
        assert_eq!(GUITAR.pitch_class(1, FretState::Fretted(3)), Some(0)); // C on the A string
        assert_eq!(GUITAR.pitch_class(3, FretState::Open), Some(7));
        assert_eq!(GUITAR.pitch_class(0, FretState::Muted), None);
    }

    #[test]
    fn test_open_c_sounding_pcs() {
        let voicing = Voicing::from_raw(&[-1, 3, 2, 0, 1, 0]);
        assert_eq!(GUITAR.sounding_pcs(&voicing), vec![0, 4, 7, 0, 4]);
        assert_eq!(GUITAR.bass(&voicing), Some((1, 0)));
    }

    #[test]
    fn test_reentrant_ukulele_bass() {
        // open C: G C E C, the C string is the lowest pitch
        let voicing = Voicing::from_raw(&[0, 0, 0, 3]);
        assert_eq!(UKULELE.bass(&voicing), Some((1, 0)));
    }

    #[test]
    fn test_piano_has_no_tuning() {
        assert!(Tuning::for_instrument(Instrument::Piano).is_err());
        assert_eq!(Tuning::for_instrument(Instrument::Ukulele).unwrap().string_count(), 4);
    }
}
