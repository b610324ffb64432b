//! # Voicing Data Types
//!
//! The data model shared by every pipeline and by the storage layer that
//! persists the generated entries.
//!
//! ## Type Hierarchy
//! ```text
//! ChordEntry<V>
//!   ├── symbol: "Cmaj7", "C/E", ...
//!   ├── aliases: other spellings of the same chord
//!   ├── instrument: guitar | ukulele | piano
//!   └── variants: Vec<V>   (Voicing for fretted, KeyboardVoicing for piano)
//!
//! Voicing
//!   ├── base_fret: lowest fret drawn on the diagram
//!   ├── frets: Vec<FretState> (one per string, lowest-pitched string first)
//!   ├── fingers: Option<Vec<Option<u8>>>
//!   ├── barres: Vec<Barre>
//!   ├── root_string / root_fret: where the chord root sits
//!   └── bass_pc / bass_label / bass_string: slash variants only
//! ```
//!
//! ## Wire format
//! Field names are camelCase. Frets serialise as integers (-1 muted, 0 open,
//! n fretted) and per-string fingers as integers with 0 for "unset", matching
//! the stored documents. Absent `fingers` means unspecified; absent `barres`
//! means no barre.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChordError;
use crate::pitch::PitchClass;

/// Target instrument of a chord entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Guitar,
    Ukulele,
    Piano,
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Instrument::Guitar => "guitar",
            Instrument::Ukulele => "ukulele",
            Instrument::Piano => "piano",
        };
        f.write_str(name)
    }
}

impl FromStr for Instrument {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guitar" => Ok(Instrument::Guitar),
            "ukulele" | "uke" => Ok(Instrument::Ukulele),
            "piano" | "keyboard" => Ok(Instrument::Piano),
            _ => Err(ChordError::UnknownInstrument(s.to_string())),
        }
    }
}

/// State of a single string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i8", into = "i8")]
pub enum FretState {
    Muted,
    Open,
    Fretted(u8),
}

impl FretState {
    /// Fret the string sounds at (0 for open), `None` when muted.
    pub fn sounding_fret(&self) -> Option<u8> {
        match self {
            FretState::Muted => None,
            FretState::Open => Some(0),
            FretState::Fretted(fret) => Some(*fret),
        }
    }

    /// Fret number of a stopped string only.
    pub fn fretted(&self) -> Option<u8> {
        match self {
            FretState::Fretted(fret) => Some(*fret),
            _ => None,
        }
    }

    pub fn is_sounding(&self) -> bool {
        !matches!(self, FretState::Muted)
    }

    /// Absolute fret to state: 0 is open, anything above is stopped.
    pub fn at(fret: u8) -> Self {
        if fret == 0 {
            FretState::Open
        } else {
            FretState::Fretted(fret)
        }
    }
}

impl From<i8> for FretState {
    fn from(value: i8) -> Self {
        match value {
            v if v < 0 => FretState::Muted,
            0 => FretState::Open,
            v => FretState::Fretted(v as u8),
        }
    }
}

impl From<FretState> for i8 {
    fn from(state: FretState) -> Self {
        match state {
            FretState::Muted => -1,
            FretState::Open => 0,
            FretState::Fretted(fret) => fret as i8,
        }
    }
}

/// One finger pressing every string in `from..=to` at `fret`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barre {
    pub fret: u8,
    pub from: usize,
    pub to: usize,
    pub finger: u8,
}

impl Barre {
    pub fn covers(&self, string: usize) -> bool {
        (self.from..=self.to).contains(&string)
    }
}

/// A single playable fingering on a fretted instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voicing {
    pub base_fret: u8,
    pub frets: Vec<FretState>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "finger_slots")]
    pub fingers: Option<Vec<Option<u8>>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub barres: Vec<Barre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_string: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_fret: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bass_pc: Option<PitchClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bass_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bass_string: Option<usize>,
}

impl Voicing {
    /// Bare voicing from frets alone; the diagram base fret is derived.
    pub fn from_frets(frets: Vec<FretState>) -> Self {
        let base_fret = diagram_base_fret(&frets);
        Self {
            base_fret,
            frets,
            fingers: None,
            barres: Vec::new(),
            root_string: None,
            root_fret: None,
            bass_pc: None,
            bass_label: None,
            bass_string: None,
        }
    }

    /// Shorthand for tests and stored data: `[-1, 3, 2, 0, 1, 0]`.
    pub fn from_raw(frets: &[i8]) -> Self {
        Self::from_frets(frets.iter().map(|f| FretState::from(*f)).collect())
    }

    pub fn string_count(&self) -> usize {
        self.frets.len()
    }

    /// Stopped (non-open, non-muted) fret numbers, low string first.
    pub fn fretted(&self) -> impl Iterator<Item = u8> + '_ {
        self.frets.iter().filter_map(|f| f.fretted())
    }

    pub fn lowest_fretted(&self) -> Option<u8> {
        self.fretted().min()
    }

    pub fn highest_fretted(&self) -> Option<u8> {
        self.fretted().max()
    }

    pub fn fretted_count(&self) -> usize {
        self.fretted().count()
    }

    /// Position used for ranking: lowest stopped fret, 0 for all-open grips.
    pub fn position(&self) -> u8 {
        self.lowest_fretted().unwrap_or(0)
    }

    pub fn is_slash(&self) -> bool {
        self.bass_pc.is_some()
    }
}

/// Grips that fit the first four frets are drawn from the nut.
pub(crate) fn diagram_base_fret(frets: &[FretState]) -> u8 {
    let stopped = || frets.iter().filter_map(|f| f.fretted());
    match (stopped().min(), stopped().max()) {
        (Some(_), Some(high)) if high <= 4 => 1,
        (Some(low), _) => low,
        _ => 1,
    }
}

/// The stored/served unit: every voicing known for one symbol on one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordEntry<V> {
    pub symbol: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub instrument: Instrument,
    pub variants: Vec<V>,
}

impl<V> ChordEntry<V> {
    pub fn new(symbol: impl Into<String>, instrument: Instrument) -> Self {
        Self {
            symbol: symbol.into(),
            aliases: Vec::new(),
            instrument,
            variants: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Remove and return the variant at `index`, if there is one.
    pub fn remove_variant(&mut self, index: usize) -> Option<V> {
        if index < self.variants.len() {
            Some(self.variants.remove(index))
        } else {
            None
        }
    }

    /// Append every incoming variant whose key isn't already present.
    /// Returns how many were added.
    pub(crate) fn merge_by_key<K, F>(&mut self, incoming: Vec<V>, key: F) -> usize
    where
        K: PartialEq,
        F: Fn(&V) -> K,
    {
        let mut keys: Vec<K> = self.variants.iter().map(&key).collect();
        let mut added = 0;
        for variant in incoming {
            let k = key(&variant);
            if keys.contains(&k) {
                continue;
            }
            keys.push(k);
            self.variants.push(variant);
            added += 1;
        }
        added
    }
}

/// Serde adapter: `Option<u8>` per string in memory, 0 for "unset" on the wire.
mod finger_slots {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(fingers: &Option<Vec<Option<u8>>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match fingers {
            Some(slots) => serializer.collect_seq(slots.iter().map(|f| f.unwrap_or(0))),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<Option<u8>>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<Vec<u8>> = Option::deserialize(deserializer)?;
        Ok(raw.map(|slots| slots.into_iter().map(|f| (f > 0).then_some(f)).collect()))
    }
}
