//! # Chord Symbols
//!
//! Parsing and formatting of chord symbols such as `Cmaj7`, `F#m7b5` or
//! `Dbmaj7/F`, and generation of the alias spellings stored with each entry.
//!
//! ## Grammar
//! ```text
//! symbol := root suffix ["/" bass]
//! root   := letter [accidental]      letter = A..G, accidental = # b ♯ ♭
//! suffix := display suffix or alias of a recipe ("" = major)
//! bass   := letter [accidental]
//! ```
//!
//! ## Example
//! ```rust
//! use chordgen::symbol::ChordSymbol;
//!
//! let symbol = ChordSymbol::parse("DbM7/F")?;
//! assert_eq!(symbol.root, 1);
//! assert_eq!(symbol.recipe.id, "maj7");
//! assert_eq!(symbol.bass, Some(5));
//! assert_eq!(symbol.to_string(), "Dbmaj7/F");
//! # Ok::<(), chordgen::ChordError>(())
//! ```

use std::fmt;

use crate::error::ChordError;
use crate::pitch::{enharmonic_labels, interval_between, label_for, normalize_pc, pc_from_label, root_label, PitchClass};
use crate::recipe::{recipe_for_suffix, ChordRecipe};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSymbol {
    pub root: PitchClass,
    pub root_label: String,
    pub recipe: &'static ChordRecipe,
    pub bass: Option<PitchClass>,
    pub bass_label: Option<String>,
}

impl ChordSymbol {
    /// Symbol for `root` spelled by the conventional rule unless `prefer_flat` says otherwise.
    pub fn new(root: PitchClass, recipe: &'static ChordRecipe, prefer_flat: Option<bool>) -> Self {
        Self {
            root,
            root_label: root_label(root, prefer_flat).to_string(),
            recipe,
            bass: None,
            bass_label: None,
        }
    }

    /// Same chord over a different bass note.
    pub fn with_bass(mut self, bass: PitchClass) -> Self {
        self.bass_label = Some(label_for(bass, self.bass_prefers_flat(bass)).to_string());
        self.bass = Some(bass);
        self
    }

    /// Spelling for a bass note: an accidental on the root decides; over a
    /// natural root the minor 3rd and the b7 take flats, everything else sharps.
    pub fn bass_prefers_flat(&self, bass: PitchClass) -> bool {
        if self.root_label.len() > 1 {
            self.spelled_flat()
        } else {
            matches!(interval_between(self.root, bass), 3 | 10)
        }
    }

    pub fn parse(text: &str) -> Result<Self, ChordError> {
        let text = text.trim();
        let (chord, bass) = match text.split_once('/') {
            Some((chord, bass)) => (chord, Some(bass)),
            None => (text, None),
        };

        let split = root_length(chord).ok_or_else(|| ChordError::InvalidSymbol(text.to_string()))?;
        let (root_text, suffix) = chord.split_at(split);
        let root = pc_from_label(root_text)?;
        let recipe = recipe_for_suffix(suffix)?;

        let mut symbol = Self {
            root,
            root_label: root_text.replace('♯', "#").replace('♭', "b"),
            recipe,
            bass: None,
            bass_label: None,
        };
        if let Some(bass) = bass {
            if root_length(bass) != Some(bass.len()) {
                return Err(ChordError::InvalidSymbol(text.to_string()));
            }
            symbol.bass = Some(pc_from_label(bass)?);
            symbol.bass_label = Some(bass.replace('♯', "#").replace('♭', "b"));
        }
        Ok(symbol)
    }

    /// Move root and bass by `semitones`, respelling both.
    pub fn transposed(&self, semitones: i32, prefer_flat: Option<bool>) -> Self {
        let root = normalize_pc(self.root as i32 + semitones);
        let moved = Self::new(root, self.recipe, prefer_flat);
        match self.bass {
            Some(bass) => moved.with_bass(normalize_pc(bass as i32 + semitones)),
            None => moved,
        }
    }

    pub fn is_slash(&self) -> bool {
        self.bass.is_some()
    }

    /// Every other spelling of this chord: enharmonic root crossed with the
    /// quality's alias suffixes. The canonical symbol itself is not included.
    pub fn aliases(&self) -> Vec<String> {
        let canonical = self.to_string();
        let bass = self
            .bass_label
            .as_ref()
            .map(|label| format!("/{}", label))
            .unwrap_or_default();
        let suffixes = std::iter::once(self.recipe.suffix).chain(self.recipe.aliases.iter().copied());
        let suffixes: Vec<&str> = suffixes.collect();

        let mut out = Vec::new();
        for root in enharmonic_labels(self.root, self.spelled_flat()) {
            for suffix in &suffixes {
                let alias = format!("{}{}{}", root, suffix, bass);
                if alias != canonical && !out.contains(&alias) {
                    out.push(alias);
                }
            }
        }
        out
    }

    /// Whether the root is spelled with a flat.
    pub fn spelled_flat(&self) -> bool {
        self.root_label.ends_with('b')
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root_label, self.recipe.suffix)?;
        if let Some(bass) = &self.bass_label {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

/// Byte length of the note name at the start of `text`, if it starts with one.
fn root_length(text: &str) -> Option<usize> {
    let mut chars = text.char_indices();
    let (_, letter) = chars.next()?;
    if !('A'..='G').contains(&letter) {
        return None;
    }
    match chars.next() {
        Some((idx, accidental)) if matches!(accidental, '#' | 'b' | '♯' | '♭') => Some(idx + accidental.len_utf8()),
        Some((idx, _)) => Some(idx),
        None => Some(text.len()),
    }
}
