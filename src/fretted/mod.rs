//! # Fretted Voicings
//!
//! Chord voicing generation for fretted instruments.
//!
//! ## Purpose
//! Given a chord quality and a root, find every grip that sounds the chord and
//! that a hand can actually play, then derive inversions from those grips.
//! A single hand-entered grip can also be slid to every other root.
//!
//! ## Sub-modules
//! - `tuning` - open-string pitches for guitar and ukulele
//! - `shapes` - the movable shape library and the quality → shapes table
//! - `check` - theory, playability and submission checks
//! - `enumerator` - shapes × positions search
//! - `slash` - inversions by muting the strings under a chord tone
//! - `transpose` - moving one submitted voicing to other roots
//!
//! ## Entry Points
//! - [`enumerate_voicings()`] - every valid guitar voicing for a root and recipe
//! - [`slash_variant()`] - one inversion of an accepted voicing
//! - [`compute_transpositions()`] - a submitted voicing on other roots
//!
//! ## Example
//! ```rust
//! use chordgen::fretted::{enumerate_voicings, Limits, GUITAR};
//! use chordgen::recipe::recipe;
//!
//! let m7b5 = recipe("m7b5")?;
//! let voicings = enumerate_voicings(0, m7b5, &Limits::default());
//!
//! // x3434x: C Gb Bb Eb
//! let first: Vec<i8> = voicings[0].frets.iter().map(|f| i8::from(*f)).collect();
//! assert_eq!(first, vec![-1, 3, 4, 3, 4, -1]);
//! assert_eq!(GUITAR.sounding_pcs(&voicings[0]), vec![0, 6, 10, 3]);
//! # Ok::<(), chordgen::ChordError>(())
//! ```
//!
//! ## Strings
//! Strings are numbered from the lowest-pitched string of the standard
//! layout: guitar string 0 is low E, string 5 high E. Only the guitar has a
//! shape library; the ukulele supports submission checks and transposition.

pub mod check;
pub mod enumerator;
pub mod shapes;
pub mod slash;
pub mod transpose;
pub mod tuning;

#[cfg(test)]
mod tests;

pub use check::{is_playable, is_theory_valid, validate_submission, Limits};
pub use enumerator::enumerate_voicings;
pub use shapes::{candidate_shapes, ShapePattern};
pub use slash::{bass_options, slash_variant, BassInterval};
pub use transpose::compute_transpositions;
pub use tuning::{Tuning, GUITAR, UKULELE};
