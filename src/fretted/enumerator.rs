//! # Voicing Enumerator
//!
//! Brute-force search over the shape library: every candidate pattern for the
//! quality, at every position that puts its root on the requested pitch
//! class, checked for theory and playability. Rejections are the normal case
//! and are dropped silently; ordering is left to [`crate::dedup`].

use log::{debug, trace};

use crate::pitch::PitchClass;
use crate::recipe::ChordRecipe;
use crate::voicing::Voicing;

use super::check::{is_playable, is_theory_valid, Limits};
use super::shapes::candidate_shapes;
use super::tuning::GUITAR;

/// Every valid guitar voicing of `recipe` on `root`, in shape then position order.
pub fn enumerate_voicings(root: PitchClass, recipe: &ChordRecipe, limits: &Limits) -> Vec<Voicing> {
    let mut accepted = Vec::new();
    let mut tried = 0usize;

    for shape in candidate_shapes(recipe.id) {
        for position in shape.positions(root, &GUITAR, limits.max_fret) {
            tried += 1;
            let voicing = shape.instantiate(position);
            if !is_theory_valid(&voicing, &GUITAR, root, recipe) || !is_playable(&voicing, limits) {
                trace!("{} at {} rejected for {}", shape.name, position, recipe.id);
                continue;
            }
            accepted.push(voicing);
        }
    }

    debug!(
        "pc {} {}: {} of {} candidates accepted",
        root,
        recipe.id,
        accepted.len(),
        tried
    );
    accepted
}
