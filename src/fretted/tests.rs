use super::*;
use crate::recipe::{recipe, RECIPES};
use crate::voicing::{FretState, Voicing};

fn raw(voicing: &Voicing) -> Vec<i8> {
    voicing.frets.iter().map(|f| i8::from(*f)).collect()
}

/// Every enumerated voicing for every root and quality.
fn all_voicings(limits: &Limits) -> Vec<(u8, &'static crate::recipe::ChordRecipe, Voicing)> {
    let mut out = Vec::new();
    for r in RECIPES {
        for root in 0..12u8 {
            for v in enumerate_voicings(root, r, limits) {
                out.push((root, r, v));
            }
        }
    }
    out
}

#[test]
fn test_open_c_shape_passes_theory() {
    // x32010: C E G C E
    let voicing = Voicing::from_raw(&[-1, 3, 2, 0, 1, 0]);
    let pcs: std::collections::BTreeSet<u8> = GUITAR.sounding_pcs(&voicing).into_iter().collect();
    assert_eq!(pcs.into_iter().collect::<Vec<_>>(), vec![0, 4, 7]);
    assert!(is_theory_valid(&voicing, &GUITAR, 0, recipe("maj").unwrap()));

    let enumerated = enumerate_voicings(0, recipe("maj").unwrap(), &Limits::default());
    assert!(enumerated.iter().any(|v| raw(v) == vec![-1, 3, 2, 0, 1, 0]));
}

#[test]
fn test_c_half_diminished_uses_compact_grip() {
    let m7b5 = recipe("m7b5").unwrap();
    let voicings = enumerate_voicings(0, m7b5, &Limits::default());
    let compact = voicings
        .iter()
        .find(|v| raw(v) == vec![-1, 3, 4, 3, 4, -1])
        .expect("m7b5_A grip at the 3rd fret");
    let pcs = GUITAR.sounding_pcs(compact);
    for pc in [0, 3, 6, 10] {
        assert!(pcs.contains(&pc), "missing pc {}", pc);
    }
}

#[test]
fn test_cmaj7_over_e() {
    let maj7 = recipe("maj7").unwrap();
    let bass: BassInterval = "3".parse().unwrap();
    assert_eq!(bass.bass_pc(0), 4);

    let slashes: Vec<Voicing> = enumerate_voicings(0, maj7, &Limits::default())
        .iter()
        .filter_map(|v| slash_variant(v, 0, maj7, bass, &Limits::default(), false))
        .collect();
    assert!(!slashes.is_empty());
    for slash in &slashes {
        let (_, lowest) = GUITAR.bass(slash).unwrap();
        assert_eq!(lowest, 4);
        assert!(is_theory_valid(slash, &GUITAR, 0, maj7));
    }
    // G shape at the 5th fret with the low E string dropped
    assert_eq!(raw(&slashes[0]), vec![-1, 7, 5, 5, 5, 7]);
    assert_eq!(slashes[0].barres.len(), 1);
}

#[test]
fn test_every_voicing_is_theory_sound() {
    for (root, r, v) in all_voicings(&Limits::default()) {
        let pcs = GUITAR.sounding_pcs(&v);
        for iv in r.intervals {
            let needed = (root + iv) % 12;
            assert!(pcs.contains(&needed), "{} on pc {} misses {}: {:?}", r.id, root, needed, raw(&v));
        }
    }
}

#[test]
fn test_every_voicing_is_playable() {
    for (_, r, v) in all_voicings(&Limits::default()) {
        let low = v.lowest_fretted().unwrap();
        let high = v.highest_fretted().unwrap();
        assert!(high - low <= 5, "{} span too wide: {:?}", r.id, raw(&v));
        assert!(high <= 15, "{} too high: {:?}", r.id, raw(&v));
        assert!(v.fretted_count() >= 3, "{} too few stopped notes: {:?}", r.id, raw(&v));
        assert_eq!(v.string_count(), 6);
        for barre in &v.barres {
            assert!(check::barre_is_valid(&v.frets, barre, 3));
        }
    }
}

#[test]
fn test_root_marker_points_at_root() {
    for (root, r, v) in all_voicings(&Limits::default()) {
        if !r.contains(0) {
            continue;
        }
        let string = v.root_string.unwrap();
        assert_eq!(GUITAR.pitch_class(string, v.frets[string]), Some(root), "{}", r.id);
        assert_eq!(v.root_fret, v.frets[string].sounding_fret());
    }
}

#[test]
fn test_slash_variants_put_the_tone_in_the_bass() {
    let limits = Limits::default();
    for (root, r, v) in all_voicings(&limits) {
        for bass in bass_options(r.id) {
            let Some(slash) = slash_variant(&v, root, r, *bass, &limits, false) else {
                continue;
            };
            let bass_string = slash.bass_string.unwrap();
            assert!(slash.frets[..bass_string].iter().all(|f| *f == FretState::Muted));
            assert_eq!(GUITAR.bass(&slash).map(|(_, pc)| pc), slash.bass_pc);
            assert_eq!(slash.bass_pc, Some(bass.bass_pc(root)));
            assert!(is_theory_valid(&slash, &GUITAR, root, r));
            assert!(is_playable(&slash, &limits));
        }
    }
}

#[test]
fn test_transposition_round_trip() {
    use crate::symbol::ChordSymbol;
    use crate::voicing::Instrument;

    let limits = Limits::default();
    let mut round_trips = 0;
    for id in ["maj", "m", "7", "maj7", "m7"] {
        let r = recipe(id).unwrap();
        for root in [0u8, 3, 5, 9] {
            let symbol = ChordSymbol::new(root, r, None).to_string();
            let sources = enumerate_voicings(root, r, &limits)
                .into_iter()
                .filter(|v| transpose::is_movable(v) && v.position() <= 11);
            for source in sources {
                for step in [2u8, 7] {
                    let target = (root + step) % 12;
                    let there = compute_transpositions(&source, &symbol, &[target], Instrument::Guitar, &limits).unwrap();
                    let Some((moved_symbol, moved)) = there.iter().next() else {
                        continue;
                    };
                    // the way back lands on the original position, which is in range
                    let back = compute_transpositions(&moved[0], moved_symbol, &[root], Instrument::Guitar, &limits).unwrap();
                    let returned = &back[&symbol][0];
                    assert_eq!(returned.frets, source.frets, "{} via {}", symbol, moved_symbol);
                    assert_eq!(returned.barres, source.barres);
                    assert_eq!(returned.root_fret, source.root_fret);
                    round_trips += 1;
                }
            }
        }
    }
    assert!(round_trips > 20, "only {} round trips ran", round_trips);
}

#[test]
fn test_ukulele_has_no_shape_library() {
    assert_eq!(UKULELE.string_count(), 4);
    assert!(validate_submission(&Voicing::from_raw(&[0, 0, 0, 3]), crate::voicing::Instrument::Ukulele).is_ok());
}
