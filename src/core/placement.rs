//! core/placement.rs — finger placements and reachability filters.
//!
//! A placement is a fretboard cell a finger could press, plus the pitch-class
//! set it would sound (more than one class for a barre). The filters here cut
//! a placement list down around an anchor: the `t1` predicate is the single
//! pairwise admissibility rule every combination in the search must satisfy.

use crate::core::fretboard::FretPosition;
use crate::core::music::pitch_class;

/// A candidate press of one finger: the cell under the fingertip, the
/// pitch-class mask it sounds, and whether the finger lies flat as a barre.
#[derive(Clone, Copy, Debug)]
pub struct FingerPlacement {
    pub pos: FretPosition,
    pub notes: u16,
    pub is_barre: bool,
}

/// Pairwise admissibility of `cur` given the already-selected `anchor`:
/// distinct strings, barre placements only where the budget allows and where
/// the barre is not cut off by the anchor, the anchor's own barre not
/// covering `cur`, and the two cells within stretching reach.
pub fn t1(cur: &FingerPlacement, anchor: &FingerPlacement, max_dist: f64, can_barre: bool) -> bool {
    anchor.pos.string != cur.pos.string
        && (!cur.is_barre
            || (can_barre
                && cur.pos.fret != anchor.pos.fret
                && (cur.pos.string > anchor.pos.string || cur.pos.fret < anchor.pos.fret)))
        && (!anchor.is_barre || anchor.pos.fret < cur.pos.fret || anchor.pos.string > cur.pos.string)
        && FretPosition::distance(&cur.pos, &anchor.pos) <= max_dist
}

/// Keep the placements after `anchor_index` that satisfy `t1` against it.
/// Only later indices are scanned, so unordered combinations are never
/// produced twice.
pub fn filter1(
    list: &[FingerPlacement],
    anchor_index: usize,
    max_dist: f64,
    can_barre: bool,
) -> Vec<FingerPlacement> {
    let anchor = &list[anchor_index];
    list[anchor_index + 1..]
        .iter()
        .filter(|cur| t1(cur, anchor, max_dist, can_barre))
        .copied()
        .collect()
}

/// Placements usable alongside an open-string tonic: at or above the tonic
/// pitch, off the tonic string, and (for barres) not covering it.
pub fn tonic_filter_open(
    list: &[FingerPlacement],
    tonic: &FingerPlacement,
) -> Vec<FingerPlacement> {
    list.iter()
        .filter(|cur| {
            cur.pos.pitch >= tonic.pos.pitch
                && cur.pos.string != tonic.pos.string
                && (!cur.is_barre
                    || cur.pos.string > tonic.pos.string
                    || cur.pos.fret < tonic.pos.fret)
        })
        .copied()
        .collect()
}

/// Placements usable alongside a fretted tonic: at or above the tonic pitch
/// and pairwise admissible against it (with the barre budget still open).
pub fn tonic_filter_fretted(
    list: &[FingerPlacement],
    tonic: &FingerPlacement,
    max_dist: f64,
) -> Vec<FingerPlacement> {
    list.iter()
        .filter(|cur| cur.pos.pitch >= tonic.pos.pitch && t1(cur, tonic, max_dist, true))
        .copied()
        .collect()
}

/// The placements in `list` whose cell sounds the given pitch class.
pub fn with_pitch_class(list: &[FingerPlacement], pc: u8) -> Vec<FingerPlacement> {
    list.iter()
        .filter(|p| pitch_class(p.pos.pitch) == pc)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::music::pitch_class_bit;

    fn placement(string: usize, fret: usize, pitch: i32, is_barre: bool) -> FingerPlacement {
        FingerPlacement {
            pos: FretPosition {
                id: fret * 6 + string,
                string,
                fret,
                // A crude but monotone layout is enough for filter tests.
                x: 600.0 - 30.0 * fret as f64,
                y: 9.0 * string as f64,
                pitch,
                finger: crate::core::fretboard::UNDEF_FINGER,
            },
            notes: pitch_class_bit(pitch),
            is_barre,
        }
    }

    #[test]
    fn t1_rejects_same_string() {
        let a = placement(2, 3, 53, false);
        let b = placement(2, 5, 55, false);
        assert!(!t1(&b, &a, 1000.0, true));
    }

    #[test]
    fn t1_rejects_out_of_reach() {
        let a = placement(0, 1, 41, false);
        let b = placement(5, 12, 76, false);
        assert!(t1(&b, &a, 1000.0, true));
        assert!(!t1(&b, &a, 10.0, true));
    }

    #[test]
    fn t1_barre_needs_budget_and_clearance() {
        let anchor = placement(3, 3, 58, false);
        // A barre behind the anchor (lower fret) is fine while budget lasts.
        let behind = placement(0, 1, 41, true);
        assert!(t1(&behind, &anchor, 1000.0, true));
        assert!(!t1(&behind, &anchor, 1000.0, false));
        // A barre on the same fret as the anchor can never be formed.
        let same_fret = placement(0, 3, 43, true);
        assert!(!t1(&same_fret, &anchor, 1000.0, true));
        // A barre above the anchor on a lower string would cover it.
        let covering = placement(0, 5, 45, true);
        assert!(!t1(&covering, &anchor, 1000.0, true));
    }

    #[test]
    fn t1_rejects_cells_covered_by_anchor_barre() {
        // The barre presses its own string and every higher one at its fret.
        let barre = placement(1, 3, 48, true);
        let under = placement(2, 2, 52, false);
        assert!(!t1(&under, &barre, 1000.0, true));
        // A higher fret clears the barre.
        let above = placement(2, 5, 55, false);
        assert!(t1(&above, &barre, 1000.0, true));
        // Strings below the barring finger are clear as well.
        let below = placement(0, 2, 42, false);
        assert!(t1(&below, &barre, 1000.0, true));
    }

    #[test]
    fn filter1_scans_later_indices_only() {
        let list = vec![
            placement(0, 2, 42, false),
            placement(1, 2, 47, false),
            placement(2, 3, 53, false),
            placement(3, 3, 58, false),
        ];
        let kept = filter1(&list, 1, 1000.0, true);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|p| p.pos.id > list[1].pos.id));
    }

    #[test]
    fn tonic_filter_open_drops_below_tonic_and_same_string() {
        let tonic = placement(1, 0, 45, false);
        let list = vec![
            placement(0, 2, 42, false), // below tonic pitch
            placement(1, 3, 48, false), // tonic string
            placement(2, 2, 52, false),
            placement(0, 1, 46, true), // barre that would cover the tonic string
        ];
        let kept = tonic_filter_open(&list, &tonic);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].pos.string, 2);
    }

    #[test]
    fn tonic_filter_fretted_applies_t1() {
        let tonic = placement(1, 3, 48, false);
        let list = vec![
            placement(2, 3, 53, false),
            placement(2, 12, 62, false), // within pitch range but out of reach
            placement(0, 1, 41, false),  // below tonic pitch
        ];
        let kept = tonic_filter_fretted(&list, &tonic, 60.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].pos.fret, 3);
    }

    #[test]
    fn with_pitch_class_matches_octaves() {
        let list = vec![
            placement(0, 0, 40, false),
            placement(2, 2, 52, false),
            placement(1, 0, 45, false),
        ];
        let tonics = with_pitch_class(&list, 4);
        assert_eq!(tonics.len(), 2);
        assert!(tonics.iter().all(|p| p.pos.pitch % 12 == 4));
    }
}
