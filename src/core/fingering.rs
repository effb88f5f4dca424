//! core/fingering.rs — materializing a placement set into a playable grip.
//!
//! `Fingering::make` turns selected placements into one fret assignment per
//! string: placed strings take their placement and finger number, strings
//! behind a barre take the barre fret and finger, everything else rings open.
//! Strings that would sound a wrong note (or dip below the tonic) are muted.
//! The builder also derives the eight category scores the rater combines.

use std::collections::HashSet;

use crate::core::fretboard::{FretPosition, Guitar, UNDEF_FINGER};
use crate::core::hand::FINGER_ASSIGNMENTS;
use crate::core::music::{note_not_in_chord, pitch_class_bit};
use crate::core::placement::FingerPlacement;

/// Number of category scores feeding the rater.
pub const NUM_SCORES: usize = 8;

/// A concrete chord grip: one fret position per string, the placements that
/// produce it, and its heuristic scores.
#[derive(Clone, Debug)]
pub struct Fingering {
    strings: Vec<FretPosition>,
    selected: Vec<FretPosition>,
    chord: u16,
    tonic: i32,
    scores: [f64; NUM_SCORES],
    score: f64,
    num_mutes: usize,
    min_fret: usize,
    max_fret: usize,
    rating: Option<f64>,
}

impl Fingering {
    /// Materialize `placements` (ascending by fret id) into a fingering that
    /// sounds exactly `chord`, or `None` when the sounding strings cannot
    /// produce it.
    ///
    /// `assignment` indexes [`FINGER_ASSIGNMENTS`]; `comfort` is the hand
    /// score for that assignment; `num_enabled` is the number of fingers the
    /// hand has available (not the number used); `num_barres` counts barre
    /// placements among the selection.
    #[allow(clippy::too_many_arguments)]
    pub fn make(
        guitar: &Guitar,
        placements: &[FingerPlacement],
        chord: u16,
        tonic_pitch: i32,
        assignment: usize,
        comfort: f64,
        num_enabled: usize,
        num_barres: usize,
    ) -> Option<Fingering> {
        let num_strings = guitar.num_strings();
        let fingers = FINGER_ASSIGNMENTS[assignment];

        let mut min_fret = usize::MAX;
        let mut max_fret = 0;
        for p in placements {
            min_fret = min_fret.min(p.pos.fret);
            max_fret = max_fret.max(p.pos.fret);
        }
        if placements.is_empty() {
            min_fret = 0;
        }

        // Fret and finger a barre leaves behind for the strings above it.
        let mut open_fret = 0usize;
        let mut barre_finger = UNDEF_FINGER;

        let mut strings = Vec::with_capacity(num_strings);
        let mut selected = vec![None; placements.len()];
        let mut produced = 0u16;
        let mut num_mutes = 0usize;
        let mut lowest_sounding = None;
        let mut sounded = HashSet::new();
        let mut num_unison = 0usize;

        for i in 0..num_strings {
            let slot = placements.iter().position(|p| p.pos.string == i);
            let mut fp = match slot {
                Some(slot) => {
                    let mut fp = placements[slot].pos;
                    fp.finger = fingers[slot] as i8;
                    if placements[slot].is_barre && fp.fret > open_fret {
                        open_fret = fp.fret;
                        barre_finger = fp.finger;
                    }
                    fp
                }
                None => {
                    let mut fp = *guitar.position(i, open_fret);
                    fp.finger = barre_finger;
                    fp
                }
            };
            if fp.pitch < tonic_pitch || note_not_in_chord(fp.pitch, chord) {
                fp.mute();
                num_mutes += 1;
            } else {
                produced |= pitch_class_bit(fp.pitch);
                if lowest_sounding.is_none() {
                    lowest_sounding = Some(i);
                }
                if !sounded.insert(fp.pitch) {
                    num_unison += 1;
                }
            }
            if let Some(slot) = slot {
                selected[slot] = Some(fp);
            }
            strings.push(fp);
        }

        if produced != chord {
            return None;
        }
        let lowest_sounding = lowest_sounding?;
        // Muted strings beneath the lowest sounding one are free: the player
        // simply does not strum them.
        num_mutes -= lowest_sounding;

        let selected: Vec<FretPosition> = selected.into_iter().flatten().collect();
        let scores = category_scores(
            num_unison,
            num_mutes,
            comfort,
            lowest_sounding,
            num_strings,
            selected.len(),
            num_enabled,
            min_fret,
            max_fret,
            sounded.len(),
            num_barres,
        );

        Some(Fingering {
            strings,
            selected,
            chord,
            tonic: tonic_pitch,
            scores,
            score: 0.0,
            num_mutes,
            min_fret,
            max_fret,
            rating: None,
        })
    }

    /// Per-string fret positions, low string first. Muted strings carry the
    /// mute finger marker.
    pub fn strings(&self) -> &[FretPosition] {
        &self.strings
    }

    /// The fingered positions, in placement order (ascending fret id).
    pub fn selected(&self) -> &[FretPosition] {
        &self.selected
    }

    /// Pitch-class mask this grip sounds (equal to the requested chord).
    pub fn chord(&self) -> u16 {
        self.chord
    }

    pub fn tonic(&self) -> i32 {
        self.tonic
    }

    pub fn category_scores(&self) -> &[f64; NUM_SCORES] {
        &self.scores
    }

    /// Muted strings above the lowest sounding string.
    pub fn num_mutes(&self) -> usize {
        self.num_mutes
    }

    pub fn min_fret(&self) -> usize {
        self.min_fret
    }

    pub fn max_fret(&self) -> usize {
        self.max_fret
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn set_rating(&mut self, rating: f64) {
        self.rating = Some(rating);
    }
}

/// Two grips are equal when they score the same and press the same strings
/// the same way; muted strings compare equal regardless of which fret the
/// mute landed on.
impl PartialEq for Fingering {
    fn eq(&self, other: &Self) -> bool {
        if self.score != other.score
            || self.chord != other.chord
            || self.tonic != other.tonic
            || self.scores != other.scores
        {
            return false;
        }
        self.strings.len() == other.strings.len()
            && self.strings.iter().zip(&other.strings).all(|(a, b)| {
                (a.is_muted() && b.is_muted())
                    || (a.fret == b.fret && a.string == b.string && a.finger == b.finger)
            })
    }
}

#[allow(clippy::too_many_arguments)]
fn category_scores(
    num_unison: usize,
    num_mutes: usize,
    comfort: f64,
    lowest_sounding: usize,
    num_strings: usize,
    num_placed: usize,
    num_enabled: usize,
    min_fret: usize,
    max_fret: usize,
    distinct_pitches: usize,
    num_barres: usize,
) -> [f64; NUM_SCORES] {
    [
        // Repeated pitches thin the voicing.
        1.0 / (1.0 + num_unison as f64),
        // Mutes inside the strummed range cost quadratically.
        1.0 / ((num_mutes as f64 + 1.0) * (num_mutes as f64 + 1.0)),
        // Anatomical comfort from the hand model.
        comfort,
        // Fraction of strings that ring.
        (num_strings - lowest_sounding) as f64 / num_strings as f64,
        // Fingers left free.
        (num_enabled - num_placed) as f64 / num_enabled as f64,
        // Fret span.
        1.0 / (max_fret - min_fret + 1) as f64,
        // Distinct pitches in the voicing.
        1.0 - 1.0 / distinct_pitches as f64,
        // Barres are harder than single presses.
        1.0 / (1.0 + num_barres as f64),
    ]
}
