//! core/searcher.rs — combinatorial enumeration of playable fingerings.
//!
//! The search picks the tonic first, then adds up to three more placements
//! through progressively filtered lists: each level keeps only positions that
//! are pairwise admissible (`t1`) against the last selection, and only at
//! later list indices, so no unordered combination is visited twice. Every
//! level whose accumulated pitch classes complete the chord submits a
//! candidate. One task per tonic runs on a bounded worker pool.

use crossbeam_channel::unbounded;
use thiserror::Error;
use tracing::debug;

use crate::core::fingering::Fingering;
use crate::core::fretboard::Guitar;
use crate::core::hand::HandModel;
use crate::core::music::{CHORD_BITS, chord_to_key};
use crate::core::placement::{self, FingerPlacement};
use crate::core::rater::Rater;
use crate::core::search_worker;

/// Acceptance thresholds and barre policy for a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOptions {
    /// Most muted strings (above the lowest sounding one) a result may have.
    pub max_mutes: usize,
    /// Minimum heuristic score a result must reach.
    pub min_score: f64,
    pub barre_enabled: bool,
    pub max_barre: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_mutes: 2,
            min_score: 0.5,
            barre_enabled: true,
            max_barre: 1,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("chord mask {0:#x} has bits outside the 12 pitch classes")]
    InvalidChordMask(u16),
    #[error("key {0} is not a pitch class (0..=11)")]
    InvalidKey(u8),
}

/// Fingering search over one guitar, hand, and rating model. All inputs are
/// immutable for the lifetime of the searcher and shared read-only by the
/// worker threads.
pub struct Searcher {
    guitar: Guitar,
    hand: HandModel,
    rater: Rater,
    options: SearchOptions,
}

impl Searcher {
    pub fn new(guitar: Guitar, hand: HandModel, rater: Rater, options: SearchOptions) -> Self {
        Self {
            guitar,
            hand,
            rater,
            options,
        }
    }

    pub fn guitar(&self) -> &Guitar {
        &self.guitar
    }

    pub fn hand(&self) -> &HandModel {
        &self.hand
    }

    pub fn rater(&self) -> &Rater {
        &self.rater
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Find every acceptable fingering of the generic `chord` shifted to
    /// `key`, using up to `num_threads` worker threads (one task per tonic
    /// position). Results arrive in task-completion order; an empty chord or
    /// an unreachable one yields an empty list.
    pub fn generate(
        &self,
        chord: u16,
        key: u8,
        num_threads: usize,
    ) -> Result<Vec<Fingering>, SearchError> {
        if chord & !CHORD_BITS != 0 {
            return Err(SearchError::InvalidChordMask(chord));
        }
        if key >= 12 {
            return Err(SearchError::InvalidKey(key));
        }
        if chord == 0 {
            return Ok(Vec::new());
        }

        let chord = chord_to_key(chord, key);
        let fps = self
            .guitar
            .find_positions(chord, self.options.barre_enabled);
        // Tonic candidates keep their open and barre variants; fingers can
        // only be placed behind a fret, so the free-placement list cannot.
        let tonics = placement::with_pitch_class(&fps, key);
        let fretted: Vec<FingerPlacement> =
            fps.iter().filter(|p| p.pos.fret > 0).copied().collect();
        debug!(
            tonics = tonics.len(),
            placements = fretted.len(),
            "dispatching tonic search tasks"
        );
        if tonics.is_empty() {
            return Ok(Vec::new());
        }

        let num_workers = num_threads.max(1).min(tonics.len());
        let (task_tx, task_rx) = unbounded();
        let (result_tx, result_rx) = unbounded();
        for tonic in tonics {
            let _ = task_tx.send(tonic);
        }
        drop(task_tx);

        let mut results = Vec::new();
        std::thread::scope(|scope| {
            for _ in 0..num_workers {
                let task_rx = task_rx.clone();
                let result_tx = result_tx.clone();
                let fretted = &fretted;
                scope.spawn(move || search_worker::run(self, chord, fretted, task_rx, result_tx));
            }
            drop(result_tx);
            for batch in result_rx.iter() {
                results.extend(batch);
            }
        });
        Ok(results)
    }

    /// Enumerate fingerings rooted at one tonic placement. `note_pos` is the
    /// shared fretted-placement list, ascending by fret id.
    pub(crate) fn search_tonic(
        &self,
        chord: u16,
        tonic: &FingerPlacement,
        note_pos: &[FingerPlacement],
    ) -> Vec<Fingering> {
        let mut found = Vec::new();
        let num_fingers = self.hand.num_fingers();
        let max_dist = self.hand.max_search_dist();
        let max_barre = self.options.max_barre;
        let tonic_pitch = tonic.pos.pitch;
        let open_notes = self.guitar.open_string_mask(chord, tonic_pitch);

        if tonic.pos.fret == 0 {
            // Open tonic: the tonic string rings for free and every finger is
            // available for other strings.
            let list = placement::tonic_filter_open(note_pos, tonic);
            for j in 0..list.len() {
                let cur_j = list[j];
                let notes_j = open_notes | cur_j.notes;
                let barres_j = usize::from(cur_j.is_barre);
                if notes_j == chord {
                    if let Some(f) = self.try_candidate(chord, tonic_pitch, &[cur_j], barres_j) {
                        found.push(f);
                    }
                }
                if num_fingers < 2 {
                    continue;
                }
                let list2 = placement::filter1(&list, j, max_dist, barres_j < max_barre);
                for k in 0..list2.len() {
                    let cur_k = list2[k];
                    let notes_k = notes_j | cur_k.notes;
                    let barres_k = barres_j + usize::from(cur_k.is_barre);
                    if notes_k == chord {
                        if let Some(f) =
                            self.try_candidate(chord, tonic_pitch, &[cur_j, cur_k], barres_k)
                        {
                            found.push(f);
                        }
                    }
                    if num_fingers < 3 {
                        continue;
                    }
                    let list3 = placement::filter1(&list2, k, max_dist, barres_k < max_barre);
                    for l in 0..list3.len() {
                        let cur_l = list3[l];
                        let notes_l = notes_k | cur_l.notes;
                        let barres_l = barres_k + usize::from(cur_l.is_barre);
                        if notes_l == chord {
                            if let Some(f) = self.try_candidate(
                                chord,
                                tonic_pitch,
                                &[cur_j, cur_k, cur_l],
                                barres_l,
                            ) {
                                found.push(f);
                            }
                        }
                        if num_fingers < 4 {
                            continue;
                        }
                        // The deepest level validates inline instead of
                        // building another filtered list.
                        for m in l + 1..list3.len() {
                            let cur_m = list3[m];
                            if !placement::t1(&cur_m, &cur_l, max_dist, barres_l < max_barre) {
                                continue;
                            }
                            let notes_m = notes_l | cur_m.notes;
                            let barres_m = barres_l + usize::from(cur_m.is_barre);
                            if notes_m == chord {
                                if let Some(f) = self.try_candidate(
                                    chord,
                                    tonic_pitch,
                                    &[cur_j, cur_k, cur_l, cur_m],
                                    barres_m,
                                ) {
                                    found.push(f);
                                }
                            }
                        }
                    }
                }
            }
        } else {
            // Fretted tonic: it occupies a finger from the start.
            let list = placement::tonic_filter_fretted(note_pos, tonic, max_dist);
            let notes_t = open_notes | tonic.notes;
            let barres_t = usize::from(tonic.is_barre);
            if notes_t == chord {
                if let Some(f) = self.try_candidate(chord, tonic_pitch, &[*tonic], barres_t) {
                    found.push(f);
                }
            }
            if num_fingers < 2 {
                return found;
            }
            for j in 0..list.len() {
                let cur_j = list[j];
                let notes_j = notes_t | cur_j.notes;
                let barres_j = barres_t + usize::from(cur_j.is_barre);
                if notes_j == chord {
                    if let Some(f) = self.try_candidate(
                        chord,
                        tonic_pitch,
                        &order_positions(tonic, &[cur_j]),
                        barres_j,
                    ) {
                        found.push(f);
                    }
                }
                if num_fingers < 3 {
                    continue;
                }
                let list2 = placement::filter1(&list, j, max_dist, barres_j < max_barre);
                for k in 0..list2.len() {
                    let cur_k = list2[k];
                    let notes_k = notes_j | cur_k.notes;
                    let barres_k = barres_j + usize::from(cur_k.is_barre);
                    if notes_k == chord {
                        if let Some(f) = self.try_candidate(
                            chord,
                            tonic_pitch,
                            &order_positions(tonic, &[cur_j, cur_k]),
                            barres_k,
                        ) {
                            found.push(f);
                        }
                    }
                    if num_fingers < 4 {
                        continue;
                    }
                    for l in k + 1..list2.len() {
                        let cur_l = list2[l];
                        if !placement::t1(&cur_l, &cur_k, max_dist, barres_k < max_barre) {
                            continue;
                        }
                        let notes_l = notes_k | cur_l.notes;
                        let barres_l = barres_k + usize::from(cur_l.is_barre);
                        if notes_l == chord {
                            if let Some(f) = self.try_candidate(
                                chord,
                                tonic_pitch,
                                &order_positions(tonic, &[cur_j, cur_k, cur_l]),
                                barres_l,
                            ) {
                                found.push(f);
                            }
                        }
                    }
                }
            }
        }
        found
    }

    /// Assign fingers, materialize, rate, and gate one candidate selection.
    fn try_candidate(
        &self,
        chord: u16,
        tonic_pitch: i32,
        placements: &[FingerPlacement],
        num_barres: usize,
    ) -> Option<Fingering> {
        // The filtered lists only cap barres picked after the first; the
        // tonic plus an early barre can still overshoot, so gate here.
        if num_barres > self.options.max_barre {
            return None;
        }
        let (comfort, assignment) = self.hand.find_best_assignment(placements)?;
        let mut fingering = Fingering::make(
            &self.guitar,
            placements,
            chord,
            tonic_pitch,
            assignment,
            comfort,
            self.hand.num_fingers(),
            num_barres,
        )?;
        self.rater.rate(&mut fingering);
        if fingering.num_mutes() > self.options.max_mutes
            || fingering.score() < self.options.min_score
        {
            return None;
        }
        Some(fingering)
    }
}

/// Splice the tonic into an already-ascending pick list so the whole
/// selection ascends by fret id.
fn order_positions(tonic: &FingerPlacement, picks: &[FingerPlacement]) -> Vec<FingerPlacement> {
    let insert_at = picks
        .iter()
        .position(|p| tonic.pos.id < p.pos.id)
        .unwrap_or(picks.len());
    let mut ordered = Vec::with_capacity(picks.len() + 1);
    ordered.extend_from_slice(&picks[..insert_at]);
    ordered.push(*tonic);
    ordered.extend_from_slice(&picks[insert_at..]);
    ordered
}

/// Sort fingerings best-first. Kept out of `generate` so callers can merge
/// result sets before ordering them.
pub fn sort_by_score(results: &mut [Fingering]) {
    results.sort_by(|a, b| b.score().total_cmp(&a.score()));
}
