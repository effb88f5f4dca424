//! core/fretboard.rs — guitar geometry and per-fret pitch layout.
//!
//! A `Guitar` is immutable after construction. It models every (string, fret)
//! cell as a point in the plane of the fretboard: x runs along the neck from
//! the bridge (x = scale length at the nut), y runs across the neck,
//! interpolating linearly between the string spacing at the nut and at the
//! bridge. All measurements are millimetres.

use thiserror::Error;

use crate::core::music::{note_not_in_chord, pitch_class_bit};
use crate::core::placement::FingerPlacement;

/// Finger marker for a muted string.
pub const MUTE_FINGER: i8 = -1;
/// Finger marker for a string nothing has been decided about yet.
pub const UNDEF_FINGER: i8 = -2;

/// One cell of the fretboard grid, with its Euclidean position and the pitch
/// it sounds. `finger` is a number 0..=3 once assigned, or one of the marker
/// values above.
#[derive(Clone, Copy, Debug)]
pub struct FretPosition {
    /// Linear index on the grid: `fret * num_strings + string`.
    pub id: usize,
    pub string: usize,
    pub fret: usize,
    pub x: f64,
    pub y: f64,
    pub pitch: i32,
    pub finger: i8,
}

impl FretPosition {
    /// Euclidean distance between two positions on the fretboard plane.
    #[inline]
    pub fn distance(a: &FretPosition, b: &FretPosition) -> f64 {
        ((a.x - b.x) * (a.x - b.x) + (a.y - b.y) * (a.y - b.y)).sqrt()
    }

    #[inline]
    pub fn is_muted(&self) -> bool {
        self.finger == MUTE_FINGER
    }

    /// Mute this string: the cell reverts to its open pitch and stops
    /// counting as fretted.
    pub fn mute(&mut self) {
        self.pitch -= self.fret as i32;
        self.fret = 0;
        self.finger = MUTE_FINGER;
    }
}

/// Distance along the neck between fret `m` and fret `n`, given the width
/// `a` of the first fret. The constants encode 12-TET fret spacing
/// (the 2^(1/12) geometric rule written as a fitted exponential).
pub fn distance_between_frets(a: f64, m: usize, n: usize) -> f64 {
    -18.876616839465076
        * a
        * ((-0.057762265046662105 * n as f64).exp() - (-0.057762265046662105 * m as f64).exp())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuitarError {
    #[error("tuning must name at least one string")]
    EmptyTuning,
    #[error("guitar needs at least one fret")]
    NoFrets,
    #[error("guitar dimensions must be positive")]
    NonPositiveDimension,
}

/// Immutable guitar model: tuning, fret count, and body geometry, with the
/// dense fretboard grid derived at construction.
#[derive(Clone, Debug)]
pub struct Guitar {
    tuning: Vec<i32>,
    num_frets: usize,
    nut_width: f64,
    bridge_width: f64,
    first_fret_width: f64,
    scale_len: f64,
    fretboard: Vec<FretPosition>,
}

impl Guitar {
    /// Build a guitar and its fretboard grid.
    ///
    /// `tuning` lists open-string pitches from low to high; `num_frets`
    /// counts fretted positions (the grid also includes fret 0, the open
    /// strings).
    pub fn new(
        tuning: &[i32],
        num_frets: usize,
        nut_width: f64,
        bridge_width: f64,
        first_fret_width: f64,
        scale_len: f64,
    ) -> Result<Self, GuitarError> {
        if tuning.is_empty() {
            return Err(GuitarError::EmptyTuning);
        }
        if num_frets == 0 {
            return Err(GuitarError::NoFrets);
        }
        if nut_width <= 0.0 || bridge_width <= 0.0 || first_fret_width <= 0.0 || scale_len <= 0.0 {
            return Err(GuitarError::NonPositiveDimension);
        }

        let num_strings = tuning.len();
        let nut_offset = (bridge_width - nut_width) / 2.0;
        let nut_str_width = nut_width / num_strings as f64;
        let brg_str_width = bridge_width / num_strings as f64;

        let mut fretboard = Vec::with_capacity((num_frets + 1) * num_strings);
        for id in 0..(num_frets + 1) * num_strings {
            let string = id % num_strings;
            let fret = id / num_strings;
            let x = scale_len - distance_between_frets(first_fret_width, 0, fret);
            // String offset at the nut, tapered linearly toward the bridge.
            let y = ((nut_offset + string as f64 * nut_str_width)
                - string as f64 * brg_str_width)
                / scale_len
                * x
                + string as f64 * brg_str_width;
            fretboard.push(FretPosition {
                id,
                string,
                fret,
                x,
                y,
                pitch: tuning[string] + fret as i32,
                finger: UNDEF_FINGER,
            });
        }

        Ok(Self {
            tuning: tuning.to_vec(),
            num_frets,
            nut_width,
            bridge_width,
            first_fret_width,
            scale_len,
            fretboard,
        })
    }

    #[inline]
    pub fn num_strings(&self) -> usize {
        self.tuning.len()
    }

    #[inline]
    pub fn num_frets(&self) -> usize {
        self.num_frets
    }

    #[inline]
    pub fn tuning(&self) -> &[i32] {
        &self.tuning
    }

    /// The grid cell at (string, fret). Fret 0 is the open string.
    #[inline]
    pub fn position(&self, string: usize, fret: usize) -> &FretPosition {
        &self.fretboard[fret * self.num_strings() + string]
    }

    /// Pitch-class mask of the open strings that sound at or above
    /// `tonic_pitch`, restricted to `chord` (strings outside the chord are
    /// assumed muted).
    pub fn open_string_mask(&self, chord: u16, tonic_pitch: i32) -> u16 {
        let mut notes = 0u16;
        for open in &self.fretboard[..self.num_strings()] {
            if open.pitch >= tonic_pitch {
                notes |= pitch_class_bit(open.pitch);
            }
        }
        notes & chord
    }

    /// Enumerate every placement that sounds a note of `chord`.
    ///
    /// Scans the grid from the highest cell downward so that barre groups
    /// accumulate: consecutive chord tones on the same fret (fret > 0, barre
    /// enabled) fold into one barring placement carrying the union of their
    /// pitch classes. Whenever a group extends, the position is emitted twice
    /// — once as the barre, once as a plain single-note placement — so the
    /// search can choose either. The result ascends by grid id, with the
    /// barre variant first where both exist.
    pub fn find_positions(&self, chord: u16, barre_enabled: bool) -> Vec<FingerPlacement> {
        let mut out = Vec::new();
        let mut cur_notes = 0u16;
        let mut cur_fret = usize::MAX;
        for pos in self.fretboard.iter().rev() {
            if note_not_in_chord(pos.pitch, chord) {
                continue;
            }
            let is_barre = if cur_fret != pos.fret || cur_fret == 0 || !barre_enabled {
                // This note cannot extend a barre group.
                cur_fret = pos.fret;
                cur_notes = pitch_class_bit(pos.pitch);
                false
            } else {
                cur_notes |= pitch_class_bit(pos.pitch);
                true
            };
            if is_barre {
                out.push(FingerPlacement {
                    pos: *pos,
                    notes: pitch_class_bit(pos.pitch),
                    is_barre: false,
                });
            }
            out.push(FingerPlacement {
                pos: *pos,
                notes: cur_notes,
                is_barre,
            });
        }
        out.reverse();
        out
    }
}
