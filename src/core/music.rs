//! core/music.rs — pitch classes, chord masks, and the generic chord catalog.
//!
//! Pitches are MIDI-style semitone indices (E2 on a standard-tuned guitar is
//! 40). A chord is a 12-bit set over pitch classes: bit 0 = C, bit 1 = C#/Db,
//! up to bit 11 = B. Generic chords are stored rooted at C and shifted to a
//! key by cyclic rotation.

/// Semitones per octave (equal temperament).
pub const SEMITONES: u8 = 12;

/// Mask covering the 12 valid pitch-class bits of a chord.
pub const CHORD_BITS: u16 = 0xFFF;

/// Pitch class of a semitone pitch (0..12).
#[inline]
pub fn pitch_class(pitch: i32) -> u8 {
    pitch.rem_euclid(SEMITONES as i32) as u8
}

/// Single-bit chord mask for the pitch class of `pitch`.
#[inline]
pub fn pitch_class_bit(pitch: i32) -> u16 {
    1 << pitch_class(pitch)
}

/// True if the pitch class of `pitch` is absent from `chord`.
#[inline]
pub fn note_not_in_chord(pitch: i32, chord: u16) -> bool {
    pitch_class_bit(pitch) & chord == 0
}

/// Shift a generic (C-rooted) chord mask to a key by 12-bit rotation.
///
/// `key` is a pitch class; rotating by 0 is the identity and rotations
/// compose additively mod 12.
#[inline]
pub fn chord_to_key(chord: u16, key: u8) -> u16 {
    ((chord << key) & CHORD_BITS) | (chord >> (SEMITONES - key))
}

/// Generic chord catalog: interval masks rooted at C, paired with their
/// display names. Kept verbatim from the interval tables this engine was
/// tuned against, duplicates included (Minor 6th + 5th and Minor 13th share
/// a mask; two "Major 9th" variants differ in root structure) — lookups are
/// by index, never by mask.
pub const GENERIC_CHORDS: [(&str, u16); 39] = [
    ("-", 0b000000000000),
    ("6th", 0b001010010001),
    ("6th (no 5th)", 0b001000000101),
    ("6/9", 0b001000010101),
    ("Aug", 0b000100010001),
    ("Dim", 0b000001001001),
    ("Dim 7", 0b001000001001),
    ("Dim 7 + b5", 0b001001001001),
    ("Maj", 0b000010010001),
    ("Maj 3rd", 0b000000010001),
    ("Maj 7", 0b100000010001),
    ("Maj 7 + 5th", 0b100010010001),
    ("Maj 9th", 0b100000010101),
    ("Maj 9 + 5th", 0b100010010101),
    ("Maj Add 9", 0b000010010101),
    ("Maj Dom 7th", 0b010000010001),
    ("Maj Dom 7th + 5th", 0b010010010001),
    ("Maj 7b5", 0b010001010001),
    ("Maj 7/5", 0b010100010001),
    ("Maj 9th", 0b010000010101),
    ("Maj 7b9", 0b010000010011),
    ("Maj 7/9", 0b010000011001),
    ("Maj 13th", 0b011000010001),
    ("Min", 0b000010001001),
    ("Min 6th", 0b000100001001),
    ("Min 6th + 5th", 0b000110001001),
    ("Min 9th", 0b000010001101),
    ("Min 11th", 0b000010101001),
    ("Min 13th", 0b000110001001),
    ("Min 13th + 9th", 0b000110001101),
    ("Min 7th", 0b010000001001),
    ("Min 7th + 5th", 0b010010001001),
    ("Min 7b5", 0b010001001001),
    ("Min 7/5", 0b010100001001),
    ("Min 9", 0b010000001101),
    ("Min 7b9", 0b010000001011),
    ("5th", 0b000010000001),
    ("Sus", 0b000010100001),
    ("Sus2", 0b000010000101),
];

/// Built-in tunings as open-string pitches, low to high.
pub mod tunings {
    pub const STANDARD6: [i32; 6] = [40, 45, 50, 55, 59, 64];
    pub const DROP_D: [i32; 6] = [38, 45, 50, 55, 59, 64];
    pub const BARITONE: [i32; 6] = [35, 40, 45, 50, 54, 59];
    pub const STANDARD7: [i32; 7] = [35, 40, 45, 50, 55, 59, 64];
    pub const STANDARD8: [i32; 8] = [28, 35, 40, 45, 50, 55, 59, 64];
}

const PITCH_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const PITCH_NAMES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Format a pitch as scientific notation, e.g. `40` → `"E2"`.
/// Octaves follow the MIDI convention: pitch 0 is C-1.
pub fn note_name(pitch: i32, sharps: bool) -> String {
    let names = if sharps {
        &PITCH_NAMES_SHARP
    } else {
        &PITCH_NAMES_FLAT
    };
    let octave = pitch.div_euclid(SEMITONES as i32) - 1;
    format!("{}{}", names[pitch_class(pitch) as usize], octave)
}

/// Parse scientific notation back into a pitch, accepting both sharp and
/// flat spellings. Returns `None` on anything malformed.
pub fn parse_note(s: &str) -> Option<i32> {
    let (name_len, pc) = match s.as_bytes().get(1).copied() {
        Some(b'#') | Some(b'b') => (2, pitch_class_of_name(&s[..2])?),
        _ => (1, pitch_class_of_name(s.get(..1)?)?),
    };
    let octave: i32 = s.get(name_len..)?.parse().ok()?;
    Some((octave + 1) * SEMITONES as i32 + pc as i32)
}

fn pitch_class_of_name(name: &str) -> Option<u8> {
    let find = |table: &[&str; 12]| {
        table
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
            .map(|i| i as u8)
    };
    find(&PITCH_NAMES_SHARP).or_else(|| find(&PITCH_NAMES_FLAT))
}
