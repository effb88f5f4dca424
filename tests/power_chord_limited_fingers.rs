use chordgrip::core::hand::{DEFAULT_MAX_SPANS, DEFAULT_MIN_SPANS};
use chordgrip::{Guitar, HandModel, Rater, SearchOptions, Searcher, tunings};

const POWER: u16 = 0b000010000001;

#[test]
fn two_finger_hand_uses_only_those_fingers() {
    let guitar = Guitar::new(&tunings::STANDARD6, 12, 44.45, 58.7375, 38.0, 620.0).unwrap();
    // Index and middle finger only.
    let hand = HandModel::new(0b0011, &DEFAULT_MIN_SPANS, &DEFAULT_MAX_SPANS).unwrap();
    let searcher = Searcher::new(
        guitar,
        hand,
        Rater::default(),
        SearchOptions::default(),
    );

    let results = searcher.generate(POWER, 0, 1).unwrap();
    assert!(!results.is_empty(), "C power chords exist for two fingers");
    for f in &results {
        assert!(f.selected().len() <= 2, "never more placements than fingers");
        for p in f.selected() {
            assert!(
                p.finger == 0 || p.finger == 1,
                "disabled finger {} pressed",
                p.finger
            );
        }
    }
}
