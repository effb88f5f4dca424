use chordgrip::{Guitar, HandModel, Rater, SearchOptions, Searcher, tunings};

const MAJOR: u16 = 0b000010010001;
const MINOR: u16 = 0b000010001001;

fn standard_searcher() -> Searcher {
    let guitar = Guitar::new(&tunings::STANDARD6, 12, 44.45, 58.7375, 38.0, 620.0).unwrap();
    Searcher::new(
        guitar,
        HandModel::with_defaults(),
        Rater::default(),
        SearchOptions::default(),
    )
}

#[test]
fn e_major_open_shape_is_found() {
    let searcher = standard_searcher();
    let results = searcher.generate(MAJOR, 4, 1).unwrap();
    assert!(!results.is_empty());

    let shape = results
        .iter()
        .find(|f| {
            let frets: Vec<usize> = f.strings().iter().map(|p| p.fret).collect();
            frets == [0, 2, 2, 1, 0, 0]
        })
        .expect("open E major shape 0-2-2-1-0-0");
    assert!(shape.strings().iter().all(|p| !p.is_muted()));
    assert_eq!(shape.num_mutes(), 0);
    assert_eq!(shape.selected().len(), 3);
    assert_eq!(shape.chord(), chordgrip::chord_to_key(MAJOR, 4));
}

#[test]
fn a_minor_open_shape_mutes_only_the_low_e() {
    let searcher = standard_searcher();
    let results = searcher.generate(MINOR, 9, 1).unwrap();

    let shape = results
        .iter()
        .find(|f| {
            let frets: Vec<usize> = f.strings().iter().map(|p| p.fret).collect();
            f.strings()[0].is_muted() && frets[1..] == [0, 2, 2, 1, 0]
        })
        .expect("open A minor shape x-0-2-2-1-0");
    // The low E sits below the tonic so it is muted, but a mute under the
    // lowest sounding string costs nothing.
    assert_eq!(shape.num_mutes(), 0);
    assert_eq!(
        shape
            .strings()
            .iter()
            .filter(|p| p.is_muted())
            .count(),
        1
    );
}
