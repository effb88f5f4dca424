use chordgrip::{Guitar, HandModel, Rater, SearchOptions, Searcher, sort_by_score, tunings};

const MAJOR: u16 = 0b000010010001;

#[test]
fn category_scores_stay_in_unit_range_and_combine_linearly() {
    let guitar = Guitar::new(&tunings::STANDARD6, 12, 44.45, 58.7375, 38.0, 620.0).unwrap();
    let rater = Rater::default();
    let searcher = Searcher::new(
        guitar,
        HandModel::with_defaults(),
        rater.clone(),
        SearchOptions::default(),
    );
    let results = searcher.generate(MAJOR, 4, 2).unwrap();
    assert!(!results.is_empty());

    let weight_sum: f64 = rater.coefficients.iter().sum();
    for f in &results {
        for (i, s) in f.category_scores().iter().enumerate() {
            assert!(
                (0.0..=1.0).contains(s),
                "category {i} out of range: {s} ({f:?})"
            );
        }
        let recomputed = rater.score(f.category_scores());
        assert!((recomputed - f.score()).abs() < 1e-12);
        assert!(f.score() >= 0.0);
        assert!(f.score() <= weight_sum + 1e-12, "score {} above {weight_sum}", f.score());
    }
}

#[test]
fn sorting_is_descending_by_score() {
    let guitar = Guitar::new(&tunings::STANDARD6, 12, 44.45, 58.7375, 38.0, 620.0).unwrap();
    let searcher = Searcher::new(
        guitar,
        HandModel::with_defaults(),
        Rater::default(),
        SearchOptions::default(),
    );
    let mut results = searcher.generate(MAJOR, 4, 2).unwrap();
    sort_by_score(&mut results);
    for w in results.windows(2) {
        assert!(w[0].score() >= w[1].score());
    }
}
