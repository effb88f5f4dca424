use chordgrip::{
    Guitar, HandModel, RatedSample, Rater, SearchOptions, Searcher, tunings,
};

const MAJOR: u16 = 0b000010010001;

#[test]
fn rated_search_results_train_a_consistent_rater() {
    let guitar = Guitar::new(&tunings::STANDARD6, 12, 44.45, 58.7375, 38.0, 620.0).unwrap();
    let searcher = Searcher::new(
        guitar,
        HandModel::with_defaults(),
        Rater::default(),
        SearchOptions::default(),
    );
    let mut results = searcher.generate(MAJOR, 0, 1).unwrap();
    assert!(results.len() >= 8, "need a spread of training rows");

    // Pretend the user's taste agrees exactly with the shipped weights: the
    // rating of each fingering is its heuristic score.
    for f in &mut results {
        f.set_rating(f.score());
    }
    let samples: Vec<RatedSample> = results
        .iter()
        .filter_map(RatedSample::from_fingering)
        .collect();
    assert_eq!(samples.len(), results.len());

    let (learned, residual) = Rater::fit(&samples, 1e-7).unwrap();
    assert!(residual < 1e-6, "linear ratings fit exactly: {residual}");

    // Re-scoring with the learned model reproduces the original scores.
    let mut rescored = results.clone();
    learned.rate_all(&mut rescored);
    for (old, new) in results.iter().zip(&rescored) {
        assert!((old.score() - new.score()).abs() < 1e-4);
    }
}

#[test]
fn unrated_fingerings_yield_no_samples() {
    let guitar = Guitar::new(&tunings::STANDARD6, 12, 44.45, 58.7375, 38.0, 620.0).unwrap();
    let searcher = Searcher::new(
        guitar,
        HandModel::with_defaults(),
        Rater::default(),
        SearchOptions::default(),
    );
    let results = searcher.generate(MAJOR, 0, 1).unwrap();
    assert!(results.iter().all(|f| f.rating().is_none()));
    assert!(results.iter().filter_map(RatedSample::from_fingering).next().is_none());
}
