//! Search worker: pulls tonic placements off the task channel, runs the
//! per-tonic enumeration against the shared read-only search context, and
//! publishes each batch of fingerings for the dispatcher to collect.

use crossbeam_channel::{Receiver, Sender};

use crate::core::fingering::Fingering;
use crate::core::placement::FingerPlacement;
use crate::core::searcher::Searcher;

pub(crate) fn run(
    searcher: &Searcher,
    chord: u16,
    placements: &[FingerPlacement],
    task_rx: Receiver<FingerPlacement>,
    result_tx: Sender<Vec<Fingering>>,
) {
    while let Ok(tonic) = task_rx.recv() {
        let found = searcher.search_tonic(chord, &tonic, placements);
        let _ = result_tx.send(found);
    }
}
