//! # chordgrip
//!
//! Enumerates playable guitar chord fingerings on a physical-model fretboard,
//! prunes them against an anatomical hand model, and scores each candidate
//! with a weighted heuristic whose weights can be learned from user ratings.
//!
//! ## Example
//! ```rust
//! use chordgrip::{Guitar, HandModel, Rater, SearchOptions, Searcher, tunings};
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let guitar = Guitar::new(&tunings::STANDARD6, 12, 44.45, 58.7375, 38.0, 620.0)?;
//!     let searcher = Searcher::new(
//!         guitar,
//!         HandModel::with_defaults(),
//!         Rater::default(),
//!         SearchOptions::default(),
//!     );
//!
//!     // E major: the generic major mask shifted to key 4.
//!     let major = 0b000010010001;
//!     let mut results = searcher.generate(major, 4, 4)?;
//!     chordgrip::sort_by_score(&mut results);
//!     for fingering in results.iter().take(3) {
//!         println!("{:.3}: {} mutes", fingering.score(), fingering.num_mutes());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;

pub use crate::config::EngineConfig;
pub use crate::core::fingering::{Fingering, NUM_SCORES};
pub use crate::core::fretboard::{FretPosition, Guitar, GuitarError};
pub use crate::core::hand::{HandModel, HandModelError};
pub use crate::core::music::{GENERIC_CHORDS, chord_to_key, tunings};
pub use crate::core::rater::{RatedSample, Rater};
pub use crate::core::ridge::TrainError;
pub use crate::core::searcher::{SearchError, SearchOptions, Searcher, sort_by_score};
