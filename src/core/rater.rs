//! core/rater.rs — the learned linear scoring model.
//!
//! A rater is eight coefficients and an intercept over the category scores a
//! [`Fingering`](crate::core::fingering::Fingering) carries. The seed weights
//! below ship with the engine; [`Rater::fit`] re-learns them from user-rated
//! examples via ridge regression.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::fingering::{Fingering, NUM_SCORES};
use crate::core::ridge::{self, TrainError};

/// Regularization weight used when none is specified.
pub const DEFAULT_ALPHA: f64 = 1.0;

const SEED_COEFFICIENTS: [f64; NUM_SCORES] = [0.09, 0.28, 0.28, 0.18, 0.03, 0.03, 0.04, 0.07];

/// One rated training example: the category scores of a fingering and the
/// rating a user gave it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RatedSample {
    pub scores: [f64; NUM_SCORES],
    pub rating: f64,
}

impl RatedSample {
    /// Extract a sample from a fingering the user has rated.
    pub fn from_fingering(f: &Fingering) -> Option<Self> {
        Some(Self {
            scores: *f.category_scores(),
            rating: f.rating()?,
        })
    }
}

/// Linear combination of the eight category scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rater {
    pub coefficients: [f64; NUM_SCORES],
    pub intercept: f64,
}

impl Default for Rater {
    fn default() -> Self {
        Self {
            coefficients: SEED_COEFFICIENTS,
            intercept: 0.0,
        }
    }
}

impl Rater {
    pub fn from_coefficients(coefficients: [f64; NUM_SCORES], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Score a category-score vector.
    pub fn score(&self, scores: &[f64; NUM_SCORES]) -> f64 {
        self.coefficients
            .iter()
            .zip(scores)
            .map(|(c, s)| c * s)
            .sum::<f64>()
            + self.intercept
    }

    /// Score a fingering in place.
    pub fn rate(&self, fingering: &mut Fingering) {
        fingering.set_score(self.score(fingering.category_scores()));
    }

    /// Score a batch of fingerings in place.
    pub fn rate_all(&self, fingerings: &mut [Fingering]) {
        for f in fingerings {
            self.rate(f);
        }
    }

    /// Learn coefficients from rated samples with ridge weight `alpha`.
    /// Returns the fitted rater and the ℓ2 norm of its training residual.
    pub fn fit(samples: &[RatedSample], alpha: f64) -> Result<(Self, f64), TrainError> {
        if samples.is_empty() {
            return Err(TrainError::InsufficientData("no rated samples"));
        }
        let a = DMatrix::from_row_iterator(
            samples.len(),
            NUM_SCORES,
            samples.iter().flat_map(|s| s.scores),
        );
        let y = DVector::from_iterator(samples.len(), samples.iter().map(|s| s.rating));

        let fit = ridge::fit(&a, &y, alpha)?;
        let mut coefficients = [0.0; NUM_SCORES];
        for (dst, src) in coefficients.iter_mut().zip(fit.coef.iter()) {
            *dst = *src;
        }
        info!(
            samples = samples.len(),
            alpha,
            residual = fit.residual,
            "fitted rating coefficients {coefficients:?} + {:.6}",
            fit.intercept
        );
        Ok((
            Self {
                coefficients,
                intercept: fit.intercept,
            },
            fit.residual,
        ))
    }
}
