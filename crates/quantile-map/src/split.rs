//! Zero-mass matching between a hindcast and an observed climatology.
//!
//! Observed totals that are exactly zero form a point mass the Gamma
//! distribution cannot represent. The same proportion of the (sorted)
//! hindcast is set aside as the model's "dry" region, and the Gamma fits
//! are made on what remains of each sample.

use gqmdes_stats::{SeriesStatistics, non_zero};

/// How the zero mass was handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZeroMode {
    /// Observations contain zeros. Hindcast values below `cutoff` fall in
    /// the zero-mass region.
    Matched {
        /// Largest hindcast value inside the matched zero mass.
        cutoff: f64,
    },
    /// Observations contain no zeros.
    NoZero,
}

/// Result of splitting the two climatologies into zero mass and
/// continuous tails.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroSplit {
    mode: ZeroMode,
    zero_prob: f64,
    hindcast_tail: Vec<f64>,
    observed_tail: Vec<f64>,
}

impl ZeroSplit {
    /// Splits `hindcast` and `observed` into matched continuous tails.
    ///
    /// With `n0` zeros among `N_obs` observations, the hindcast zero count
    /// is `k = floor(n0 * N_hind / N_obs)`. The cutoff is the hindcast
    /// value at sorted index `k - 1`, and the hindcast tail is every
    /// positive value from sorted index `k` on.
    ///
    /// When `k == 0` (a hindcast too short to carry any of the zero mass)
    /// the hindcast tail is left empty, which forces the
    /// insufficient-sample fallback downstream.
    ///
    /// # Panics
    ///
    /// Panics if either climatology is empty.
    pub fn new(hindcast: &[f64], observed: &[f64]) -> Self {
        let hind = SeriesStatistics::new(hindcast);
        let obs = SeriesStatistics::new(observed);
        let n0 = obs.zero_count();
        let zero_prob = obs.zero_prob();
        let observed_tail = obs.non_zero();

        if n0 == 0 {
            return Self {
                mode: ZeroMode::NoZero,
                zero_prob,
                hindcast_tail: hind.non_zero(),
                observed_tail,
            };
        }

        let ratio = hind.len() as f64 / obs.len() as f64;
        let k = (n0 as f64 * ratio).floor() as usize;
        let sorted = hind.sorted();

        let (cutoff, hindcast_tail) = if k == 0 {
            (f64::INFINITY, Vec::new())
        } else {
            (sorted[k - 1], non_zero(&sorted[k..]))
        };

        Self {
            mode: ZeroMode::Matched { cutoff },
            zero_prob,
            hindcast_tail,
            observed_tail,
        }
    }

    /// Zero-handling mode.
    pub fn mode(&self) -> ZeroMode {
        self.mode
    }

    /// Observed zero probability `q`.
    pub fn zero_prob(&self) -> f64 {
        self.zero_prob
    }

    /// Positive hindcast values to fit the model distribution on (ascending).
    pub fn hindcast_tail(&self) -> &[f64] {
        &self.hindcast_tail
    }

    /// Positive observed values to fit the observed distribution on (ascending).
    pub fn observed_tail(&self) -> &[f64] {
        &self.observed_tail
    }

    /// Smallest positive observation, if any.
    pub fn observed_floor(&self) -> Option<f64> {
        self.observed_tail.first().copied()
    }
}
