//! Zero-inflated Gamma quantile mapping of a single accumulated total.

use tracing::debug;

use crate::climatology::Climatology;
use crate::config::QmConfig;
use crate::error::QuantileMapError;
use crate::fit::fit_gamma;
use crate::gamma::{GammaDist, GammaParams};
use crate::result::{Correction, FallbackReason};
use crate::split::{ZeroMode, ZeroSplit};

/// Model and observed distributions fitted on the matched tails.
#[derive(Debug, Clone)]
struct FittedPair {
    model: GammaDist,
    observed: GammaDist,
}

/// Maps forecast totals from the model climatology onto the observed one.
///
/// Built once per segment from a [`Climatology`]; [`map`](Self::map) can
/// then be called for any number of forecast values. Holds no mutable
/// state.
#[derive(Debug, Clone)]
pub struct QuantileMapper {
    split: ZeroSplit,
    fitted: Result<FittedPair, FallbackReason>,
    saturated_prob: f64,
}

impl QuantileMapper {
    /// Splits the climatology at its zero mass and fits both tails.
    ///
    /// Tails of `config.min_sample_len()` values or fewer are not fitted;
    /// the mapper is still built and every [`map`](Self::map) call then
    /// returns the raw value as a [`Correction::Fallback`].
    ///
    /// # Errors
    ///
    /// Returns [`QuantileMapError::InvalidConfig`] for an invalid config
    /// and [`QuantileMapError::GammaConstruction`] if statrs rejects the
    /// fitted parameters.
    pub fn new(climatology: &Climatology, config: &QmConfig) -> Result<Self, QuantileMapError> {
        config.validate()?;
        let split = ZeroSplit::new(climatology.hindcast(), climatology.observed());
        let fitted = match fit_tails(&split, config) {
            Ok((model, observed)) => Ok(FittedPair {
                model: GammaDist::new(model)?,
                observed: GammaDist::new(observed)?,
            }),
            Err(reason) => Err(reason),
        };

        Ok(Self {
            split,
            fitted,
            saturated_prob: config.saturated_prob(),
        })
    }

    /// The zero-mass split the mapper was built on.
    pub fn split(&self) -> &ZeroSplit {
        &self.split
    }

    /// Fitted `(model, observed)` parameters, or `None` if fitting was skipped.
    pub fn params(&self) -> Option<(GammaParams, GammaParams)> {
        self.fitted
            .as_ref()
            .ok()
            .map(|p| (p.model.params(), p.observed.params()))
    }

    /// Corrects one accumulated forecast total.
    ///
    /// - Unfitted: the raw value, as a fallback.
    /// - Matched zero mass: values below the hindcast cutoff map to `0.0`;
    ///   others go through the CDF / quantile chain.
    /// - No zero mass: `0.0` maps to the smallest positive observation;
    ///   others go through the CDF / quantile chain.
    pub fn map(&self, fcst: f64) -> Correction {
        let pair = match &self.fitted {
            Ok(pair) => pair,
            Err(reason) => {
                return Correction::Fallback {
                    value: fcst,
                    reason: *reason,
                };
            }
        };

        match self.split.mode() {
            ZeroMode::Matched { cutoff } => {
                if fcst >= cutoff {
                    self.remap(pair, fcst)
                } else {
                    Correction::Corrected {
                        value: 0.0,
                        saturated: false,
                    }
                }
            }
            ZeroMode::NoZero => {
                if fcst != 0.0 {
                    self.remap(pair, fcst)
                } else {
                    Correction::Corrected {
                        value: self.split.observed_floor().unwrap_or(0.0),
                        saturated: false,
                    }
                }
            }
        }
    }

    fn remap(&self, pair: &FittedPair, fcst: f64) -> Correction {
        let q = self.split.zero_prob();
        let mut prob = q + (1.0 - q) * pair.model.cdf(fcst);
        let saturated = prob == 1.0;
        if saturated {
            prob = self.saturated_prob;
        }

        // Unreachable with a validated config (saturated_prob < 1).
        let mapped = pair.observed.quantile(prob);
        if mapped.is_infinite() {
            debug!(fcst, prob, "inverse CDF diverged, keeping raw value");
            return Correction::Fallback {
                value: fcst,
                reason: FallbackReason::DivergentInverse,
            };
        }

        Correction::Corrected {
            value: mapped,
            saturated,
        }
    }
}

/// Fits model and observed Gamma distributions, or says why not.
fn fit_tails(
    split: &ZeroSplit,
    config: &QmConfig,
) -> Result<(GammaParams, GammaParams), FallbackReason> {
    let hindcast_len = split.hindcast_tail().len();
    let observed_len = split.observed_tail().len();
    if hindcast_len <= config.min_sample_len() || observed_len <= config.min_sample_len() {
        debug!(hindcast_len, observed_len, "tail too short, skipping gamma fit");
        return Err(FallbackReason::InsufficientSample {
            hindcast_len,
            observed_len,
        });
    }

    let model = fit_gamma(split.hindcast_tail(), config.fit_method());
    let observed = fit_gamma(split.observed_tail(), config.fit_method());
    match (model, observed) {
        (Some(m), Some(o)) => {
            debug!(
                model_shape = m.shape(),
                model_scale = m.scale(),
                obs_shape = o.shape(),
                obs_scale = o.scale(),
                "fitted gamma tails"
            );
            Ok((m, o))
        }
        _ => Err(FallbackReason::FitFailed),
    }
}
