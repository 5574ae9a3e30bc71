//! Gamma distribution parameters and the statrs bridge.
//!
//! Location is always zero: precipitation totals are non-negative.

use statrs::distribution::{ContinuousCDF, Gamma};

use crate::error::QuantileMapError;

/// Validated parameters for a zero-location Gamma distribution
/// (shape/scale convention).
///
/// Both `shape` (alpha) and `scale` (beta) are finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaParams {
    shape: f64,
    scale: f64,
}

impl GammaParams {
    /// Creates parameters after checking both are finite and positive.
    pub fn new(shape: f64, scale: f64) -> Option<Self> {
        if shape.is_finite() && shape > 0.0 && scale.is_finite() && scale > 0.0 {
            Some(Self { shape, scale })
        } else {
            None
        }
    }

    /// Method-of-moments estimate: shape = mean² / var, scale = var / mean.
    ///
    /// Returns `None` if `mean` or `var` are not finite and positive.
    pub fn from_moments(mean: f64, var: f64) -> Option<Self> {
        if !mean.is_finite() || mean <= 0.0 || !var.is_finite() || var <= 0.0 {
            return None;
        }
        Self::new((mean * mean) / var, var / mean)
    }

    /// Shape parameter (alpha).
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Scale parameter (beta).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Distribution mean (shape * scale).
    pub fn mean(&self) -> f64 {
        self.shape * self.scale
    }

    /// Rate parameter (1 / scale); statrs parameterises Gamma by rate.
    pub(crate) fn rate(&self) -> f64 {
        1.0 / self.scale
    }
}

/// A constructed distribution paired with the parameters it came from.
#[derive(Debug, Clone)]
pub(crate) struct GammaDist {
    params: GammaParams,
    dist: Gamma,
}

impl GammaDist {
    pub(crate) fn new(params: GammaParams) -> Result<Self, QuantileMapError> {
        let dist = Gamma::new(params.shape(), params.rate()).map_err(|e| {
            QuantileMapError::GammaConstruction {
                shape: params.shape(),
                scale: params.scale(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { params, dist })
    }

    pub(crate) fn params(&self) -> GammaParams {
        self.params
    }

    /// CDF at `x`; 0 for `x <= 0`.
    pub(crate) fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 { 0.0 } else { self.dist.cdf(x) }
    }

    /// Quantile function. `p` must lie in [0, 1]; `p == 1` gives infinity.
    pub(crate) fn quantile(&self, p: f64) -> f64 {
        self.dist.inverse_cdf(p)
    }
}
