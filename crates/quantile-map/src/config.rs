//! Configuration for quantile mapping.

use crate::error::QuantileMapError;

/// Method used to fit gamma distribution parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMethod {
    /// Maximum likelihood with location fixed at zero.
    #[default]
    Mle,
    /// Method of moments estimation.
    Mme,
}

/// Configuration for the zero-inflated Gamma quantile mapping.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use gqmdes_quantile_map::{FitMethod, QmConfig};
///
/// let config = QmConfig::new()
///     .with_min_sample_len(20)
///     .with_fit_method(FitMethod::Mme);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct QmConfig {
    min_sample_len: usize,
    saturated_prob: f64,
    fit_method: FitMethod,
}

impl QmConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `min_sample_len = 15`, `saturated_prob = 0.99`,
    /// `fit_method = Mle`.
    pub fn new() -> Self {
        Self {
            min_sample_len: 15,
            saturated_prob: 0.99,
            fit_method: FitMethod::Mle,
        }
    }

    // --- Builder methods ---

    /// Sets the sample length a tail must exceed before it is fitted.
    pub fn with_min_sample_len(mut self, n: usize) -> Self {
        self.min_sample_len = n;
        self
    }

    /// Sets the probability substituted when the mapped probability is exactly 1.
    pub fn with_saturated_prob(mut self, p: f64) -> Self {
        self.saturated_prob = p;
        self
    }

    /// Sets the distribution fitting method.
    pub fn with_fit_method(mut self, m: FitMethod) -> Self {
        self.fit_method = m;
        self
    }

    // --- Accessors ---

    /// Tails with this many values or fewer are not fitted.
    pub fn min_sample_len(&self) -> usize {
        self.min_sample_len
    }

    /// Probability used in place of a saturated (== 1) probability.
    pub fn saturated_prob(&self) -> f64 {
        self.saturated_prob
    }

    /// Returns the distribution fitting method.
    pub fn fit_method(&self) -> FitMethod {
        self.fit_method
    }

    /// Validates this configuration.
    ///
    /// `saturated_prob` must be finite and in the open interval (0, 1).
    pub fn validate(&self) -> Result<(), QuantileMapError> {
        if !self.saturated_prob.is_finite()
            || self.saturated_prob <= 0.0
            || self.saturated_prob >= 1.0
        {
            return Err(QuantileMapError::InvalidConfig {
                reason: format!(
                    "saturated_prob must be in (0, 1) and finite, got {}",
                    self.saturated_prob
                ),
            });
        }

        Ok(())
    }
}

impl Default for QmConfig {
    fn default() -> Self {
        Self::new()
    }
}
