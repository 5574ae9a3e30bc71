//! Error types for the gqmdes-quantile-map crate.

/// Error type for all fallible operations in the gqmdes-quantile-map crate.
///
/// These cover malformed inputs only. Degraded corrections (short samples,
/// divergent quantiles) are not errors; they surface as
/// [`Correction::Fallback`](crate::Correction::Fallback).
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuantileMapError {
    /// Returned when a climatology sample is empty.
    #[error("{which} climatology is empty")]
    EmptyClimatology {
        /// Which climatology (`"hindcast"` or `"observed"`).
        which: &'static str,
    },

    /// Returned when a series contains a negative or non-finite value.
    #[error("invalid {which} value at index {index}: {value} (must be finite and >= 0)")]
    InvalidValue {
        /// Which series the value came from.
        which: &'static str,
        /// Position of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when a daily series is shorter than the segments it must cover.
    #[error("daily series has {got} values, segments need {needed}")]
    SeriesTooShort {
        /// Sum of segment day-counts.
        needed: usize,
        /// Actual series length.
        got: usize,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when statrs rejects fitted Gamma parameters.
    ///
    /// statrs errors are not `Clone`, so only the message is kept.
    #[error("cannot build gamma(shape={shape}, scale={scale}): {message}")]
    GammaConstruction {
        /// Fitted shape.
        shape: f64,
        /// Fitted scale.
        scale: f64,
        /// statrs error message.
        message: String,
    },
}
