//! Result types for quantile mapping.

/// Why a correction fell back to the raw forecast value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// A matched tail had too few values to fit a distribution.
    InsufficientSample {
        /// Values in the matched hindcast tail.
        hindcast_len: usize,
        /// Values in the observed tail.
        observed_len: usize,
    },
    /// A tail had enough values but no Gamma fit was possible
    /// (e.g. every value identical).
    FitFailed,
    /// The observed quantile function returned infinity.
    DivergentInverse,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientSample {
                hindcast_len,
                observed_len,
            } => write!(
                f,
                "insufficient sample (hindcast tail {hindcast_len}, observed tail {observed_len})"
            ),
            Self::FitFailed => write!(f, "gamma fit failed"),
            Self::DivergentInverse => write!(f, "inverse CDF diverged"),
        }
    }
}

/// Outcome of mapping one accumulated forecast total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    /// The value was mapped onto the observed distribution.
    Corrected {
        /// Bias-corrected total.
        value: f64,
        /// The mapped probability was exactly 1 and had to be clamped.
        saturated: bool,
    },
    /// No correction was possible; `value` is the raw forecast.
    Fallback {
        /// The raw forecast total, unchanged.
        value: f64,
        /// Why the correction was skipped.
        reason: FallbackReason,
    },
}

impl Correction {
    /// The total to use downstream, corrected or not.
    pub fn value(&self) -> f64 {
        match *self {
            Self::Corrected { value, .. } | Self::Fallback { value, .. } => value,
        }
    }

    /// Returns `true` for [`Correction::Fallback`].
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// The fallback reason, if any.
    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match *self {
            Self::Fallback { reason, .. } => Some(reason),
            Self::Corrected { .. } => None,
        }
    }
}

/// One corrected lead segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentCorrection {
    raw_total: f64,
    correction: Correction,
    daily: Vec<f64>,
}

impl SegmentCorrection {
    pub(crate) fn new(raw_total: f64, correction: Correction, daily: Vec<f64>) -> Self {
        Self {
            raw_total,
            correction,
            daily,
        }
    }

    /// Accumulated raw forecast total.
    pub fn raw_total(&self) -> f64 {
        self.raw_total
    }

    /// Mapping outcome for the segment total.
    pub fn correction(&self) -> Correction {
        self.correction
    }

    /// Corrected daily values, same length as the raw segment.
    pub fn daily(&self) -> &[f64] {
        &self.daily
    }
}

/// Corrected forecast across all lead segments.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalCorrection {
    segments: Vec<SegmentCorrection>,
    daily: Vec<f64>,
}

impl SeasonalCorrection {
    pub(crate) fn new(segments: Vec<SegmentCorrection>) -> Self {
        let daily = segments
            .iter()
            .flat_map(|s| s.daily().iter().copied())
            .collect();
        Self { segments, daily }
    }

    /// Per-segment results in chronological order.
    pub fn segments(&self) -> &[SegmentCorrection] {
        &self.segments
    }

    /// The concatenated corrected daily series.
    pub fn daily(&self) -> &[f64] {
        &self.daily
    }

    /// Consumes `self` and returns the owned daily series.
    pub fn into_daily(self) -> Vec<f64> {
        self.daily
    }

    /// `(segment index, reason)` for every segment that fell back.
    pub fn fallbacks(&self) -> Vec<(usize, FallbackReason)> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.correction().fallback_reason().map(|r| (i, r)))
            .collect()
    }
}
