//! Per-year accumulated totals for one segment.

use crate::error::QuantileMapError;

/// Hindcast and observed totals for one lead segment, one value per
/// historical year.
///
/// The two samples are expected to cover the same years, but differing
/// lengths are tolerated: the zero-mass matching rescales by the length
/// ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct Climatology {
    hindcast: Vec<f64>,
    observed: Vec<f64>,
}

impl Climatology {
    /// Validates and wraps a pair of climatologies.
    ///
    /// # Errors
    ///
    /// Returns [`QuantileMapError::EmptyClimatology`] if either sample is
    /// empty and [`QuantileMapError::InvalidValue`] for a negative or
    /// non-finite total.
    pub fn new(hindcast: Vec<f64>, observed: Vec<f64>) -> Result<Self, QuantileMapError> {
        check_sample(&hindcast, "hindcast")?;
        check_sample(&observed, "observed")?;
        Ok(Self { hindcast, observed })
    }

    /// Model totals from past runs.
    pub fn hindcast(&self) -> &[f64] {
        &self.hindcast
    }

    /// Observed totals for the same windows.
    pub fn observed(&self) -> &[f64] {
        &self.observed
    }

    /// `Some((hindcast_len, observed_len))` when the lengths differ.
    pub fn length_mismatch(&self) -> Option<(usize, usize)> {
        (self.hindcast.len() != self.observed.len())
            .then_some((self.hindcast.len(), self.observed.len()))
    }
}

fn check_sample(sample: &[f64], which: &'static str) -> Result<(), QuantileMapError> {
    if sample.is_empty() {
        return Err(QuantileMapError::EmptyClimatology { which });
    }
    match sample
        .iter()
        .position(|&x| !x.is_finite() || x < 0.0)
    {
        Some(index) => Err(QuantileMapError::InvalidValue {
            which,
            index,
            value: sample[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zeros() {
        let clim = Climatology::new(vec![0.0, 1.0], vec![0.0, 0.0, 3.0]).unwrap();
        assert_eq!(clim.hindcast(), &[0.0, 1.0]);
        assert_eq!(clim.length_mismatch(), Some((2, 3)));
    }

    #[test]
    fn equal_lengths_have_no_mismatch() {
        let clim = Climatology::new(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
        assert_eq!(clim.length_mismatch(), None);
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!(
            Climatology::new(vec![], vec![1.0]),
            Err(QuantileMapError::EmptyClimatology { which: "hindcast" })
        ));
        assert!(matches!(
            Climatology::new(vec![1.0], vec![]),
            Err(QuantileMapError::EmptyClimatology { which: "observed" })
        ));
    }

    #[test]
    fn negative_and_nan_rejected() {
        assert!(matches!(
            Climatology::new(vec![1.0, -0.5], vec![1.0]),
            Err(QuantileMapError::InvalidValue { index: 1, .. })
        ));
        assert!(matches!(
            Climatology::new(vec![1.0], vec![f64::NAN]),
            Err(QuantileMapError::InvalidValue {
                which: "observed",
                index: 0,
                ..
            })
        ));
    }
}
