//! Segment accumulation and proportional downscaling.

use gqmdes_stats::nansum;

use crate::error::QuantileMapError;

/// A contiguous slice of the daily forecast and its accumulated total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSlice<'a> {
    days: &'a [f64],
    total: f64,
}

impl<'a> SegmentSlice<'a> {
    /// Wraps a daily slice, summing it with NaN values ignored.
    pub fn new(days: &'a [f64]) -> Self {
        Self {
            days,
            total: nansum(days),
        }
    }

    /// Raw daily values of the segment.
    pub fn days(&self) -> &'a [f64] {
        self.days
    }

    /// Accumulated total (NaN-ignoring sum).
    pub fn total(&self) -> f64 {
        self.total
    }
}

/// Splits a daily series into `N` contiguous segments by day-count.
///
/// Values past the last segment are ignored.
///
/// # Errors
///
/// Returns [`QuantileMapError::SeriesTooShort`] if `daily` has fewer values
/// than the day-counts add up to.
pub fn accumulate<const N: usize>(
    daily: &[f64],
    day_counts: [usize; N],
) -> Result<[SegmentSlice<'_>; N], QuantileMapError> {
    let needed: usize = day_counts.iter().sum();
    if daily.len() < needed {
        return Err(QuantileMapError::SeriesTooShort {
            needed,
            got: daily.len(),
        });
    }

    let mut start = 0;
    Ok(std::array::from_fn(|i| {
        let end = start + day_counts[i];
        let slice = SegmentSlice::new(&daily[start..end]);
        start = end;
        slice
    }))
}

/// Rescales a segment's daily shape to a corrected total.
///
/// Each day becomes `(day / raw_total) * corrected_total`. A zero raw
/// total has no shape to rescale, so every day is set to `0.0`.
pub fn downscale(days: &[f64], raw_total: f64, corrected_total: f64) -> Vec<f64> {
    if raw_total == 0.0 {
        return vec![0.0; days.len()];
    }
    days.iter()
        .map(|&d| (d / raw_total) * corrected_total)
        .collect()
}
