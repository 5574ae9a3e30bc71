//! Sample statistics helpers for precipitation climatologies.

use std::cmp::Ordering;

/// Sorted view of a sample together with its zero-mass bookkeeping.
///
/// Built from a copy of the input; the caller's slice is never reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStatistics {
    sorted: Vec<f64>,
    zero_count: usize,
}

impl SeriesStatistics {
    /// Sorts a copy of `sample` ascending and counts its exact zeros.
    ///
    /// # Panics
    ///
    /// Panics if `sample` is empty.
    pub fn new(sample: &[f64]) -> Self {
        assert!(
            !sample.is_empty(),
            "SeriesStatistics: sample must not be empty"
        );
        let sorted = sort_ascending(sample);
        let zero_count = sorted.iter().filter(|&&x| x == 0.0).count();
        Self { sorted, zero_count }
    }

    /// The sample sorted ascending.
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    /// Number of elements exactly equal to zero.
    pub fn zero_count(&self) -> usize {
        self.zero_count
    }

    /// Sample length.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Always `false`; construction rejects empty samples.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Zero probability `zero_count / len`.
    pub fn zero_prob(&self) -> f64 {
        self.zero_count as f64 / self.sorted.len() as f64
    }

    /// Strictly positive elements, still in ascending order.
    pub fn non_zero(&self) -> Vec<f64> {
        non_zero(&self.sorted)
    }
}

/// Returns an ascending copy of `data`. NaN sorts last.
pub fn sort_ascending(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or_else(|| nan_last(a, b)));
    sorted
}

fn nan_last(a: &f64, b: &f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Elements that are strictly positive, in their original order.
pub fn non_zero(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|&x| x > 0.0).collect()
}

/// Sum ignoring NaN values. Returns 0.0 if empty or all NaN.
pub fn nansum(data: &[f64]) -> f64 {
    data.iter().filter(|x| !x.is_nan()).sum()
}

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Mean of the natural logarithm. Caller guarantees strictly positive input.
pub fn mean_ln(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().map(|x| x.ln()).sum::<f64>() / data.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn statistics_sorts_and_counts_zeros() {
        let stats = SeriesStatistics::new(&[5.0, 0.0, 2.0, 0.0, 1.0]);
        assert_eq!(stats.sorted(), &[0.0, 0.0, 1.0, 2.0, 5.0]);
        assert_eq!(stats.zero_count(), 2);
        assert_eq!(stats.len(), 5);
        assert_relative_eq!(stats.zero_prob(), 0.4, epsilon = 1e-15);
        assert_eq!(stats.non_zero(), vec![1.0, 2.0, 5.0]);
    }

    #[test]
    fn statistics_no_zeros() {
        let stats = SeriesStatistics::new(&[3.0, 1.0]);
        assert_eq!(stats.zero_count(), 0);
        assert_eq!(stats.zero_prob(), 0.0);
    }

    #[test]
    fn statistics_input_untouched() {
        let data = vec![3.0, 1.0, 2.0];
        let _ = SeriesStatistics::new(&data);
        assert_eq!(data, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "SeriesStatistics: sample must not be empty")]
    fn statistics_empty_panics() {
        SeriesStatistics::new(&[]);
    }

    #[test]
    fn sort_puts_nan_last() {
        let sorted = sort_ascending(&[2.0, f64::NAN, 1.0]);
        assert_eq!(sorted[0], 1.0);
        assert_eq!(sorted[1], 2.0);
        assert!(sorted[2].is_nan());
    }

    #[test]
    fn test_nansum() {
        assert_relative_eq!(nansum(&[1.0, f64::NAN, 2.5]), 3.5, epsilon = 1e-15);
        assert_eq!(nansum(&[]), 0.0);
        assert_eq!(nansum(&[f64::NAN]), 0.0);
    }

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_variance_basic() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(variance(&data), 4.571429, epsilon = 1e-4);
    }

    #[test]
    fn test_variance_single() {
        assert_eq!(variance(&[5.0]), 0.0);
    }

    #[test]
    fn test_mean_ln() {
        let e = std::f64::consts::E;
        assert_relative_eq!(mean_ln(&[1.0, e * e]), 1.0, epsilon = 1e-12);
    }
}
