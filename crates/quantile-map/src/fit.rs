//! Gamma distribution fitting for positive climatology tails.

use gqmdes_stats::{mean, mean_ln, variance};
use statrs::function::gamma::digamma;

use crate::config::FitMethod;
use crate::gamma::GammaParams;

const MAX_NEWTON_ITER: usize = 100;
const NEWTON_TOL: f64 = 1e-12;

/// Fits a zero-location Gamma distribution to a strictly positive sample.
///
/// Returns `None` if the sample has fewer than 2 values, contains a
/// non-positive or non-finite value, or is degenerate (no spread).
/// Sample-length policy lives in the caller; this only refuses samples
/// that cannot be fitted at all.
pub fn fit_gamma(sample: &[f64], method: FitMethod) -> Option<GammaParams> {
    if sample.len() < 2 || sample.iter().any(|&x| !x.is_finite() || x <= 0.0) {
        return None;
    }
    match method {
        FitMethod::Mle => fit_gamma_mle(sample),
        FitMethod::Mme => fit_gamma_mme(sample),
    }
}

/// Maximum-likelihood fit with location fixed at zero.
///
/// The shape solves `ln(a) - digamma(a) = ln(mean) - mean(ln x)`; the scale
/// is then `mean / a`. Newton iteration starts from the Thom/Minka
/// closed-form approximation.
pub(crate) fn fit_gamma_mle(values: &[f64]) -> Option<GammaParams> {
    let m = mean(values);
    let s = m.ln() - mean_ln(values);
    // s >= 0 by Jensen; s == 0 only for a constant sample.
    if !s.is_finite() || s <= 1e-12 {
        return None;
    }

    let mut a = (3.0 - s + ((s - 3.0).powi(2) + 24.0 * s).sqrt()) / (12.0 * s);
    for _ in 0..MAX_NEWTON_ITER {
        let f = a.ln() - digamma(a) - s;
        let df = 1.0 / a - trigamma(a);
        let mut next = a - f / df;
        if !next.is_finite() || next <= 0.0 {
            next = a / 2.0;
        }
        let done = (next - a).abs() <= NEWTON_TOL * a;
        a = next;
        if done {
            break;
        }
    }

    GammaParams::new(a, m / a)
}

/// Method-of-moments fit (shape = mean²/var, scale = var/mean).
pub(crate) fn fit_gamma_mme(values: &[f64]) -> Option<GammaParams> {
    let var = variance(values);
    if var <= 1e-10 {
        return None;
    }
    GammaParams::from_moments(mean(values), var)
}

/// Trigamma function for `x > 0`: recurrence up to `x >= 6`, then the
/// asymptotic series.
fn trigamma(mut x: f64) -> f64 {
    let mut acc = 0.0;
    while x < 6.0 {
        acc += 1.0 / (x * x);
        x += 1.0;
    }
    let x2 = 1.0 / (x * x);
    acc + 1.0 / x
        + x2 / 2.0
        + (1.0 / x) * x2 * (1.0 / 6.0 - x2 * (1.0 / 30.0 - x2 * (1.0 / 42.0 - x2 / 30.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Gamma as GammaDist};

    fn sample(shape: f64, scale: f64, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let dist = GammaDist::new(shape, scale).unwrap();
        (0..n).map(|_| dist.sample(&mut rng)).collect()
    }

    #[test]
    fn trigamma_known_values() {
        // psi'(1) = pi^2 / 6, psi'(0.5) = pi^2 / 2
        let pi2 = std::f64::consts::PI.powi(2);
        assert_relative_eq!(trigamma(1.0), pi2 / 6.0, epsilon = 1e-10);
        assert_relative_eq!(trigamma(0.5), pi2 / 2.0, epsilon = 1e-10);
        assert_relative_eq!(trigamma(20.0), 0.051271096, epsilon = 1e-8);
    }

    #[test]
    fn mle_recovers_parameters() {
        let values = sample(3.0, 40.0, 2000, 7);
        let fit = fit_gamma(&values, FitMethod::Mle).expect("fit should succeed");
        assert_relative_eq!(fit.shape(), 3.0, epsilon = 0.3);
        assert_relative_eq!(fit.scale(), 40.0, epsilon = 4.0);
    }

    #[test]
    fn mle_satisfies_score_equation() {
        let values = sample(1.5, 10.0, 300, 11);
        let fit = fit_gamma_mle(&values).unwrap();
        let s = mean(&values).ln() - mean_ln(&values);
        let residual = fit.shape().ln() - digamma(fit.shape()) - s;
        assert!(residual.abs() < 1e-9, "residual {residual}");
        // Scale is pinned by the first moment.
        assert_relative_eq!(fit.mean(), mean(&values), epsilon = 1e-9);
    }

    #[test]
    fn mme_recovers_mean() {
        let values = sample(2.0, 3.0, 500, 99);
        let fit = fit_gamma(&values, FitMethod::Mme).unwrap();
        assert_relative_eq!(fit.mean(), 6.0, epsilon = 6.0 * 0.15);
    }

    #[test]
    fn constant_sample_not_fitted() {
        let values = vec![5.0; 30];
        assert!(fit_gamma(&values, FitMethod::Mle).is_none());
        assert!(fit_gamma(&values, FitMethod::Mme).is_none());
    }

    #[test]
    fn non_positive_values_rejected() {
        assert!(fit_gamma(&[1.0, 2.0, 0.0], FitMethod::Mle).is_none());
        assert!(fit_gamma(&[1.0, -2.0, 3.0], FitMethod::Mle).is_none());
        assert!(fit_gamma(&[1.0, f64::NAN, 3.0], FitMethod::Mle).is_none());
    }

    #[test]
    fn too_short_rejected() {
        assert!(fit_gamma(&[], FitMethod::Mle).is_none());
        assert!(fit_gamma(&[4.0], FitMethod::Mle).is_none());
    }
}
