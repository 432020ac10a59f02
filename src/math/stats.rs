//! Scalar reductions over a signal.
//!
//! All moments are population (biased) estimators, matching how the feature
//! record is defined.

/// Sum of squared samples.
#[inline]
#[must_use]
pub fn energy(signal: &[f64]) -> f64 {
    signal.iter().map(|v| v * v).sum()
}

/// Arithmetic mean, `0.0` for an empty signal.
#[must_use]
pub fn mean(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().sum::<f64>() / signal.len() as f64
}

/// Root mean square, `0.0` for an empty signal.
#[must_use]
pub fn rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    (energy(signal) / signal.len() as f64).sqrt()
}

/// Central moment of order `k` around `mean`.
#[must_use]
pub fn central_moment(signal: &[f64], mean: f64, k: i32) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|v| (v - mean).powi(k)).sum::<f64>() / signal.len() as f64
}

/// Elementwise sum of equally long signals.
///
/// Used to check the reconstruction law of a decomposition.
#[must_use]
pub fn sum_signals<S: AsRef<[f64]>>(signals: &[S], n: usize) -> Vec<f64> {
    let mut out = vec![0.0; n];
    for s in signals {
        for (acc, v) in out.iter_mut().zip(s.as_ref()) {
            *acc += v;
        }
    }
    out
}
