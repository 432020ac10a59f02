//! One decomposition step: signal = rotation + baseline.

use crate::baseline::{build_baseline, EnvelopeFallback};
use crate::math::detect_extrema;

/// Output of a single baseline extraction.
#[derive(Debug, Clone)]
pub struct StepOutput {
    /// High-frequency content removed at this step: `signal - baseline`.
    pub rotation: Vec<f64>,
    /// Smoother remainder, input to the next step.
    pub baseline: Vec<f64>,
    /// Number of maxima the upper envelope was built from.
    pub maxima: usize,
    /// Number of minima the lower envelope was built from.
    pub minima: usize,
    /// Envelopes that fell back to a constant.
    pub fallback: EnvelopeFallback,
}

/// Split `signal` into a rotation component and a baseline.
///
/// Runs extrema detection, builds the blended baseline and subtracts it.
/// `rotation[i] + baseline[i]` reproduces `signal[i]` up to rounding.
///
/// # Example
///
/// ```
/// use itd_decomposition::split;
///
/// let x: Vec<f64> = (0..50).map(|i| (i as f64 * 0.9).sin()).collect();
/// let step = split(&x, 0.32);
/// for i in 0..x.len() {
///     assert!((step.rotation[i] + step.baseline[i] - x[i]).abs() < 1e-12);
/// }
/// ```
#[must_use]
pub fn split(signal: &[f64], alpha: f64) -> StepOutput {
    let extrema = detect_extrema(signal);
    let (baseline, fallback) = build_baseline(signal, &extrema, alpha);

    let rotation = signal
        .iter()
        .zip(baseline.iter())
        .map(|(&x, &l)| x - l)
        .collect();

    StepOutput {
        rotation,
        baseline,
        maxima: extrema.maxima.len(),
        minima: extrema.minima.len(),
        fallback,
    }
}
